use std::{
  collections::HashMap,
  fs::File,
  io::{self, BufRead, BufReader},
  path::Path,
};

use thiserror::Error;

use revery_shared::similarity::DimensionMismatch;

use crate::ranker::top_n;

#[derive(Debug, Error)]
pub enum VectorTableError {
  #[error("failed to read vector table: {0}")]
  Io(#[from] io::Error),
  #[error("line {line}: malformed coordinate {value:?}")]
  MalformedCoordinate { line: usize, value: String },
  #[error("line {line}: expected {expected} coordinates, found {found}")]
  DimensionMismatch {
    line: usize,
    expected: usize,
    found: usize,
  },
  #[error("line {line}: missing word")]
  MissingWord { line: usize },
  #[error("vector table is empty")]
  Empty,
}

/// Immutable word → coordinates mapping loaded from a `.vec` style file.
///
/// Every line is `word c1 c2 ... cD`, separated by single spaces. The first
/// line fixes `D` for the whole table.
#[derive(Debug, Clone)]
pub struct VectorTable {
  dim: usize,
  words: HashMap<String, Box<[f32]>>,
}

impl VectorTable {
  /// Load a table from a file on disk.
  ///
  /// # Errors
  ///
  /// Fails on the first I/O error or malformed line; no partial table is returned.
  pub fn load(path: &Path) -> Result<Self, VectorTableError> {
    let file = File::open(path)?;
    Self::from_reader(BufReader::new(file))
  }

  /// Parse a table from any buffered reader.
  ///
  /// # Errors
  ///
  /// See [`VectorTable::load`].
  pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, VectorTableError> {
    let mut dim = None;
    let mut words = HashMap::new();

    for (idx, line) in reader.lines().enumerate() {
      let line = line?;
      let (word, coords) = parse_line(idx + 1, line.trim_end())?;

      let expected = *dim.get_or_insert(coords.len());
      if coords.len() != expected || expected == 0 {
        return Err(VectorTableError::DimensionMismatch {
          line: idx + 1,
          expected,
          found: coords.len(),
        });
      }

      words.insert(word.to_owned(), coords);
    }

    let dim = dim.ok_or(VectorTableError::Empty)?;
    Ok(Self { dim, words })
  }

  #[must_use]
  pub const fn dim(&self) -> usize {
    self.dim
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.words.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  /// Coordinates of `word`, matched exactly (no case folding).
  #[must_use]
  pub fn get(&self, word: &str) -> Option<&[f32]> {
    self.words.get(word).map(AsRef::as_ref)
  }

  /// The `n` vocabulary words closest to `vector`, most similar first.
  ///
  /// Words tie-break alphabetically so the answer does not depend on hash order.
  ///
  /// # Errors
  ///
  /// Fails if `vector` does not have the table's dimension.
  pub fn closest_words(&self, vector: &[f32], n: usize) -> Result<Vec<&str>, DimensionMismatch> {
    let mut entries: Vec<(&str, &[f32])> = self
      .words
      .iter()
      .map(|(word, coords)| (word.as_str(), coords.as_ref()))
      .collect();
    entries.sort_unstable_by_key(|(word, _)| *word);

    top_n(
      entries.into_iter().map(|(word, coords)| (coords, word)),
      vector,
      n,
    )
  }
}

fn parse_line(line_no: usize, line: &str) -> Result<(&str, Box<[f32]>), VectorTableError> {
  let mut fields = line.split(' ');
  let word = match fields.next() {
    Some(word) if !word.is_empty() => word,
    _ => return Err(VectorTableError::MissingWord { line: line_no }),
  };

  let coords = fields
    .map(|field| match field.parse::<f32>() {
      Ok(value) if value.is_finite() => Ok(value),
      _ => Err(VectorTableError::MalformedCoordinate {
        line: line_no,
        value: field.to_owned(),
      }),
    })
    .collect::<Result<Box<[f32]>, _>>()?;

  Ok((word, coords))
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  fn table(src: &str) -> Result<VectorTable, VectorTableError> {
    VectorTable::from_reader(src.as_bytes())
  }

  #[test]
  fn parses_words_and_dimension() {
    let t = table("dog 1 0 0.5\ncat 0 1 -0.25\n").unwrap();
    assert_eq!(t.dim(), 3);
    assert_eq!(t.len(), 2);
    assert_eq!(t.get("dog"), Some(&[1.0, 0.0, 0.5][..]));
    assert_eq!(t.get("cat"), Some(&[0.0, 1.0, -0.25][..]));
  }

  #[test]
  fn lookup_is_case_sensitive() {
    let t = table("Dog 1 0\n").unwrap();
    assert!(t.get("dog").is_none());
    assert!(t.get("Dog").is_some());
  }

  #[test]
  fn tolerates_trailing_whitespace() {
    let t = table("dog 1 0 \r\ncat 0 1\n").unwrap();
    assert_eq!(t.dim(), 2);
    assert_eq!(t.get("dog"), Some(&[1.0, 0.0][..]));
  }

  #[test]
  fn later_duplicate_wins() {
    let t = table("dog 1 0\ndog 0 1\n").unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(t.get("dog"), Some(&[0.0, 1.0][..]));
  }

  #[test]
  fn non_numeric_coordinate_fails_whole_load() {
    let err = table("dog 1 0\ncat 0 x\nfox 1 1\n").unwrap_err();
    assert!(matches!(
      err,
      VectorTableError::MalformedCoordinate { line: 2, ref value } if value == "x"
    ));
  }

  #[test]
  fn non_finite_coordinate_is_malformed() {
    assert!(matches!(
      table("dog NaN 0\n").unwrap_err(),
      VectorTableError::MalformedCoordinate { line: 1, .. }
    ));
    assert!(matches!(
      table("dog 1 0\ncat inf 0\n").unwrap_err(),
      VectorTableError::MalformedCoordinate { line: 2, .. }
    ));
  }

  #[test]
  fn field_count_must_match_first_line() {
    let err = table("dog 1 0\ncat 0 1 2\n").unwrap_err();
    assert!(matches!(
      err,
      VectorTableError::DimensionMismatch {
        line: 2,
        expected: 2,
        found: 3
      }
    ));
  }

  #[test]
  fn word_without_coordinates_is_rejected() {
    assert!(matches!(
      table("dog\n").unwrap_err(),
      VectorTableError::DimensionMismatch { line: 1, .. }
    ));
  }

  #[test]
  fn blank_line_is_rejected() {
    assert!(matches!(
      table("dog 1 0\n\ncat 0 1\n").unwrap_err(),
      VectorTableError::MissingWord { line: 2 }
    ));
  }

  #[test]
  fn empty_input_is_rejected() {
    assert!(matches!(table("").unwrap_err(), VectorTableError::Empty));
  }

  #[test]
  fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "dog 1 0").unwrap();
    writeln!(file, "cat 0 1").unwrap();

    let t = VectorTable::load(file.path()).unwrap();
    assert_eq!(t.len(), 2);
  }

  #[test]
  fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = VectorTable::load(&dir.path().join("absent.vec")).unwrap_err();
    assert!(matches!(err, VectorTableError::Io(_)));
  }

  #[test]
  fn closest_words_ranks_vocabulary() {
    let t = table("dog 1 0\npuppy 0.9 0.1\ncat 0 1\n").unwrap();
    let words = t.closest_words(&[1.0, 0.0], 2).unwrap();
    assert_eq!(words, vec!["dog", "puppy"]);
  }
}
