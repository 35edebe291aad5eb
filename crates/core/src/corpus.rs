use std::{
  collections::BTreeMap,
  fs::File,
  io::{self, BufReader, Read},
  path::Path,
};

use revery_shared::similarity::DimensionMismatch;
use thiserror::Error;

use crate::{
  Document, RawDocument, VectorTable,
  ranker::top_n,
  vectorize::is_zero,
};

#[derive(Debug, Error)]
pub enum CorpusError {
  #[error("failed to read documents: {0}")]
  Io(#[from] io::Error),
  #[error("failed to parse documents: {0}")]
  Json(#[from] serde_json::Error),
}

/// The searchable, pre-vectorized document set.
///
/// Built once and then only read. Documents without a usable vector are
/// dropped at build time, since a zero vector can never rank.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
  documents: Vec<Document>,
  dropped: usize,
}

impl Corpus {
  /// Read a documents JSON file (an object keyed by document id) and build
  /// the corpus from it.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be read or is not valid documents JSON.
  pub fn load(path: &Path, table: &VectorTable) -> Result<Self, CorpusError> {
    let file = File::open(path)?;
    Self::from_reader(BufReader::new(file), table)
  }

  /// See [`Corpus::load`].
  ///
  /// # Errors
  ///
  /// Fails if the input is not valid documents JSON.
  pub fn from_reader<R: Read>(reader: R, table: &VectorTable) -> Result<Self, CorpusError> {
    let raw: BTreeMap<String, RawDocument> = serde_json::from_reader(reader)?;
    Ok(Self::build(
      raw.into_iter().map(|(key, mut doc)| {
        if doc.id.is_empty() {
          doc.id = key;
        }
        doc
      }),
      table,
    ))
  }

  /// Vectorize every document and keep those with a non-zero vector, in
  /// input order.
  pub fn build<I>(raw_documents: I, table: &VectorTable) -> Self
  where
    I: IntoIterator<Item = RawDocument>,
  {
    let mut documents = Vec::new();
    let mut dropped = 0;

    for raw in raw_documents {
      let vector = raw.vector(table);
      if is_zero(&vector) {
        tracing::trace!(id = %raw.id, tokens = raw.expanded_len(), "dropping document without usable tokens");
        dropped += 1;
        continue;
      }
      documents.push(Document::from_raw(raw, vector));
    }

    Self { documents, dropped }
  }

  #[must_use]
  pub fn documents(&self) -> &[Document] {
    &self.documents
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.documents.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.documents.is_empty()
  }

  /// Number of input documents left out for lack of a usable vector.
  #[must_use]
  pub const fn dropped(&self) -> usize {
    self.dropped
  }

  /// The `n` documents most similar to `query`, most similar first.
  ///
  /// # Errors
  ///
  /// Returns [`DimensionMismatch`] if `query` was built against another table.
  pub fn similar(&self, query: &[f32], n: usize) -> Result<Vec<&Document>, DimensionMismatch> {
    top_n(
      self.documents.iter().map(|doc| (doc.vector.as_slice(), doc)),
      query,
      n,
    )
  }
}
