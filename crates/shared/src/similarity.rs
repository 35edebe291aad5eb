use thiserror::Error;

/// Distance reported when either side has zero norm: maximally dissimilar.
pub const SENTINEL_DISTANCE: f32 = f32::MAX;

/// Two vectors of different dimension were compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("vector dimensions differ: {left} != {right}")]
pub struct DimensionMismatch {
  pub left: usize,
  pub right: usize,
}

/// Negated cosine similarity between two vectors.
///
/// Lies in [-1.0, 1.0] where -1.0 means identical direction, so an ascending
/// sort puts the most similar vectors first. If either vector has zero norm
/// the result is [`SENTINEL_DISTANCE`].
///
/// # Errors
///
/// Returns [`DimensionMismatch`] if the vectors have different lengths.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Result<f32, DimensionMismatch> {
  if a.len() != b.len() {
    return Err(DimensionMismatch {
      left: a.len(),
      right: b.len(),
    });
  }

  let mut dot = 0.0_f64;
  let mut norm_a = 0.0_f64;
  let mut norm_b = 0.0_f64;

  for (&x, &y) in a.iter().zip(b.iter()) {
    let x = f64::from(x);
    let y = f64::from(y);
    dot = x.mul_add(y, dot);
    norm_a = x.mul_add(x, norm_a);
    norm_b = y.mul_add(y, norm_b);
  }

  let denom = norm_a.sqrt() * norm_b.sqrt();
  if denom == 0.0 {
    return Ok(SENTINEL_DISTANCE);
  }

  #[allow(clippy::cast_possible_truncation)]
  let distance = (-dot / denom) as f32;
  Ok(distance)
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;

  fn norm(a: &[f32]) -> f32 {
    a.iter().map(|x| x * x).sum::<f32>().sqrt()
  }

  #[test]
  fn identical_vectors() {
    let v = [1.0, 2.0, 3.0];
    let d = cosine_distance(&v, &v).unwrap();
    assert!((d + 1.0).abs() < 1e-6);
  }

  #[test]
  fn orthogonal_vectors() {
    let d = cosine_distance(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
    assert!(d.abs() < 1e-6);
  }

  #[test]
  fn opposite_vectors() {
    let d = cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
    assert!((d - 1.0).abs() < 1e-6);
  }

  #[test]
  fn scale_does_not_matter() {
    let a = cosine_distance(&[1.0, 2.0], &[3.0, 1.0]).unwrap();
    let b = cosine_distance(&[10.0, 20.0], &[0.3, 0.1]).unwrap();
    assert!((a - b).abs() < 1e-6);
  }

  #[test]
  fn zero_vector_is_sentinel() {
    assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 2.0]), Ok(SENTINEL_DISTANCE));
    assert_eq!(cosine_distance(&[1.0, 2.0], &[0.0, 0.0]), Ok(SENTINEL_DISTANCE));
    assert_eq!(cosine_distance(&[], &[]), Ok(SENTINEL_DISTANCE));
  }

  #[test]
  fn different_lengths() {
    assert_eq!(
      cosine_distance(&[1.0, 2.0], &[1.0, 2.0, 3.0]),
      Err(DimensionMismatch { left: 2, right: 3 })
    );
  }

  #[test]
  fn norm_of_pythagorean_triple() {
    assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-6);
  }

  fn pair(dim: usize) -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    (
      prop::collection::vec(-100.0_f32..100.0, dim),
      prop::collection::vec(-100.0_f32..100.0, dim),
    )
  }

  proptest! {
    #[test]
    fn symmetric((a, b) in (1_usize..32).prop_flat_map(pair)) {
      prop_assert_eq!(cosine_distance(&a, &b), cosine_distance(&b, &a));
    }

    #[test]
    fn self_is_closest((a, b) in (1_usize..32).prop_flat_map(pair)) {
      prop_assume!(norm(&a) > 1e-3);
      let own = cosine_distance(&a, &a).unwrap();
      let other = cosine_distance(&a, &b).unwrap();
      prop_assert!(own <= other + 1e-6);
    }

    #[test]
    fn zero_side_is_sentinel(a in prop::collection::vec(-100.0_f32..100.0, 1..32)) {
      let zero = vec![0.0; a.len()];
      prop_assert_eq!(cosine_distance(&a, &zero), Ok(SENTINEL_DISTANCE));
      prop_assert_eq!(cosine_distance(&zero, &a), Ok(SENTINEL_DISTANCE));
    }
  }
}
