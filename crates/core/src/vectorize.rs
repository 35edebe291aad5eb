//! Folding tokens into a single vector via the word table.
//!
//! The result is the plain sum of the token embeddings and is left
//! unnormalized: everything downstream compares by cosine, which ignores scale.

use crate::VectorTable;

/// Sum the embeddings of `tokens`. Out-of-vocabulary tokens are skipped; an
/// empty or fully unknown sequence yields the zero vector.
pub fn vectorize<'a, I>(tokens: I, table: &VectorTable) -> Vec<f32>
where
  I: IntoIterator<Item = &'a str>,
{
  vectorize_weighted(tokens.into_iter().map(|token| (token, 1)), table)
}

/// Sum the embeddings of `(token, weight)` pairs, each scaled by its weight.
///
/// Equivalent to repeating every token `weight` times and calling [`vectorize`].
pub fn vectorize_weighted<'a, I>(weights: I, table: &VectorTable) -> Vec<f32>
where
  I: IntoIterator<Item = (&'a str, u32)>,
{
  let mut acc = vec![0.0_f32; table.dim()];

  for (token, weight) in weights {
    if weight == 0 {
      continue;
    }
    let Some(coords) = table.get(token) else {
      continue;
    };

    #[allow(clippy::cast_precision_loss)]
    let weight = weight as f32;
    for (slot, &c) in acc.iter_mut().zip(coords) {
      *slot = c.mul_add(weight, *slot);
    }
  }

  acc
}

/// True when the vector carries no signal and cannot be compared.
#[must_use]
pub fn is_zero(vector: &[f32]) -> bool {
  vector.iter().all(|&x| x == 0.0)
}
