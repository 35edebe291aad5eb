use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{VectorTable, vectorize::vectorize_weighted};

/// A corpus record as it appears in the documents JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDocument {
  pub id: String,
  pub title: String,
  pub href: String,
  pub module: String,
  pub content: String,
  /// Token → occurrence weight. May be `null` in the source.
  pub tokens: Option<BTreeMap<String, u32>>,
}

impl RawDocument {
  /// Total length of the weighted token expansion.
  #[must_use]
  pub fn expanded_len(&self) -> u64 {
    self
      .tokens
      .iter()
      .flatten()
      .map(|(_, &weight)| u64::from(weight))
      .sum()
  }

  /// The weighted token expansion, one entry per repetition.
  pub fn expanded_tokens(&self) -> impl Iterator<Item = &str> {
    self
      .tokens
      .iter()
      .flatten()
      .flat_map(|(token, &weight)| std::iter::repeat_n(token.as_str(), weight as usize))
  }

  /// Vectorize the weighted tokens against `table`.
  #[must_use]
  pub fn vector(&self, table: &VectorTable) -> Vec<f32> {
    vectorize_weighted(
      self
        .tokens
        .iter()
        .flatten()
        .map(|(token, &weight)| (token.as_str(), weight)),
      table,
    )
  }
}

/// A searchable document: display fields plus its derived vector.
///
/// Only the display fields are serialized.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Document {
  pub title: String,
  pub href: String,
  pub id: String,
  pub module: String,
  pub content: String,
  #[serde(skip)]
  pub vector: Vec<f32>,
}

impl Document {
  pub(crate) fn from_raw(raw: RawDocument, vector: Vec<f32>) -> Self {
    Self {
      title: raw.title,
      href: raw.href,
      id: raw.id,
      module: raw.module,
      content: raw.content,
      vector,
    }
  }
}
