use thiserror::Error;

use crate::{
  VectorTable,
  vectorize::{is_zero, vectorize},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
  #[error("invalid query")]
  Empty,
  /// Every token is out of vocabulary, so the vector carries no signal.
  #[error("invalid query")]
  NoSignal,
}

/// A per-request query: a non-empty bag of tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
  tokens: Vec<String>,
}

impl Query {
  /// # Errors
  ///
  /// Returns [`QueryError::Empty`] when there are no tokens.
  pub fn new(tokens: Vec<String>) -> Result<Self, QueryError> {
    if tokens.is_empty() {
      return Err(QueryError::Empty);
    }
    Ok(Self { tokens })
  }

  /// Split free text on whitespace.
  ///
  /// # Errors
  ///
  /// Returns [`QueryError::Empty`] when the text is blank.
  pub fn from_text(text: &str) -> Result<Self, QueryError> {
    Self::new(tokenize(text))
  }

  #[must_use]
  pub fn tokens(&self) -> &[String] {
    &self.tokens
  }

  /// The query vector, built with the same rule as document vectors.
  ///
  /// # Errors
  ///
  /// Returns [`QueryError::NoSignal`] when no token is in the table; a zero
  /// vector is at sentinel distance from everything and cannot rank.
  pub fn vector(&self, table: &VectorTable) -> Result<Vec<f32>, QueryError> {
    let vector = vectorize(self.tokens.iter().map(String::as_str), table);
    if is_zero(&vector) {
      return Err(QueryError::NoSignal);
    }
    Ok(vector)
  }
}

/// Whitespace tokenization, no case folding or punctuation stripping.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
  text.split_whitespace().map(str::to_owned).collect()
}
