use std::sync::Arc;

use revery_core::{Corpus, VectorTable};
use revery_extract::ArticleExtractor;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
  pub table: Arc<VectorTable>,
  pub corpus: Arc<Corpus>,
  pub extractor: ArticleExtractor,
}

impl AppState {
  #[must_use]
  pub const fn new(
    table: Arc<VectorTable>,
    corpus: Arc<Corpus>,
    extractor: ArticleExtractor,
  ) -> Self {
    Self {
      table,
      corpus,
      extractor,
    }
  }
}
