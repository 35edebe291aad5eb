use axum::{
  Json, Router,
  routing::get,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::utils::AppState;

mod similar;
mod words;

pub use similar::SimilarParams;
pub use words::WordsParams;

/// Result count used when `n` is absent or not a non-negative integer.
pub const DEFAULT_LIMIT: usize = 10;

/// Parse the `n` query parameter, substituting [`DEFAULT_LIMIT`] for anything
/// that is not a non-negative integer.
#[must_use]
pub fn parse_limit(raw: Option<&str>) -> usize {
  raw
    .and_then(|n| n.parse::<usize>().ok())
    .unwrap_or(DEFAULT_LIMIT)
}

/// First value given for `key`; later repeats are ignored.
pub(crate) fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
  pairs
    .iter()
    .find(|(k, _)| k == key)
    .map(|(_, v)| v.clone())
}

#[derive(OpenApi)]
#[openapi(
  info(
    title = "Revery API",
    version = "0.0.1",
    description = "Find documents semantically similar to a piece of text"
  ),
  paths(similar::similar, words::words),
  components(schemas(revery_core::Document))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
  Json(ApiDoc::openapi())
}

pub fn app() -> Router<AppState> {
  Router::new()
    .route("/similar", get(similar::similar).post(similar::similar))
    .route("/words", get(words::words))
    .route("/openapi.json", get(openapi_json))
    .merge(Scalar::with_url("/openapi/", ApiDoc::openapi()))
}
