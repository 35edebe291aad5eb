use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
};
use revery_core::Query as SearchQuery;
use revery_shared::AppError;
use utoipa::IntoParams;

use super::{first_value, parse_limit};
use crate::utils::AppState;

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WordsParams {
  /// Whitespace-separated query tokens
  pub q: Option<String>,
  /// Maximum words to return (default 10)
  pub n: Option<String>,
}

impl WordsParams {
  #[must_use]
  pub fn from_pairs(pairs: &[(String, String)]) -> Self {
    Self {
      q: first_value(pairs, "q"),
      n: first_value(pairs, "n"),
    }
  }
}

/// List the vocabulary words nearest to a query
#[utoipa::path(
  get,
  path = "/words",
  params(WordsParams),
  responses(
    (status = 200, description = "Words ordered by similarity", body = Vec<String>),
    (status = 400, description = "Query is empty or has no known words", body = String)
  )
)]
#[axum::debug_handler]
pub async fn words(
  State(state): State<AppState>,
  Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<String>>, AppError> {
  let params = WordsParams::from_pairs(&pairs);
  let limit = parse_limit(params.n.as_deref());
  let query = SearchQuery::from_text(params.q.as_deref().unwrap_or_default())
    .map_err(|err| AppError::with_status(StatusCode::BAD_REQUEST, err))?;

  let table = Arc::clone(&state.table);
  let words = tokio::task::spawn_blocking(move || -> Result<Vec<String>, AppError> {
    let vector = query
      .vector(&table)
      .map_err(|err| AppError::with_status(StatusCode::BAD_REQUEST, err))?;
    let words = table.closest_words(&vector, limit)?;
    Ok(words.into_iter().map(str::to_owned).collect())
  })
  .await??;

  Ok(Json(words))
}
