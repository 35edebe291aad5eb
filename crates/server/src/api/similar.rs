use std::sync::Arc;

use axum::{
  body::Bytes,
  extract::{Query, State},
  http::{Method, StatusCode, header},
  response::{IntoResponse, Response},
};
use revery_core::{Query as SearchQuery, tokenize};
use revery_extract::ExtractError;
use revery_shared::AppError;
use utoipa::IntoParams;

use super::{first_value, parse_limit};
use crate::utils::AppState;

const INVALID_QUERY: &str = "invalid query";
const FAILED_TO_READ_URL: &str = "failed to read URL";

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SimilarParams {
  /// Whitespace-separated query tokens
  pub q: Option<String>,
  /// Maximum documents to return (default 10)
  pub n: Option<String>,
  /// Page to extract query text from when neither `q` nor a body is given
  pub url: Option<String>,
}

impl SimilarParams {
  /// Repeated parameters keep their first value.
  #[must_use]
  pub fn from_pairs(pairs: &[(String, String)]) -> Self {
    Self {
      q: first_value(pairs, "q"),
      n: first_value(pairs, "n"),
      url: first_value(pairs, "url"),
    }
  }
}

/// Resolve the query tokens, trying each source only if the previous one
/// produced nothing: `q`, then the POST body, then the article at `url`.
async fn resolve_query(
  state: &AppState,
  method: &Method,
  params: &SimilarParams,
  body: &[u8],
) -> Result<SearchQuery, AppError> {
  let mut tokens = params.q.as_deref().map(tokenize).unwrap_or_default();
  let mut source = "q";

  if tokens.is_empty() && *method == Method::POST {
    tokens = tokenize(&String::from_utf8_lossy(body));
    source = "body";
  }

  if tokens.is_empty() {
    if let Some(url) = params.url.as_deref().filter(|url| !url.is_empty()) {
      match state.extractor.fetch(url).await {
        Ok(article) => {
          tokens = tokenize(&article.full_text());
          source = "url";
        }
        Err(ExtractError::Timeout) => {
          tracing::warn!(url, "timed out extracting query from URL");
          return Err(AppError::bad_request(INVALID_QUERY));
        }
        Err(err) => {
          tracing::warn!(url, %err, "failed to extract query from URL");
          return Err(AppError::bad_request(FAILED_TO_READ_URL));
        }
      }
    }
  }

  let query = SearchQuery::new(tokens).map_err(|err| AppError::with_status(StatusCode::BAD_REQUEST, err))?;
  tracing::debug!(source, tokens = query.tokens().len(), "resolved query");
  Ok(query)
}

/// Find the documents most similar to a query
#[utoipa::path(
  method(get, post),
  path = "/similar",
  params(SimilarParams),
  request_body(content = String, content_type = "text/plain", description = "Query text, read for POST when `q` is empty"),
  responses(
    (status = 200, description = "Documents ordered by similarity", body = Vec<revery_core::Document>),
    (status = 400, description = "No query could be resolved, or the URL could not be read", body = String),
    (status = 500, description = "Ranking or encoding failed", body = String)
  )
)]
#[axum::debug_handler]
pub async fn similar(
  State(state): State<AppState>,
  method: Method,
  Query(pairs): Query<Vec<(String, String)>>,
  body: Bytes,
) -> Result<Response, AppError> {
  let params = SimilarParams::from_pairs(&pairs);
  let limit = parse_limit(params.n.as_deref());
  let query = resolve_query(&state, &method, &params, &body).await?;

  let table = Arc::clone(&state.table);
  let corpus = Arc::clone(&state.corpus);
  let json = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, AppError> {
    let vector = query
      .vector(&table)
      .map_err(|err| AppError::with_status(StatusCode::BAD_REQUEST, err))?;
    let documents = corpus.similar(&vector, limit).map_err(|err| {
      tracing::error!(%err, "query vector does not match corpus dimension");
      AppError::new(err)
    })?;
    tracing::debug!(results = documents.len(), "ranked corpus");

    serde_json::to_vec(&documents)
      .map_err(|err| AppError::new(anyhow::Error::new(err).context("error encoding JSON")))
  })
  .await??;

  Ok(([(header::CONTENT_TYPE, "application/json")], json).into_response())
}
