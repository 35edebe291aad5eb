use std::net::SocketAddr;

use axum::{
  Router,
  http::{Method, header},
  routing::get,
};
use revery_shared::AppError;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::{
  api,
  utils::{AppState, shutdown_signal},
};

#[axum::debug_handler]
async fn handler() -> &'static str {
  "revery\n"
}

/// The full application: routes, shared state and a permissive CORS policy.
pub fn router(state: AppState) -> Router {
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST])
    .allow_headers([header::CONTENT_TYPE]);

  Router::new()
    .route("/", get(handler))
    .merge(api::app())
    .layer(cors)
    .with_state(state)
}

pub async fn server(state: AppState, addr: SocketAddr) -> Result<(), AppError> {
  let listener = TcpListener::bind(addr).await?;

  tracing::info!("server started at http://{addr}");

  axum::serve(listener, router(state))
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}
