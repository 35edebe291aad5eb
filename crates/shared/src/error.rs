use std::{backtrace::BacktraceStatus, fmt::Display};

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};

#[derive(Debug)]
pub struct AppError {
  err: anyhow::Error,
  status_code: StatusCode,
}

impl AppError {
  /// Create with 500 status
  pub fn new<E: Into<anyhow::Error>>(err: E) -> Self {
    Self {
      err: err.into(),
      status_code: StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  /// Create with custom status
  pub fn with_status<E: Into<anyhow::Error>>(status: StatusCode, err: E) -> Self {
    Self {
      err: err.into(),
      status_code: status,
    }
  }

  /// Create a 400 carrying a fixed plain-text message
  #[must_use]
  pub fn bad_request(message: &'static str) -> Self {
    Self::with_status(StatusCode::BAD_REQUEST, anyhow::Error::msg(message))
  }

  #[must_use]
  pub const fn status_code(&self) -> StatusCode {
    self.status_code
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    // Client errors are part of the public contract, their body is the bare message.
    let body = if self.status_code.is_client_error() {
      self.err.to_string()
    } else if cfg!(debug_assertions) {
      let bt = self.err.backtrace();
      if bt.status() == BacktraceStatus::Captured {
        format!("{}\nBacktrace:\n{}", self.err, bt)
      } else {
        format!(
          "{}\n(hint: set RUST_BACKTRACE=1 to enable backtrace)",
          self.err
        )
      }
    } else {
      self.err.to_string()
    };
    (self.status_code, body).into_response()
  }
}

impl Display for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}] {}", self.status_code, self.err)
  }
}

impl<E> From<E> for AppError
where
  E: Into<anyhow::Error>,
{
  fn from(err: E) -> Self {
    Self::new(err)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn bad_request_renders_bare_message() {
    let response = AppError::bad_request("invalid query").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
    assert_eq!(&body[..], b"invalid query");
  }

  #[test]
  fn conversions_default_to_internal_error() {
    let err: AppError = std::io::Error::other("disk on fire").into();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.to_string(), "[500 Internal Server Error] disk on fire");
  }
}
