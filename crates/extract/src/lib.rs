mod article;
pub use article::{Article, extract_article};

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
  #[error("timed out fetching URL")]
  Timeout,
  #[error("failed to fetch URL: {0}")]
  Request(#[source] reqwest::Error),
  #[error("URL responded with {0}")]
  Status(StatusCode),
}

impl From<reqwest::Error> for ExtractError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      Self::Timeout
    } else {
      Self::Request(err)
    }
  }
}

/// Fetches a web page and extracts its article content.
///
/// Every fetch is bounded by the configured timeout; there are no retries.
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
  client: Client,
}

impl ArticleExtractor {
  /// # Errors
  ///
  /// Fails if the HTTP client cannot be constructed.
  pub fn new(timeout: Duration) -> Result<Self, ExtractError> {
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(concat!("revery/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self { client })
  }

  /// Download `url` and extract its article.
  ///
  /// # Errors
  ///
  /// Fails on network errors, timeouts and non-success responses.
  pub async fn fetch(&self, url: &str) -> Result<Article, ExtractError> {
    let response = self.client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
      return Err(ExtractError::Status(status));
    }

    let html = response.text().await?;
    let article = extract_article(&html);
    tracing::debug!(url, title = %article.title, chars = article.text.len(), "extracted article");
    Ok(article)
  }
}
