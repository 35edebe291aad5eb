use std::sync::Arc;

use anyhow::Context;
use revery_core::{Corpus, VectorTable};
use revery_extract::ArticleExtractor;
use revery_server::{server, utils::AppState};
use revery_shared::{AppEnv, AppError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
          "{}=debug,revery_core=debug,revery_extract=debug,revery_server=debug",
          env!("CARGO_CRATE_NAME")
        )
        .into()
      }),
    )
    .with(tracing_subscriber::fmt::layer())
    .with(tracing_error::ErrorLayer::default())
    .init();
  dotenvy::dotenv().ok();

  let env = AppEnv::from_env()?;
  let state = load_state(&env).await?;

  server(state, env.bind_addr).await
}

/// Load the word vectors and the corpus. Any failure here is fatal.
async fn load_state(env: &AppEnv) -> anyhow::Result<AppState> {
  let model_path = env.model_path.clone();
  let corpus_path = env.corpus_path.clone();

  let (table, corpus) = tokio::task::spawn_blocking(move || -> anyhow::Result<_> {
    let table = VectorTable::load(&model_path)
      .with_context(|| format!("could not load word vectors from {}", model_path.display()))?;
    tracing::info!(words = table.len(), dim = table.dim(), "loaded word vectors");

    let corpus = Corpus::load(&corpus_path, &table)
      .with_context(|| format!("could not load documents from {}", corpus_path.display()))?;
    tracing::info!(
      documents = corpus.len(),
      dropped = corpus.dropped(),
      "built document corpus"
    );

    Ok((table, corpus))
  })
  .await??;

  let extractor = ArticleExtractor::new(env.extract_timeout)
    .context("could not build the URL extraction client")?;

  Ok(AppState::new(Arc::new(table), Arc::new(corpus), extractor))
}
