use tokio::signal;

/// Resolves on Ctrl+C, or SIGTERM on unix, so the listener can drain.
///
/// # Panics
///
/// Panics if a signal handler cannot be installed.
pub async fn shutdown_signal() {
  let interrupt = async {
    signal::ctrl_c()
      .await
      .expect("failed to install Ctrl+C handler");
    "SIGINT"
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("failed to install SIGTERM handler")
      .recv()
      .await;
    "SIGTERM"
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<&str>();

  let received = tokio::select! {
    name = interrupt => name,
    name = terminate => name,
  };
  tracing::info!(signal = received, "shutting down");
}
