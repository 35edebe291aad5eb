use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::{Context, anyhow};

const DEFAULT_MODEL_PATH: &str = "./models/fasttext-commoncrawl-150k.vec";
const DEFAULT_CORPUS_PATH: &str = "./corpus/docs.json";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9998";
const DEFAULT_EXTRACT_TIMEOUT_SECS: u64 = 10;

/// Process configuration, read once at startup and handed to whoever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEnv {
  pub model_path: PathBuf,
  pub corpus_path: PathBuf,
  pub bind_addr: SocketAddr,
  pub extract_timeout: Duration,
}

impl AppEnv {
  /// Read configuration from the process environment.
  ///
  /// # Errors
  ///
  /// Returns an error when a variable is set but cannot be parsed.
  pub fn from_env() -> anyhow::Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build the configuration from an arbitrary key lookup.
  ///
  /// # Errors
  ///
  /// Returns an error when a value is present but invalid.
  pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let model_path = lookup("REVERY_MODEL_PATH").unwrap_or_else(|| DEFAULT_MODEL_PATH.to_owned());
    let corpus_path =
      lookup("REVERY_CORPUS_PATH").unwrap_or_else(|| DEFAULT_CORPUS_PATH.to_owned());

    let bind_addr = lookup("REVERY_BIND_ADDR")
      .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned())
      .parse::<SocketAddr>()
      .context("REVERY_BIND_ADDR must be a socket address")?;

    let extract_timeout = match lookup("REVERY_EXTRACT_TIMEOUT_SECS") {
      Some(raw) => raw
        .parse::<u64>()
        .context("REVERY_EXTRACT_TIMEOUT_SECS must be a whole number of seconds")?,
      None => DEFAULT_EXTRACT_TIMEOUT_SECS,
    };
    if extract_timeout == 0 {
      return Err(anyhow!("REVERY_EXTRACT_TIMEOUT_SECS must be greater than zero"));
    }

    Ok(Self {
      model_path: model_path.into(),
      corpus_path: corpus_path.into(),
      bind_addr,
      extract_timeout: Duration::from_secs(extract_timeout),
    })
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
      .collect();
    move |key: &str| map.get(key).cloned()
  }

  #[test]
  fn defaults_when_unset() {
    let env = AppEnv::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(env.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    assert_eq!(env.corpus_path, PathBuf::from(DEFAULT_CORPUS_PATH));
    assert_eq!(env.bind_addr.port(), 9998);
    assert_eq!(env.extract_timeout, Duration::from_secs(10));
  }

  #[test]
  fn overrides_are_applied() {
    let env = AppEnv::from_lookup(lookup_from(&[
      ("REVERY_MODEL_PATH", "/data/model.vec"),
      ("REVERY_BIND_ADDR", "127.0.0.1:8080"),
      ("REVERY_EXTRACT_TIMEOUT_SECS", "3"),
    ]))
    .unwrap();
    assert_eq!(env.model_path, PathBuf::from("/data/model.vec"));
    assert_eq!(env.bind_addr, "127.0.0.1:8080".parse().unwrap());
    assert_eq!(env.extract_timeout, Duration::from_secs(3));
  }

  #[test]
  fn rejects_bad_values() {
    assert!(AppEnv::from_lookup(lookup_from(&[("REVERY_BIND_ADDR", "nowhere")])).is_err());
    assert!(AppEnv::from_lookup(lookup_from(&[("REVERY_EXTRACT_TIMEOUT_SECS", "soon")])).is_err());
    assert!(AppEnv::from_lookup(lookup_from(&[("REVERY_EXTRACT_TIMEOUT_SECS", "0")])).is_err());
  }
}
