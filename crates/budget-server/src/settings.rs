//! Runtime server configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variables with this prefix override file settings,
/// e.g. `BUDGET_PORT=9000`.
pub const ENV_PREFIX: &str = "BUDGET";

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("budget.sqlite3") }

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `BUDGET_*` variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = ServerConfig::load(Path::new("does-not-exist.toml")).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.store_path, PathBuf::from("budget.sqlite3"));
    assert_eq!(cfg.address(), "127.0.0.1:8080");
  }

  #[test]
  fn overrides_replace_defaults() {
    let cfg: ServerConfig = config::Config::builder()
      .set_override("port", 9000_i64)
      .unwrap()
      .set_override("store_path", "/tmp/ledger.db")
      .unwrap()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/ledger.db"));
    assert_eq!(cfg.host, "127.0.0.1");
  }

  #[test]
  fn tilde_expansion_leaves_plain_paths_alone() {
    assert_eq!(expand_tilde(Path::new("data/x.db")), PathBuf::from("data/x.db"));
  }
}
