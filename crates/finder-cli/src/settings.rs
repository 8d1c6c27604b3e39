//! Layered configuration for the `finder` binary.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `FINDER_*` environment variables. Command-line flags are
//! applied on top by the caller.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use finder_core::store::DEFAULT_STORAGE_KEY;
use serde::Deserialize;

/// Runtime configuration, deserialised from `finder.toml` and the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
  /// SQLite file holding the dataset.
  #[serde(default = "default_db_path")]
  pub db_path:           PathBuf,
  #[serde(default = "default_storage_key")]
  pub storage_key:       String,
  /// Poll period of `finder watch`.
  #[serde(default = "default_watch_interval_ms")]
  pub watch_interval_ms: u64,
}

fn default_db_path() -> PathBuf { PathBuf::from("~/.local/share/finder/finder.db") }

fn default_storage_key() -> String { DEFAULT_STORAGE_KEY.to_owned() }

fn default_watch_interval_ms() -> u64 { 1_000 }

impl Default for Settings {
  fn default() -> Self {
    Self {
      db_path:           default_db_path(),
      storage_key:       default_storage_key(),
      watch_interval_ms: default_watch_interval_ms(),
    }
  }
}

impl Settings {
  /// Load settings from `file` (if it exists) and `FINDER_*` variables.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("FINDER"))
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  /// `db_path` with a leading `~` expanded.
  pub fn resolved_db_path(&self) -> PathBuf { expand_tilde(&self.db_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
