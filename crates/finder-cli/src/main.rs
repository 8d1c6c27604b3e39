//! `finder`: command-line front end for the Faculty Finder communication
//! store.
//!
//! # Usage
//!
//! ```
//! finder pending
//! finder set-status inv1 accepted
//! finder status-update inv2 --status follow_up --notes "Sent offer letter"
//! finder --config ~/.config/finder/finder.toml watch
//! ```

mod app;
mod render;
mod settings;

use std::{io, path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use app::{App, Command, Outcome};
use clap::Parser;
use finder_core::{store::CommunicationStore, watch::DatasetWatcher};
use finder_store_sqlite::SqliteStorage;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "finder", version, about = "Faculty Finder communication store")]
struct Args {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "finder.toml")]
  config: PathBuf,

  /// SQLite file holding the dataset; overrides `db_path` (and
  /// `FINDER_DB_PATH`).
  #[arg(long)]
  db: Option<PathBuf>,

  /// Storage key of the dataset; overrides `storage_key`.
  #[arg(long)]
  key: Option<String>,

  /// Emit JSON instead of text.
  #[arg(long)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Config file and environment, then flags.
  let mut settings = Settings::load(&args.config)?;
  if let Some(db) = args.db {
    settings.db_path = db;
  }
  if let Some(key) = args.key {
    settings.storage_key = key;
  }

  let db_path = settings.resolved_db_path();
  if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  let storage = SqliteStorage::open(&db_path)
    .with_context(|| format!("failed to open store at {db_path:?}"))?;
  let app = App::new(
    CommunicationStore::with_key(storage, settings.storage_key.clone()),
    args.json,
  );

  if let Command::Watch { interval_ms } = args.command {
    let period = Duration::from_millis(interval_ms.unwrap_or(settings.watch_interval_ms));
    watch(&app, period).await?;
    return Ok(ExitCode::SUCCESS);
  }

  let outcome = app.execute(args.command, &mut io::stdout().lock())?;
  Ok(match outcome {
    Outcome::Done => ExitCode::SUCCESS,
    Outcome::NotFound => ExitCode::FAILURE,
  })
}

// ─── Watch loop ───────────────────────────────────────────────────────────────

/// Re-read storage every `period` and report the pending count on change,
/// until interrupted.
async fn watch(app: &App<SqliteStorage>, period: Duration) -> Result<()> {
  // Seed before the first poll so the initial report reflects real data.
  app.store.get_communication_data()?;

  let mut watcher = DatasetWatcher::new();
  let mut ticker = tokio::time::interval(period);
  tracing::info!(?period, key = app.store.key(), "watching for changes");

  let ctrl_c = tokio::signal::ctrl_c();
  tokio::pin!(ctrl_c);

  loop {
    tokio::select! {
      _ = ticker.tick() => {
        if let Some(data) = watcher.poll(&app.store)? {
          app.report_count(&mut io::stdout().lock(), data.pending_invites())?;
        }
      }
      _ = &mut ctrl_c => {
        tracing::info!("interrupted; stopping watch");
        break;
      }
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory as _;

  use super::*;

  #[test]
  fn cli_definition_is_consistent() { Args::command().debug_assert(); }

  #[test]
  fn db_flag_and_subcommand_parse() {
    let args = Args::try_parse_from([
      "finder", "--db", "/tmp/finder.db", "--json", "set-status", "inv1", "accepted",
    ])
    .unwrap();
    assert_eq!(args.db, Some(PathBuf::from("/tmp/finder.db")));
    assert!(args.json);
    assert!(matches!(
      args.command,
      Command::SetStatus { ref id, status: finder_core::thread::Status::Accepted } if id == "inv1"
    ));
  }

  #[test]
  fn date_flag_accepts_bare_dates() {
    let args = Args::try_parse_from([
      "finder", "status-update", "inv2", "--status", "hired", "--date", "2024-02-01",
    ])
    .unwrap();
    let Command::StatusUpdate { date, .. } = args.command else {
      panic!("expected status-update");
    };
    assert_eq!(date.unwrap().to_rfc3339(), "2024-02-01T00:00:00+00:00");
  }
}
