//! # Teller Inventory
//!
//! A console inventory and point-of-sale manager over a local SQLite store.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Teller Inventory                                 │
//! │                                                                         │
//! │  main.rs ─────► parse CLI, init tracing, run().await                   │
//! │                                                                         │
//! │  config.rs ───► InventoryConfig (env + CLI), ConfigError               │
//! │                                                                         │
//! │  shell.rs ────► InventoryShell: login menu ⇄ main menu                 │
//! │                                                                         │
//! │  Storage: teller-db (products, users, sales)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod shell;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use teller_db::{Database, DbConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, InventoryConfig};
pub use shell::InventoryShell;

/// Command line of the `inventory` binary.
///
/// Flags override the `TELLER_*` environment variables.
#[derive(Debug, Parser)]
#[command(name = "inventory", version, about = "Teller inventory manager")]
pub struct Cli {
    /// Database file (overrides TELLER_DB_PATH)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Low stock threshold (overrides TELLER_LOW_STOCK_THRESHOLD)
    #[arg(long)]
    pub low_stock: Option<i64>,
}

impl Cli {
    /// Applies the flags on top of an environment-derived configuration.
    pub fn apply(&self, mut config: InventoryConfig) -> Result<InventoryConfig, ConfigError> {
        if let Some(path) = &self.db {
            config = config.with_database_path(path);
        }
        if let Some(threshold) = self.low_stock {
            config = config.with_low_stock_threshold(threshold)?;
        }
        Ok(config)
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=sqlx=info` - Show executed statements
/// - Default: warnings, plus info from the `teller*` crates
///
/// Output goes to stderr so it never mixes with the menu on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,teller=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads configuration from the environment and `cli`.
pub fn load_config(cli: &Cli) -> anyhow::Result<InventoryConfig> {
    // A --db flag makes the platform data dir irrelevant
    let env_config = match &cli.db {
        Some(path) => InventoryConfig::from_lookup(|key| match key {
            config::ENV_DB_PATH => Some(path.display().to_string()),
            other => std::env::var(other).ok(),
        }),
        None => InventoryConfig::from_env(),
    }
    .context("invalid configuration")?;

    Ok(cli.apply(env_config)?)
}

/// Opens the database at `config.database_path`.
pub async fn open_database(config: &InventoryConfig) -> anyhow::Result<Database> {
    let db = Database::new(DbConfig::new(&config.database_path))
        .await
        .with_context(|| format!("cannot open {}", config.database_path.display()))?;

    info!(path = %config.database_path.display(), "Database connected and migrations applied");
    Ok(db)
}

/// Runs the inventory manager on stdin/stdout.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    info!("Starting Teller Inventory");

    let config = load_config(&cli)?;
    debug!(?config, "Configuration loaded");
    let db = open_database(&config).await?;

    let mut shell = InventoryShell::new(teller_console::stdio(), db.clone(), config);
    shell.run().await.context("terminal I/O failed")?;

    db.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["inventory", "--db", "/tmp/x.db", "--low-stock", "9"]);
        let config = cli.apply(InventoryConfig::for_database("default.db")).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.low_stock_threshold, 9);
    }

    #[test]
    fn test_cli_rejects_negative_threshold() {
        let cli = Cli::parse_from(["inventory", "--low-stock=-1"]);
        assert!(cli.apply(InventoryConfig::for_database("x.db")).is_err());
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["inventory"]);
        let config = InventoryConfig::for_database("keep.db");
        assert_eq!(cli.apply(config.clone()).unwrap(), config);
    }
}
