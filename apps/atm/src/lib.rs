//! # Teller ATM
//!
//! A single-user ATM simulator over an in-memory account ledger.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Teller ATM                                     │
//! │                                                                         │
//! │  main.rs ────► parse CLI, init tracing, call run()                     │
//! │                                                                         │
//! │  lib.rs ─────► Cli, init_tracing, run (builds the directory)           │
//! │                                                                         │
//! │  shell.rs ───► AtmShell: main menu ⇄ account menu                      │
//! │                                                                         │
//! │  Nothing is persisted: accounts live until the process exits.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod shell;

use anyhow::Context;
use clap::Parser;
use teller_core::{AccountDirectory, Money};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use shell::AtmShell;

/// Command line of the `atm` binary.
#[derive(Debug, Parser)]
#[command(name = "atm", version, about = "Teller ATM simulator")]
pub struct Cli {
    /// Pre-create a demo account before showing the menu
    #[arg(long)]
    pub seed_demo: bool,

    /// Account number of the demo account
    #[arg(long, default_value = "1001", requires = "seed_demo")]
    pub demo_account: String,

    /// PIN of the demo account
    #[arg(long, default_value = "1234", requires = "seed_demo")]
    pub demo_pin: String,

    /// Opening balance of the demo account
    #[arg(long, default_value = "100.00", requires = "seed_demo")]
    pub demo_balance: Money,
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: warnings, plus info from the `teller*` crates
///
/// Output goes to stderr so it never mixes with the menu on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,teller=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the directory described by `cli`.
pub fn build_directory(cli: &Cli) -> anyhow::Result<AccountDirectory> {
    let mut directory = AccountDirectory::new();

    if cli.seed_demo {
        directory
            .create(&cli.demo_account, &cli.demo_pin, cli.demo_balance)
            .context("failed to create demo account")?;
        info!(account = %cli.demo_account, balance = %cli.demo_balance, "Demo account created");
    }

    Ok(directory)
}

/// Runs the ATM on stdin/stdout.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    info!("Starting Teller ATM");

    let directory = build_directory(&cli)?;
    let mut shell = AtmShell::new(teller_console::stdio(), directory);
    shell.run().context("terminal I/O failed")?;

    info!(accounts = shell.directory().len(), "ATM session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["atm"]);
        assert!(!cli.seed_demo);
        assert!(build_directory(&cli).unwrap().is_empty());
    }

    #[test]
    fn test_seed_demo_account() {
        let cli = Cli::parse_from([
            "atm",
            "--seed-demo",
            "--demo-account",
            "77",
            "--demo-balance",
            "12.34",
        ]);
        let mut directory = build_directory(&cli).unwrap();
        let account = directory.authenticate("77", "1234").unwrap();
        assert_eq!(account.inquire(), Money::from_cents(1_234));
    }

    #[test]
    fn test_demo_flags_require_seed_demo() {
        assert!(Cli::try_parse_from(["atm", "--demo-pin", "9999"]).is_err());
    }
}
