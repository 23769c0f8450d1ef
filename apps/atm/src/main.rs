//! # Teller ATM Entry Point
//!
//! ## Startup Sequence
//! 1. Parse command line
//! 2. Initialize tracing (stderr)
//! 3. Build the account directory (optionally with a demo account)
//! 4. Run the menu loop on stdin/stdout until Exit or end of input

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = teller_atm::Cli::parse();
    teller_atm::init_tracing();
    teller_atm::run(cli)
}
