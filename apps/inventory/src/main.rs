//! # Teller Inventory Entry Point
//!
//! ## Startup Sequence
//! 1. Parse command line
//! 2. Initialize tracing (stderr)
//! 3. Load configuration (environment, then CLI overrides)
//! 4. Open the database and apply migrations
//! 5. Run the login menu on stdin/stdout until Exit or end of input

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = teller_inventory::Cli::parse();
    teller_inventory::init_tracing();
    teller_inventory::run(cli).await
}
