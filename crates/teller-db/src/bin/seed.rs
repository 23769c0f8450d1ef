//! # Seed Data Generator
//!
//! Populates an inventory database with demo products and a demo operator.
//!
//! ## Usage
//! ```bash
//! # 25 products (default) in ./inventory_dev.db
//! cargo run -p teller-db --bin seed
//!
//! # Custom amount and path, machine-readable summary
//! cargo run -p teller-db --bin seed -- --count 200 --db ./data/inventory.db --json
//! ```
//!
//! ## Generated Data
//! - Products named `{item} {variant}` with prices $0.99 - $49.99 and stock
//!   0 - 40, so some rows always land in the low stock report
//! - One operator account (`--user` / `--password`, default `demo` / `demo1234`)

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use serde::Serialize;
use teller_core::{Money, NewProduct};
use teller_db::{Database, DbConfig, DbError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Office supplies for realistic demo data
const ITEMS: &[&str] = &[
    "Stapler",
    "Printer Paper",
    "Toner Cartridge",
    "Ballpoint Pens",
    "Sticky Notes",
    "Binder Clips",
    "Highlighters",
    "Envelopes",
    "Notebook",
    "Desk Lamp",
    "Whiteboard Markers",
    "Scissors",
    "Tape Dispenser",
    "Paper Clips",
    "File Folders",
];

/// Variants with a price addon in cents
const VARIANTS: &[(&str, i64)] = &[
    ("Standard", 0),
    ("Large", 250),
    ("Pack of 10", 600),
    ("Premium", 1_500),
];

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Populate an inventory database with demo data")]
struct Args {
    /// Number of products to generate
    #[arg(short, long, default_value_t = 25)]
    count: usize,

    /// Database file path
    #[arg(short, long, default_value = "./inventory_dev.db")]
    db: PathBuf,

    /// Username of the demo operator
    #[arg(long, default_value = "demo")]
    user: String,

    /// Password of the demo operator
    #[arg(long, default_value = "demo1234")]
    password: String,

    /// Print a JSON summary instead of progress lines
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct SeedSummary {
    database: String,
    products_created: usize,
    products_skipped: bool,
    user_created: bool,
    low_stock: usize,
    elapsed_ms: u128,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,seed=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let start = Instant::now();

    if !args.json {
        println!("Teller Inventory Seed Data Generator");
        println!("====================================");
        println!("Database: {}", args.db.display());
        println!("Products: {}", args.count);
        println!();
    }

    let db = Database::new(DbConfig::new(&args.db)).await?;

    // Never duplicate an existing catalog
    let existing = db.products().count().await?;
    let products_skipped = existing > 0;
    let mut created = 0;

    if products_skipped {
        warn!(existing, "Database already has products, skipping product seed");
        if !args.json {
            println!("Database already has {} products, skipping.", existing);
        }
    } else {
        let products = db.products();
        for (seed, product) in demo_products(args.count).enumerate() {
            if let Err(e) = products.insert(&product).await {
                warn!(name = %product.name, error = %e, "Failed to insert product");
                continue;
            }
            created += 1;
            if !args.json && (seed + 1) % 10 == 0 {
                println!("  Generated {} products...", created);
            }
        }
        info!(created, "Products generated");
    }

    let user_created = match db.users().register(&args.user, &args.password).await {
        Ok(_) => true,
        Err(DbError::UniqueViolation { .. }) => false,
        Err(e) => return Err(e.into()),
    };

    let low_stock = db
        .products()
        .low_stock(teller_core::DEFAULT_LOW_STOCK_THRESHOLD)
        .await?
        .len();

    let summary = SeedSummary {
        database: args.db.display().to_string(),
        products_created: created,
        products_skipped,
        user_created,
        low_stock,
        elapsed_ms: start.elapsed().as_millis(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        println!("Generated {} products in {} ms", created, summary.elapsed_ms);
        if user_created {
            println!("Created operator '{}'", args.user);
        } else {
            println!("Operator '{}' already exists", args.user);
        }
        println!("Low stock products: {}", low_stock);
    }

    db.close().await;
    Ok(())
}

/// Yields `count` distinct demo products. Names repeat with a numeric suffix
/// once every item/variant pair has been used.
fn demo_products(count: usize) -> impl Iterator<Item = NewProduct> {
    (0..count).map(|seed| {
        let item = ITEMS[seed % ITEMS.len()];
        let (variant, addon) = VARIANTS[(seed / ITEMS.len()) % VARIANTS.len()];
        let round = seed / (ITEMS.len() * VARIANTS.len());

        let name = if round == 0 {
            format!("{} {}", item, variant)
        } else {
            format!("{} {} #{}", item, variant, round + 1)
        };

        // $0.99 - $34.99 base, plus the variant addon
        let price = Money::from_cents(99 + ((seed as i64 * 137) % 3_400) + addon);

        // 0 - 40 units
        let quantity = ((seed * 7) % 41) as i64;

        NewProduct::new(name, quantity, price)
    })
}
