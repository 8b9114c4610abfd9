//! # Seed Data Generator
//!
//! Builds a demo franchise through the use cases and prints the resulting
//! tree and the per-branch top-stock report as JSON.
//!
//! ## Usage
//! ```bash
//! # Three branches (default) in ./franchise_dev.db
//! cargo run -p franchise-db --bin seed
//!
//! # More branches, another file
//! cargo run -p franchise-db --bin seed -- --branches 6 --db ./data/franchise.db
//! ```
//!
//! Database settings come from `FRANCHISE_DB_*` variables first. `--db`
//! overrides the path. Logs go to stderr, JSON to stdout.

use std::env;

use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use franchise_core::gateway::FranchiseGateway;
use franchise_core::{Branch, EntityId, Franchise, Product, UseCases};
use franchise_db::{Database, DbConfig};

/// Branch names, used in order and suffixed when exhausted.
const BRANCH_NAMES: &[&str] = &[
    "Downtown",
    "Airport",
    "Harbor",
    "University",
    "Old Town",
    "Central Station",
];

/// Menu stocked in every branch. Stock is varied per branch.
const PRODUCTS: &[(&str, i32)] = &[
    ("Espresso Beans 1kg", 40),
    ("Oat Milk", 25),
    ("Paper Cups", 300),
    ("Croissant", 12),
    ("Cold Brew Concentrate", 18),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config = DbConfig::from_env()?;
    let mut branch_count: usize = 3;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--branches" | "-b" => {
                if i + 1 < args.len() {
                    branch_count = args[i + 1].parse().unwrap_or(3);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Franchise Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -b, --branches <N>  Number of branches to create (default: 3)");
                println!("  -d, --db <PATH>     Database file path (default: ./franchise_dev.db)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let db = Database::new(config).await?;
    let use_cases = db.use_cases();

    let existing = db.franchises().find_all().await?;
    let franchise_id = match existing.first().and_then(|franchise| franchise.id) {
        Some(id) => {
            info!(franchise_id = id, "Database already seeded, reporting on existing data");
            id
        }
        None => seed(&use_cases, branch_count).await?,
    };

    let listing = use_cases.list_franchises.execute().await?;
    let report = use_cases.top_stock_per_branch.execute(franchise_id).await?;

    let output = json!({
        "franchises": listing,
        "top_stock_per_branch": report,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    db.close().await;
    Ok(())
}

/// Creates one franchise with `branch_count` branches and a product
/// catalogue in each. Returns the franchise id.
async fn seed(
    use_cases: &UseCases,
    branch_count: usize,
) -> Result<EntityId, Box<dyn std::error::Error>> {
    let franchise = use_cases
        .create_franchise
        .execute(&Franchise::new("Acme Coffee"))
        .await?;
    let franchise_id = franchise.id.ok_or("store returned a franchise without an id")?;

    for index in 0..branch_count {
        let branch = use_cases
            .add_branch
            .execute(franchise_id, &Branch::new(branch_name(index)))
            .await?;
        let branch_id = branch.id.ok_or("store returned a branch without an id")?;

        // The last branch stays empty so the report shows a branch without a product
        if branch_count > 1 && index == branch_count - 1 {
            continue;
        }

        for (offset, (name, base_stock)) in PRODUCTS.iter().enumerate() {
            let stock = vary_stock(*base_stock, index, offset);
            use_cases
                .add_product
                .execute(branch_id, &Product::new(*name, stock))
                .await?;
        }
    }

    info!(franchise_id, branches = branch_count, "Seed complete");
    Ok(franchise_id)
}

fn branch_name(index: usize) -> String {
    let base = BRANCH_NAMES[index % BRANCH_NAMES.len()];
    match index / BRANCH_NAMES.len() {
        0 => base.to_string(),
        round => format!("{} {}", base, round + 1),
    }
}

/// Deterministic spread so different branches have different top products.
fn vary_stock(base: i32, branch: usize, product: usize) -> i32 {
    let swing = ((branch * 7 + product * 13) % 60) as i32;
    (base + swing - 20).max(0)
}

/// Initializes logging to stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO, debug for the franchise crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,franchise=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
