//! # Catalog Seeder
//!
//! Prepares a StoreSense database: applies migrations, seeds the default
//! catalog, and optionally registers a demo store.
//!
//! ## Usage
//! ```bash
//! # Migrate and seed ./storesense.db (or STORESENSE_DB_PATH)
//! cargo run -p storesense-db --bin seed
//!
//! # Also register a demo Supermarket for "demo-user" and print its dashboard
//! cargo run -p storesense-db --bin seed -- --owner demo-user --store-type Supermarket
//!
//! # Specify database path, dump the dashboard as JSON
//! cargo run -p storesense-db --bin seed -- --db ./data/dev.db --owner demo-user --json
//! ```
//!
//! Running it again is harmless: the catalog is only written into an empty
//! database. A demo store, however, is registered on every run that asks
//! for one.

use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use storesense_core::NewStore;
use storesense_db::migrations::migration_status;
use storesense_db::service::catalog::seed_catalog;
use storesense_db::service::inventory::dashboard;
use storesense_db::service::stores::{register_store, store_type_named};
use storesense_db::{Dashboard, Database, SeedOutcome, StoreSenseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config = StoreSenseConfig::load()?;
    let mut owner: Option<String> = None;
    let mut store_type = String::from("Supermarket");
    let mut store_name: Option<String> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--owner" | "-o" => {
                if i + 1 < args.len() {
                    owner = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--store-type" | "-t" => {
                if i + 1 < args.len() {
                    store_type = args[i + 1].clone();
                    i += 1;
                }
            }
            "--store-name" | "-n" => {
                if i + 1 < args.len() {
                    store_name = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--json" => json = true,
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                print_help();
                return Err(format!("Unknown argument: {}", other).into());
            }
        }
        i += 1;
    }

    println!("StoreSense Catalog Seeder");
    println!("=========================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::new(config.db_config()).await?;
    println!("✓ Connected to database");
    let (total, applied) = migration_status(db.pool()).await?;
    println!("✓ Migrations applied ({}/{})", applied, total);

    match seed_catalog(&db).await? {
        SeedOutcome::Seeded {
            store_types,
            default_products,
        } => println!(
            "✓ Catalog seeded: {} store types, {} default products",
            store_types, default_products
        ),
        SeedOutcome::AlreadySeeded => println!(
            "✓ Catalog already present, left unchanged: {} store types, {} default products",
            db.catalog().count_store_types().await?,
            db.catalog().count_default_products().await?
        ),
    }

    let Some(owner) = owner else {
        println!();
        println!("✓ Seed complete!");
        db.close().await;
        return Ok(());
    };

    let resolved = match store_type_named(&db, &store_type).await {
        Ok(resolved) => resolved,
        Err(err) => {
            if err.is_not_found() {
                let known: Vec<String> = db
                    .catalog()
                    .list_store_types()
                    .await?
                    .into_iter()
                    .map(|t| t.name)
                    .collect();
                eprintln!("  Known types: {}", known.join(", "));
            }
            db.close().await;
            return Err(err.into());
        }
    };

    let fields = NewStore {
        name: store_name.unwrap_or_else(|| format!("Demo {}", resolved.name)),
        region: None,
        store_type_id: Some(resolved.id.clone()),
    };

    let (store, items) = register_store(&db, &owner, &fields).await?;
    println!(
        "✓ Registered store '{}' ({}) with {} starter items",
        store.name,
        resolved.name,
        items.len()
    );

    let dash = dashboard(&db, &owner, &store.id, &config.forecast_policy()).await?;
    println!();
    if json {
        println!("{}", serde_json::to_string_pretty(&dash)?);
    } else {
        print_dashboard(&dash);
    }

    db.close().await;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storesense=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_help() {
    println!("StoreSense Catalog Seeder");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>           Database file path (default: STORESENSE_DB_PATH or ./storesense.db)");
    println!("  -o, --owner <ID>          Register a demo store for this user id");
    println!("  -t, --store-type <NAME>   Store type of the demo store (default: Supermarket)");
    println!("  -n, --store-name <NAME>   Name of the demo store (default: Demo <type>)");
    println!("      --json                Print the dashboard as JSON");
    println!("  -h, --help                Show this help message");
}

fn print_dashboard(dash: &Dashboard) {
    println!("Dashboard: {}", dash.store.name);
    println!(
        "  {:<24} {:>6} {:>9} {:>10} {:>8} {:>11}",
        "Item", "Stock", "Price", "Days left", "Reorder", "Value"
    );

    for row in &dash.rows {
        let days = row
            .metrics
            .days_to_sell_out
            .map(|d| format!("{:.1}", d))
            .unwrap_or_else(|| "-".to_string());
        let flag = if row.metrics.low_stock { "  LOW" } else { "" };

        println!(
            "  {:<24} {:>6} {:>9} {:>10} {:>8} {:>11}{}",
            row.item.name,
            row.item.stock,
            row.item.price().to_string(),
            days,
            row.metrics.reorder_amount,
            row.metrics.line_value.to_string(),
            flag
        );
    }

    println!();
    println!(
        "  {} items, {} low on stock, {} units, total value {}",
        dash.summary.item_count,
        dash.summary.low_stock_count,
        dash.summary.total_units,
        dash.summary.total_value
    );
}
