//! # Seed Data Loader
//!
//! Fills an empty database with demo stores and catalog products.
//!
//! ## Usage
//! ```bash
//! # Seed ./database.db (default)
//! cargo run -p pantry-db --bin seed
//!
//! # Specify database path
//! cargo run -p pantry-db --bin seed -- --db ./data/pantry.db
//! ```
//!
//! Opening the database also creates the schema and the demo users, so a
//! freshly seeded file is ready for the API server.

use std::env;

use pantry_db::seed::{demo_products, demo_stores};
use pantry_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("database.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Pantry Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: database.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Pantry Seed Data Loader");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Schema and demo users ready");

    let existing = db.stores().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} stores", existing);
        println!("  Skipping seed to avoid duplicates.");
        db.close().await;
        return Ok(());
    }

    let mut store_ids = Vec::new();
    for store in demo_stores() {
        let created = db.stores().insert(&store).await?;
        println!("  + store #{} {}", created.id, created.name);
        store_ids.push(created.id);
    }

    let mut products = 0;
    for (store_index, mut product) in demo_products() {
        let Some(store_id) = store_ids.get(store_index) else {
            eprintln!("Skipping {}: no store at index {}", product.name, store_index);
            continue;
        };
        product.store_id = *store_id;

        if let Err(e) = db.products().create(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }
        products += 1;
    }

    println!();
    println!("✓ Seeded {} stores and {} products", store_ids.len(), products);

    db.close().await;
    Ok(())
}
