//! # Seed Data Generator
//!
//! Populates a development database with the default price catalog and a
//! set of sample sessions.
//!
//! ## Usage
//! ```bash
//! # 20 sessions (default)
//! cargo run -p cardcalc-store --bin seed
//!
//! # Custom amount
//! cargo run -p cardcalc-store --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p cardcalc-store --bin seed -- --db ./data/cardcalc.db
//! ```
//!
//! Sessions are spread over the last days, one hour apart, each with one to
//! four ledger rows drawn from the catalog.

use std::env;

use cardcalc_core::{
    format_currency, PriceCatalog, QuantityLedger, Session, SessionIdGenerator,
    DEFAULT_CURRENCY_SYMBOL,
};
use cardcalc_store::{DbConfig, SqliteStore};
use chrono::{Duration, Utc};

/// Quantities as a user would type them.
const QUANTITIES: &[&str] = &["1", "2", "3", "5", "10", "1/2", "1 1/2", "2 1/4", "0", ""];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 20;
    let mut db_path = String::from("./cardcalc_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("CardCalc Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of sessions to generate (default: 20)");
                println!("  -d, --db <PATH>    Database file path (default: ./cardcalc_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 CardCalc Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Sessions: {}", count);
    println!();

    let store = SqliteStore::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let catalog = store.catalog().load().await;
    println!("✓ Price catalog ready ({} prices)", catalog.len());

    let history = store.history();
    let existing = history.load_all().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} sessions", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating sessions...");

    let pairs: Vec<_> = catalog.entries().map(|(n, d, _)| (n, d)).collect();
    let mut ids = SessionIdGenerator::new();
    let start = Utc::now() - Duration::hours(count as i64);
    let mut sessions = Vec::with_capacity(count);
    let mut grand_total = 0.0;

    for seed in 0..count {
        let date = start + Duration::hours(seed as i64);
        let Some(session) = generate_session(&catalog, &pairs, &mut ids, date, seed) else {
            continue;
        };

        grand_total += session.overall_total();
        sessions.push(session);

        if sessions.len() % 50 == 0 {
            println!("  Generated {} sessions...", sessions.len());
        }
    }

    history.save_all(&sessions).await?;

    println!();
    println!("✓ Generated {} sessions", sessions.len());
    println!(
        "  Combined total: {}",
        format_currency(DEFAULT_CURRENCY_SYMBOL, grand_total)
    );

    if let Some(newest) = history.list_sessions().await.first() {
        println!("  Newest session: {} ({} item(s))", newest.id(), newest.item_count());
    }

    println!();
    println!("✓ Seed complete!");

    store.close().await;
    Ok(())
}

/// Fills a ledger the way a user would and confirms it.
/// Returns `None` when every drawn quantity was blank or zero.
fn generate_session(
    catalog: &PriceCatalog,
    pairs: &[(cardcalc_core::Network, cardcalc_core::Denomination)],
    ids: &mut SessionIdGenerator,
    date: chrono::DateTime<Utc>,
    seed: usize,
) -> Option<Session> {
    if pairs.is_empty() {
        return None;
    }

    let mut ledger = QuantityLedger::new();
    let rows = 1 + seed % 4;

    for row in 0..rows {
        let (network, denomination) = pairs[(seed * 7 + row * 5) % pairs.len()];
        let quantity = QUANTITIES[(seed * 3 + row) % QUANTITIES.len()];
        ledger.set_quantity(network, denomination, quantity);
    }

    let id = ids.next_id(date, 0);
    Session::from_ledger(id, date, &ledger, catalog).ok()
}
