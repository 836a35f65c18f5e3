mod db;
mod fetch;
mod parser;

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use rusqlite::Connection;
use tracing::{error, info};

const SOURCE_URL: &str = "https://www.scrapethissite.com/pages/simple/";
const DB_PATH: &str = "countries.db";
const RECORD_LIMIT: usize = 20;
const SAMPLE_ROWS: usize = 5;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let code = match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Run failed: {e:#}");
            ExitCode::from(2)
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }
    code
}

/// Fetch → extract → write → report. A failed fetch or an empty
/// extraction halts the run with a message and no write; store and
/// report errors propagate to main, which maps them to a non-zero exit.
/// The connection closes by drop on every path.
fn run() -> Result<()> {
    let conn = db::connect(DB_PATH)?;
    db::init_schema(&conn)?;

    let Some(html) = fetch::fetch_page(SOURCE_URL) else {
        println!("Could not access website or content retrieval failed. Program halted.");
        return Ok(());
    };

    let records = parser::extract_countries(&html, RECORD_LIMIT);
    if records.is_empty() {
        println!("No data found to save. Program halted.");
        return Ok(());
    }
    info!("Extracted {} country records", records.len());

    db::insert_countries(&conn, &records)?;
    report(&conn)
}

fn report(conn: &Connection) -> Result<()> {
    println!("Scraping and saving completed successfully.");

    let sample = db::fetch_sample(conn, SAMPLE_ROWS)?;
    println!("--- First {SAMPLE_ROWS} Records ---");
    for r in &sample {
        println!(
            "id={} | Country={} | Capital={} | Population={} | Area(km^2)={}",
            r.id,
            r.country_name,
            r.capital.as_deref().unwrap_or("NULL"),
            opt_num(r.population),
            opt_num(r.area),
        );
    }

    let total = db::total_population(conn)?;
    let count = db::count_countries(conn)?;
    println!("--------------------");
    println!("Total Population for {} records: {}", count, opt_num(total));
    Ok(())
}

fn opt_num(v: Option<i64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "NULL".into())
}
