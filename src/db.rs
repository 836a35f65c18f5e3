use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn connect(path: &str) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Failed to open {path}"))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

/// Create the countries table if absent, then clear it (full refresh).
/// Every run starts from an empty table.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS countries (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            country_name TEXT NOT NULL,
            capital      TEXT,
            population   INTEGER,
            area         INTEGER
        );
        DELETE FROM countries;
        ",
    )
    .context("Failed to initialize countries schema")?;
    Ok(())
}

/// One extracted country. Fields other than the name are independently
/// optional; a record with every field unresolved is still a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    pub country_name: String,
    pub capital: Option<String>,
    pub population: Option<i64>,
    pub area: Option<i64>,
}

pub fn insert_countries(conn: &Connection, records: &[CountryRecord]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO countries (country_name, capital, population, area)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for r in records {
            stmt.execute(rusqlite::params![
                r.country_name,
                r.capital,
                r.population,
                r.area,
            ])?;
        }
    }
    tx.commit().context("Failed to commit country batch")?;
    Ok(())
}

// ── Reporting ──

pub struct StoredCountry {
    pub id: i64,
    pub country_name: String,
    pub capital: Option<String>,
    pub population: Option<i64>,
    pub area: Option<i64>,
}

pub fn fetch_sample(conn: &Connection, limit: usize) -> Result<Vec<StoredCountry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, country_name, capital, population, area
         FROM countries ORDER BY id LIMIT {limit}"
    ))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(StoredCountry {
                id: row.get(0)?,
                country_name: row.get(1)?,
                capital: row.get(2)?,
                population: row.get(3)?,
                area: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// SUM(population) over all rows. SQL sums skip NULLs, so this is None
/// only when no row has a population at all.
pub fn total_population(conn: &Connection) -> Result<Option<i64>> {
    let total = conn.query_row("SELECT SUM(population) FROM countries", [], |r| r.get(0))?;
    Ok(total)
}

pub fn count_countries(conn: &Connection) -> Result<usize> {
    let n = conn.query_row("SELECT COUNT(*) FROM countries", [], |r| r.get(0))?;
    Ok(n)
}
