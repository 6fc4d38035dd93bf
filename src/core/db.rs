//! Database for storing OAuth refresh tokens per authorized account

use anyhow::Result;
use rusqlite::Connection;

/// Open an async connection to the db at the given path
pub async fn async_db(db_path: &str) -> Result<tokio_rusqlite::Connection> {
    let db = tokio_rusqlite::Connection::open(format!("{}/chronosage.db", db_path)).await?;
    Ok(db)
}

/// Create tables if they don't already exist. Safe to run repeatedly.
pub fn initialize_db(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS auth (
            id TEXT PRIMARY KEY,
            service TEXT NOT NULL,
            refresh_token TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}
