//! Blocked-date persistence using SQLite

use chrono::Utc;
use rusqlite::{Connection, ErrorCode, params};
use tracing::{debug, info, warn};

use crate::date::NormalizedDate;
use crate::{Error, Result};

/// SQLite-backed storage for blocked dates.
///
/// The date string is the primary key, which makes the database the
/// authoritative tie-breaker when two writers race to block the same date:
/// exactly one INSERT succeeds and the loser sees a constraint violation.
pub struct BlockedDateStore {
    conn: Connection,
}

impl BlockedDateStore {
    /// Open (or create) the store at the given database path.
    pub fn new(db_path: &str) -> Result<Self> {
        debug!("Opening blocked-date database at: {}", db_path);
        let conn = Connection::open(db_path)?;
        let store = Self { conn };
        store.init_tables()?;
        info!("BlockedDateStore initialized successfully");
        Ok(store)
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_tables()?;
        Ok(store)
    }

    fn init_tables(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS blocked_dates (
                date TEXT PRIMARY KEY,
                created_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Insert a blocked date. Fails with [`Error::AlreadyBlocked`] if the
    /// date is already present.
    pub fn insert(&self, date: &NormalizedDate) -> Result<()> {
        let result = self.conn.execute(
            "INSERT INTO blocked_dates (date, created_at) VALUES (?1, ?2)",
            params![date.to_string(), Utc::now().to_rfc3339()],
        );

        match result {
            Ok(_) => {
                debug!("Inserted blocked date: {}", date);
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(Error::AlreadyBlocked)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a blocked date. Fails with [`Error::NotBlocked`] if the date
    /// was not present.
    pub fn delete(&self, date: &NormalizedDate) -> Result<()> {
        let rows_affected = self.conn.execute(
            "DELETE FROM blocked_dates WHERE date = ?1",
            params![date.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(Error::NotBlocked);
        }
        debug!("Deleted blocked date: {}", date);
        Ok(())
    }

    /// Full scan of the table. Rows that no longer parse as dates are
    /// skipped with a warning rather than poisoning the whole reload.
    pub fn select_all(&self) -> Result<Vec<NormalizedDate>> {
        let mut stmt = self.conn.prepare("SELECT date FROM blocked_dates")?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut dates = Vec::with_capacity(rows.len());
        for raw in rows {
            match NormalizedDate::parse(&raw) {
                Ok(date) => dates.push(date),
                Err(e) => warn!("skipping unparseable row {raw:?}: {e}"),
            }
        }
        dates.sort();
        Ok(dates)
    }
}
