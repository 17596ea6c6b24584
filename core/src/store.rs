//! SQLite persistence layer.
//!
//! RULE: Only store code talks to the database.
//! Scoring, analytics, and the service call store methods — they never
//! execute SQL directly.

use crate::error::AdvisorResult;
use rusqlite::Connection;

mod customer;
mod recommendation;

pub struct AdvisorStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl AdvisorStore {
    pub fn open(path: &str) -> AdvisorResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> AdvisorResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// The background refresher uses this so it never shares a connection
    /// with the read path. For in-memory databases this returns a new,
    /// isolated database.
    pub fn reopen(&self) -> AdvisorResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> AdvisorResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_customers.sql"))?;
        self.conn
            .execute_batch(include_str!("../../migrations/002_recommendations.sql"))?;
        Ok(())
    }
}
