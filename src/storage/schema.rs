//! Database schema and connection management

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// Database connection manager for stored narratives
pub struct RoundupDatabase {
    pub(crate) conn: Connection,
}

impl RoundupDatabase {
    /// Open (or create) the database at `path` and ensure tables exist
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// A throwaway database, used when the file can't be opened and in tests
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS narratives (
                league_id INTEGER NOT NULL,
                season INTEGER NOT NULL,
                week INTEGER NOT NULL,
                provider TEXT NOT NULL,
                model TEXT NOT NULL,
                overview TEXT NOT NULL,
                storylines TEXT NOT NULL,
                matchup_highlights TEXT NOT NULL,
                standings_blurb TEXT NOT NULL,
                incentives_blurb TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                PRIMARY KEY (league_id, season, week)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_narratives_created
             ON narratives(created_at)",
            [],
        )?;

        Ok(())
    }
}
