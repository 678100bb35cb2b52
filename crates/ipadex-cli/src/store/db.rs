//! SQLite record store
//!
//! One row per processed archive, keyed by filename. Rows are only ever
//! inserted; re-processing a known filename is a no-op.

use std::fmt;
use std::path::Path;

use ipadex_schema::{AppRecord, Platform};
use rusqlite::{Connection, Row, params};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of [`AppDb::insert_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was written.
    Inserted,
    /// A row with the same filename already existed; nothing changed.
    AlreadyPresent,
}

// Columns are coalesced so rows written by older tooling, which left
// fields NULL for unreadable archives, still load.
const SELECT_APPS: &str = "
    SELECT filename,
           COALESCE(bundle_id, ''),
           COALESCE(title, ''),
           COALESCE(version, ''),
           COALESCE(min_os, ''),
           COALESCE(platform, 2),
           COALESCE(size, 0),
           COALESCE(upload_date, ''),
           COALESCE(has_icon, 0)
    FROM apps";

/// Record store for processed archives
pub struct AppDb {
    conn: Connection,
}

impl fmt::Debug for AppDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppDb")
            .field("path", &self.conn.path())
            .finish_non_exhaustive()
    }
}

impl AppDb {
    /// Open or create the store at `path`, creating parent directories.
    pub fn open_at(path: &Path) -> Result<Self, DbError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Open a throwaway in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self, DbError> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS apps (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                filename TEXT UNIQUE NOT NULL,
                bundle_id TEXT NOT NULL DEFAULT '',
                title TEXT NOT NULL DEFAULT '',
                version TEXT NOT NULL DEFAULT '',
                min_os TEXT NOT NULL DEFAULT '',
                platform INTEGER NOT NULL DEFAULT 2,
                size INTEGER NOT NULL DEFAULT 0,
                upload_date TEXT NOT NULL DEFAULT '',
                has_icon INTEGER NOT NULL DEFAULT 0
            );
            ",
        )?;
        Ok(())
    }

    /// Whether a record exists for `filename`.
    pub fn contains(&self, filename: &str) -> Result<bool, DbError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT 1 FROM apps WHERE filename = ?1")?;
        Ok(stmt.exists(params![filename])?)
    }

    /// Insert `record` unless its filename is already stored.
    ///
    /// The uniqueness check and the write are one statement, so two
    /// pipelines racing on the same file cannot both insert it.
    pub fn insert_if_absent(&self, record: &AppRecord) -> Result<InsertOutcome, DbError> {
        let changed = self.conn.execute(
            "INSERT INTO apps
                (filename, bundle_id, title, version, min_os, platform, size, upload_date, has_icon)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(filename) DO NOTHING",
            params![
                record.filename,
                record.bundle_id,
                record.title,
                record.version,
                record.min_os,
                i64::from(record.platform.bits()),
                record.size as i64,
                record.upload_date,
                record.has_icon,
            ],
        )?;

        Ok(if changed == 0 {
            InsertOutcome::AlreadyPresent
        } else {
            InsertOutcome::Inserted
        })
    }

    /// Get the record for `filename`.
    pub fn get_app(&self, filename: &str) -> Result<Option<AppRecord>, DbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_APPS} WHERE filename = ?1"))?;
        let mut rows = stmt.query(params![filename])?;

        if let Some(row) = rows.next()? {
            Ok(Some(record_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// All records, newest upload first, then by filename.
    pub fn list_apps(&self) -> Result<Vec<AppRecord>, DbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_APPS} ORDER BY upload_date DESC, filename ASC"))?;

        let apps = stmt.query_map([], record_from_row)?;
        apps.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize, DbError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM apps", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<AppRecord> {
    Ok(AppRecord {
        filename: row.get(0)?,
        bundle_id: row.get(1)?,
        title: row.get(2)?,
        version: row.get(3)?,
        min_os: row.get(4)?,
        platform: Platform::from_bits(row.get::<_, i64>(5)? as u32),
        size: row.get::<_, i64>(6)? as u64,
        upload_date: row.get(7)?,
        has_icon: row.get::<_, i64>(8)? != 0,
    })
}
