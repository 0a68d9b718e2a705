//! Audit log — SQLite-based operation history.
//!
//! Stores a record of every vault operation (add, rotate, remove, etc.)
//! in a local SQLite database next to the vault file.
//!
//! Designed for graceful degradation: if the database can't be opened or
//! written to, operations silently continue without logging.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::errors::{Result, VaultError};

/// A single audit log entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub owner_id: String,
    pub record_kind: Option<String>,
    pub record_label: Option<String>,
}

/// SQLite-backed audit log.
pub struct AuditLog {
    conn: Connection,
}

impl AuditLog {
    /// Open (or create) the audit database at `<vault_dir>/audit.db`.
    ///
    /// Returns `None` if the database can't be opened — callers should
    /// treat this as "audit logging unavailable" and continue normally.
    pub fn open(vault_dir: &Path) -> Option<Self> {
        let db_path = vault_dir.join("audit.db");
        let conn = Connection::open(&db_path).ok()?;

        // Set restrictive permissions on the audit database (owner-only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&db_path, perms);
        }

        // Create the table if it doesn't exist.
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit_log (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp    TEXT NOT NULL,
                operation    TEXT NOT NULL,
                owner_id     TEXT NOT NULL,
                record_kind  TEXT,
                record_label TEXT
            );",
        )
        .ok()?;

        Some(Self { conn })
    }

    /// Record an operation. Fire-and-forget — errors are silently ignored.
    pub fn log(
        &self,
        operation: &str,
        owner_id: &str,
        record_kind: Option<&str>,
        record_label: Option<&str>,
    ) {
        let now = Utc::now().to_rfc3339();
        let _ = self.conn.execute(
            "INSERT INTO audit_log (timestamp, operation, owner_id, record_kind, record_label)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![now, operation, owner_id, record_kind, record_label],
        );
    }

    /// Query recent audit entries for one owner.
    ///
    /// - `limit`: maximum number of entries to return (most recent first).
    /// - `since`: if provided, only return entries newer than this timestamp.
    pub fn query(
        &self,
        owner_id: &str,
        limit: usize,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AuditEntry>> {
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let (sql, params): (&str, Vec<Box<dyn rusqlite::types::ToSql>>) = match since {
            Some(ref ts) => (
                "SELECT id, timestamp, operation, owner_id, record_kind, record_label
                 FROM audit_log
                 WHERE owner_id = ?1 AND timestamp >= ?2
                 ORDER BY id DESC
                 LIMIT ?3",
                vec![
                    Box::new(owner_id.to_string()) as Box<dyn rusqlite::types::ToSql>,
                    Box::new(ts.to_rfc3339()),
                    Box::new(limit_i64),
                ],
            ),
            None => (
                "SELECT id, timestamp, operation, owner_id, record_kind, record_label
                 FROM audit_log
                 WHERE owner_id = ?1
                 ORDER BY id DESC
                 LIMIT ?2",
                vec![
                    Box::new(owner_id.to_string()) as Box<dyn rusqlite::types::ToSql>,
                    Box::new(limit_i64),
                ],
            ),
        };

        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| VaultError::AuditError(format!("query prepare: {e}")))?;

        let params_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| &**p).collect();

        let rows = stmt
            .query_map(params_refs.as_slice(), |row| {
                let ts_str: String = row.get(1)?;
                let timestamp = DateTime::parse_from_rfc3339(&ts_str)
                    .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

                Ok(AuditEntry {
                    id: row.get(0)?,
                    timestamp,
                    operation: row.get(2)?,
                    owner_id: row.get(3)?,
                    record_kind: row.get(4)?,
                    record_label: row.get(5)?,
                })
            })
            .map_err(|e| VaultError::AuditError(format!("query exec: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| VaultError::AuditError(format!("row parse: {e}")))?);
        }

        Ok(entries)
    }

    /// Return the path to the audit database (for testing/display).
    pub fn db_path(vault_dir: &Path) -> PathBuf {
        vault_dir.join("audit.db")
    }
}
