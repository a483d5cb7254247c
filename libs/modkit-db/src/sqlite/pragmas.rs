//! SQLite PRAGMA parameters parsed from DSN query strings.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use std::collections::HashMap;
use std::time::Duration;

fn journal_mode(s: &str) -> Option<SqliteJournalMode> {
    match s.to_uppercase().as_str() {
        "DELETE" => Some(SqliteJournalMode::Delete),
        "WAL" => Some(SqliteJournalMode::Wal),
        "MEMORY" => Some(SqliteJournalMode::Memory),
        "TRUNCATE" => Some(SqliteJournalMode::Truncate),
        "PERSIST" => Some(SqliteJournalMode::Persist),
        "OFF" => Some(SqliteJournalMode::Off),
        _ => None,
    }
}

fn synchronous(s: &str) -> Option<SqliteSynchronous> {
    match s.to_uppercase().as_str() {
        "OFF" => Some(SqliteSynchronous::Off),
        "NORMAL" => Some(SqliteSynchronous::Normal),
        "FULL" => Some(SqliteSynchronous::Full),
        "EXTRA" => Some(SqliteSynchronous::Extra),
        _ => None,
    }
}

/// Parsed SQLite PRAGMA parameters. Invalid values are logged and ignored.
#[derive(Clone, Debug, Default)]
pub(crate) struct Pragmas {
    pub journal_mode: Option<SqliteJournalMode>,
    pub synchronous: Option<SqliteSynchronous>,
    pub busy_timeout_ms: Option<u64>,
    /// Legacy `wal=true|false|1|0`.
    pub wal_toggle: Option<bool>,
}

impl Pragmas {
    pub(crate) fn from_pairs(pairs: &HashMap<String, String>) -> Self {
        let mut pragmas = Pragmas::default();

        for (key, value) in pairs {
            match key.as_str() {
                "journal_mode" => match journal_mode(value) {
                    Some(m) => pragmas.journal_mode = Some(m),
                    None => tracing::warn!("Invalid 'journal_mode' PRAGMA value '{}', ignoring", value),
                },
                "synchronous" => match synchronous(value) {
                    Some(m) => pragmas.synchronous = Some(m),
                    None => tracing::warn!("Invalid 'synchronous' PRAGMA value '{}', ignoring", value),
                },
                "busy_timeout" => match value.parse::<u64>() {
                    Ok(ms) => pragmas.busy_timeout_ms = Some(ms),
                    Err(_) => {
                        tracing::warn!("Invalid 'busy_timeout' PRAGMA value '{}', ignoring", value)
                    }
                },
                "wal" => match value.to_lowercase().as_str() {
                    "true" | "1" => pragmas.wal_toggle = Some(true),
                    "false" | "0" => pragmas.wal_toggle = Some(false),
                    _ => tracing::warn!("Invalid 'wal' PRAGMA value '{}', ignoring", value),
                },
                "mode" => {}
                _ => tracing::debug!("Unknown SQLite PRAGMA parameter: {}", key),
            }
        }

        pragmas
    }

    /// Journal mode to use: explicit `journal_mode`, then `wal`, then WAL for
    /// files and DELETE for in-memory databases.
    pub(crate) fn effective_journal_mode(&self, in_memory: bool) -> SqliteJournalMode {
        if let Some(mode) = self.journal_mode {
            return mode;
        }
        match (self.wal_toggle, in_memory) {
            (_, true) | (Some(false), _) => SqliteJournalMode::Delete,
            _ => SqliteJournalMode::Wal,
        }
    }

    pub(crate) fn apply(
        &self,
        opts: SqliteConnectOptions,
        in_memory: bool,
        default_busy_timeout_ms: u64,
    ) -> SqliteConnectOptions {
        let busy = self.busy_timeout_ms.unwrap_or(default_busy_timeout_ms);
        opts.journal_mode(self.effective_journal_mode(in_memory))
            .synchronous(self.synchronous.unwrap_or(SqliteSynchronous::Normal))
            .busy_timeout(Duration::from_millis(busy))
            .foreign_keys(true)
    }
}
