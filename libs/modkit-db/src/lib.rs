//! Database handle shared by the server and its modules.
//!
//! `DbHandle` owns one sqlx pool (Postgres or SQLite, chosen by DSN scheme)
//! and a SeaORM connection wrapping the same pool. Modules receive the
//! SeaORM connection; the binary owns the handle and closes it on shutdown.
//!
//! ```no_run
//! # async fn demo() -> modkit_db::Result<()> {
//! use modkit_db::{ConnectOpts, DbHandle};
//!
//! let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
//! let conn = db.sea();
//! # drop(conn);
//! db.close().await;
//! # Ok(()) }
//! ```

pub mod errors;
pub mod sqlite;

pub use sqlite::resolve_sqlite_dsn;

use std::str::FromStr;
use std::time::Duration;

use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::sqlite::{parse_sqlite_dsn, Pragmas, SqliteTarget};

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error("Invalid DSN '{dsn}': {message}")]
    InvalidDsn { dsn: String, message: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Supported engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DbEngine {
    Postgres,
    Sqlite,
}

/// Pool knobs; each driver applies the subset it supports.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// Maximum number of connections in the pool. In-memory SQLite always uses one.
    pub max_conns: Option<u32>,
    pub min_conns: Option<u32>,
    /// Timeout to acquire a connection from the pool.
    pub acquire_timeout: Option<Duration>,
    pub idle_timeout: Option<Duration>,
    /// SQLite busy timeout unless the DSN sets `busy_timeout`.
    pub busy_timeout_ms: u64,
    /// For SQLite file DSNs, create parent directories if missing.
    pub create_sqlite_dirs: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            min_conns: None,
            acquire_timeout: Some(Duration::from_secs(30)),
            idle_timeout: None,
            busy_timeout_ms: DEFAULT_SQLITE_BUSY_TIMEOUT_MS,
            create_sqlite_dirs: true,
        }
    }
}

const DEFAULT_SQLITE_BUSY_TIMEOUT_MS: u64 = 5000;

/// One concrete sqlx pool.
#[derive(Clone, Debug)]
pub enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

/// Main handle.
#[derive(Debug)]
pub struct DbHandle {
    engine: DbEngine,
    pool: DbPool,
    dsn: String,
    sea: DatabaseConnection,
}

impl DbHandle {
    /// Detect engine by DSN scheme.
    pub fn detect(dsn: &str) -> Result<DbEngine> {
        let s = dsn.trim_start();
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            Ok(DbEngine::Postgres)
        } else if s.starts_with("sqlite:") {
            Ok(DbEngine::Sqlite)
        } else {
            Err(DbError::UnknownDsn(redact_credentials_in_dsn(dsn)))
        }
    }

    /// Connect and build handle.
    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        let engine = Self::detect(dsn)?;
        let handle = match engine {
            DbEngine::Postgres => Self::connect_postgres(dsn, &opts).await?,
            DbEngine::Sqlite => Self::connect_sqlite(dsn, &opts).await?,
        };
        tracing::info!(
            engine = ?handle.engine,
            dsn = %redact_credentials_in_dsn(&handle.dsn),
            "database connected"
        );
        Ok(handle)
    }

    async fn connect_postgres(dsn: &str, opts: &ConnectOpts) -> Result<Self> {
        let connect = PgConnectOptions::from_str(dsn)?;
        let mut o = PgPoolOptions::new();
        if let Some(n) = opts.max_conns {
            o = o.max_connections(n);
        }
        if let Some(n) = opts.min_conns {
            o = o.min_connections(n);
        }
        if let Some(t) = opts.acquire_timeout {
            o = o.acquire_timeout(t);
        }
        if let Some(t) = opts.idle_timeout {
            o = o.idle_timeout(t);
        }
        let pool = o.connect_with(connect).await?;
        let sea = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
        Ok(Self {
            engine: DbEngine::Postgres,
            pool: DbPool::Postgres(pool),
            dsn: dsn.to_string(),
            sea,
        })
    }

    async fn connect_sqlite(dsn: &str, opts: &ConnectOpts) -> Result<Self> {
        let parsed = parse_sqlite_dsn(dsn).ok_or_else(|| DbError::InvalidDsn {
            dsn: dsn.to_string(),
            message: "expected sqlite::memory: or sqlite://<path>".to_string(),
        })?;
        let pragmas = Pragmas::from_pairs(&parsed.params);

        let (connect, in_memory) = match &parsed.target {
            SqliteTarget::Memory => (SqliteConnectOptions::from_str("sqlite::memory:")?, true),
            SqliteTarget::File(path) => {
                if opts.create_sqlite_dirs {
                    if let Some(parent) = path.parent() {
                        if !parent.as_os_str().is_empty() {
                            std::fs::create_dir_all(parent)?;
                        }
                    }
                }
                let o = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true);
                (o, false)
            }
        };
        let connect = pragmas.apply(connect, in_memory, opts.busy_timeout_ms);

        let mut o = SqlitePoolOptions::new();
        if in_memory {
            // Every connection would otherwise see its own empty database.
            o = o
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            if let Some(n) = opts.max_conns {
                o = o.max_connections(n);
            }
            if let Some(n) = opts.min_conns {
                o = o.min_connections(n);
            }
            if let Some(t) = opts.idle_timeout {
                o = o.idle_timeout(t);
            }
        }
        if let Some(t) = opts.acquire_timeout {
            o = o.acquire_timeout(t);
        }

        let pool = o.connect_with(connect).await?;
        let sea = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone());
        Ok(Self {
            engine: DbEngine::Sqlite,
            pool: DbPool::Sqlite(pool),
            dsn: dsn.to_string(),
            sea,
        })
    }

    /// Graceful pool close.
    pub async fn close(self) {
        match self.pool {
            DbPool::Postgres(p) => p.close().await,
            DbPool::Sqlite(p) => p.close().await,
        }
    }

    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    /// SeaORM connection (clone; cheap handle over the same pool).
    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }
}

/// Mask the password of a URL-style DSN for logging.
pub fn redact_credentials_in_dsn(dsn: &str) -> String {
    if !dsn.contains('@') {
        return dsn.to_string();
    }
    match url::Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "***".to_string(),
    }
}
