//! SQLite-specific helpers: DSN parsing, home-relative path resolution and
//! PRAGMA handling.

pub(crate) mod dsn;
pub(crate) mod pragmas;

pub use dsn::resolve_sqlite_dsn;
pub(crate) use dsn::{parse_sqlite_dsn, SqliteTarget};
pub(crate) use pragmas::Pragmas;
