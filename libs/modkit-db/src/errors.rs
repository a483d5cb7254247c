//! Shared database error helpers (SQLSTATE and driver code categorization).

use sea_orm::{DbErr, RuntimeErr, SqlErr};

/// Unique-constraint codes across popular backends: Postgres 23505,
/// SQLite 2067 (UNIQUE) and 1555 (PRIMARY KEY), MySQL 1062.
pub fn is_unique_violation_code(code: &str) -> bool {
    matches!(code, "23505" | "2067" | "1555" | "1062")
}

/// Database-reported error code carried by a SeaORM error, if any.
pub fn db_error_code(err: &DbErr) -> Option<String> {
    let runtime = match err {
        DbErr::Exec(r) | DbErr::Query(r) | DbErr::Conn(r) => r,
        _ => return None,
    };
    match runtime {
        RuntimeErr::SqlxError(sqlx::Error::Database(db)) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}

/// True when a SeaORM error is a unique-constraint violation, by driver code
/// or, failing that, by message.
pub fn is_seaorm_unique_violation(err: &DbErr) -> bool {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }
    if db_error_code(err).is_some_and(|c| is_unique_violation_code(&c)) {
        return true;
    }
    let msg = err.to_string().to_lowercase();
    msg.contains("unique constraint failed") || msg.contains("duplicate key")
}
