use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where a SQLite DSN points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SqliteTarget {
    Memory,
    File(PathBuf),
}

/// A SQLite DSN split into its target and query parameters (lowercased keys).
#[derive(Clone, Debug)]
pub(crate) struct SqliteDsn {
    pub target: SqliteTarget,
    pub params: HashMap<String, String>,
}

fn strip_scheme(dsn: &str) -> Option<&str> {
    let s = dsn.trim();
    s.strip_prefix("sqlite://").or_else(|| s.strip_prefix("sqlite:"))
}

fn split_query(rest: &str) -> (&str, Option<&str>) {
    match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    }
}

fn parse_params(query: Option<&str>) -> HashMap<String, String> {
    query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.to_lowercase(), v.into_owned()))
                .collect()
        })
        .unwrap_or_default()
}

/// Accepted forms: `sqlite::memory:`, `sqlite://memory:`, `sqlite:///abs/db.sqlite`,
/// `sqlite://relative/db.sqlite`, `sqlite:relative.db`, each with optional `?key=value`.
/// `mode=memory` in the query also selects an in-memory database.
pub(crate) fn parse_sqlite_dsn(dsn: &str) -> Option<SqliteDsn> {
    let rest = strip_scheme(dsn)?;
    let (path, query) = split_query(rest);
    let params = parse_params(query);

    let is_memory = path == ":memory:"
        || path == "memory:"
        || params
            .get("mode")
            .is_some_and(|m| m.eq_ignore_ascii_case("memory"));

    let target = if is_memory {
        SqliteTarget::Memory
    } else if path.is_empty() {
        return None;
    } else {
        SqliteTarget::File(PathBuf::from(path))
    };

    Some(SqliteDsn { target, params })
}

/// Rewrite a relative SQLite file DSN so it points under `base_dir`.
///
/// `sqlite://database/passports.db` with base `/home/u/.passport-desk` becomes
/// `sqlite:///home/u/.passport-desk/database/passports.db`. Absolute paths,
/// in-memory DSNs and non-SQLite DSNs are returned unchanged.
pub fn resolve_sqlite_dsn(dsn: &str, base_dir: &Path) -> String {
    let Some(rest) = strip_scheme(dsn) else {
        return dsn.to_string();
    };
    let Some(parsed) = parse_sqlite_dsn(dsn) else {
        return dsn.to_string();
    };
    let SqliteTarget::File(path) = parsed.target else {
        return dsn.to_string();
    };
    if path.is_absolute() {
        return dsn.to_string();
    }

    let (_, query) = split_query(rest);
    let abs = base_dir.join(path);
    let abs = abs.to_string_lossy().replace('\\', "/");
    let sep = if abs.starts_with('/') { "" } else { "/" };
    match query {
        Some(q) => format!("sqlite://{sep}{abs}?{q}"),
        None => format!("sqlite://{sep}{abs}"),
    }
}
