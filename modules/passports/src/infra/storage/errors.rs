//! Classification of SeaORM failures into `StorageError`.

use modkit_db::errors::is_seaorm_unique_violation;
use sea_orm::DbErr;

use crate::domain::repo::StorageError;

impl From<DbErr> for StorageError {
    fn from(err: DbErr) -> Self {
        classify(&err)
    }
}

pub fn classify(err: &DbErr) -> StorageError {
    let message = err.to_string();
    if is_seaorm_unique_violation(err) {
        return StorageError::UniqueViolation(message);
    }

    let lower = message.to_lowercase();
    if lower.contains("invalid input syntax") {
        StorageError::InvalidInput(message)
    } else if lower.contains("no such column")
        || (lower.contains("column") && lower.contains("does not exist"))
    {
        StorageError::SchemaMismatch(message)
    } else {
        StorageError::Other(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_by_message() {
        let cases = [
            (
                "UNIQUE constraint failed: passports.passport_number",
                "unique",
            ),
            (
                "invalid input syntax for type date: \"31/12/2020\"",
                "input",
            ),
            ("column \"issue_date\" does not exist", "schema"),
            ("no such column: nationality", "schema"),
            ("database is locked", "other"),
        ];
        for (msg, kind) in cases {
            let got = classify(&DbErr::Custom(msg.to_string()));
            let ok = match kind {
                "unique" => matches!(got, StorageError::UniqueViolation(_)),
                "input" => matches!(got, StorageError::InvalidInput(_)),
                "schema" => matches!(got, StorageError::SchemaMismatch(_)),
                _ => matches!(got, StorageError::Other(ref m) if m.contains(msg)),
            };
            assert!(ok, "{msg} -> {got:?}");
        }
    }
}
