use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Passport not found")]
    PassportNotFound { id: i32 },

    #[error("Passport number already exists")]
    PassportNumberExists,

    #[error("Job category '{name}' already exists")]
    JobCategoryExists { name: String },

    /// Rejected input; the message is shown to the caller as is.
    #[error("{message}")]
    Validation { message: String },

    /// Stored layout differs from the one the code expects.
    #[error("Database schema error. Please contact support.")]
    SchemaMismatch,

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn passport_not_found(id: i32) -> Self {
        Self::PassportNotFound { id }
    }

    pub fn passport_number_exists() -> Self {
        Self::PassportNumberExists
    }

    pub fn job_category_exists(name: impl Into<String>) -> Self {
        Self::JobCategoryExists { name: name.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn schema_mismatch() -> Self {
        Self::SchemaMismatch
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
