use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PassportsError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    AlreadyExists { message: String },

    #[error("{message}")]
    InvalidArgument { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PassportsError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<crate::domain::error::DomainError> for PassportsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        let message = domain_error.to_string();
        match domain_error {
            PassportNotFound { .. } => Self::not_found(message),
            PassportNumberExists | JobCategoryExists { .. } => Self::already_exists(message),
            Validation { .. } => Self::invalid_argument(message),
            SchemaMismatch => Self::internal(message),
            Database { message } => Self::internal(message),
        }
    }
}
