use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::contract::model::{JobCategory, Passport, PassportPage};
use crate::domain::model::{ListParams, PassportChanges, PassportDraft};

/// Storage failure, already classified by the adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// The database refused a value's format.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Table or column layout differs from what the adapter expects.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("{0}")]
    Other(String),
}

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait PassportsRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Passport>, StorageError>;

    /// Insert and return the stored row; `amount_due` is derived here.
    async fn insert(&self, draft: PassportDraft, now: DateTime<Utc>)
        -> Result<Passport, StorageError>;

    /// Apply `changes` in a single statement. `None` when no row has `id`.
    async fn update(
        &self,
        id: i32,
        changes: &PassportChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Passport>, StorageError>;

    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, StorageError>;

    /// Filtered count plus one sorted page.
    async fn list(&self, params: &ListParams) -> Result<PassportPage, StorageError>;

    /// `(status, count)` for every status present in the table.
    async fn count_by_status(&self) -> Result<Vec<(String, u64)>, StorageError>;

    async fn list_job_categories(&self) -> Result<Vec<JobCategory>, StorageError>;

    async fn insert_job_category(
        &self,
        name: String,
        now: DateTime<Utc>,
    ) -> Result<JobCategory, StorageError>;
}
