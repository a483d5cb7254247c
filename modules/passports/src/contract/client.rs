use async_trait::async_trait;

use crate::contract::{
    error::PassportsError,
    model::{
        JobCategory, NewJobCategory, NewPassport, Passport, PassportPage, PassportPatch,
        PassportQuery, PassportStats,
    },
};

/// Public API trait for the passports module that other modules can use
#[async_trait]
pub trait PassportsApi: Send + Sync {
    async fn get_passport(&self, id: i32) -> Result<Passport, PassportsError>;

    /// Filtered, sorted page of passports plus the filtered total.
    async fn list_passports(&self, query: PassportQuery) -> Result<PassportPage, PassportsError>;

    async fn create_passport(&self, new_passport: NewPassport) -> Result<Passport, PassportsError>;

    /// Apply a partial update; `amount_due` is recomputed when money changes.
    async fn update_passport(
        &self,
        id: i32,
        patch: PassportPatch,
    ) -> Result<Passport, PassportsError>;

    async fn delete_passport(&self, id: i32) -> Result<(), PassportsError>;

    async fn passport_stats(&self) -> Result<PassportStats, PassportsError>;

    async fn list_job_categories(&self) -> Result<Vec<JobCategory>, PassportsError>;

    async fn create_job_category(
        &self,
        new_category: NewJobCategory,
    ) -> Result<JobCategory, PassportsError>;
}
