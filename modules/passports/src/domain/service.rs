use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

use crate::contract::model::{
    JobCategory, NewJobCategory, NewPassport, Passport, PassportPage, PassportPatch,
    PassportQuery, PassportStats, PassportStatus, StatusCounts,
};
use crate::domain::error::DomainError;
use crate::domain::repo::{PassportsRepository, StorageError};
use crate::domain::validation;

const INVALID_DATA_FORMAT: &str = "Invalid data format provided";

/// Domain service for passport records.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn PassportsRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 50,
            max_page_size: 1000,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn PassportsRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(name = "passports.service.get_passport", skip(self), fields(passport_id = id))]
    pub async fn get_passport(&self, id: i32) -> Result<Passport, DomainError> {
        debug!("Getting passport by id");

        let passport = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| storage_failure("get passport", e))?
            .ok_or_else(|| DomainError::passport_not_found(id))?;
        debug!("Successfully retrieved passport");
        Ok(passport)
    }

    #[instrument(name = "passports.service.list_passports", skip(self, query))]
    pub async fn list_passports(&self, query: PassportQuery) -> Result<PassportPage, DomainError> {
        let params = validation::validate_query(
            query,
            self.config.default_page_size,
            self.config.max_page_size,
        )?;
        debug!(
            sort = ?params.sort_key,
            direction = ?params.direction,
            limit = params.limit,
            offset = params.offset,
            "Listing passports"
        );

        let page = self
            .repo
            .list(&params)
            .await
            .map_err(|e| storage_failure("list passports", e))?;

        debug!("Listed {} of {} passports", page.items.len(), page.total);
        Ok(page)
    }

    #[instrument(
        name = "passports.service.create_passport",
        skip(self, new_passport),
        fields(passport_number = %new_passport.passport_number)
    )]
    pub async fn create_passport(&self, new_passport: NewPassport) -> Result<Passport, DomainError> {
        info!("Creating new passport");

        let draft = validation::validate_new_passport(new_passport)?;
        let passport = self
            .repo
            .insert(draft, Utc::now())
            .await
            .map_err(|e| storage_failure("create passport", e))?;

        info!("Successfully created passport with id={}", passport.id);
        Ok(passport)
    }

    #[instrument(
        name = "passports.service.update_passport",
        skip(self, patch),
        fields(passport_id = id)
    )]
    pub async fn update_passport(
        &self,
        id: i32,
        patch: PassportPatch,
    ) -> Result<Passport, DomainError> {
        info!("Updating passport");

        let changes = validation::validate_patch(patch)?;
        let passport = self
            .repo
            .update(id, &changes, Utc::now())
            .await
            .map_err(|e| storage_failure("update passport", e))?
            .ok_or_else(|| DomainError::passport_not_found(id))?;

        info!("Successfully updated passport");
        Ok(passport)
    }

    #[instrument(
        name = "passports.service.delete_passport",
        skip(self),
        fields(passport_id = id)
    )]
    pub async fn delete_passport(&self, id: i32) -> Result<(), DomainError> {
        info!("Deleting passport");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| storage_failure("delete passport", e))?;

        if !deleted {
            return Err(DomainError::passport_not_found(id));
        }

        info!("Successfully deleted passport");
        Ok(())
    }

    /// Counts per status; statuses without records report zero.
    #[instrument(name = "passports.service.passport_stats", skip(self))]
    pub async fn passport_stats(&self) -> Result<PassportStats, DomainError> {
        let groups = self
            .repo
            .count_by_status()
            .await
            .map_err(|e| storage_failure("load passport stats", e))?;

        let mut counts = StatusCounts::default();
        let mut total = 0;
        for (status, count) in groups {
            total += count;
            match status.parse::<PassportStatus>() {
                Ok(st) => counts.add(st, count),
                Err(_) => warn!(status = %status, count, "Unexpected status in passports table"),
            }
        }

        debug!(total, "Computed passport stats");
        Ok(PassportStats { counts, total })
    }

    #[instrument(name = "passports.service.list_job_categories", skip(self))]
    pub async fn list_job_categories(&self) -> Result<Vec<JobCategory>, DomainError> {
        self.repo
            .list_job_categories()
            .await
            .map_err(|e| storage_failure("list job categories", e))
    }

    #[instrument(
        name = "passports.service.create_job_category",
        skip(self, new_category),
        fields(name = %new_category.name)
    )]
    pub async fn create_job_category(
        &self,
        new_category: NewJobCategory,
    ) -> Result<JobCategory, DomainError> {
        info!("Creating job category");

        let name = validation::validate_job_category(new_category)?;
        let category = self
            .repo
            .insert_job_category(name.clone(), Utc::now())
            .await
            .map_err(|e| match e {
                StorageError::UniqueViolation(_) => DomainError::job_category_exists(name),
                other => storage_failure("create job category", other),
            })?;

        info!("Successfully created job category with id={}", category.id);
        Ok(category)
    }
}

/// Translate a classified storage failure; internal ones are logged here
/// with their original message.
fn storage_failure(op: &str, err: StorageError) -> DomainError {
    match err {
        StorageError::UniqueViolation(_) => DomainError::passport_number_exists(),
        StorageError::InvalidInput(msg) => {
            debug!(error = %msg, "Database rejected a value while trying to {op}");
            DomainError::validation(INVALID_DATA_FORMAT)
        }
        StorageError::SchemaMismatch(msg) => {
            error!(error = %msg, "Schema mismatch while trying to {op}");
            DomainError::schema_mismatch()
        }
        StorageError::Other(msg) => {
            error!(error = %msg, "Failed to {op}");
            DomainError::database(format!("Failed to {op}: {msg}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_map_to_taxonomy() {
        assert_eq!(
            storage_failure("create passport", StorageError::UniqueViolation("x".into())),
            DomainError::PassportNumberExists
        );
        assert_eq!(
            storage_failure("create passport", StorageError::InvalidInput("x".into())),
            DomainError::validation("Invalid data format provided")
        );
        assert_eq!(
            storage_failure("create passport", StorageError::SchemaMismatch("x".into())),
            DomainError::SchemaMismatch
        );
        assert_eq!(
            storage_failure("create passport", StorageError::Other("disk I/O error".into())),
            DomainError::database("Failed to create passport: disk I/O error")
        );
    }
}
