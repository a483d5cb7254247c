use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::PassportsApi,
    error::PassportsError,
    model::{
        JobCategory, NewJobCategory, NewPassport, Passport, PassportPage, PassportPatch,
        PassportQuery, PassportStats,
    },
};
use crate::domain::service::Service;

/// Local implementation of the PassportsApi trait that delegates to the domain service
pub struct PassportsLocalClient {
    service: Arc<Service>,
}

impl PassportsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PassportsApi for PassportsLocalClient {
    async fn get_passport(&self, id: i32) -> Result<Passport, PassportsError> {
        self.service.get_passport(id).await.map_err(Into::into)
    }

    async fn list_passports(&self, query: PassportQuery) -> Result<PassportPage, PassportsError> {
        self.service.list_passports(query).await.map_err(Into::into)
    }

    async fn create_passport(&self, new_passport: NewPassport) -> Result<Passport, PassportsError> {
        self.service
            .create_passport(new_passport)
            .await
            .map_err(Into::into)
    }

    async fn update_passport(
        &self,
        id: i32,
        patch: PassportPatch,
    ) -> Result<Passport, PassportsError> {
        self.service
            .update_passport(id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_passport(&self, id: i32) -> Result<(), PassportsError> {
        self.service.delete_passport(id).await.map_err(Into::into)
    }

    async fn passport_stats(&self) -> Result<PassportStats, PassportsError> {
        self.service.passport_stats().await.map_err(Into::into)
    }

    async fn list_job_categories(&self) -> Result<Vec<JobCategory>, PassportsError> {
        self.service.list_job_categories().await.map_err(Into::into)
    }

    async fn create_job_category(
        &self,
        new_category: NewJobCategory,
    ) -> Result<JobCategory, PassportsError> {
        self.service
            .create_job_category(new_category)
            .await
            .map_err(Into::into)
    }
}
