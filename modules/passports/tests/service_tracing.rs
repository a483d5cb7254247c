//! Tests to verify that the service layer emits expected tracing spans

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tower::ServiceExt;
use tracing_test::traced_test;

use passports::contract::model::{
    JobCategory, NewPassport, Passport, PassportPage, PassportPatch, PassportQuery,
    PassportStatus,
};
use passports::domain::error::DomainError;
use passports::domain::model::{ListParams, PassportChanges, PassportDraft};
use passports::domain::repo::{PassportsRepository, StorageError};
use passports::domain::service::{Service, ServiceConfig};

fn sample(id: i32) -> Passport {
    let now = Utc::now();
    Passport {
        id,
        name: "Test Person".to_string(),
        passport_number: format!("TP-{id}"),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        issue_date: None,
        expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        status: PassportStatus::Valid,
        job_category: None,
        total_charge: Decimal::ZERO,
        amount_paid: Decimal::ZERO,
        amount_due: Decimal::ZERO,
        passport_image_url: None,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

// Mock repository for testing
#[derive(Default)]
struct MockPassportsRepository {
    groups: Vec<(String, u64)>,
    fail_with: Option<StorageError>,
    last_list: Mutex<Option<ListParams>>,
}

impl MockPassportsRepository {
    fn check(&self) -> Result<(), StorageError> {
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl PassportsRepository for MockPassportsRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Passport>, StorageError> {
        self.check()?;
        Ok((id == 1).then(|| sample(1)))
    }

    async fn insert(
        &self,
        draft: PassportDraft,
        _now: DateTime<Utc>,
    ) -> Result<Passport, StorageError> {
        self.check()?;
        let mut p = sample(7);
        p.name = draft.name;
        Ok(p)
    }

    async fn update(
        &self,
        id: i32,
        _changes: &PassportChanges,
        _now: DateTime<Utc>,
    ) -> Result<Option<Passport>, StorageError> {
        self.check()?;
        Ok((id == 1).then(|| sample(1)))
    }

    async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        self.check()?;
        Ok(id == 1)
    }

    async fn list(&self, params: &ListParams) -> Result<PassportPage, StorageError> {
        self.check()?;
        *self.last_list.lock().unwrap() = Some(params.clone());
        Ok(PassportPage {
            items: vec![sample(1)],
            total: 1,
        })
    }

    async fn count_by_status(&self) -> Result<Vec<(String, u64)>, StorageError> {
        self.check()?;
        Ok(self.groups.clone())
    }

    async fn list_job_categories(&self) -> Result<Vec<JobCategory>, StorageError> {
        self.check()?;
        Ok(vec![])
    }

    async fn insert_job_category(
        &self,
        name: String,
        now: DateTime<Utc>,
    ) -> Result<JobCategory, StorageError> {
        self.check()?;
        Ok(JobCategory {
            id: 1,
            name,
            created_at: now,
        })
    }
}

fn service(repo: MockPassportsRepository) -> Service {
    Service::new(Arc::new(repo), ServiceConfig::default())
}

#[traced_test]
#[tokio::test]
async fn get_passport_emits_spans() {
    let service = service(MockPassportsRepository::default());

    let result = service.get_passport(1).await;

    assert!(result.is_ok());
    assert!(logs_contain("passports.service.get_passport"));
    assert!(logs_contain("Successfully retrieved passport"));
}

#[traced_test]
#[tokio::test]
async fn create_passport_logs_created_id() {
    let service = service(MockPassportsRepository::default());

    let input = NewPassport {
        name: "Traced".to_string(),
        passport_number: "TR-1".to_string(),
        date_of_birth: "1990-01-01".to_string(),
        expiry_date: "2030-01-01".to_string(),
        ..Default::default()
    };
    let created = service.create_passport(input).await.unwrap();

    assert_eq!(created.name, "Traced");
    assert!(logs_contain("passports.service.create_passport"));
    assert!(logs_contain("Successfully created passport with id=7"));
}

#[traced_test]
#[tokio::test]
async fn validation_failure_never_reaches_repository() {
    let repo = MockPassportsRepository {
        fail_with: Some(StorageError::Other("must not be called".to_string())),
        ..Default::default()
    };
    let service = service(repo);

    let err = service
        .update_passport(1, PassportPatch::default())
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::validation("No fields to update"));
    assert!(!logs_contain("must not be called"));
}

#[traced_test]
#[tokio::test]
async fn list_passports_clamps_limit() {
    let repo = Arc::new(MockPassportsRepository::default());
    let service = Service::new(repo.clone(), ServiceConfig::default());

    let query = PassportQuery {
        limit: Some(5000),
        ..Default::default()
    };
    let page = service.list_passports(query).await.unwrap();

    assert_eq!(page.total, 1);
    let params = repo.last_list.lock().unwrap().clone().unwrap();
    assert_eq!(params.limit, 1000);
    assert_eq!(params.offset, 0);
    assert!(logs_contain("passports.service.list_passports"));
}

#[traced_test]
#[tokio::test]
async fn stats_warn_on_unknown_status() {
    let repo = MockPassportsRepository {
        groups: vec![
            ("valid".to_string(), 3),
            ("archived".to_string(), 2),
        ],
        ..Default::default()
    };
    let service = service(repo);

    let stats = service.passport_stats().await.unwrap();

    assert_eq!(stats.counts.valid, 3);
    assert_eq!(stats.total, 5);
    assert!(logs_contain("Unexpected status in passports table"));
}

#[traced_test]
#[tokio::test]
async fn storage_failure_is_logged_with_original_message() {
    let repo = MockPassportsRepository {
        fail_with: Some(StorageError::Other("disk I/O error".to_string())),
        ..Default::default()
    };
    let service = service(repo);

    let err = service.delete_passport(1).await.unwrap_err();

    assert_eq!(
        err,
        DomainError::database("Failed to delete passport: disk I/O error")
    );
    assert!(logs_contain("disk I/O error"));
}

#[traced_test]
#[tokio::test]
async fn schema_mismatch_detail_is_returned_and_cause_logged() {
    let repo = MockPassportsRepository {
        fail_with: Some(StorageError::SchemaMismatch(
            "no such column: name_key".to_string(),
        )),
        ..Default::default()
    };
    let router = passports::api::rest::routes::register_routes(
        Router::new(),
        Arc::new(service(repo)),
    )
    .unwrap();

    let response = router
        .oneshot(Request::builder().uri("/passports/1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["detail"], "Database schema error. Please contact support.");
    assert!(!body["detail"].as_str().unwrap().contains("name_key"));
    assert!(logs_contain("no such column: name_key"));
}
