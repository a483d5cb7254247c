use std::convert::Infallible;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use modkit_errors::ProblemResponse;

use crate::domain::error::DomainError;
use crate::errors::ErrorCode;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Where a problem happened: request path and, when the host assigned one,
/// the request id.
#[derive(Debug, Clone, Default)]
pub struct RequestInfo {
    pub path: String,
    pub request_id: Option<String>,
}

impl<S> FromRequestParts<S> for RequestInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        Ok(Self {
            path: parts.uri.path().to_owned(),
            request_id,
        })
    }
}

impl RequestInfo {
    pub fn problem(&self, code: ErrorCode, detail: impl Into<String>) -> ProblemResponse {
        code.to_response(detail, &self.path, self.request_id.clone())
    }

    pub fn invalid_argument(&self, detail: impl Into<String>) -> ProblemResponse {
        self.problem(ErrorCode::passports_request_invalid_argument_v1, detail)
    }

    pub fn bad_body(&self, rejection: JsonRejection) -> ProblemResponse {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        self.invalid_argument(format!("Invalid request body: {}", rejection.body_text()))
    }

    pub fn bad_path(&self, rejection: PathRejection) -> ProblemResponse {
        self.invalid_argument(format!("Invalid passport id: {}", rejection.body_text()))
    }

    pub fn bad_query(&self, rejection: QueryRejection) -> ProblemResponse {
        self.invalid_argument(format!("Invalid query parameters: {}", rejection.body_text()))
    }
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, info: &RequestInfo) -> ProblemResponse {
    match e {
        DomainError::PassportNotFound { .. } => {
            info.problem(ErrorCode::passports_passport_not_found_v1, e.to_string())
        }
        DomainError::PassportNumberExists => {
            info.problem(ErrorCode::passports_passport_number_conflict_v1, e.to_string())
        }
        DomainError::JobCategoryExists { .. } => {
            info.problem(ErrorCode::passports_job_category_conflict_v1, e.to_string())
        }
        DomainError::Validation { message } => info.invalid_argument(message.clone()),
        DomainError::SchemaMismatch => {
            info.problem(ErrorCode::passports_internal_database_v1, e.to_string())
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            info.problem(
                ErrorCode::passports_internal_database_v1,
                "An internal database error occurred",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> RequestInfo {
        RequestInfo {
            path: "/passports/9".into(),
            request_id: Some("req-9".into()),
        }
    }

    #[test]
    fn statuses_follow_taxonomy() {
        let cases = [
            (DomainError::passport_not_found(9), 404),
            (DomainError::passport_number_exists(), 409),
            (DomainError::job_category_exists("Driver"), 409),
            (DomainError::validation("Name is required"), 400),
            (DomainError::schema_mismatch(), 500),
            (DomainError::database("boom"), 500),
        ];
        for (err, status) in cases {
            let resp = map_domain_error(&err, &info());
            assert_eq!(resp.0.status, status, "{err:?}");
            assert_eq!(resp.0.instance, "/passports/9");
            assert_eq!(resp.0.request_id.as_deref(), Some("req-9"));
        }
    }

    #[test]
    fn internal_detail_is_generic() {
        let resp = map_domain_error(&DomainError::database("secret table missing"), &info());
        assert!(!resp.0.detail.contains("secret"));
        assert_eq!(resp.0.code, "passports.internal.database.v1");
    }

    #[test]
    fn schema_mismatch_detail_reaches_the_client() {
        let resp = map_domain_error(&DomainError::schema_mismatch(), &info());
        assert_eq!(resp.0.status, 500);
        assert_eq!(resp.0.detail, "Database schema error. Please contact support.");
        assert_eq!(resp.0.code, "passports.internal.database.v1");
    }

    #[test]
    fn validation_message_is_the_detail() {
        let resp = map_domain_error(&DomainError::validation("No fields to update"), &info());
        assert_eq!(resp.0.detail, "No fields to update");
        assert_eq!(resp.0.title, "Invalid Argument");
    }
}
