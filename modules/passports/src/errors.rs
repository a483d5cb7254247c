//! Error catalog of the passports module.
//!
//! Every problem response the module emits is built from one of these codes.

use modkit_errors::{ErrDef, Problem, ProblemResponse};

const fn def(status: u16, title: &'static str, code: &'static str, type_url: &'static str) -> ErrDef {
    ErrDef {
        status,
        title,
        code,
        type_url,
    }
}

/// Strongly-typed error codes from the catalog
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// passports.passport.not_found.v1
    passports_passport_not_found_v1,
    /// passports.passport.number_conflict.v1
    passports_passport_number_conflict_v1,
    /// passports.job_category.conflict.v1
    passports_job_category_conflict_v1,
    /// passports.request.invalid_argument.v1
    passports_request_invalid_argument_v1,
    /// passports.internal.database.v1
    passports_internal_database_v1,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 5] = [
        ErrorCode::passports_passport_not_found_v1,
        ErrorCode::passports_passport_number_conflict_v1,
        ErrorCode::passports_job_category_conflict_v1,
        ErrorCode::passports_request_invalid_argument_v1,
        ErrorCode::passports_internal_database_v1,
    ];

    /// Get the HTTP status code for this error
    pub const fn status(&self) -> u16 {
        self.def().status
    }

    /// Get the error definition for this error code
    pub const fn def(&self) -> ErrDef {
        match self {
            ErrorCode::passports_passport_not_found_v1 => def(
                404,
                "Passport Not Found",
                "passports.passport.not_found.v1",
                "https://errors.example.com/passports.passport.not_found.v1",
            ),
            ErrorCode::passports_passport_number_conflict_v1 => def(
                409,
                "Passport Number Already Exists",
                "passports.passport.number_conflict.v1",
                "https://errors.example.com/passports.passport.number_conflict.v1",
            ),
            ErrorCode::passports_job_category_conflict_v1 => def(
                409,
                "Job Category Already Exists",
                "passports.job_category.conflict.v1",
                "https://errors.example.com/passports.job_category.conflict.v1",
            ),
            ErrorCode::passports_request_invalid_argument_v1 => def(
                400,
                "Invalid Argument",
                "passports.request.invalid_argument.v1",
                "https://errors.example.com/passports.request.invalid_argument.v1",
            ),
            ErrorCode::passports_internal_database_v1 => def(
                500,
                "Internal Error",
                "passports.internal.database.v1",
                "https://errors.example.com/passports.internal.database.v1",
            ),
        }
    }

    /// Convert to Problem with detail (without instance/request id)
    pub fn to_problem(&self, detail: impl Into<String>) -> Problem {
        self.def().to_problem(detail)
    }

    /// Create a full ProblemResponse with context (recommended for handlers)
    pub fn to_response(
        &self,
        detail: impl Into<String>,
        instance: &str,
        request_id: Option<String>,
    ) -> ProblemResponse {
        self.def().to_response(detail, instance, request_id)
    }
}
