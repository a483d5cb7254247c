//! RFC 9457 problem responses and catalog-driven error definitions.
pub mod problem;

pub use problem::{Problem, ProblemResponse, APPLICATION_PROBLEM_JSON};

use axum::http::StatusCode;

/// Static error definition from a module's error catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert this error definition into a Problem with the given detail.
    #[inline]
    pub fn to_problem(&self, detail: impl Into<String>) -> Problem {
        Problem::new(self.status_code(), self.title, detail.into())
            .with_code(self.code)
            .with_type(self.type_url)
    }

    /// Problem response for one occurrence: request path plus the request id, if known.
    pub fn to_response(
        &self,
        detail: impl Into<String>,
        instance: &str,
        request_id: Option<String>,
    ) -> ProblemResponse {
        let mut problem = self.to_problem(detail).with_instance(instance);
        if let Some(id) = request_id {
            problem = problem.with_request_id(id);
        }
        ProblemResponse(problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOT_FOUND: ErrDef = ErrDef {
        status: 404,
        title: "Not Found",
        code: "test.item.not_found.v1",
        type_url: "https://errors.example.com/test.item.not_found.v1",
    };

    #[test]
    fn err_def_to_problem_works() {
        let problem = NOT_FOUND.to_problem("Resource missing");
        assert_eq!(problem.status, 404);
        assert_eq!(problem.title, "Not Found");
        assert_eq!(problem.detail, "Resource missing");
        assert_eq!(problem.code, "test.item.not_found.v1");
        assert_eq!(
            problem.type_url,
            "https://errors.example.com/test.item.not_found.v1"
        );
        assert!(problem.instance.is_empty());
    }

    #[test]
    fn to_response_attaches_context() {
        let resp = NOT_FOUND.to_response("gone", "/items/7", Some("req-1".into()));
        assert_eq!(resp.0.instance, "/items/7");
        assert_eq!(resp.0.request_id.as_deref(), Some("req-1"));

        let resp = NOT_FOUND.to_response("gone", "/items/7", None);
        assert!(resp.0.request_id.is_none());
    }

    #[test]
    fn out_of_range_status_falls_back_to_500() {
        let def = ErrDef {
            status: 1000,
            ..NOT_FOUND
        };
        assert_eq!(def.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
