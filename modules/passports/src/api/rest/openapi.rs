use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};

#[derive(OpenApi)]
#[openapi(
    info(title = "Passport Desk API", description = "Passport application records"),
    paths(
        handlers::list_passports,
        handlers::get_passport,
        handlers::create_passport,
        handlers::update_passport,
        handlers::delete_passport,
        handlers::passport_stats,
        handlers::list_job_categories,
        handlers::create_job_category,
    ),
    components(schemas(
        dto::PassportDto,
        dto::PassportStatusDto,
        dto::CreatePassportReq,
        dto::UpdatePassportReq,
        dto::PassportListDto,
        dto::PassportStatsDto,
        dto::StatusCountsDto,
        dto::JobCategoryDto,
        dto::JobCategoryListDto,
        dto::CreateJobCategoryReq,
        modkit_errors::Problem,
    )),
    tags(
        (name = "passports", description = "Passport application records"),
        (name = "job-categories", description = "Job category catalog")
    )
)]
pub struct PassportsApiDoc;

/// OpenAPI document for every passports operation.
pub fn openapi() -> utoipa::openapi::OpenApi {
    PassportsApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for p in [
            "/passports",
            "/passports/{id}",
            "/passports/stats",
            "/job-categories",
        ] {
            assert!(paths.contains(&p), "missing {p}");
        }
        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key("PassportDto"));
        assert!(components.schemas.contains_key("Problem"));
    }
}
