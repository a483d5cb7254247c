use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::StatusCode,
    response::Json,
    Extension,
};
use modkit_errors::ProblemResponse;
use tracing::{error, info};

use crate::api::rest::dto::{
    CreateJobCategoryReq, CreatePassportReq, JobCategoryDto, JobCategoryListDto,
    ListPassportsQuery, PassportDto, PassportListDto, PassportStatsDto, UpdatePassportReq,
};
use crate::api::rest::error::{map_domain_error, RequestInfo};
use crate::domain::service::Service;

/// List passports with optional search, filters, sorting and paging
#[utoipa::path(
    get,
    path = "/passports",
    tag = "passports",
    operation_id = "passports.list_passports",
    params(ListPassportsQuery),
    responses(
        (status = 200, description = "Page of passports", body = PassportListDto),
        (status = 400, description = "Bad Request", body = modkit_errors::Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = modkit_errors::Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_passports(
    Extension(svc): Extension<Arc<Service>>,
    req: RequestInfo,
    query: Result<Query<ListPassportsQuery>, QueryRejection>,
) -> Result<Json<PassportListDto>, ProblemResponse> {
    let Query(query) = query.map_err(|e| req.bad_query(e))?;
    info!("Listing passports with query: {:?}", query);

    match svc.list_passports(query.into()).await {
        Ok(page) => Ok(Json(PassportListDto::from(page))),
        Err(e) => {
            error!("Failed to list passports: {}", e);
            Err(map_domain_error(&e, &req))
        }
    }
}

/// Get a specific passport by ID
#[utoipa::path(
    get,
    path = "/passports/{id}",
    tag = "passports",
    operation_id = "passports.get_passport",
    params(("id" = i32, Path, description = "Passport id")),
    responses(
        (status = 200, description = "Passport found", body = PassportDto),
        (status = 404, description = "Not Found", body = modkit_errors::Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_passport(
    Extension(svc): Extension<Arc<Service>>,
    req: RequestInfo,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<PassportDto>, ProblemResponse> {
    let Path(id) = id.map_err(|e| req.bad_path(e))?;
    info!("Getting passport with id: {}", id);

    match svc.get_passport(id).await {
        Ok(passport) => Ok(Json(PassportDto::from(passport))),
        Err(e) => {
            error!("Failed to get passport {}: {}", id, e);
            Err(map_domain_error(&e, &req))
        }
    }
}

/// Create a new passport record
#[utoipa::path(
    post,
    path = "/passports",
    tag = "passports",
    operation_id = "passports.create_passport",
    request_body = CreatePassportReq,
    responses(
        (status = 201, description = "Created passport", body = PassportDto),
        (status = 400, description = "Bad Request", body = modkit_errors::Problem, content_type = "application/problem+json"),
        (status = 409, description = "Conflict", body = modkit_errors::Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = modkit_errors::Problem, content_type = "application/problem+json")
    )
)]
pub async fn create_passport(
    Extension(svc): Extension<Arc<Service>>,
    req: RequestInfo,
    body: Result<Json<CreatePassportReq>, JsonRejection>,
) -> Result<(StatusCode, Json<PassportDto>), ProblemResponse> {
    let Json(body) = body.map_err(|e| req.bad_body(e))?;
    info!("Creating passport: {}", body.passport_number);

    match svc.create_passport(body.into()).await {
        Ok(passport) => Ok((StatusCode::CREATED, Json(PassportDto::from(passport)))),
        Err(e) => {
            error!("Failed to create passport: {}", e);
            Err(map_domain_error(&e, &req))
        }
    }
}

/// Update an existing passport
#[utoipa::path(
    put,
    path = "/passports/{id}",
    tag = "passports",
    operation_id = "passports.update_passport",
    params(("id" = i32, Path, description = "Passport id")),
    request_body = UpdatePassportReq,
    responses(
        (status = 200, description = "Updated passport", body = PassportDto),
        (status = 400, description = "Bad Request", body = modkit_errors::Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = modkit_errors::Problem, content_type = "application/problem+json"),
        (status = 409, description = "Conflict", body = modkit_errors::Problem, content_type = "application/problem+json")
    )
)]
pub async fn update_passport(
    Extension(svc): Extension<Arc<Service>>,
    req: RequestInfo,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdatePassportReq>, JsonRejection>,
) -> Result<Json<PassportDto>, ProblemResponse> {
    let Path(id) = id.map_err(|e| req.bad_path(e))?;
    let Json(body) = body.map_err(|e| req.bad_body(e))?;
    info!("Updating passport {}", id);

    match svc.update_passport(id, body.into()).await {
        Ok(passport) => Ok(Json(PassportDto::from(passport))),
        Err(e) => {
            error!("Failed to update passport {}: {}", id, e);
            Err(map_domain_error(&e, &req))
        }
    }
}

/// Delete a passport by ID
#[utoipa::path(
    delete,
    path = "/passports/{id}",
    tag = "passports",
    operation_id = "passports.delete_passport",
    params(("id" = i32, Path, description = "Passport id")),
    responses(
        (status = 204, description = "Passport deleted"),
        (status = 404, description = "Not Found", body = modkit_errors::Problem, content_type = "application/problem+json")
    )
)]
pub async fn delete_passport(
    Extension(svc): Extension<Arc<Service>>,
    req: RequestInfo,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ProblemResponse> {
    let Path(id) = id.map_err(|e| req.bad_path(e))?;
    info!("Deleting passport: {}", id);

    match svc.delete_passport(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete passport {}: {}", id, e);
            Err(map_domain_error(&e, &req))
        }
    }
}

/// Passport counts grouped by status
#[utoipa::path(
    get,
    path = "/passports/stats",
    tag = "passports",
    operation_id = "passports.passport_stats",
    responses(
        (status = 200, description = "Counts per status", body = PassportStatsDto),
        (status = 500, description = "Internal Server Error", body = modkit_errors::Problem, content_type = "application/problem+json")
    )
)]
pub async fn passport_stats(
    Extension(svc): Extension<Arc<Service>>,
    req: RequestInfo,
) -> Result<Json<PassportStatsDto>, ProblemResponse> {
    match svc.passport_stats().await {
        Ok(stats) => Ok(Json(PassportStatsDto::from(stats))),
        Err(e) => {
            error!("Failed to load passport stats: {}", e);
            Err(map_domain_error(&e, &req))
        }
    }
}

#[utoipa::path(
    get,
    path = "/job-categories",
    tag = "job-categories",
    operation_id = "passports.list_job_categories",
    responses(
        (status = 200, description = "All job categories", body = JobCategoryListDto)
    )
)]
pub async fn list_job_categories(
    Extension(svc): Extension<Arc<Service>>,
    req: RequestInfo,
) -> Result<Json<JobCategoryListDto>, ProblemResponse> {
    match svc.list_job_categories().await {
        Ok(categories) => Ok(Json(JobCategoryListDto {
            categories: categories.into_iter().map(JobCategoryDto::from).collect(),
        })),
        Err(e) => {
            error!("Failed to list job categories: {}", e);
            Err(map_domain_error(&e, &req))
        }
    }
}

#[utoipa::path(
    post,
    path = "/job-categories",
    tag = "job-categories",
    operation_id = "passports.create_job_category",
    request_body = CreateJobCategoryReq,
    responses(
        (status = 201, description = "Created job category", body = JobCategoryDto),
        (status = 400, description = "Bad Request", body = modkit_errors::Problem, content_type = "application/problem+json"),
        (status = 409, description = "Conflict", body = modkit_errors::Problem, content_type = "application/problem+json")
    )
)]
pub async fn create_job_category(
    Extension(svc): Extension<Arc<Service>>,
    req: RequestInfo,
    body: Result<Json<CreateJobCategoryReq>, JsonRejection>,
) -> Result<(StatusCode, Json<JobCategoryDto>), ProblemResponse> {
    let Json(body) = body.map_err(|e| req.bad_body(e))?;
    info!("Creating job category: {}", body.name);

    match svc.create_job_category(body.into()).await {
        Ok(category) => Ok((StatusCode::CREATED, Json(JobCategoryDto::from(category)))),
        Err(e) => {
            error!("Failed to create job category: {}", e);
            Err(map_domain_error(&e, &req))
        }
    }
}
