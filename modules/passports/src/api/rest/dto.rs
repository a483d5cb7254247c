use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::{
    JobCategory, NewJobCategory, NewPassport, Passport, PassportPage, PassportPatch,
    PassportQuery, PassportStats, PassportStatus,
};

/// Application status as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PassportStatusDto {
    NotApplied,
    Pending,
    Valid,
    Rejected,
    Canceled,
    FlightComplete,
}

impl From<PassportStatus> for PassportStatusDto {
    fn from(s: PassportStatus) -> Self {
        match s {
            PassportStatus::NotApplied => Self::NotApplied,
            PassportStatus::Pending => Self::Pending,
            PassportStatus::Valid => Self::Valid,
            PassportStatus::Rejected => Self::Rejected,
            PassportStatus::Canceled => Self::Canceled,
            PassportStatus::FlightComplete => Self::FlightComplete,
        }
    }
}

/// REST DTO for passport representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassportDto {
    pub id: i32,
    pub name: String,
    pub passport_number: String,
    pub date_of_birth: NaiveDate,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
    pub status: PassportStatusDto,
    pub job_category: Option<String>,
    #[schema(value_type = f64)]
    pub total_charge: Decimal,
    #[schema(value_type = f64)]
    pub amount_paid: Decimal,
    /// `totalCharge - amountPaid`, negative on overpayment.
    #[schema(value_type = f64)]
    pub amount_due: Decimal,
    pub passport_image_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating a passport.
///
/// Dates take `YYYY-MM-DD` or an RFC 3339 timestamp. `amountDue` is accepted
/// but ignored; the server derives it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePassportReq {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub passport_number: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<PassportStatusDto>)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub total_charge: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub amount_paid: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub amount_due: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// REST DTO for updating a passport (partial).
///
/// Omitted fields are left alone; `null` clears nullable fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePassportReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub issue_date: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<PassportStatusDto>)]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub job_category: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub total_charge: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub amount_paid: Option<Decimal>,
    /// Ignored; recomputed from `totalCharge` and `amountPaid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub amount_due: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub passport_image_url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

/// Present-but-null becomes `Some(None)`; absence stays `None` via `default`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// REST DTO for list query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListPassportsQuery {
    /// Case-insensitive substring of name or passport number.
    pub search: Option<String>,
    /// Exact status.
    pub status: Option<String>,
    /// Exact job category.
    pub job_category: Option<String>,
    /// `name` (default), `date`, `status` or `jobCategory`.
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`.
    pub sort_order: Option<String>,
    /// Page size, 50 when omitted or 0.
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// REST DTO for passport list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PassportListDto {
    pub passports: Vec<PassportDto>,
    /// Records matching the filter, regardless of paging.
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCountsDto {
    pub not_applied: u64,
    pub pending: u64,
    pub valid: u64,
    pub rejected: u64,
    pub canceled: u64,
    pub flight_complete: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PassportStatsDto {
    pub stats: StatusCountsDto,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCategoryDto {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobCategoryListDto {
    pub categories: Vec<JobCategoryDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateJobCategoryReq {
    #[serde(default)]
    pub name: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<Passport> for PassportDto {
    fn from(p: Passport) -> Self {
        Self {
            id: p.id,
            name: p.name,
            passport_number: p.passport_number,
            date_of_birth: p.date_of_birth,
            issue_date: p.issue_date,
            expiry_date: p.expiry_date,
            status: p.status.into(),
            job_category: p.job_category,
            total_charge: p.total_charge,
            amount_paid: p.amount_paid,
            amount_due: p.amount_due,
            passport_image_url: p.passport_image_url,
            notes: p.notes,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<CreatePassportReq> for NewPassport {
    fn from(req: CreatePassportReq) -> Self {
        Self {
            name: req.name,
            passport_number: req.passport_number,
            date_of_birth: req.date_of_birth,
            issue_date: req.issue_date,
            expiry_date: req.expiry_date,
            status: req.status,
            job_category: req.job_category,
            total_charge: req.total_charge,
            amount_paid: req.amount_paid,
            passport_image_url: req.passport_image_url,
            notes: req.notes,
        }
    }
}

impl From<UpdatePassportReq> for PassportPatch {
    fn from(req: UpdatePassportReq) -> Self {
        Self {
            name: req.name,
            passport_number: req.passport_number,
            date_of_birth: req.date_of_birth,
            issue_date: req.issue_date,
            expiry_date: req.expiry_date,
            status: req.status,
            job_category: req.job_category,
            total_charge: req.total_charge,
            amount_paid: req.amount_paid,
            passport_image_url: req.passport_image_url,
            notes: req.notes,
        }
    }
}

impl From<ListPassportsQuery> for PassportQuery {
    fn from(q: ListPassportsQuery) -> Self {
        Self {
            search: q.search,
            status: q.status,
            job_category: q.job_category,
            sort_by: q.sort_by,
            sort_order: q.sort_order,
            limit: q.limit,
            offset: q.offset,
        }
    }
}

impl From<PassportPage> for PassportListDto {
    fn from(page: PassportPage) -> Self {
        Self {
            passports: page.items.into_iter().map(PassportDto::from).collect(),
            total: page.total,
        }
    }
}

impl From<PassportStats> for PassportStatsDto {
    fn from(s: PassportStats) -> Self {
        let c = s.counts;
        Self {
            stats: StatusCountsDto {
                not_applied: c.not_applied,
                pending: c.pending,
                valid: c.valid,
                rejected: c.rejected,
                canceled: c.canceled,
                flight_complete: c.flight_complete,
            },
            total: s.total,
        }
    }
}

impl From<JobCategory> for JobCategoryDto {
    fn from(c: JobCategory) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_at: c.created_at,
        }
    }
}

impl From<CreateJobCategoryReq> for NewJobCategory {
    fn from(req: CreateJobCategoryReq) -> Self {
        Self { name: req.name }
    }
}
