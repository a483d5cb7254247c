//! Input checks for passport writes and list requests.
//!
//! Everything here is pure: values in, typed values or a `DomainError::Validation` out.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::contract::model::{
    NewJobCategory, NewPassport, PassportPatch, PassportQuery, PassportStatus,
};
use crate::domain::error::DomainError;
use crate::domain::model::{
    ListParams, PassportChanges, PassportDraft, PassportFilter, SortDirection, SortKey,
};

pub const NO_FIELDS_TO_UPDATE: &str = "No fields to update";

const DOB_INVALID: &str = "Invalid date of birth";
const EXPIRY_INVALID: &str = "Invalid expiry date";
const ISSUE_INVALID: &str = "Invalid issue date";
const IMAGE_URL_INVALID: &str = "Invalid passport image URL";
const OFFSET_TOO_LARGE: &str = "Offset is too large";

/// Upper bound for a single money amount (one trillion).
const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

pub fn validate_new_passport(input: NewPassport) -> Result<PassportDraft, DomainError> {
    let name = required(&input.name, "Name")?;
    let passport_number = required(&input.passport_number, "Passport number")?;
    let date_of_birth = parse_date(&required(&input.date_of_birth, "Date of birth")?, DOB_INVALID)?;
    let expiry_date = parse_date(&required(&input.expiry_date, "Expiry date")?, EXPIRY_INVALID)?;
    let issue_date = optional_text(input.issue_date)
        .map(|raw| parse_date(&raw, ISSUE_INVALID))
        .transpose()?;

    let status = match optional_text(input.status) {
        Some(raw) => parse_status(&raw)?,
        None => PassportStatus::default(),
    };

    let total_charge = money(input.total_charge, "Total charge")?.unwrap_or(Decimal::ZERO);
    let amount_paid = money(input.amount_paid, "Amount paid")?.unwrap_or(Decimal::ZERO);

    let passport_image_url = optional_text(input.passport_image_url)
        .map(|raw| image_url(&raw))
        .transpose()?;

    Ok(PassportDraft {
        name,
        passport_number,
        date_of_birth,
        issue_date,
        expiry_date,
        status,
        job_category: optional_text(input.job_category),
        total_charge,
        amount_paid,
        passport_image_url,
        notes: optional_notes(input.notes),
    })
}

/// Checks only the fields present in `patch`. A patch with nothing left to
/// apply is rejected.
pub fn validate_patch(patch: PassportPatch) -> Result<PassportChanges, DomainError> {
    let changes = PassportChanges {
        name: patch.name.map(|v| required(&v, "Name")).transpose()?,
        passport_number: patch
            .passport_number
            .map(|v| required(&v, "Passport number"))
            .transpose()?,
        date_of_birth: patch
            .date_of_birth
            .map(|v| parse_date(&required(&v, "Date of birth")?, DOB_INVALID))
            .transpose()?,
        issue_date: patch
            .issue_date
            .map(|v| {
                optional_text(v)
                    .map(|raw| parse_date(&raw, ISSUE_INVALID))
                    .transpose()
            })
            .transpose()?,
        expiry_date: patch
            .expiry_date
            .map(|v| parse_date(&required(&v, "Expiry date")?, EXPIRY_INVALID))
            .transpose()?,
        status: patch.status.map(|v| parse_status(v.trim())).transpose()?,
        job_category: patch.job_category.map(optional_text),
        total_charge: money(patch.total_charge, "Total charge")?,
        amount_paid: money(patch.amount_paid, "Amount paid")?,
        passport_image_url: patch
            .passport_image_url
            .map(|v| optional_text(v).map(|raw| image_url(&raw)).transpose())
            .transpose()?,
        notes: patch.notes.map(optional_notes),
    };

    if changes.is_empty() {
        return Err(DomainError::validation(NO_FIELDS_TO_UPDATE));
    }
    Ok(changes)
}

/// Resolves list parameters. Unknown sort keys fall back to name ascending;
/// a zero or missing limit means `default_limit`. Offsets must fit a signed
/// 64-bit SQL parameter.
pub fn validate_query(
    query: PassportQuery,
    default_limit: u64,
    max_limit: u64,
) -> Result<ListParams, DomainError> {
    let status = optional_text(query.status)
        .map(|raw| parse_status(&raw))
        .transpose()?;
    let search = optional_text(query.search).map(|s| s.to_lowercase());

    let (sort_key, direction) = match optional_text(query.sort_by) {
        None => (SortKey::default(), SortDirection::parse(query.sort_order.as_deref())),
        Some(raw) => match SortKey::parse(&raw) {
            Some(key) => (key, SortDirection::parse(query.sort_order.as_deref())),
            None => (SortKey::Name, SortDirection::Asc),
        },
    };

    let limit = match query.limit {
        None | Some(0) => default_limit,
        Some(n) => n,
    }
    .min(max_limit)
    .max(1);

    let offset = query.offset.unwrap_or(0);
    if i64::try_from(offset).is_err() {
        return Err(DomainError::validation(OFFSET_TOO_LARGE));
    }

    Ok(ListParams {
        filter: PassportFilter {
            search,
            status,
            job_category: optional_text(query.job_category),
        },
        sort_key,
        direction,
        limit,
        offset,
    })
}

pub fn validate_job_category(input: NewJobCategory) -> Result<String, DomainError> {
    required(&input.name, "Name")
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (its UTC date is kept).
pub fn parse_date(raw: &str, message: &str) -> Result<NaiveDate, DomainError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| DomainError::validation(message))
}

pub fn parse_status(raw: &str) -> Result<PassportStatus, DomainError> {
    raw.parse::<PassportStatus>()
        .map_err(|e| DomainError::validation(e.to_string()))
}

/// Rounds half away from zero to cents; rejects negative and oversized amounts.
pub fn normalize_money(value: Decimal, field: &str) -> Result<Decimal, DomainError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::validation(format!(
            "{field} must not be negative"
        )));
    }
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded > MAX_AMOUNT {
        return Err(DomainError::validation(format!("{field} is too large")));
    }
    Ok(rounded)
}

/// Only absolute `http`/`https` URLs; `data:` URIs and other schemes are refused.
pub fn image_url(raw: &str) -> Result<String, DomainError> {
    match url::Url::parse(raw) {
        Ok(u) if matches!(u.scheme(), "http" | "https") && u.has_host() => Ok(raw.to_string()),
        _ => Err(DomainError::validation(IMAGE_URL_INVALID)),
    }
}

fn money(value: Option<Decimal>, field: &str) -> Result<Option<Decimal>, DomainError> {
    value.map(|v| normalize_money(v, field)).transpose()
}

fn required(value: &str, field: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trimmed value; blank means absent.
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Notes keep their inner formatting; blank means absent.
fn optional_notes(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
