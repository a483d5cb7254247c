use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::contract::model::{JobCategory, Passport, PassportStatus};
use crate::domain::repo::StorageError;
use crate::infra::storage::entity::{job_categories, passports};

/// Money amount to stored cents; `None` when it does not fit.
pub fn to_cents(amount: Decimal) -> Option<i64> {
    amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .to_i64()
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub fn cents_or_invalid(amount: Decimal, field: &str) -> Result<i64, StorageError> {
    to_cents(amount).ok_or_else(|| StorageError::InvalidInput(format!("{field} out of range")))
}

impl TryFrom<passports::Model> for Passport {
    type Error = StorageError;

    fn try_from(row: passports::Model) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<PassportStatus>()
            .map_err(|e| StorageError::SchemaMismatch(format!("passport {}: {e}", row.id)))?;
        Ok(Self {
            id: row.id,
            name: row.name,
            passport_number: row.passport_number,
            date_of_birth: row.date_of_birth,
            issue_date: row.issue_date,
            expiry_date: row.expiry_date,
            status,
            job_category: row.job_category,
            total_charge: from_cents(row.total_charge),
            amount_paid: from_cents(row.amount_paid),
            amount_due: from_cents(row.amount_due),
            passport_image_url: row.passport_image_url,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<job_categories::Model> for JobCategory {
    fn from(row: job_categories::Model) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(status: &str) -> passports::Model {
        let now = Utc::now();
        passports::Model {
            id: 7,
            name: "Jonas Berg".into(),
            passport_number: "N0012345".into(),
            name_key: "jonas berg".into(),
            passport_number_key: "n0012345".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 9, 1).unwrap(),
            issue_date: None,
            expiry_date: NaiveDate::from_ymd_opt(2030, 9, 1).unwrap(),
            status: status.into(),
            job_category: Some("Welder".into()),
            total_charge: 150_000,
            amount_paid: 49_950,
            amount_due: 100_050,
            passport_image_url: None,
            notes: Some("call back".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn cents_conversion() {
        assert_eq!(to_cents(dec("1500")), Some(150_000));
        assert_eq!(to_cents(dec("0.015")), Some(2));
        assert_eq!(to_cents(dec("-20.5")), Some(-2050));
        assert_eq!(to_cents(Decimal::MAX), None);
        assert_eq!(from_cents(100_050), dec("1000.50"));
        assert_eq!(from_cents(-2050), dec("-20.50"));
    }

    #[test]
    fn row_maps_to_contract_model() {
        let p = Passport::try_from(row("flight_complete")).unwrap();
        assert_eq!(p.id, 7);
        assert_eq!(p.passport_number, "N0012345");
        assert_eq!(p.status, PassportStatus::FlightComplete);
        assert_eq!(p.total_charge, dec("1500"));
        assert_eq!(p.amount_paid, dec("499.50"));
        assert_eq!(p.amount_due, dec("1000.50"));
        assert_eq!(p.notes.as_deref(), Some("call back"));
    }

    #[test]
    fn unknown_status_is_a_schema_mismatch() {
        let err = Passport::try_from(row("archived")).unwrap_err();
        assert!(matches!(err, StorageError::SchemaMismatch(_)));
    }
}
