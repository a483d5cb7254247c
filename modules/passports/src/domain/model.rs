//! Validated inputs handed from the service to the repository.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::contract::model::PassportStatus;

/// A passport ready to insert. Money is already rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassportDraft {
    pub name: String,
    pub passport_number: String,
    pub date_of_birth: NaiveDate,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
    pub status: PassportStatus,
    pub job_category: Option<String>,
    pub total_charge: Decimal,
    pub amount_paid: Decimal,
    pub passport_image_url: Option<String>,
    pub notes: Option<String>,
}

impl PassportDraft {
    pub fn amount_due(&self) -> Decimal {
        self.total_charge - self.amount_paid
    }
}

/// Validated partial update; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PassportChanges {
    pub name: Option<String>,
    pub passport_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub issue_date: Option<Option<NaiveDate>>,
    pub expiry_date: Option<NaiveDate>,
    pub status: Option<PassportStatus>,
    pub job_category: Option<Option<String>>,
    pub total_charge: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub passport_image_url: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl PassportChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// True when `amount_due` has to be recomputed.
    pub fn touches_money(&self) -> bool {
        self.total_charge.is_some() || self.amount_paid.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PassportFilter {
    /// Lower-cased search term, never empty.
    pub search: Option<String>,
    pub status: Option<PassportStatus>,
    pub job_category: Option<String>,
}

/// Whitelisted sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    /// Creation time.
    Date,
    Status,
    JobCategory,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "name" => Some(SortKey::Name),
            "date" => Some(SortKey::Date),
            "status" => Some(SortKey::Status),
            "jobCategory" => Some(SortKey::JobCategory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case selects descending; anything else is ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub filter: PassportFilter,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub limit: u64,
    pub offset: u64,
}
