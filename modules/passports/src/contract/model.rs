use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Processing state of a passport application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PassportStatus {
    #[default]
    NotApplied,
    Pending,
    Valid,
    Rejected,
    Canceled,
    FlightComplete,
}

impl PassportStatus {
    pub const ALL: [PassportStatus; 6] = [
        PassportStatus::NotApplied,
        PassportStatus::Pending,
        PassportStatus::Valid,
        PassportStatus::Rejected,
        PassportStatus::Canceled,
        PassportStatus::FlightComplete,
    ];

    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PassportStatus::NotApplied => "not_applied",
            PassportStatus::Pending => "pending",
            PassportStatus::Valid => "valid",
            PassportStatus::Rejected => "rejected",
            PassportStatus::Canceled => "canceled",
            PassportStatus::FlightComplete => "flight_complete",
        }
    }
}

impl fmt::Display for PassportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised status text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for PassportStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PassportStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Pure passport model for inter-module communication (no serde/utoipa)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passport {
    pub id: i32,
    pub name: String,
    pub passport_number: String,
    pub date_of_birth: NaiveDate,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
    pub status: PassportStatus,
    pub job_category: Option<String>,
    pub total_charge: Decimal,
    pub amount_paid: Decimal,
    /// Always `total_charge - amount_paid`; negative on overpayment.
    pub amount_due: Decimal,
    pub passport_image_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a passport record, as received from a caller.
///
/// Dates and status arrive as text and are checked by the service; empty
/// strings in optional fields count as absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewPassport {
    pub name: String,
    pub passport_number: String,
    pub date_of_birth: String,
    pub issue_date: Option<String>,
    pub expiry_date: String,
    pub status: Option<String>,
    pub job_category: Option<String>,
    pub total_charge: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub passport_image_url: Option<String>,
    pub notes: Option<String>,
}

/// Partial update of a passport record.
///
/// `None` leaves a field untouched. For nullable columns `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PassportPatch {
    pub name: Option<String>,
    pub passport_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub issue_date: Option<Option<String>>,
    pub expiry_date: Option<String>,
    pub status: Option<String>,
    pub job_category: Option<Option<String>>,
    pub total_charge: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
    pub passport_image_url: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

/// List request: every field optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PassportQuery {
    /// Case-insensitive substring of name or passport number.
    pub search: Option<String>,
    pub status: Option<String>,
    pub job_category: Option<String>,
    /// `name`, `date`, `status` or `jobCategory`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// One page of passports plus the number of records matching the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassportPage {
    pub items: Vec<Passport>,
    pub total: u64,
}

/// Record counts per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub not_applied: u64,
    pub pending: u64,
    pub valid: u64,
    pub rejected: u64,
    pub canceled: u64,
    pub flight_complete: u64,
}

impl StatusCounts {
    pub fn get(&self, status: PassportStatus) -> u64 {
        match status {
            PassportStatus::NotApplied => self.not_applied,
            PassportStatus::Pending => self.pending,
            PassportStatus::Valid => self.valid,
            PassportStatus::Rejected => self.rejected,
            PassportStatus::Canceled => self.canceled,
            PassportStatus::FlightComplete => self.flight_complete,
        }
    }

    pub fn add(&mut self, status: PassportStatus, n: u64) {
        let slot = match status {
            PassportStatus::NotApplied => &mut self.not_applied,
            PassportStatus::Pending => &mut self.pending,
            PassportStatus::Valid => &mut self.valid,
            PassportStatus::Rejected => &mut self.rejected,
            PassportStatus::Canceled => &mut self.canceled,
            PassportStatus::FlightComplete => &mut self.flight_complete,
        };
        *slot += n;
    }

    pub fn total(&self) -> u64 {
        PassportStatus::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

/// Aggregate view for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassportStats {
    pub counts: StatusCounts,
    /// Sum of all group counts.
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCategory {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewJobCategory {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_round_trips_for_all_values() {
        for st in PassportStatus::ALL {
            assert_eq!(st.as_str().parse::<PassportStatus>().unwrap(), st);
        }
        assert_eq!(PassportStatus::default(), PassportStatus::NotApplied);
    }

    #[test]
    fn unknown_status_is_rejected_with_message() {
        let err = "approved".parse::<PassportStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid status: approved");
        assert!("VALID".parse::<PassportStatus>().is_err());
    }

    #[test]
    fn status_counts_total_sums_groups() {
        let mut c = StatusCounts::default();
        c.add(PassportStatus::Valid, 2);
        c.add(PassportStatus::Pending, 1);
        c.add(PassportStatus::Valid, 1);
        assert_eq!(c.valid, 3);
        assert_eq!(c.get(PassportStatus::Pending), 1);
        assert_eq!(c.total(), 4);
    }
}
