use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

/// Row of the `passports` table. Money columns hold cents; `*_key` columns
/// hold lowercased copies for case-insensitive search.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "passports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub passport_number: String,
    /// Lowercased `name`, the column search runs against.
    pub name_key: String,
    pub passport_number_key: String,
    pub date_of_birth: NaiveDate,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
    pub status: String,
    pub job_category: Option<String>,
    pub total_charge: i64,
    pub amount_paid: i64,
    pub amount_due: i64,
    pub passport_image_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
