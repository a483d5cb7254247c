//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
//! or a transaction.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::contract::model::{JobCategory, Passport, PassportPage};
use crate::domain::model::{ListParams, PassportChanges, PassportDraft};
use crate::domain::repo::{PassportsRepository, StorageError};
use crate::infra::storage::entity::{job_categories, passports};
use crate::infra::storage::mapper::cents_or_invalid;
use crate::infra::storage::query;

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmPassportsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmPassportsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> PassportsRepository for SeaOrmPassportsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i32) -> Result<Option<Passport>, StorageError> {
        passports::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(Passport::try_from)
            .transpose()
    }

    async fn insert(
        &self,
        draft: PassportDraft,
        now: DateTime<Utc>,
    ) -> Result<Passport, StorageError> {
        let total = cents_or_invalid(draft.total_charge, "total charge")?;
        let paid = cents_or_invalid(draft.amount_paid, "amount paid")?;
        let m = passports::ActiveModel {
            id: NotSet,
            name_key: Set(query::search_key(&draft.name)),
            passport_number_key: Set(query::search_key(&draft.passport_number)),
            name: Set(draft.name),
            passport_number: Set(draft.passport_number),
            date_of_birth: Set(draft.date_of_birth),
            issue_date: Set(draft.issue_date),
            expiry_date: Set(draft.expiry_date),
            status: Set(draft.status.as_str().to_string()),
            job_category: Set(draft.job_category),
            total_charge: Set(total),
            amount_paid: Set(paid),
            amount_due: Set(total - paid),
            passport_image_url: Set(draft.passport_image_url),
            notes: Set(draft.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let row = m.insert(&self.conn).await?;
        Passport::try_from(row)
    }

    async fn update(
        &self,
        id: i32,
        changes: &PassportChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Passport>, StorageError> {
        let res = query::update_statement(id, changes, now)?
            .exec(&self.conn)
            .await?;
        if res.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        let res = passports::Entity::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, params: &ListParams) -> Result<PassportPage, StorageError> {
        let cond = query::filter_condition(&params.filter);

        let total = passports::Entity::find()
            .filter(cond.clone())
            .count(&self.conn)
            .await?;

        let rows = query::apply_order(
            passports::Entity::find().filter(cond),
            params.sort_key,
            params.direction,
        )
        .limit(params.limit)
        .offset(params.offset)
        .all(&self.conn)
        .await?;

        let items = rows
            .into_iter()
            .map(Passport::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PassportPage { items, total })
    }

    async fn count_by_status(&self) -> Result<Vec<(String, u64)>, StorageError> {
        let rows: Vec<(String, i64)> = passports::Entity::find()
            .select_only()
            .column(passports::Column::Status)
            .column_as(Expr::col(passports::Column::Id).count(), "count")
            .group_by(passports::Column::Status)
            .into_tuple()
            .all(&self.conn)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(status, n)| (status, u64::try_from(n).unwrap_or(0)))
            .collect())
    }

    async fn list_job_categories(&self) -> Result<Vec<JobCategory>, StorageError> {
        let rows = job_categories::Entity::find()
            .order_by_asc(job_categories::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_job_category(
        &self,
        name: String,
        now: DateTime<Utc>,
    ) -> Result<JobCategory, StorageError> {
        let m = job_categories::ActiveModel {
            id: NotSet,
            name: Set(name),
            created_at: Set(now),
        };
        Ok(m.insert(&self.conn).await?.into())
    }
}
