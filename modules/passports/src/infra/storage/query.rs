//! Statement building for list and partial-update operations.
//!
//! Column identifiers always come from the typed sort/filter enums; user
//! text only ever reaches the database as bound values.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder, Select, UpdateMany,
};

use crate::domain::model::{PassportChanges, PassportFilter, SortDirection, SortKey};
use crate::domain::repo::StorageError;
use crate::infra::storage::entity::passports::{Column, Entity};
use crate::infra::storage::mapper::cents_or_invalid;

const LIKE_ESCAPE: char = '!';

/// `%term%` with LIKE wildcards in `term` escaped.
pub fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// Case-folded form stored in the `*_key` columns and applied to search terms.
/// SQLite's `LOWER()` folds ASCII only, so SQL never folds.
pub fn search_key(text: &str) -> String {
    text.to_lowercase()
}

fn key_like(col: Column, pattern: &str) -> SimpleExpr {
    Expr::col(col).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

/// All present filters ANDed; search matches name OR passport number.
pub fn filter_condition(filter: &PassportFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(status) = filter.status {
        cond = cond.add(Column::Status.eq(status.as_str()));
    }
    if let Some(job) = &filter.job_category {
        cond = cond.add(Column::JobCategory.eq(job.as_str()));
    }
    if let Some(term) = &filter.search {
        let pattern = like_pattern(&search_key(term));
        cond = cond.add(
            Condition::any()
                .add(key_like(Column::NameKey, &pattern))
                .add(key_like(Column::PassportNumberKey, &pattern)),
        );
    }
    cond
}

pub fn sort_column(key: SortKey) -> Column {
    match key {
        SortKey::Name => Column::Name,
        SortKey::Date => Column::CreatedAt,
        SortKey::Status => Column::Status,
        SortKey::JobCategory => Column::JobCategory,
    }
}

/// ORDER BY the whitelisted column, then id for stable pages.
pub fn apply_order(select: Select<Entity>, key: SortKey, direction: SortDirection) -> Select<Entity> {
    let order = match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };
    select
        .order_by(sort_column(key), order)
        .order_by(Column::Id, Order::Asc)
}

/// One UPDATE for all present fields. `updated_at` is always assigned and
/// `amount_due` is recomputed from the new or stored money columns.
pub fn update_statement(
    id: i32,
    changes: &PassportChanges,
    now: DateTime<Utc>,
) -> Result<UpdateMany<Entity>, StorageError> {
    let mut q = Entity::update_many().filter(Column::Id.eq(id));

    if let Some(v) = &changes.name {
        q = q
            .col_expr(Column::Name, Expr::value(v.clone()))
            .col_expr(Column::NameKey, Expr::value(search_key(v)));
    }
    if let Some(v) = &changes.passport_number {
        q = q
            .col_expr(Column::PassportNumber, Expr::value(v.clone()))
            .col_expr(Column::PassportNumberKey, Expr::value(search_key(v)));
    }
    if let Some(v) = changes.date_of_birth {
        q = q.col_expr(Column::DateOfBirth, Expr::value(v));
    }
    if let Some(v) = changes.issue_date {
        q = q.col_expr(Column::IssueDate, Expr::value(v));
    }
    if let Some(v) = changes.expiry_date {
        q = q.col_expr(Column::ExpiryDate, Expr::value(v));
    }
    if let Some(v) = changes.status {
        q = q.col_expr(Column::Status, Expr::value(v.as_str()));
    }
    if let Some(v) = &changes.job_category {
        q = q.col_expr(Column::JobCategory, Expr::value(v.clone()));
    }
    if let Some(v) = &changes.passport_image_url {
        q = q.col_expr(Column::PassportImageUrl, Expr::value(v.clone()));
    }
    if let Some(v) = &changes.notes {
        q = q.col_expr(Column::Notes, Expr::value(v.clone()));
    }

    let total = changes
        .total_charge
        .map(|v| cents_or_invalid(v, "total charge"))
        .transpose()?;
    let paid = changes
        .amount_paid
        .map(|v| cents_or_invalid(v, "amount paid"))
        .transpose()?;
    if let Some(cents) = total {
        q = q.col_expr(Column::TotalCharge, Expr::value(cents));
    }
    if let Some(cents) = paid {
        q = q.col_expr(Column::AmountPaid, Expr::value(cents));
    }
    if changes.touches_money() {
        let total_expr: SimpleExpr = match total {
            Some(cents) => Expr::value(cents),
            None => Expr::col(Column::TotalCharge).into(),
        };
        let paid_expr: SimpleExpr = match paid {
            Some(cents) => Expr::value(cents),
            None => Expr::col(Column::AmountPaid).into(),
        };
        q = q.col_expr(Column::AmountDue, Expr::expr(total_expr).sub(paid_expr));
    }

    Ok(q.col_expr(Column::UpdatedAt, Expr::value(now)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::PassportStatus;
    use rust_decimal::Decimal;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql<Q: QueryTrait>(q: Q) -> String {
        q.build(DbBackend::Sqlite).to_string()
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ab"), "%ab%");
        assert_eq!(like_pattern("50%_off"), "%50!%!_off%");
        assert_eq!(like_pattern("hi!"), "%hi!!%");
    }

    #[test]
    fn filter_ands_status_and_search() {
        let filter = PassportFilter {
            search: Some("bx".into()),
            status: Some(PassportStatus::Pending),
            job_category: None,
        };
        let s = sql(Entity::find().filter(filter_condition(&filter)));
        assert!(s.contains(r#""status" = 'pending'"#), "{s}");
        assert!(s.contains(r#""name_key" LIKE '%bx%' ESCAPE '!'"#), "{s}");
        assert!(s.contains(r#""passport_number_key" LIKE '%bx%'"#), "{s}");
        assert!(!s.contains("LOWER("), "{s}");
        assert!(s.contains(" OR "), "{s}");
        assert!(s.contains(" AND "), "{s}");
    }

    #[test]
    fn search_term_is_folded_beyond_ascii() {
        assert_eq!(search_key("ÉMILE Ölçer"), "émile ölçer");
        let filter = PassportFilter {
            search: Some("ÉMILE".into()),
            ..Default::default()
        };
        let s = sql(Entity::find().filter(filter_condition(&filter)));
        assert!(s.contains(r#""name_key" LIKE '%émile%'"#), "{s}");
    }

    #[test]
    fn update_refreshes_search_keys() {
        let changes = PassportChanges {
            name: Some("Ölçer Ağa".into()),
            ..Default::default()
        };
        let s = sql(update_statement(3, &changes, Utc::now()).unwrap());
        assert!(s.contains(r#""name" = 'Ölçer Ağa'"#), "{s}");
        assert!(s.contains(r#""name_key" = 'ölçer ağa'"#), "{s}");
        assert!(!s.contains("passport_number_key"), "{s}");
    }

    #[test]
    fn empty_filter_has_no_where() {
        let s = sql(Entity::find().filter(filter_condition(&PassportFilter::default())));
        assert!(!s.contains("WHERE"), "{s}");
    }

    #[test]
    fn order_uses_whitelisted_column_and_id_tiebreak() {
        let s = sql(apply_order(Entity::find(), SortKey::Date, SortDirection::Desc));
        assert!(
            s.ends_with(r#"ORDER BY "passports"."created_at" DESC, "passports"."id" ASC"#),
            "{s}"
        );
        let s = sql(apply_order(Entity::find(), SortKey::JobCategory, SortDirection::Asc));
        assert!(s.contains(r#""passports"."job_category" ASC"#), "{s}");
    }

    #[test]
    fn update_recomputes_amount_due_from_stored_values() {
        let changes = PassportChanges {
            amount_paid: Some(Decimal::new(2500, 2)),
            ..Default::default()
        };
        let s = sql(update_statement(3, &changes, Utc::now()).unwrap());
        assert!(s.contains(r#""amount_paid" = 2500"#), "{s}");
        assert!(s.contains(r#""amount_due" = "total_charge" - 2500"#), "{s}");
        assert!(s.contains(r#""updated_at" = "#), "{s}");
        assert!(!s.contains(r#""total_charge" = "#), "{s}");
    }

    #[test]
    fn update_sets_null_for_cleared_columns() {
        let changes = PassportChanges {
            notes: Some(None),
            ..Default::default()
        };
        let s = sql(update_statement(3, &changes, Utc::now()).unwrap());
        assert!(s.contains(r#""notes" = NULL"#), "{s}");
        assert!(!s.contains("amount_due"), "{s}");
    }
}
