//! Creates the `passports` and `job_categories` tables.

use sea_orm_migration::prelude::*;

const STATUSES: [&str; 6] = [
    "not_applied",
    "pending",
    "valid",
    "rejected",
    "canceled",
    "flight_complete",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Passports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Passports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Passports::Name).string().not_null())
                    .col(
                        ColumnDef::new(Passports::PassportNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Passports::NameKey).string().not_null())
                    .col(
                        ColumnDef::new(Passports::PassportNumberKey)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Passports::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Passports::IssueDate).date())
                    .col(ColumnDef::new(Passports::ExpiryDate).date().not_null())
                    .col(
                        ColumnDef::new(Passports::Status)
                            .string()
                            .not_null()
                            .default("not_applied")
                            .check(Expr::col(Passports::Status).is_in(STATUSES)),
                    )
                    .col(ColumnDef::new(Passports::JobCategory).string())
                    .col(
                        ColumnDef::new(Passports::TotalCharge)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Passports::AmountPaid)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Passports::AmountDue)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Passports::PassportImageUrl).string())
                    .col(ColumnDef::new(Passports::Notes).text())
                    .col(
                        ColumnDef::new(Passports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Passports::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, col) in [
            ("idx_passports_name", Passports::Name),
            ("idx_passports_name_key", Passports::NameKey),
            ("idx_passports_status", Passports::Status),
            ("idx_passports_job_category", Passports::JobCategory),
            ("idx_passports_created_at", Passports::CreatedAt),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Passports::Table)
                        .col(col)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(JobCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobCategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JobCategories::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(JobCategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Passports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Passports {
    Table,
    Id,
    Name,
    PassportNumber,
    NameKey,
    PassportNumberKey,
    DateOfBirth,
    IssueDate,
    ExpiryDate,
    Status,
    JobCategory,
    TotalCharge,
    AmountPaid,
    AmountDue,
    PassportImageUrl,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum JobCategories {
    Table,
    Id,
    Name,
    CreatedAt,
}
