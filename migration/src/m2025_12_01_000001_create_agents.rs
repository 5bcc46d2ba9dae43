//! Migration to create the agents table.
//!
//! One row per agent profile, addressed by a unique `subdomain` slug.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Agents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Agents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Agents::Subdomain)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Agents::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Agents::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Agents::BrandName).string_len(100).not_null())
                    .col(ColumnDef::new(Agents::PhoneNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Agents::Email).string_len(100).not_null())
                    .col(ColumnDef::new(Agents::PrivacyPolicyUrl).string_len(255).null())
                    .col(ColumnDef::new(Agents::AboutMe).text().null())
                    .col(ColumnDef::new(Agents::City).string_len(100).null())
                    .col(ColumnDef::new(Agents::State).string_len(50).null())
                    .col(ColumnDef::new(Agents::ZipCode).string_len(20).null())
                    .col(ColumnDef::new(Agents::AvatarUrl).string_len(255).null())
                    .col(
                        ColumnDef::new(Agents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Agents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Agents {
    Table,
    Id,
    Subdomain,
    FirstName,
    LastName,
    BrandName,
    PhoneNumber,
    Email,
    PrivacyPolicyUrl,
    AboutMe,
    City,
    State,
    ZipCode,
    AvatarUrl,
    CreatedAt,
}
