//! Migration to create the leads table.
//!
//! `agent_handle` references `agents.subdomain` by value only; there is no
//! foreign key so submissions for unknown handles are still recorded.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Leads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leads::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Leads::AgentHandle).string_len(50).not_null())
                    .col(ColumnDef::new(Leads::FirstName).string_len(100).null())
                    .col(ColumnDef::new(Leads::LastName).string_len(100).null())
                    .col(ColumnDef::new(Leads::Email).string_len(255).null())
                    .col(ColumnDef::new(Leads::Phone).string_len(50).null())
                    .col(ColumnDef::new(Leads::Interest).text().null())
                    .col(
                        ColumnDef::new(Leads::MarketingConsent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Leads::TransactionalConsent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Leads::Consent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Leads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leads_agent_handle")
                    .table(Leads::Table)
                    .col(Leads::AgentHandle)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Leads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Leads {
    Table,
    Id,
    AgentHandle,
    FirstName,
    LastName,
    Email,
    Phone,
    Interest,
    MarketingConsent,
    TransactionalConsent,
    Consent,
    CreatedAt,
}
