//! Database migrations for the agent microsite.
//!
//! Owns the `agents` and `leads` tables.

pub use sea_orm_migration::prelude::*;

mod m2025_12_01_000001_create_agents;
mod m2025_12_01_000002_create_leads;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_12_01_000001_create_agents::Migration),
            Box::new(m2025_12_01_000002_create_leads::Migration),
        ]
    }
}
