//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_quote_table;
mod m20250601_000002_create_favorite_table;
mod m20250601_000003_create_search_history_table;
mod m20250601_000004_create_reaction_table;
mod m20250601_000005_create_daily_subscriber_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_quote_table::Migration),
            Box::new(m20250601_000002_create_favorite_table::Migration),
            Box::new(m20250601_000003_create_search_history_table::Migration),
            Box::new(m20250601_000004_create_reaction_table::Migration),
            Box::new(m20250601_000005_create_daily_subscriber_table::Migration),
        ]
    }
}
