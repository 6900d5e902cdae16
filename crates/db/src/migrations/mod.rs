//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_account_table;
mod m20250101_000002_create_couple_table;
mod m20250101_000003_create_product_table;
mod m20250101_000004_create_event_table;
mod m20250101_000005_create_order_table;
mod m20250101_000006_create_booking_table;
mod m20250101_000007_create_wishlist_item_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_account_table::Migration),
            Box::new(m20250101_000002_create_couple_table::Migration),
            Box::new(m20250101_000003_create_product_table::Migration),
            Box::new(m20250101_000004_create_event_table::Migration),
            Box::new(m20250101_000005_create_order_table::Migration),
            Box::new(m20250101_000006_create_booking_table::Migration),
            Box::new(m20250101_000007_create_wishlist_item_table::Migration),
        ]
    }
}
