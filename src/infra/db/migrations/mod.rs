//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_courses_table;
mod m20250301_000003_create_carts_tables;
mod m20250301_000004_create_course_purchases_table;
mod m20250301_000005_create_feedback_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_courses_table::Migration),
            Box::new(m20250301_000003_create_carts_tables::Migration),
            Box::new(m20250301_000004_create_course_purchases_table::Migration),
            Box::new(m20250301_000005_create_feedback_table::Migration),
        ]
    }
}
