//! Schema migrations, registered in FK dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_service;
mod m20250301_000002_create_version;
mod m20250301_000003_create_user;
mod m20250301_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_service::Migration),
            Box::new(m20250301_000002_create_version::Migration),
            Box::new(m20250301_000003_create_user::Migration),
            // Indexes should always be applied last
            Box::new(m20250301_000004_add_indexes::Migration),
        ]
    }
}
