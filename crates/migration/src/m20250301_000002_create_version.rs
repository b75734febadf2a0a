//! Create `version` table with FK to `service`.
//!
//! Deleting a service cascades to its versions. The composite uniqueness
//! on (name, service_id) lives in the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Version::Table)
                    .if_not_exists()
                    .col(uuid(Version::Id).primary_key())
                    .col(uuid(Version::ServiceId).not_null())
                    .col(string_len(Version::Name, 255).not_null())
                    .col(string_len(Version::Description, 500).not_null())
                    .col(timestamp_with_time_zone(Version::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Version::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_version_service")
                            .from(Version::Table, Version::ServiceId)
                            .to(Service::Table, Service::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Version::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Version { Table, Id, ServiceId, Name, Description, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Service { Table, Id }
