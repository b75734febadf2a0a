//! Data access for versions.

use chrono::Utc;
use models::version;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, SqlErr};
use tracing::debug;
use uuid::Uuid;

use crate::dto::VersionResponse;
use crate::errors::CatalogError;

/// Insert a version.
///
/// A duplicate (name, service_id) pair is rejected by the database's unique
/// index; that specific violation is recognized by its typed error variant
/// and downgraded to `Ok(None)` so the caller can report a conflict. Every
/// other database error propagates.
pub async fn create_version(
    db: &DatabaseConnection,
    service_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Option<VersionResponse>, CatalogError> {
    version::validate_name(name)?;
    version::validate_description(description)?;

    match version::create(db, service_id, name, description).await {
        Ok(created) => Ok(Some(created.into())),
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                debug!(%service_id, name, "duplicate version rejected by unique index");
                Ok(None)
            }
            _ => Err(CatalogError::Db(e.to_string())),
        },
    }
}

pub async fn get_version(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<VersionResponse>, CatalogError> {
    let found = version::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| CatalogError::Db(e.to_string()))?;
    Ok(found.map(VersionResponse::from))
}

/// Apply only the supplied fields and refresh `updated_at`. Same
/// non-transactional find-then-update contract as the service DAO.
pub async fn update_version(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<Option<VersionResponse>, CatalogError> {
    let Some(found) = version::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| CatalogError::Db(e.to_string()))?
    else {
        return Ok(None);
    };

    let mut am: version::ActiveModel = found.into();
    if let Some(n) = name {
        version::validate_name(n)?;
        am.name = Set(n.to_string());
    }
    if let Some(d) = description {
        version::validate_description(d)?;
        am.description = Set(d.to_string());
    }
    am.updated_at = Set(Utc::now().into());

    match am.update(db).await {
        Ok(updated) => Ok(Some(updated.into())),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(CatalogError::Db(e.to_string())),
    }
}

pub async fn delete_version(db: &DatabaseConnection, id: Uuid) -> Result<bool, CatalogError> {
    let res = version::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| CatalogError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::service_dao;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn version_crud_roundtrip() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };

        let svc =
            service_dao::create_service(&db, &format!("svc_{}", Uuid::new_v4()), "owner").await?;

        let created = create_version(&db, svc.id, "v1.0", "first release")
            .await?
            .expect("created version");
        assert_eq!(created.service_id, svc.id);

        let fetched = get_version(&db, created.id).await?.expect("fetched version");
        assert_eq!(fetched.name, "v1.0");

        let updated = update_version(&db, created.id, Some("v1.1"), None)
            .await?
            .expect("updated version");
        assert_eq!(updated.name, "v1.1");
        assert_eq!(updated.description, "first release");

        assert!(delete_version(&db, created.id).await?);
        assert!(!delete_version(&db, created.id).await?);
        assert!(get_version(&db, created.id).await?.is_none());

        service_dao::delete_service(&db, svc.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_pair_downgrades_to_none() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };

        let svc =
            service_dao::create_service(&db, &format!("svc_{}", Uuid::new_v4()), "owner").await?;

        let first = create_version(&db, svc.id, "v1.0", "release").await?;
        assert!(first.is_some());
        let second = create_version(&db, svc.id, "v1.0", "duplicate").await?;
        assert!(second.is_none());

        service_dao::delete_service(&db, svc.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_absent() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let missing = update_version(&db, Uuid::new_v4(), Some("v9"), None).await?;
        assert!(missing.is_none());
        Ok(())
    }
}
