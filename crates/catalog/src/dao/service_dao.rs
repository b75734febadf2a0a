//! Data access for services, including the paginated listing query.

use chrono::Utc;
use models::{service, version};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use crate::dto::{ServiceResponse, ServiceWithVersions, ServiceWithVersionCount};
use crate::errors::CatalogError;
use crate::pagination::{Pagination, SortBy, SortOrder};

/// Page of services, each annotated with its version count.
///
/// A left-outer aggregation keeps zero-version services in the result with
/// a count of 0. The optional name filter matches case-insensitive
/// substrings. Tie order for equal sort keys is database-dependent.
pub async fn list_services_with_version_count(
    db: &DatabaseConnection,
    pagination: Pagination,
    name_filter: Option<&str>,
    sort_by: SortBy,
    order: SortOrder,
) -> Result<Vec<ServiceWithVersionCount>, CatalogError> {
    let (offset, limit) = pagination.normalize();

    let mut query = service::Entity::find()
        .select_only()
        .column(service::Column::Id)
        .column(service::Column::Name)
        .column(service::Column::Description)
        .column_as(version::Column::Id.count(), "version_count")
        .join(JoinType::LeftJoin, service::Relation::Version.def())
        .group_by(service::Column::Id);

    if let Some(name) = name_filter {
        query = query.filter(
            Expr::expr(Func::lower(Expr::col((service::Entity, service::Column::Name))))
                .like(format!("%{}%", name.to_lowercase())),
        );
    }

    let sort_column = match sort_by {
        SortBy::CreatedAt => service::Column::CreatedAt,
        SortBy::UpdatedAt => service::Column::UpdatedAt,
        SortBy::Name => service::Column::Name,
    };

    query
        .order_by(sort_column, order.into())
        .limit(limit)
        .offset(offset)
        .into_model::<ServiceWithVersionCount>()
        .all(db)
        .await
        .map_err(|e| CatalogError::Db(e.to_string()))
}

pub async fn get_service(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<ServiceResponse>, CatalogError> {
    let found = service::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| CatalogError::Db(e.to_string()))?;
    Ok(found.map(ServiceResponse::from))
}

pub async fn get_service_with_versions(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<ServiceWithVersions>, CatalogError> {
    let mut rows = service::Entity::find_by_id(id)
        .find_with_related(version::Entity)
        .all(db)
        .await
        .map_err(|e| CatalogError::Db(e.to_string()))?;
    Ok(rows.pop().map(|(svc, versions)| ServiceWithVersions::new(svc, versions)))
}

pub async fn create_service(
    db: &DatabaseConnection,
    name: &str,
    description: &str,
) -> Result<ServiceResponse, CatalogError> {
    let created = service::create(db, name, description).await?;
    Ok(created.into())
}

/// Apply only the supplied fields and refresh `updated_at`.
///
/// The find-then-update sequence is not transactional: a delete racing in
/// between maps to `Ok(None)` and the caller reports the row as missing.
pub async fn update_service(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<Option<ServiceResponse>, CatalogError> {
    let Some(found) = service::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| CatalogError::Db(e.to_string()))?
    else {
        return Ok(None);
    };

    let mut am: service::ActiveModel = found.into();
    if let Some(n) = name {
        service::validate_name(n)?;
        am.name = Set(n.to_string());
    }
    if let Some(d) = description {
        service::validate_description(d)?;
        am.description = Set(d.to_string());
    }
    am.updated_at = Set(Utc::now().into());

    match am.update(db).await {
        Ok(updated) => Ok(Some(updated.into())),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(CatalogError::Db(e.to_string())),
    }
}

/// True iff a row was removed. Versions go with it via the FK cascade.
pub async fn delete_service(db: &DatabaseConnection, id: Uuid) -> Result<bool, CatalogError> {
    let res = service::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| CatalogError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::version_dao;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn service_crud_roundtrip() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };

        let name = format!("svc_{}", Uuid::new_v4());
        let created = create_service(&db, &name, "catalog entry").await?;

        let fetched = get_service(&db, created.id).await?.expect("created service");
        assert_eq!(fetched.name, name);

        let updated = update_service(&db, created.id, None, Some("amended"))
            .await?
            .expect("updated service");
        assert_eq!(updated.name, name);
        assert_eq!(updated.description, "amended");
        assert!(updated.updated_at >= created.updated_at);

        assert!(delete_service(&db, created.id).await?);
        assert!(get_service(&db, created.id).await?.is_none());
        assert!(!delete_service(&db, created.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_absent() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let missing = update_service(&db, Uuid::new_v4(), Some("New Name"), None).await?;
        assert!(missing.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn listing_counts_filters_and_sorts() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };

        // Unique marker keeps this test independent of other rows
        let marker = Uuid::new_v4().simple().to_string();
        let alpha = create_service(&db, &format!("Alpha {marker}"), "first").await?;
        let beta = create_service(&db, &format!("Beta {marker}"), "second").await?;

        version_dao::create_version(&db, alpha.id, "v1.0", "rel").await?;
        version_dao::create_version(&db, alpha.id, "v2.0", "rel").await?;

        // Case-insensitive substring filter, ascending name order
        let rows = list_services_with_version_count(
            &db,
            Pagination::default(),
            Some(&marker.to_uppercase()),
            SortBy::Name,
            SortOrder::Asc,
        )
        .await?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, alpha.id);
        assert_eq!(rows[0].version_count, 2);
        // Zero-version service is present, not dropped
        assert_eq!(rows[1].id, beta.id);
        assert_eq!(rows[1].version_count, 0);

        // Descending reverses the order
        let rows = list_services_with_version_count(
            &db,
            Pagination::default(),
            Some(&marker),
            SortBy::Name,
            SortOrder::Desc,
        )
        .await?;
        assert_eq!(rows[0].id, beta.id);

        // Page size bounds the result; page 2 picks up the rest
        let page1 = list_services_with_version_count(
            &db,
            Pagination { page: 1, limit: 1 },
            Some(&marker),
            SortBy::Name,
            SortOrder::Asc,
        )
        .await?;
        assert_eq!(page1.len(), 1);
        assert_eq!(page1[0].id, alpha.id);
        let page2 = list_services_with_version_count(
            &db,
            Pagination { page: 2, limit: 1 },
            Some(&marker),
            SortBy::Name,
            SortOrder::Asc,
        )
        .await?;
        assert_eq!(page2.len(), 1);
        assert_eq!(page2[0].id, beta.id);

        delete_service(&db, alpha.id).await?;
        delete_service(&db, beta.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn detail_includes_versions() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };

        let svc = create_service(&db, &format!("svc_{}", Uuid::new_v4()), "entry").await?;
        version_dao::create_version(&db, svc.id, "v1.0", "rel").await?;

        let detail = get_service_with_versions(&db, svc.id).await?.expect("detail");
        assert_eq!(detail.versions.len(), 1);
        assert_eq!(detail.versions[0].name, "v1.0");

        assert!(get_service_with_versions(&db, Uuid::new_v4()).await?.is_none());

        delete_service(&db, svc.id).await?;
        Ok(())
    }
}
