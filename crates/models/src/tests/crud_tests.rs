use crate::{db, service, user, version};
use migration::MigratorTrait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, SqlErr};
use uuid::Uuid;

/// Connect and migrate, or skip the test when no database is reachable.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let cfg = configs::DatabaseConfig::from_env();
    if cfg.url.trim().is_empty() {
        eprintln!("skip: DATABASE_URL not set");
        return None;
    }
    let db = match db::connect(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

#[tokio::test]
async fn test_service_crud() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let name = format!("svc_{}", Uuid::new_v4());
    let created = service::create(&db, &name, "a catalog entry").await?;
    assert_eq!(created.name, name);
    assert_eq!(created.created_at, created.updated_at);

    let found = service::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref().map(|m| m.id), Some(created.id));

    let by_name = service::Entity::find()
        .filter(service::Column::Name.eq(name.clone()))
        .one(&db)
        .await?;
    assert!(by_name.is_some());

    service::Entity::delete_by_id(created.id).exec(&db).await?;
    let gone = service::Entity::find_by_id(created.id).one(&db).await?;
    assert!(gone.is_none());
    Ok(())
}

#[tokio::test]
async fn test_service_create_rejects_bad_input() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    assert!(service::create(&db, "ab", "desc").await.is_err());
    assert!(service::create(&db, "valid name", "").await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_version_unique_constraint_and_cascade() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let svc = service::create(&db, &format!("svc_{}", Uuid::new_v4()), "owner").await?;

    let v1 = version::create(&db, svc.id, "v1.0", "first release").await?;
    assert_eq!(v1.service_id, svc.id);

    // Same (name, service_id) pair must be rejected by the unique index
    let dup = version::create(&db, svc.id, "v1.0", "impostor").await;
    let err = dup.expect_err("duplicate version should be rejected");
    assert!(matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))));

    // Same name under a different service is fine
    let other = service::create(&db, &format!("svc_{}", Uuid::new_v4()), "other owner").await?;
    version::create(&db, other.id, "v1.0", "unrelated release").await?;

    // Deleting the service cascades to its versions
    service::Entity::delete_by_id(svc.id).exec(&db).await?;
    let orphan = version::Entity::find_by_id(v1.id).one(&db).await?;
    assert!(orphan.is_none());

    service::Entity::delete_by_id(other.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_user_crud() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let username = format!("user_{}", Uuid::new_v4());
    let created = user::create(&db, &username, "$argon2id$stub").await?;
    assert_eq!(created.username, username);

    let found = user::find_by_username(&db, &username).await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));

    // Username is unique
    let dup = user::create(&db, &username, "$argon2id$other").await;
    assert!(dup.is_err());

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}
