use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// Connection for database-backed tests, or `None` to skip the test when no
/// database is reachable.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let cfg = configs::DatabaseConfig::from_env();
    if cfg.url.trim().is_empty() {
        eprintln!("skip: DATABASE_URL not set");
        return None;
    }

    let migrated = MIGRATED
        .get_or_init(|| {
            let cfg = cfg.clone();
            async move {
                let db = match models::db::connect(&cfg).await {
                    Ok(db) => db,
                    Err(e) => {
                        eprintln!("skip: cannot connect to db: {}", e);
                        return false;
                    }
                };
                if let Err(e) = migration::Migrator::up(&db, None).await {
                    eprintln!("skip: migrate up failed: {}", e);
                    return false;
                }
                true
            }
        })
        .await;
    if !migrated {
        return None;
    }

    // Fresh connection for the current test's runtime
    models::db::connect(&cfg).await.ok()
}
