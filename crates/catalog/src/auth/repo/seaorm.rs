use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<models::user::Model>, AuthError> {
        Ok(models::user::find_by_username(&self.db, username).await?)
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<models::user::Model, AuthError> {
        Ok(models::user::create(&self.db, username, password_hash).await?)
    }
}
