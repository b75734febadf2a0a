use async_trait::async_trait;

use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_by_username(&self, username: &str)
        -> Result<Option<models::user::Model>, AuthError>;
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<models::user::Model, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, models::user::Model>>, // key: username
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<models::user::Model>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(username).cloned())
        }

        async fn create_user(
            &self,
            username: &str,
            password_hash: &str,
        ) -> Result<models::user::Model, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(username) {
                return Err(AuthError::Conflict);
            }
            let user = models::user::Model {
                id: Uuid::new_v4(),
                username: username.to_string(),
                password: password_hash.to_string(),
            };
            users.insert(username.to_string(), user.clone());
            Ok(user)
        }
    }
}
