use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl CatalogError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} with ID {} not found", entity, id))
    }
}

impl From<ModelError> for CatalogError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => CatalogError::Validation(msg),
            ModelError::Db(msg) => CatalogError::Db(msg),
        }
    }
}
