use thiserror::Error;

/// Errors surfaced by entity helpers: input that fails the field bounds,
/// or a database error passed through as text.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}
