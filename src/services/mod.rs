use crate::model::FieldErrors;

pub mod articles;

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    SqlError(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error("Article {0} not found")]
    NotFound(i64),
    #[error("Validation error, {0}")]
    Validation(FieldErrors),
}
