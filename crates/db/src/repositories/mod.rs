use thiserror::Error;
use weddy_core::errors::ApplicationError;

pub mod venue;

pub use venue::SqlVenueSource;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        ApplicationError::Database(error.to_string())
    }
}
