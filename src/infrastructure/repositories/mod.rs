pub mod analytics;
pub mod auth;
pub mod lists;
pub mod movies;
pub mod watched;

// Re-exports
pub use analytics::stats;
pub use auth::{tokens, users};

use crate::domain::RepositoryError;

pub(crate) fn db_err(err: sqlx::Error) -> RepositoryError {
    RepositoryError::unexpected(err.to_string())
}

/// Map unique-constraint violations to `Conflict`, everything else to `Unexpected`.
pub(crate) fn conflict_or_db_err(err: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(database_err) = &err
        && database_err.is_unique_violation()
    {
        return RepositoryError::conflict(message);
    }
    RepositoryError::unexpected(err.to_string())
}
