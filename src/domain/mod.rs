pub mod analytics;
pub mod auth;
pub mod errors;
pub mod ids;
pub mod lists;
pub mod metadata;
pub mod movies;
pub mod repositories;
pub mod watched;

// Re-exports
pub use analytics::stats;
pub use auth::{tokens, users};
pub use errors::RepositoryError;
