
mod auth_api;
mod lists_api;
mod movies_api;
mod stats_api;
mod watched_api;
