mod movies;
pub mod stats;

pub use movies::{MAX_CAST_MEMBERS, MovieService};
