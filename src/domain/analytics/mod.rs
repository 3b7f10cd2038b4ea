pub mod actors;
pub mod averages;
pub mod genres;
pub mod stats;
pub mod trends;
