pub mod genres;
pub mod movies;
pub mod people;
