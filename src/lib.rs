pub mod app;
pub mod error;
pub mod graphql;
pub mod models;
pub mod session;
pub mod tmdb;
