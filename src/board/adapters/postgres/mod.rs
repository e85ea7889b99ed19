//! `PostgreSQL` adapters for board persistence.

mod directory;
mod models;
mod schema;

pub use directory::PostgresBoardDirectory;
