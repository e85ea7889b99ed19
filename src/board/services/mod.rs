//! Application services for the board catalogue.

mod catalog;

pub use catalog::{BoardCatalogService, BoardView, ColumnView};
