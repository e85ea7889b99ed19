//! Domain model for boards and their columns.
//!
//! A board owns a fixed triple of columns. Columns carry no tasks themselves;
//! task membership is recorded on the task side through its column id.

mod board;
mod error;
mod ids;

pub use board::{Board, Column, DEFAULT_COLUMN_TITLES, PersistedBoardData};
pub use error::BoardDomainError;
pub use ids::{BoardId, BoardName, ColumnId};
