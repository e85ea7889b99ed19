//! Port contracts for board and column lookup.

pub mod directory;

pub use directory::{BoardDirectory, BoardDirectoryError, BoardDirectoryResult};
