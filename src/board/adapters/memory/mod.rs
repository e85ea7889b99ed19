//! In-memory adapters for board lookup.

mod directory;

pub use directory::InMemoryBoardDirectory;
