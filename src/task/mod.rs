//! Task placement for the board.
//!
//! Tasks sit in exactly one column at a dense, 1-based order. Creating,
//! moving and deleting tasks keeps every touched column equal to `{1..N}`.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
