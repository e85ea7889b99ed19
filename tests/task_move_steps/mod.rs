//! Step definitions for task ordering scenarios.

pub mod then;
pub mod when;
pub mod world;
