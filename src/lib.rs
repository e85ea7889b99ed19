//! Taskboard: boards, columns and densely ordered tasks.
//!
//! Users group tasks into the ordered columns of named boards and move tasks
//! within or between columns. The core is the ordering engine, which keeps a
//! gap-free, unique, 1-based order of tasks within every column under create,
//! move and delete.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`board`]: Boards, columns and the board catalogue
//! - [`task`]: Tasks, the ordering engine and board-scoped task operations
//! - [`config`]: Storage configuration and connection pooling
//! - [`error`]: Service-level error taxonomy
//! - [`telemetry`]: Structured logging setup

pub mod board;
pub mod config;
pub mod error;
pub mod task;
pub mod telemetry;
