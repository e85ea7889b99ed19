//! Domain model for board tasks.
//!
//! Tasks carry their owning column and a dense order value. The domain keeps
//! value validation here and leaves placement arithmetic to the ordering
//! service.

mod error;
mod ids;
mod order;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use order::TaskOrder;
pub use task::{PersistedTaskData, Task};
