//! Dense 1-based rank of a task within its column.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive order value of a task within its column.
///
/// For a column holding `N` tasks the orders are exactly `1..=N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TaskOrder(i64);

impl TaskOrder {
    /// The head slot of every column.
    pub const FIRST: Self = Self(1);

    /// Creates a validated order value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidOrder`] when the value is below 1.
    pub const fn new(value: i64) -> Result<Self, TaskDomainError> {
        if value < 1 {
            return Err(TaskDomainError::InvalidOrder(value));
        }
        Ok(Self(value))
    }

    /// Returns the slot directly after `count` occupied slots.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidOrder`] when `count` does not fit the
    /// persisted 64-bit range.
    pub fn after_count(count: u64) -> Result<Self, TaskDomainError> {
        let value = i64::try_from(count)
            .ok()
            .and_then(|current| current.checked_add(1))
            .ok_or(TaskDomainError::InvalidOrder(i64::MAX))?;
        Self::new(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns this order moved by `delta` slots.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidOrder`] when the result would fall
    /// below 1 or overflow.
    pub fn shifted(self, delta: i64) -> Result<Self, TaskDomainError> {
        let value = self
            .0
            .checked_add(delta)
            .ok_or(TaskDomainError::InvalidOrder(self.0))?;
        Self::new(value)
    }
}

impl TryFrom<i64> for TaskOrder {
    type Error = TaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskOrder> for i64 {
    fn from(order: TaskOrder) -> Self {
        order.0
    }
}

impl fmt::Display for TaskOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
