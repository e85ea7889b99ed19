//! Task aggregate root.

use super::{TaskDomainError, TaskId, TaskOrder, TaskTitle};
use crate::board::domain::ColumnId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// A task lives in exactly one column at one order slot. Placement changes go
/// through the ordering service so that the column stays dense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    column_id: ColumnId,
    title: TaskTitle,
    description: Option<String>,
    order: TaskOrder,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning column.
    pub column_id: ColumnId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted order within the column.
    pub order: TaskOrder,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task placed at `order` in `column_id`.
    #[must_use]
    pub fn new(
        column_id: ColumnId,
        title: TaskTitle,
        description: Option<String>,
        order: TaskOrder,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            column_id,
            title,
            description: normalize_description(description),
            order,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            column_id: data.column_id,
            title: data.title,
            description: data.description,
            order: data.order,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the order within the owning column.
    #[must_use]
    pub const fn order(&self) -> TaskOrder {
        self.order
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: TaskTitle, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Replaces the description. Blank descriptions clear it.
    pub fn describe(&mut self, description: Option<String>, clock: &impl Clock) {
        self.description = normalize_description(description);
        self.touch(clock);
    }

    /// Places the task at `order` in `column_id`.
    pub fn place(&mut self, column_id: ColumnId, order: TaskOrder, clock: &impl Clock) {
        self.column_id = column_id;
        self.order = order;
        self.touch(clock);
    }

    /// Moves the task by `delta` slots within its column.
    ///
    /// Neighbour shifts are bookkeeping and leave `updated_at` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidOrder`] when the shifted order would
    /// fall below 1.
    pub fn shift_order(&mut self, delta: i64) -> Result<(), TaskDomainError> {
        self.order = self.order.shifted(delta)?;
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}
