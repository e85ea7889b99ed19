//! Pure placement arithmetic for the dense per-column ordering.
//!
//! The planner never touches storage. It turns a requested destination into
//! the final slot for the moved task and the ranges of neighbours that must
//! shift by one to keep every touched column equal to `{1..N}`.

use crate::board::domain::ColumnId;
use crate::error::{TaskBoardError, TaskBoardResult};
use crate::task::{
    domain::{Task, TaskOrder},
    ports::{OrderBound, OrderFilter},
};

/// A range of tasks in one column whose orders move by `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displacement {
    /// Column holding the affected tasks.
    pub column_id: ColumnId,
    /// Order range of the affected tasks.
    pub filter: OrderFilter,
    /// Signed slot adjustment, always `1` or `-1`.
    pub delta: i64,
}

impl Displacement {
    /// Tasks after `order` in `column_id` close the gap left behind.
    #[must_use]
    pub const fn close_gap(column_id: ColumnId, order: TaskOrder) -> Self {
        Self {
            column_id,
            filter: OrderFilter::greater_than(order),
            delta: -1,
        }
    }

    /// Tasks at or after `order` in `column_id` make room for an arrival.
    #[must_use]
    pub const fn open_gap(column_id: ColumnId, order: TaskOrder) -> Self {
        Self {
            column_id,
            filter: OrderFilter::at_least(order),
            delta: 1,
        }
    }
}

/// Outcome of planning a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    /// Column the task ends up in.
    pub destination: ColumnId,
    /// Slot the task ends up at.
    pub order: TaskOrder,
    /// Neighbour adjustments, applied before the task is written.
    pub displacements: Vec<Displacement>,
}

impl MovePlan {
    /// Returns `true` when the task already sits at the planned slot.
    #[must_use]
    pub fn is_noop(&self, task: &Task) -> bool {
        self.destination == task.column_id() && self.order == task.order()
    }
}

/// Plans moving `task` to `requested` within `destination`.
///
/// `destination_count` is the number of tasks currently in the destination
/// column, including `task` itself when the move stays in its column.
/// Positions below 1 clamp to the head. Positions above the tail clamp to it
/// as long as they are at most `destination_count + 1`.
///
/// # Errors
///
/// Returns [`TaskBoardError::InvalidPosition`] when `requested` exceeds
/// `destination_count + 1`.
pub fn plan_move(
    task: &Task,
    destination: ColumnId,
    requested: i64,
    destination_count: u64,
) -> TaskBoardResult<MovePlan> {
    let same_column = task.column_id() == destination;
    let max = TaskOrder::after_count(destination_count)?;
    if requested > max.value() {
        return Err(TaskBoardError::InvalidPosition {
            requested,
            max: max.value(),
        });
    }

    let tail = if same_column {
        TaskOrder::after_count(destination_count.saturating_sub(1))?
    } else {
        max
    };
    let order = TaskOrder::new(requested.clamp(TaskOrder::FIRST.value(), tail.value()))?;
    let current = task.order();

    let displacements = if !same_column {
        vec![
            Displacement::close_gap(task.column_id(), current),
            Displacement::open_gap(destination, order),
        ]
    } else if order > current {
        vec![Displacement {
            column_id: destination,
            filter: OrderFilter::Between {
                lower: OrderBound::Exclusive(current),
                upper: OrderBound::Inclusive(order),
            },
            delta: -1,
        }]
    } else if order < current {
        vec![Displacement {
            column_id: destination,
            filter: OrderFilter::Between {
                lower: OrderBound::Inclusive(order),
                upper: OrderBound::Exclusive(current),
            },
            delta: 1,
        }]
    } else {
        Vec::new()
    };

    Ok(MovePlan {
        destination,
        order,
        displacements,
    })
}
