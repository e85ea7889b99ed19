//! Board aggregate root and its fixed column layout.

use super::{BoardId, BoardName, ColumnId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Column titles created for every new board, in display order.
pub const DEFAULT_COLUMN_TITLES: [&str; 3] = ["To Do", "In Progress", "Done"];

/// A named, ordered bucket of tasks within a board.
///
/// Columns are created together with their board and are immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    board_id: BoardId,
    title: String,
    position: u32,
}

impl Column {
    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: ColumnId,
        board_id: BoardId,
        title: impl Into<String>,
        position: u32,
    ) -> Self {
        Self {
            id,
            board_id,
            title: title.into(),
            position,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the owning board identifier.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the column title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the 1-based display position of the column within its board.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }
}

/// Board aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    name: BoardName,
    columns: Vec<Column>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted board name.
    pub name: BoardName,
    /// Persisted columns in any order.
    pub columns: Vec<Column>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Creates a new board with the default "To Do", "In Progress" and
    /// "Done" columns.
    #[must_use]
    pub fn new(name: BoardName, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let id = BoardId::new();
        let columns = (1_u32..)
            .zip(DEFAULT_COLUMN_TITLES)
            .map(|(position, title)| Column::from_persisted(ColumnId::new(), id, title, position))
            .collect();

        Self {
            id,
            name,
            columns,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a board from persisted storage.
    ///
    /// Columns are sorted by their display position.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        let mut columns = data.columns;
        columns.sort_by_key(Column::position);
        Self {
            id: data.id,
            name: data.name,
            columns,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the board name.
    #[must_use]
    pub const fn name(&self) -> &BoardName {
        &self.name
    }

    /// Returns the board columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column with the given identifier, if it belongs to this
    /// board.
    #[must_use]
    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id() == column_id)
    }

    /// Returns `true` when the column belongs to this board.
    #[must_use]
    pub fn has_column(&self, column_id: ColumnId) -> bool {
        self.column(column_id).is_some()
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

    /// Renames the board.
    pub fn rename(&mut self, name: BoardName, clock: &impl Clock) {
        self.name = name;
        self.updated_at = clock.utc();
    }
}
