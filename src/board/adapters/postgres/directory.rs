//! `PostgreSQL` directory implementation for boards and columns.

use super::{
    models::{BoardRow, ColumnRow, NewBoardRow},
    schema::{board_columns, boards},
};
use crate::board::{
    domain::{Board, BoardId, BoardName, Column, ColumnId, PersistedBoardData},
    ports::{BoardDirectory, BoardDirectoryError, BoardDirectoryResult},
};
use crate::config::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL`-backed board directory.
#[derive(Debug, Clone)]
pub struct PostgresBoardDirectory {
    pool: PgPool,
}

impl PostgresBoardDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardDirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardDirectoryError::persistence)?
    }
}

#[async_trait]
impl BoardDirectory for PostgresBoardDirectory {
    async fn store(&self, board: &Board) -> BoardDirectoryResult<()> {
        let board_id = board.id();
        let new_row = to_new_row(board);
        let column_rows = to_column_rows(board)?;

        self.run_blocking(move |connection| {
            connection
                .transaction::<(), DieselError, _>(|conn| {
                    diesel::insert_into(boards::table)
                        .values(&new_row)
                        .execute(conn)?;
                    diesel::insert_into(board_columns::table)
                        .values(&column_rows)
                        .execute(conn)?;
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some("boards_pkey") =>
                    {
                        BoardDirectoryError::DuplicateBoard(board_id)
                    }
                    _ => BoardDirectoryError::persistence(err),
                })
        })
        .await
    }

    async fn update(&self, board: &Board) -> BoardDirectoryResult<()> {
        let board_id = board.id();
        let name = board.name().as_str().to_owned();
        let updated_at = board.updated_at();

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(boards::table.find(board_id.into_inner()))
                .set((boards::name.eq(&name), boards::updated_at.eq(updated_at)))
                .execute(connection)
                .map_err(BoardDirectoryError::persistence)?;

            if updated_count == 0 {
                return Err(BoardDirectoryError::NotFound(board_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: BoardId) -> BoardDirectoryResult<()> {
        self.run_blocking(move |connection| {
            // Columns and their tasks are removed by `ON DELETE CASCADE`.
            let deleted_count = diesel::delete(boards::table.find(id.into_inner()))
                .execute(connection)
                .map_err(BoardDirectoryError::persistence)?;

            if deleted_count == 0 {
                return Err(BoardDirectoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: BoardId) -> BoardDirectoryResult<Option<Board>> {
        self.run_blocking(move |connection| {
            let row = boards::table
                .find(id.into_inner())
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()
                .map_err(BoardDirectoryError::persistence)?;
            let Some(board_row) = row else {
                return Ok(None);
            };

            let columns = board_columns::table
                .filter(board_columns::board_id.eq(board_row.id))
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)
                .map_err(BoardDirectoryError::persistence)?;
            row_to_board(board_row, columns).map(Some)
        })
        .await
    }

    async fn find_column(&self, id: ColumnId) -> BoardDirectoryResult<Option<Column>> {
        self.run_blocking(move |connection| {
            let row = board_columns::table
                .find(id.into_inner())
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()
                .map_err(BoardDirectoryError::persistence)?;
            row.map(row_to_column).transpose()
        })
        .await
    }

    async fn list(&self) -> BoardDirectoryResult<Vec<Board>> {
        self.run_blocking(move |connection| {
            let board_rows = boards::table
                .order((boards::created_at.asc(), boards::id.asc()))
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)
                .map_err(BoardDirectoryError::persistence)?;
            let board_ids: Vec<uuid::Uuid> = board_rows.iter().map(|row| row.id).collect();
            let column_rows = board_columns::table
                .filter(board_columns::board_id.eq_any(board_ids))
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)
                .map_err(BoardDirectoryError::persistence)?;

            let mut columns_by_board: HashMap<uuid::Uuid, Vec<ColumnRow>> = HashMap::new();
            for column_row in column_rows {
                columns_by_board
                    .entry(column_row.board_id)
                    .or_default()
                    .push(column_row);
            }

            board_rows
                .into_iter()
                .map(|board_row| {
                    let columns = columns_by_board.remove(&board_row.id).unwrap_or_default();
                    row_to_board(board_row, columns)
                })
                .collect()
        })
        .await
    }
}

fn to_new_row(board: &Board) -> NewBoardRow {
    NewBoardRow {
        id: board.id().into_inner(),
        name: board.name().as_str().to_owned(),
        created_at: board.created_at(),
        updated_at: board.updated_at(),
    }
}

fn to_column_rows(board: &Board) -> BoardDirectoryResult<Vec<ColumnRow>> {
    board
        .columns()
        .iter()
        .map(|column| {
            let position =
                i32::try_from(column.position()).map_err(BoardDirectoryError::persistence)?;
            Ok(ColumnRow {
                id: column.id().into_inner(),
                board_id: board.id().into_inner(),
                title: column.title().to_owned(),
                position,
            })
        })
        .collect()
}

fn row_to_column(row: ColumnRow) -> BoardDirectoryResult<Column> {
    let position = u32::try_from(row.position).map_err(BoardDirectoryError::persistence)?;
    Ok(Column::from_persisted(
        ColumnId::from_uuid(row.id),
        BoardId::from_uuid(row.board_id),
        row.title,
        position,
    ))
}

fn row_to_board(row: BoardRow, column_rows: Vec<ColumnRow>) -> BoardDirectoryResult<Board> {
    let BoardRow {
        id,
        name: persisted_name,
        created_at,
        updated_at,
    } = row;

    let name = BoardName::new(persisted_name).map_err(BoardDirectoryError::persistence)?;
    let columns = column_rows
        .into_iter()
        .map(row_to_column)
        .collect::<BoardDirectoryResult<Vec<_>>>()?;

    Ok(Board::from_persisted(PersistedBoardData {
        id: BoardId::from_uuid(id),
        name,
        columns,
        created_at,
        updated_at,
    }))
}
