//! Diesel schema for board and column persistence.

diesel::table! {
    /// Board records.
    boards (id) {
        /// Internal board identifier.
        id -> Uuid,
        /// Board display name.
        #[max_length = 255]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Column records owned by boards.
    board_columns (id) {
        /// Internal column identifier.
        id -> Uuid,
        /// Owning board identifier.
        board_id -> Uuid,
        /// Column title.
        #[max_length = 100]
        title -> Varchar,
        /// 1-based display position within the board.
        position -> Int4,
    }
}

diesel::joinable!(board_columns -> boards (board_id));
diesel::allow_tables_to_appear_in_same_query!(boards, board_columns);
