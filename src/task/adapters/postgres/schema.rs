//! Diesel schema for task persistence.

diesel::table! {
    /// Task records placed in board columns.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning column identifier.
        column_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Dense 1-based rank within the owning column.
        position -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
