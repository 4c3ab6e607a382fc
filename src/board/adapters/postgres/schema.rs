//! Diesel schema for board and section persistence.

diesel::table! {
    /// Boards ordered within their owner's sidebar.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Board title.
        title -> Text,
        /// Board description.
        description -> Text,
        /// Board icon.
        #[max_length = 32]
        icon -> Varchar,
        /// Favourite flag.
        favourite -> Bool,
        /// Dense position among the owner's boards.
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Sections ordered within their board.
    sections (id) {
        /// Section identifier.
        id -> Uuid,
        /// Parent board.
        board_id -> Uuid,
        /// Section title.
        title -> Text,
        /// Dense position among the board's sections.
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
