//! Diesel schema for task persistence.

diesel::table! {
    /// Tasks ordered within their section.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Parent section.
        section_id -> Uuid,
        /// Task title.
        title -> Text,
        /// Rich-text content.
        content -> Text,
        /// Dense position among the section's tasks.
        position -> Int4,
        /// Optional assignee.
        assignee_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
