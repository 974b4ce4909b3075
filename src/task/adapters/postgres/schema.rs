//! Diesel schema for task storage.

diesel::table! {
    /// Users referenced as task authors and assignees.
    users (id) {
        /// User identifier.
        id -> Int4,
        /// Display name.
        name -> Text,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Storage-assigned task identifier.
        id -> Int4,
        /// Opening time in epoch seconds.
        opened -> Int8,
        /// Closing time in epoch seconds, `0` while open.
        closed -> Int8,
        /// Task title.
        title -> Text,
        /// Task body.
        content -> Text,
        /// Author user identifier.
        author_id -> Int4,
        /// Assignee user identifier.
        assigned_id -> Int4,
    }
}

diesel::table! {
    /// Label names used as tags.
    labels (id) {
        /// Label identifier.
        id -> Int4,
        /// Label name.
        name -> Text,
    }
}

diesel::table! {
    /// Task-to-label associations.
    tasks_labels (task_id, label_id) {
        /// Tagged task.
        task_id -> Int4,
        /// Applied label.
        label_id -> Int4,
    }
}

diesel::joinable!(tasks_labels -> tasks (task_id));
diesel::joinable!(tasks_labels -> labels (label_id));

diesel::allow_tables_to_appear_in_same_query!(users, tasks, labels, tasks_labels);
