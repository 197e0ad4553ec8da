use thiserror::Error;

use super::types::NotificationId;

/// Failures of the notification queue engine.
///
/// All of these are soft: operations on an in-memory queue return them to
/// the caller instead of panicking, and the engine's state is unchanged when
/// one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotificationError {
    #[error("No live notification for handle '{0}'.")]
    UnknownHandle(NotificationId),

    #[error("No live notification with coalesce key '{0}'.")]
    UnknownCoalesceKey(String),

    #[error("Invalid duration of {0} ms; durations must not be negative.")]
    InvalidDuration(i64),

    #[error("Notification message must not be empty.")]
    EmptyMessage,

    #[error("Action with key '{action_key}' not found for notification '{id}'.")]
    ActionNotFound {
        id: NotificationId,
        action_key: String,
    },
}
