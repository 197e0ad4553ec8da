use serde::{Deserialize, Serialize};

use super::types::{ActiveNotification, CloseReason, NotificationId};

/// Lifecycle events broadcast to renderers.
///
/// Every transition carries the full [`ActiveNotification`] snapshot so a
/// renderer never has to query the engine back. Rendering, icon selection,
/// and styling are entirely the subscriber's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationEvent {
    /// Accepted into the pending queue.
    Enqueued { notification: ActiveNotification },
    /// Promoted to the visible set; the renderer should draw it.
    Shown { notification: ActiveNotification },
    /// Updated in place while live; the renderer should re-run its
    /// transient highlight effect.
    Refreshed { notification: ActiveNotification },
    /// Left the live set. The handle is dead after this event.
    Closed {
        notification: ActiveNotification,
        reason: CloseReason,
    },
    /// A caller invoked one of the entry's actions.
    ActionInvoked {
        id: NotificationId,
        action_key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::types::{NotificationCategory, NotificationState};
    use chrono::Utc;

    #[test]
    fn closed_event_serde_round_trip() {
        let event = NotificationEvent::Closed {
            notification: ActiveNotification {
                id: NotificationId::new(),
                coalesce_key: None,
                message: "done".to_string(),
                category: NotificationCategory::Success,
                duration_ms: 2000,
                dismissible: true,
                actions: Vec::new(),
                created_at: Utc::now(),
                state: NotificationState::Removed,
                expiry_paused: false,
            },
            reason: CloseReason::Dismissed,
        };
        let serialized = serde_json::to_string(&event).unwrap();
        let deserialized: NotificationEvent = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, event);
    }
}
