use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// --- Enums ---

/// Category of a notification, used by an external renderer to pick icon
/// and color. The engine itself never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationCategory {
    #[default]
    Info,
    Success,
    Error,
    Warning,
    Keyboard,
    Volume,
    Music,
    Navigation,
}

/// Lifecycle state of a queued notification. The engine is the sole mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationState {
    #[default]
    Pending,
    Visible,
    Expiring,
    Removed,
}

/// Why a notification left the visible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CloseReason {
    Expired,
    Dismissed,
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationAction {
    pub key: String,
    pub label: String,
}

/// Opaque handle to a live notification, returned by `submit` and accepted
/// by the other engine operations. Handles of removed entries are dead:
/// operations on them fail softly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A display request as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Optional identity key. A second request sharing the key while the
    /// first is still live updates it in place instead of queueing anew.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coalesce_key: Option<String>,
    pub message: String,
    #[serde(default)]
    pub category: NotificationCategory,
    /// Expiry duration in milliseconds. `None` takes the engine's
    /// configured default; `0` persists until explicitly dismissed;
    /// negative values are rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    /// Whether the renderer should offer a manual close control.
    #[serde(default = "default_dismissible")]
    pub dismissible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
}

fn default_dismissible() -> bool {
    true
}

impl NotificationRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            coalesce_key: None,
            message: message.into(),
            category: NotificationCategory::default(),
            duration_ms: None,
            dismissible: true,
            actions: Vec::new(),
        }
    }

    pub fn with_coalesce_key(mut self, key: impl Into<String>) -> Self {
        self.coalesce_key = Some(key.into());
        self
    }

    pub fn with_category(mut self, category: NotificationCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    pub fn with_action(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.actions.push(NotificationAction {
            key: key.into(),
            label: label.into(),
        });
        self
    }
}

/// Metadata replacements applied by `update`. `None` fields keep the live
/// entry's current value; the message is always replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOptions {
    pub category: Option<NotificationCategory>,
    pub duration_ms: Option<i64>,
    pub dismissible: Option<bool>,
    pub actions: Option<Vec<NotificationAction>>,
}

/// Snapshot of a notification tracked by the engine, as carried by
/// lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveNotification {
    pub id: NotificationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coalesce_key: Option<String>,
    pub message: String,
    pub category: NotificationCategory,
    /// Validated non-negative; 0 means "persist until dismissed".
    pub duration_ms: i64,
    pub dismissible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
    /// Assigned at enqueue time; never changed by update-in-place.
    pub created_at: DateTime<Utc>,
    pub state: NotificationState,
    pub expiry_paused: bool,
}

impl ActiveNotification {
    /// A sticky notification has no expiry timer and stays visible until
    /// dismissed.
    pub fn is_sticky(&self) -> bool {
        self.duration_ms == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct QueueStats {
    pub num_visible: usize,
    pub num_pending: usize,
}
