//! The notification queue engine.
//!
//! Serializes concurrent display requests into a bounded set of visible
//! slots (one by default), coalesces requests sharing an identity key into
//! a single live entry, and expires visible entries on engine-owned timers.
//! Renderers subscribe to lifecycle events; the engine itself draws
//! nothing and persists nothing.

pub mod errors;
pub mod events;
pub mod service;
pub mod types;

pub use errors::NotificationError;
pub use events::NotificationEvent;
pub use service::{NotificationService, QueueEngine};
pub use types::{
    ActiveNotification, CloseReason, NotificationAction, NotificationCategory, NotificationId,
    NotificationRequest, NotificationState, QueueStats, UpdateOptions,
};
