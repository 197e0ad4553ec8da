//! # Murmur Domain Library (`murmur-domain`)
//!
//! Domain layer of the Murmur notification engine. Its single service is
//! the [`notifications`] module: an identity-coalescing, FIFO notification
//! queue with engine-owned expiry timers and a broadcast event stream as
//! its renderer port.
//!
//! ```rust,ignore
//! use murmur_core::config::NotificationConfig;
//! use murmur_domain::notifications::{
//!     NotificationRequest, NotificationService, QueueEngine,
//! };
//!
//! let engine = QueueEngine::new(NotificationConfig::default());
//! let mut events = engine.subscribe();
//! let handle = engine
//!     .submit(NotificationRequest::new("Volume: 50%").with_coalesce_key("vol"))
//!     .await?;
//! ```

pub mod notifications;

pub use notifications::{NotificationError, NotificationEvent, NotificationService, QueueEngine};
