use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use murmur_core::config::NotificationConfig;

use super::errors::NotificationError;
use super::events::NotificationEvent;
use super::types::{
    ActiveNotification, CloseReason, NotificationId, NotificationRequest, NotificationState,
    QueueStats, UpdateOptions,
};

// --- NotificationService Trait ---

/// The notification queue engine's inbound interface.
///
/// Callers submit display requests and manage live entries through the
/// handles returned by [`submit`](NotificationService::submit). Renderers
/// observe the queue through [`subscribe`](NotificationService::subscribe);
/// the engine performs no rendering itself.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Enqueues a display request and returns its handle.
    ///
    /// A request whose `coalesce_key` matches a live (pending or visible)
    /// entry updates that entry in place and returns the existing handle;
    /// otherwise the request joins the pending queue in arrival order. When
    /// a visible slot is free the entry is promoted immediately.
    async fn submit(
        &self,
        request: NotificationRequest,
    ) -> Result<NotificationId, NotificationError>;

    /// Replaces message and metadata on the live entry with the given
    /// coalesce key.
    ///
    /// A visible entry gets its expiry timer re-armed to the (possibly
    /// updated) duration; a pending entry keeps its queue slot. The entry's
    /// `created_at` is never changed.
    async fn update(
        &self,
        coalesce_key: &str,
        message: String,
        opts: UpdateOptions,
    ) -> Result<NotificationId, NotificationError>;

    /// Forces a live entry out immediately, bypassing its timer.
    async fn dismiss(&self, id: NotificationId) -> Result<(), NotificationError>;

    /// Suspends the expiry countdown of a live entry. Idempotent.
    async fn pause_expiry(&self, id: NotificationId) -> Result<(), NotificationError>;

    /// Restarts the expiry countdown of a live entry with its full nominal
    /// duration. Idempotent.
    async fn resume_expiry(&self, id: NotificationId) -> Result<(), NotificationError>;

    /// Closes every pending and visible entry, returning how many were
    /// closed.
    async fn clear_all(&self) -> Result<usize, NotificationError>;

    /// Reports an action invocation on a live entry and dismisses it.
    async fn invoke_action(
        &self,
        id: NotificationId,
        action_key: &str,
    ) -> Result<(), NotificationError>;

    /// Snapshot of a live entry; `None` once it has been removed.
    async fn get_notification(&self, id: NotificationId) -> Option<ActiveNotification>;

    async fn stats(&self) -> QueueStats;

    fn subscribe(&self) -> broadcast::Receiver<NotificationEvent>;
}

// --- QueueEngine Implementation ---

struct Entry {
    snapshot: ActiveNotification,
    /// Bumped on every change that invalidates an armed expiry timer.
    /// A timer callback only acts when its recorded epoch still matches.
    epoch: u64,
}

#[derive(Default)]
struct QueueState {
    visible: Vec<Entry>,
    pending: VecDeque<Entry>,
}

impl QueueState {
    fn live_entry_mut(&mut self, id: NotificationId) -> Option<&mut Entry> {
        self.visible
            .iter_mut()
            .chain(self.pending.iter_mut())
            .find(|e| e.snapshot.id == id)
    }

    fn live_entry(&self, id: NotificationId) -> Option<&Entry> {
        self.visible
            .iter()
            .chain(self.pending.iter())
            .find(|e| e.snapshot.id == id)
    }

    fn has_live_key(&self, key: &str) -> bool {
        self.visible
            .iter()
            .chain(self.pending.iter())
            .any(|e| e.snapshot.coalesce_key.as_deref() == Some(key))
    }
}

struct EngineInner {
    config: NotificationConfig,
    state: RwLock<QueueState>,
    events: broadcast::Sender<NotificationEvent>,
}

impl EngineInner {
    fn publish(&self, event: NotificationEvent) {
        // A send error only means no renderer is subscribed right now.
        let _ = self.events.send(event);
    }

    fn resolve_duration(&self, requested: Option<i64>) -> Result<i64, NotificationError> {
        match requested {
            Some(duration_ms) if duration_ms < 0 => {
                Err(NotificationError::InvalidDuration(duration_ms))
            }
            Some(duration_ms) => Ok(duration_ms),
            None => Ok(self.config.default_duration_ms),
        }
    }
}

/// Promotes pending entries into free visible slots and arms their expiry
/// timers. Entries with a zero duration or a paused countdown get no timer.
fn process_queue(inner: &Arc<EngineInner>, state: &mut QueueState) {
    while state.visible.len() < inner.config.max_visible {
        let Some(mut entry) = state.pending.pop_front() else {
            break;
        };
        entry.snapshot.state = NotificationState::Visible;
        debug!(id = %entry.snapshot.id, "notification shown");
        inner.publish(NotificationEvent::Shown {
            notification: entry.snapshot.clone(),
        });
        if entry.snapshot.duration_ms > 0 && !entry.snapshot.expiry_paused {
            arm_expiry(inner, entry.snapshot.id, entry.epoch, entry.snapshot.duration_ms);
        }
        state.visible.push(entry);
    }
    if state.visible.is_empty() && state.pending.is_empty() {
        debug!("notification queue drained");
    }
}

/// Arms the expiry timer of a visible entry.
///
/// The timer task re-checks the entry's epoch under the state lock before
/// acting, so dismissal, update, pause, and resume invalidate it by bumping
/// the epoch (or removing the entry) before the callback can observe stale
/// state.
fn arm_expiry(inner: &Arc<EngineInner>, id: NotificationId, epoch: u64, duration_ms: i64) {
    let inner = Arc::clone(inner);
    tokio::spawn(async move {
        // duration_ms is validated non-negative before an entry is stored.
        tokio::time::sleep(Duration::from_millis(duration_ms as u64)).await;
        let mut state = inner.state.write().await;
        let Some(pos) = state
            .visible
            .iter()
            .position(|e| e.snapshot.id == id && e.epoch == epoch)
        else {
            return;
        };
        let mut entry = state.visible.remove(pos);
        entry.snapshot.state = NotificationState::Expiring;
        debug!(%id, "notification expired");
        inner.publish(NotificationEvent::Closed {
            notification: entry.snapshot,
            reason: CloseReason::Expired,
        });
        process_queue(&inner, &mut state);
    });
}

fn apply_update(entry: &mut Entry, message: String, opts: &UpdateOptions) {
    entry.snapshot.message = message;
    if let Some(category) = opts.category {
        entry.snapshot.category = category;
    }
    if let Some(duration_ms) = opts.duration_ms {
        entry.snapshot.duration_ms = duration_ms;
    }
    if let Some(dismissible) = opts.dismissible {
        entry.snapshot.dismissible = dismissible;
    }
    if let Some(actions) = &opts.actions {
        entry.snapshot.actions = actions.clone();
    }
    // created_at, state, and queue position stay as they are.
}

/// Update-in-place on the live entry with the given coalesce key.
fn update_live(
    inner: &Arc<EngineInner>,
    state: &mut QueueState,
    key: &str,
    message: String,
    opts: UpdateOptions,
) -> Result<NotificationId, NotificationError> {
    if let Some(duration_ms) = opts.duration_ms {
        if duration_ms < 0 {
            return Err(NotificationError::InvalidDuration(duration_ms));
        }
    }
    if message.trim().is_empty() {
        return Err(NotificationError::EmptyMessage);
    }

    if let Some(entry) = state
        .visible
        .iter_mut()
        .find(|e| e.snapshot.coalesce_key.as_deref() == Some(key))
    {
        apply_update(entry, message, &opts);
        entry.epoch += 1;
        let id = entry.snapshot.id;
        let epoch = entry.epoch;
        let duration_ms = entry.snapshot.duration_ms;
        let re_arm = duration_ms > 0 && !entry.snapshot.expiry_paused;
        debug!(%id, key, "visible notification updated in place");
        inner.publish(NotificationEvent::Refreshed {
            notification: entry.snapshot.clone(),
        });
        if re_arm {
            arm_expiry(inner, id, epoch, duration_ms);
        }
        return Ok(id);
    }

    if let Some(entry) = state
        .pending
        .iter_mut()
        .find(|e| e.snapshot.coalesce_key.as_deref() == Some(key))
    {
        apply_update(entry, message, &opts);
        let id = entry.snapshot.id;
        debug!(%id, key, "pending notification updated in its queue slot");
        inner.publish(NotificationEvent::Refreshed {
            notification: entry.snapshot.clone(),
        });
        return Ok(id);
    }

    Err(NotificationError::UnknownCoalesceKey(key.to_string()))
}

/// Removes a live entry and, when a visible slot was freed, advances the
/// queue.
fn remove_live(
    inner: &Arc<EngineInner>,
    state: &mut QueueState,
    id: NotificationId,
    reason: CloseReason,
) -> Result<(), NotificationError> {
    if let Some(pos) = state.visible.iter().position(|e| e.snapshot.id == id) {
        let mut entry = state.visible.remove(pos);
        entry.snapshot.state = NotificationState::Removed;
        inner.publish(NotificationEvent::Closed {
            notification: entry.snapshot,
            reason,
        });
        process_queue(inner, state);
        return Ok(());
    }
    if let Some(pos) = state.pending.iter().position(|e| e.snapshot.id == id) {
        if let Some(mut entry) = state.pending.remove(pos) {
            entry.snapshot.state = NotificationState::Removed;
            inner.publish(NotificationEvent::Closed {
                notification: entry.snapshot,
                reason,
            });
        }
        return Ok(());
    }
    Err(NotificationError::UnknownHandle(id))
}

/// Default [`NotificationService`] implementation: a single-mutator queue
/// behind one lock, with `tokio::time`-backed expiry timers owned
/// exclusively by the engine.
#[derive(Clone)]
pub struct QueueEngine {
    inner: Arc<EngineInner>,
}

impl QueueEngine {
    pub fn new(config: NotificationConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            inner: Arc::new(EngineInner {
                config,
                state: RwLock::new(QueueState::default()),
                events,
            }),
        }
    }
}

impl Default for QueueEngine {
    fn default() -> Self {
        Self::new(NotificationConfig::default())
    }
}

#[async_trait]
impl NotificationService for QueueEngine {
    async fn submit(
        &self,
        request: NotificationRequest,
    ) -> Result<NotificationId, NotificationError> {
        let duration_ms = self.inner.resolve_duration(request.duration_ms)?;
        if request.message.trim().is_empty() {
            return Err(NotificationError::EmptyMessage);
        }

        let mut state = self.inner.state.write().await;

        if let Some(key) = request.coalesce_key.as_deref() {
            if state.has_live_key(key) {
                let opts = UpdateOptions {
                    category: Some(request.category),
                    duration_ms: Some(duration_ms),
                    dismissible: Some(request.dismissible),
                    actions: Some(request.actions.clone()),
                };
                return update_live(&self.inner, &mut state, key, request.message, opts);
            }
        }

        let snapshot = ActiveNotification {
            id: NotificationId::new(),
            coalesce_key: request.coalesce_key,
            message: request.message,
            category: request.category,
            duration_ms,
            dismissible: request.dismissible,
            actions: request.actions,
            created_at: Utc::now(),
            state: NotificationState::Pending,
            expiry_paused: false,
        };
        let id = snapshot.id;
        info!(%id, category = ?snapshot.category, "notification submitted");
        self.inner.publish(NotificationEvent::Enqueued {
            notification: snapshot.clone(),
        });
        state.pending.push_back(Entry { snapshot, epoch: 0 });
        process_queue(&self.inner, &mut state);
        Ok(id)
    }

    async fn update(
        &self,
        coalesce_key: &str,
        message: String,
        opts: UpdateOptions,
    ) -> Result<NotificationId, NotificationError> {
        let mut state = self.inner.state.write().await;
        update_live(&self.inner, &mut state, coalesce_key, message, opts)
    }

    async fn dismiss(&self, id: NotificationId) -> Result<(), NotificationError> {
        let mut state = self.inner.state.write().await;
        remove_live(&self.inner, &mut state, id, CloseReason::Dismissed)?;
        info!(%id, "notification dismissed");
        Ok(())
    }

    async fn pause_expiry(&self, id: NotificationId) -> Result<(), NotificationError> {
        let mut state = self.inner.state.write().await;
        let entry = state
            .live_entry_mut(id)
            .ok_or(NotificationError::UnknownHandle(id))?;
        if entry.snapshot.expiry_paused {
            return Ok(());
        }
        entry.snapshot.expiry_paused = true;
        entry.epoch += 1;
        debug!(%id, "expiry paused");
        Ok(())
    }

    async fn resume_expiry(&self, id: NotificationId) -> Result<(), NotificationError> {
        let mut state = self.inner.state.write().await;
        let entry = state
            .live_entry_mut(id)
            .ok_or(NotificationError::UnknownHandle(id))?;
        if !entry.snapshot.expiry_paused {
            return Ok(());
        }
        entry.snapshot.expiry_paused = false;
        entry.epoch += 1;
        let epoch = entry.epoch;
        let duration_ms = entry.snapshot.duration_ms;
        let re_arm = entry.snapshot.state == NotificationState::Visible && duration_ms > 0;
        debug!(%id, "expiry resumed");
        if re_arm {
            arm_expiry(&self.inner, id, epoch, duration_ms);
        }
        Ok(())
    }

    async fn clear_all(&self) -> Result<usize, NotificationError> {
        let mut state = self.inner.state.write().await;
        let mut closed = 0;
        for mut entry in state.visible.drain(..) {
            entry.snapshot.state = NotificationState::Removed;
            self.inner.publish(NotificationEvent::Closed {
                notification: entry.snapshot,
                reason: CloseReason::Cleared,
            });
            closed += 1;
        }
        for mut entry in state.pending.drain(..) {
            entry.snapshot.state = NotificationState::Removed;
            self.inner.publish(NotificationEvent::Closed {
                notification: entry.snapshot,
                reason: CloseReason::Cleared,
            });
            closed += 1;
        }
        info!(count = closed, "cleared all notifications");
        Ok(closed)
    }

    async fn invoke_action(
        &self,
        id: NotificationId,
        action_key: &str,
    ) -> Result<(), NotificationError> {
        let mut state = self.inner.state.write().await;
        let entry = state
            .live_entry(id)
            .ok_or(NotificationError::UnknownHandle(id))?;
        if !entry.snapshot.actions.iter().any(|a| a.key == action_key) {
            return Err(NotificationError::ActionNotFound {
                id,
                action_key: action_key.to_string(),
            });
        }
        info!(%id, action_key, "notification action invoked");
        self.inner.publish(NotificationEvent::ActionInvoked {
            id,
            action_key: action_key.to_string(),
        });
        remove_live(&self.inner, &mut state, id, CloseReason::Dismissed)
    }

    async fn get_notification(&self, id: NotificationId) -> Option<ActiveNotification> {
        self.inner
            .state
            .read()
            .await
            .live_entry(id)
            .map(|e| e.snapshot.clone())
    }

    async fn stats(&self) -> QueueStats {
        let state = self.inner.state.read().await;
        QueueStats {
            num_visible: state.visible.len(),
            num_pending: state.pending.len(),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.inner.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::types::NotificationCategory;
    use tokio::sync::broadcast::error::TryRecvError;

    fn engine() -> QueueEngine {
        QueueEngine::default()
    }

    /// A request that never expires on its own, so queue advancement in
    /// these tests is driven purely by explicit dismissal.
    fn sticky(message: &str) -> NotificationRequest {
        NotificationRequest::new(message).with_duration_ms(0)
    }

    fn try_next(rx: &mut broadcast::Receiver<NotificationEvent>) -> Option<NotificationEvent> {
        match rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(err) => panic!("event channel broken: {:?}", err),
        }
    }

    fn expect_shown(rx: &mut broadcast::Receiver<NotificationEvent>) -> ActiveNotification {
        match try_next(rx) {
            Some(NotificationEvent::Shown { notification }) => notification,
            other => panic!("expected Shown, got {:?}", other),
        }
    }

    fn expect_enqueued(rx: &mut broadcast::Receiver<NotificationEvent>) -> ActiveNotification {
        match try_next(rx) {
            Some(NotificationEvent::Enqueued { notification }) => notification,
            other => panic!("expected Enqueued, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn submit_rejects_negative_duration() {
        let service = engine();
        let result = service
            .submit(NotificationRequest::new("oops").with_duration_ms(-200))
            .await;
        assert_eq!(result, Err(NotificationError::InvalidDuration(-200)));
        assert_eq!(service.stats().await, QueueStats::default());
    }

    #[tokio::test]
    async fn submit_rejects_blank_message() {
        let service = engine();
        let result = service.submit(NotificationRequest::new("   ")).await;
        assert_eq!(result, Err(NotificationError::EmptyMessage));
        assert_eq!(service.stats().await, QueueStats::default());
    }

    #[tokio::test]
    async fn first_submit_is_promoted_immediately() {
        let service = engine();
        let mut rx = service.subscribe();
        let id = service.submit(sticky("hello")).await.unwrap();

        let enqueued = expect_enqueued(&mut rx);
        assert_eq!(enqueued.id, id);
        assert_eq!(enqueued.state, NotificationState::Pending);

        let shown = expect_shown(&mut rx);
        assert_eq!(shown.id, id);
        assert_eq!(shown.state, NotificationState::Visible);

        assert_eq!(
            service.stats().await,
            QueueStats {
                num_visible: 1,
                num_pending: 0
            }
        );
    }

    #[tokio::test]
    async fn excess_submissions_wait_in_fifo_order() {
        let service = engine();
        let mut rx = service.subscribe();
        let a = service.submit(sticky("a")).await.unwrap();
        let b = service.submit(sticky("b")).await.unwrap();
        let c = service.submit(sticky("c")).await.unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(
            service.stats().await,
            QueueStats {
                num_visible: 1,
                num_pending: 2
            }
        );

        assert_eq!(expect_enqueued(&mut rx).id, a);
        assert_eq!(expect_shown(&mut rx).id, a);

        service.dismiss(a).await.unwrap();
        // Enqueued(b), Enqueued(c), Closed(a), Shown(b)
        let mut shown_after_a = Vec::new();
        while let Some(event) = try_next(&mut rx) {
            if let NotificationEvent::Shown { notification } = event {
                shown_after_a.push(notification.id);
            }
        }
        assert_eq!(shown_after_a, vec![b]);

        service.dismiss(b).await.unwrap();
        let shown = loop {
            match try_next(&mut rx) {
                Some(NotificationEvent::Shown { notification }) => break notification,
                Some(_) => continue,
                None => panic!("expected c to be shown"),
            }
        };
        assert_eq!(shown.id, c);
    }

    #[tokio::test]
    async fn multiple_slots_promote_up_to_configured_limit() {
        let config = NotificationConfig {
            max_visible: 2,
            ..NotificationConfig::default()
        };
        let service = QueueEngine::new(config);
        service.submit(sticky("a")).await.unwrap();
        service.submit(sticky("b")).await.unwrap();
        service.submit(sticky("c")).await.unwrap();
        assert_eq!(
            service.stats().await,
            QueueStats {
                num_visible: 2,
                num_pending: 1
            }
        );
    }

    #[tokio::test]
    async fn coalescing_submit_returns_existing_handle() {
        let service = engine();
        let mut rx = service.subscribe();
        let first = service
            .submit(sticky("Volume: 50%").with_coalesce_key("vol"))
            .await
            .unwrap();
        let second = service
            .submit(sticky("Volume: 60%").with_coalesce_key("vol"))
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(
            service.stats().await,
            QueueStats {
                num_visible: 1,
                num_pending: 0
            }
        );

        let snapshot = service.get_notification(first).await.unwrap();
        assert_eq!(snapshot.message, "Volume: 60%");

        // Enqueued, Shown, then Refreshed for the coalesced submission.
        expect_enqueued(&mut rx);
        expect_shown(&mut rx);
        match try_next(&mut rx) {
            Some(NotificationEvent::Refreshed { notification }) => {
                assert_eq!(notification.message, "Volume: 60%");
                assert_eq!(notification.state, NotificationState::Visible);
            }
            other => panic!("expected Refreshed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn coalescing_keeps_pending_queue_slot() {
        let service = engine();
        service.submit(sticky("blocker")).await.unwrap();
        let queued = service
            .submit(sticky("Track 1").with_coalesce_key("track"))
            .await
            .unwrap();
        service.submit(sticky("tail")).await.unwrap();

        let coalesced = service
            .submit(sticky("Track 2").with_coalesce_key("track"))
            .await
            .unwrap();
        assert_eq!(queued, coalesced);
        assert_eq!(
            service.stats().await,
            QueueStats {
                num_visible: 1,
                num_pending: 2
            }
        );
        let snapshot = service.get_notification(queued).await.unwrap();
        assert_eq!(snapshot.message, "Track 2");
        assert_eq!(snapshot.state, NotificationState::Pending);
    }

    #[tokio::test]
    async fn update_preserves_created_at() {
        let service = engine();
        let id = service
            .submit(sticky("Volume: 50%").with_coalesce_key("vol"))
            .await
            .unwrap();
        let before = service.get_notification(id).await.unwrap();

        service
            .update("vol", "Volume: 70%".to_string(), UpdateOptions::default())
            .await
            .unwrap();
        let after = service.get_notification(id).await.unwrap();
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.message, "Volume: 70%");
    }

    #[tokio::test]
    async fn update_unknown_key_fails_soft() {
        let service = engine();
        let result = service
            .update("ghost", "boo".to_string(), UpdateOptions::default())
            .await;
        assert_eq!(
            result,
            Err(NotificationError::UnknownCoalesceKey("ghost".to_string()))
        );
        assert_eq!(service.stats().await, QueueStats::default());
    }

    #[tokio::test]
    async fn update_rejects_negative_duration() {
        let service = engine();
        service
            .submit(sticky("x").with_coalesce_key("k"))
            .await
            .unwrap();
        let opts = UpdateOptions {
            duration_ms: Some(-1),
            ..UpdateOptions::default()
        };
        let result = service.update("k", "y".to_string(), opts).await;
        assert_eq!(result, Err(NotificationError::InvalidDuration(-1)));
    }

    #[tokio::test]
    async fn dismiss_unknown_handle_fails_soft() {
        let service = engine();
        let id = service.submit(sticky("bye")).await.unwrap();
        service.dismiss(id).await.unwrap();

        // The handle is dead; every further operation is a soft failure.
        assert_eq!(
            service.dismiss(id).await,
            Err(NotificationError::UnknownHandle(id))
        );
        assert_eq!(
            service.pause_expiry(id).await,
            Err(NotificationError::UnknownHandle(id))
        );
        assert_eq!(
            service.resume_expiry(id).await,
            Err(NotificationError::UnknownHandle(id))
        );
        assert_eq!(service.get_notification(id).await, None);
    }

    #[tokio::test]
    async fn dismiss_pending_entry_does_not_disturb_visible() {
        let service = engine();
        let visible = service.submit(sticky("front")).await.unwrap();
        let queued = service.submit(sticky("waiting")).await.unwrap();

        service.dismiss(queued).await.unwrap();
        assert_eq!(
            service.stats().await,
            QueueStats {
                num_visible: 1,
                num_pending: 0
            }
        );
        assert!(service.get_notification(visible).await.is_some());
    }

    #[tokio::test]
    async fn removed_coalesce_key_starts_fresh() {
        let service = engine();
        let first = service
            .submit(sticky("Volume: 50%").with_coalesce_key("vol"))
            .await
            .unwrap();
        service.dismiss(first).await.unwrap();

        let second = service
            .submit(sticky("Volume: 60%").with_coalesce_key("vol"))
            .await
            .unwrap();
        assert_ne!(first, second);
        assert!(service.get_notification(second).await.is_some());
    }

    #[tokio::test]
    async fn pause_and_resume_are_idempotent() {
        let service = engine();
        let id = service.submit(sticky("hover me")).await.unwrap();

        service.pause_expiry(id).await.unwrap();
        service.pause_expiry(id).await.unwrap();
        let snapshot = service.get_notification(id).await.unwrap();
        assert!(snapshot.expiry_paused);

        service.resume_expiry(id).await.unwrap();
        service.resume_expiry(id).await.unwrap();
        let snapshot = service.get_notification(id).await.unwrap();
        assert!(!snapshot.expiry_paused);
    }

    #[tokio::test]
    async fn clear_all_closes_visible_and_pending() {
        let service = engine();
        let mut rx = service.subscribe();
        service.submit(sticky("a")).await.unwrap();
        service.submit(sticky("b")).await.unwrap();
        service.submit(sticky("c")).await.unwrap();

        let closed = service.clear_all().await.unwrap();
        assert_eq!(closed, 3);
        assert_eq!(service.stats().await, QueueStats::default());

        let mut cleared = 0;
        while let Some(event) = try_next(&mut rx) {
            if let NotificationEvent::Closed { reason, notification } = event {
                assert_eq!(reason, CloseReason::Cleared);
                assert_eq!(notification.state, NotificationState::Removed);
                cleared += 1;
            }
        }
        assert_eq!(cleared, 3);
    }

    #[tokio::test]
    async fn invoke_action_reports_then_dismisses() {
        let service = engine();
        let mut rx = service.subscribe();
        let id = service
            .submit(sticky("Track ready").with_action("play", "Play now"))
            .await
            .unwrap();

        service.invoke_action(id, "play").await.unwrap();
        assert_eq!(service.get_notification(id).await, None);

        expect_enqueued(&mut rx);
        expect_shown(&mut rx);
        match try_next(&mut rx) {
            Some(NotificationEvent::ActionInvoked { id: event_id, action_key }) => {
                assert_eq!(event_id, id);
                assert_eq!(action_key, "play");
            }
            other => panic!("expected ActionInvoked, got {:?}", other),
        }
        match try_next(&mut rx) {
            Some(NotificationEvent::Closed { reason, .. }) => {
                assert_eq!(reason, CloseReason::Dismissed);
            }
            other => panic!("expected Closed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invoke_unknown_action_fails_soft() {
        let service = engine();
        let id = service
            .submit(sticky("Track ready").with_action("play", "Play now"))
            .await
            .unwrap();
        let result = service.invoke_action(id, "pause").await;
        assert_eq!(
            result,
            Err(NotificationError::ActionNotFound {
                id,
                action_key: "pause".to_string()
            })
        );
        assert!(service.get_notification(id).await.is_some());
    }

    #[tokio::test]
    async fn snapshots_reflect_queue_position() {
        let service = engine();
        let front = service
            .submit(sticky("front").with_category(NotificationCategory::Music))
            .await
            .unwrap();
        let waiting = service.submit(sticky("waiting")).await.unwrap();

        let front_snapshot = service.get_notification(front).await.unwrap();
        assert_eq!(front_snapshot.state, NotificationState::Visible);
        assert_eq!(front_snapshot.category, NotificationCategory::Music);

        let waiting_snapshot = service.get_notification(waiting).await.unwrap();
        assert_eq!(waiting_snapshot.state, NotificationState::Pending);
    }
}
