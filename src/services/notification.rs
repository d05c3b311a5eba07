//! Transient user notifications.
//!
//! A [`Notifier`] holds at most one notification. Showing a new one replaces
//! the old one and reschedules the auto-clear task.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Whether a notification reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A message shown to the user until it is cleared or replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub shown_at: DateTime<Utc>,
    #[serde(skip)]
    seq: u64,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Owner of the current notification and its clear timer.
///
/// A zero timeout keeps notifications until they are replaced or cleared.
pub struct Notifier {
    current: Arc<RwLock<Option<Notification>>>,
    clear_task: Mutex<Option<JoinHandle<()>>>,
    next_seq: AtomicU64,
    timeout: Duration,
}

impl Notifier {
    pub fn new(timeout: Duration) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            clear_task: Mutex::new(None),
            next_seq: AtomicU64::new(1),
            timeout,
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Error);
    }

    /// Replace the current notification and schedule it to clear.
    ///
    /// Scheduling needs a Tokio runtime; outside one the notification is kept
    /// until replaced.
    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) {
        // Held to the end: concurrent calls must not interleave slot, abort and spawn
        let mut pending = self.pending_clear();

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            message: message.into(),
            kind,
            shown_at: Utc::now(),
            seq,
        };

        tracing::debug!("Notification ({:?}): {}", kind, notification.message);

        if let Ok(mut slot) = self.current.write() {
            *slot = Some(notification);
        }

        if let Some(task) = pending.take() {
            task.abort();
        }

        if self.timeout.is_zero() {
            return;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No async runtime; notification will not auto-clear");
                return;
            }
        };

        let current = self.current.clone();
        let timeout = self.timeout;
        *pending = Some(handle.spawn(async move {
            tokio::time::sleep(timeout).await;
            if let Ok(mut slot) = current.write() {
                // A newer notification owns the slot now
                if slot.as_ref().map(|n| n.seq) == Some(seq) {
                    *slot = None;
                }
            }
        }));
    }

    /// Clear the current notification immediately.
    pub fn clear(&self) {
        let mut pending = self.pending_clear();
        if let Some(task) = pending.take() {
            task.abort();
        }
        if let Ok(mut slot) = self.current.write() {
            *slot = None;
        }
    }

    /// Snapshot of the current notification.
    pub fn current(&self) -> Option<Notification> {
        self.current.read().ok().and_then(|slot| slot.clone())
    }

    fn pending_clear(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.clear_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Some(task) = self.pending_clear().take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("timeout", &self.timeout)
            .field("current", &self.current())
            .finish()
    }
}
