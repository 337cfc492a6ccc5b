// ui/notification.rs - transient error alert with auto-dismiss

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::lock;

pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(5000);

/// The message currently held by the notification region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationState {
    pub message: String,
    pub visible: bool,
    pub shown_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    current: Option<NotificationState>,
    // Bumped on every show; a dismiss timer only hides the message it was
    // scheduled for.
    generation: u64,
}

/// Notification Surface: one visible error at a time, last writer wins.
///
/// Each `show_error` replaces the message and schedules a fresh dismiss timer
/// on the current tokio runtime. Timers from earlier calls are inert.
#[derive(Debug, Clone)]
pub struct NotificationSurface {
    inner: Arc<Mutex<Inner>>,
    dismiss_after: Duration,
}

impl Default for NotificationSurface {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

impl NotificationSurface {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            dismiss_after,
        }
    }

    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    pub fn show_error(&self, text: &str) {
        let generation = {
            let mut inner = lock(&self.inner);
            inner.generation += 1;
            inner.current = Some(NotificationState {
                message: text.to_string(),
                visible: true,
                shown_at: Utc::now(),
            });
            inner.generation
        };

        tracing::info!("Showing error: {}", text);

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("No runtime available; error will stay visible until replaced");
            return;
        };

        let inner = Arc::clone(&self.inner);
        let dismiss_after = self.dismiss_after;
        handle.spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            let mut inner = lock(&inner);
            if inner.generation == generation {
                if let Some(current) = inner.current.as_mut() {
                    current.visible = false;
                }
            }
        });
    }

    pub fn current(&self) -> Option<NotificationState> {
        lock(&self.inner).current.clone()
    }

    /// The message if the region is currently visible
    pub fn visible_message(&self) -> Option<String> {
        lock(&self.inner)
            .current
            .as_ref()
            .filter(|state| state.visible)
            .map(|state| state.message.clone())
    }
}
