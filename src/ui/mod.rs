pub mod controls;
pub mod navigation;
pub mod notification;

use std::sync::{Arc, Mutex, MutexGuard};

pub use controls::{Control, ControlBoard, ControlState};
pub use navigation::{Navigation, NavigationLog, Navigator};
pub use notification::{NotificationState, NotificationSurface};

/// Side effects an action handler may perform on the page.
///
/// Handlers only talk to the page through this interface, so their branching
/// logic runs the same against a terminal host, a test double or a browser.
pub trait PageEffects: Send + Sync {
    /// Disable `control` and show its busy label, or re-enable it
    fn set_busy(&self, control: Control, busy: bool);

    fn show_error(&self, text: &str);

    fn navigate(&self, url: &str);

    fn reload(&self);
}

/// Blocking yes/no confirmation shown before destructive actions
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation that always answers the same way (`--yes`, scripted hosts)
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!("Auto-answering '{}' with {}", prompt, self.0);
        self.0
    }
}

/// The page as seen by the controller: notification region, controls and
/// a navigator, composed behind `PageEffects`.
pub struct PageSurface {
    notification: NotificationSurface,
    controls: ControlBoard,
    navigator: Arc<dyn Navigator>,
}

impl PageSurface {
    pub fn new(notification: NotificationSurface, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            notification,
            controls: ControlBoard::new(),
            navigator,
        }
    }

    pub fn notification(&self) -> &NotificationSurface {
        &self.notification
    }

    pub fn control(&self, control: Control) -> ControlState {
        self.controls.state(control)
    }
}

impl PageEffects for PageSurface {
    fn set_busy(&self, control: Control, busy: bool) {
        tracing::debug!("Control '{}' busy={}", control.id(), busy);
        self.controls.set_busy(control, busy);
    }

    fn show_error(&self, text: &str) {
        self.notification.show_error(text);
    }

    fn navigate(&self, url: &str) {
        self.navigator.redirect_to(url);
    }

    fn reload(&self) {
        self.navigator.refresh_page();
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
