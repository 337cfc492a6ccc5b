// actions/pending.rs - state of one in-flight handler invocation

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

use super::ActionKind;
use crate::ui::{lock, Control, PageEffects};

/// Controls currently disabled by an in-flight handler, shared by every
/// clone of one page's controller
#[derive(Debug, Clone, Default)]
pub struct BusyControls {
    inner: Arc<Mutex<HashSet<Control>>>,
}

impl BusyControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self, control: Control) -> bool {
        lock(&self.inner).contains(&control)
    }

    /// Mark `control` busy; false if another invocation already holds it
    fn claim(&self, control: Control) -> bool {
        lock(&self.inner).insert(control)
    }

    fn release(&self, control: Control) {
        lock(&self.inner).remove(&control);
    }
}

/// One in-flight handler invocation.
///
/// Created when the user event fires and dropped once the handler settles. A
/// disabled control is re-enabled only through `restore`. Success paths that
/// navigate away never call it.
#[derive(Debug)]
pub struct PendingAction {
    pub id: Uuid,
    pub kind: ActionKind,
    pub control: Control,
    disabled: bool,
    started: Instant,
}

impl PendingAction {
    pub fn begin(kind: ActionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            control: kind.control(),
            disabled: false,
            started: Instant::now(),
        }
    }

    /// Disable the originating control and swap in its busy label.
    ///
    /// Returns false without touching the page when the control is already
    /// held by another invocation.
    pub fn disable(&mut self, effects: &dyn PageEffects, busy: &BusyControls) -> bool {
        if !busy.claim(self.control) {
            return false;
        }
        effects.set_busy(self.control, true);
        self.disabled = true;
        true
    }

    /// Re-enable the control if this invocation disabled it
    pub fn restore(&mut self, effects: &dyn PageEffects, busy: &BusyControls) {
        if self.disabled {
            busy.release(self.control);
            effects.set_busy(self.control, false);
            self.disabled = false;
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Effect, RecordingEffects};

    #[test]
    fn test_restore_only_after_disable() {
        let effects = RecordingEffects::new();
        let busy = BusyControls::new();
        let mut pending = PendingAction::begin(ActionKind::CreateImage);
        assert_eq!(pending.control, Control::CreateButton);

        pending.restore(&effects, &busy);
        assert!(effects.effects().is_empty());

        assert!(pending.disable(&effects, &busy));
        assert!(pending.is_disabled());
        assert!(busy.is_busy(Control::CreateButton));
        pending.restore(&effects, &busy);
        pending.restore(&effects, &busy);
        assert!(!busy.is_busy(Control::CreateButton));

        assert_eq!(
            effects.effects(),
            vec![
                Effect::Busy(Control::CreateButton, true),
                Effect::Busy(Control::CreateButton, false),
            ]
        );
    }

    #[test]
    fn test_second_invocation_cannot_claim_busy_control() {
        let effects = RecordingEffects::new();
        let busy = BusyControls::new();
        let mut first = PendingAction::begin(ActionKind::CreateImage);
        let mut second = PendingAction::begin(ActionKind::CreateImage);

        assert!(first.disable(&effects, &busy));
        assert!(!second.disable(&effects, &busy));
        assert!(!second.is_disabled());

        // Restoring the loser must not free the winner's control
        second.restore(&effects, &busy);
        assert!(busy.is_busy(Control::CreateButton));

        first.restore(&effects, &busy);
        assert!(second.disable(&effects, &busy));
        assert_eq!(
            effects.effects(),
            vec![
                Effect::Busy(Control::CreateButton, true),
                Effect::Busy(Control::CreateButton, false),
                Effect::Busy(Control::CreateButton, true),
            ]
        );
    }
}
