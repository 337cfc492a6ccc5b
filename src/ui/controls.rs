// ui/controls.rs - triggerable controls and their enabled/label state

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

use super::lock;

/// A physical control on the page that an action handler is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    CreateButton,
    VisibilityButton,
    DeleteButton,
    DeleteLikeButton,
    PlaceLikeButton,
    LogoutButton,
    DeleteAccountButton,
    LoginButton,
    SignupButton,
}

impl Control {
    /// Element id of the control in the rendered page
    pub fn id(&self) -> &'static str {
        match self {
            Control::CreateButton => "create_button",
            Control::VisibilityButton => "visibility_button",
            Control::DeleteButton => "delete_button",
            Control::DeleteLikeButton => "delete_like_button",
            Control::PlaceLikeButton => "place_like_button",
            Control::LogoutButton => "logout_button",
            Control::DeleteAccountButton => "delete_account_button",
            Control::LoginButton => "login_button",
            Control::SignupButton => "signup_button",
        }
    }

    /// Text shown while idle, for controls whose label the page rewrites
    pub fn idle_label(&self) -> Option<&'static str> {
        match self {
            Control::CreateButton => Some("Generate Image"),
            _ => None,
        }
    }

    pub fn busy_label(&self) -> Option<&'static str> {
        match self {
            Control::CreateButton => Some("Generating..."),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub disabled: bool,
    /// `None` for controls whose text never changes
    pub label: Option<String>,
}

impl ControlState {
    fn idle(control: Control) -> Self {
        Self {
            disabled: false,
            label: control.idle_label().map(str::to_string),
        }
    }
}

/// Enabled/label state of every control on one page
#[derive(Debug, Default)]
pub struct ControlBoard {
    states: Mutex<HashMap<Control, ControlState>>,
}

impl ControlBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable the control and show its busy label, or restore it
    pub fn set_busy(&self, control: Control, busy: bool) {
        let state = if busy {
            ControlState {
                disabled: true,
                label: control.busy_label().map(str::to_string),
            }
        } else {
            ControlState::idle(control)
        };
        lock(&self.states).insert(control, state);
    }

    /// Current state; controls never touched are idle
    pub fn state(&self, control: Control) -> ControlState {
        lock(&self.states)
            .get(&control)
            .cloned()
            .unwrap_or_else(|| ControlState::idle(control))
    }
}
