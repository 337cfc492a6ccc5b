// actions/mod.rs - Action Controller: validate, call, branch
//
// Every handler follows the same shape: check required input, optionally
// disable its control, issue its request(s), then resolve to a redirect, a
// reload or an inline error. Handlers never return transport or application
// failures to the caller; those become page effects.

mod account;
mod auth;
mod create;
mod image;
pub mod pending;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::Instrument;

pub use auth::{LoginForm, RegisterForm};
pub use pending::{BusyControls, PendingAction};

use crate::config::FailurePolicy;
use crate::context::{keys, PageContext};
use crate::error::{ActionError, TransportError, GENERIC_ERROR_MESSAGE};
use crate::transport::{ActionResponse, HttpTransport};
use crate::ui::{Confirm, Control, PageEffects};

pub const PROMPT_REQUIRED_MESSAGE: &str = "Please enter a prompt";
pub const FIELDS_REQUIRED_MESSAGE: &str = "Please fill in all fields";
pub const CONFIRM_DELETE_IMAGE: &str = "Are you sure you want to delete this image?";
pub const CONFIRM_DELETE_ACCOUNT: &str =
    "Are you sure you want to delete your account? This action cannot be undone.";

/// The user-triggerable actions, one per bound control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateImage,
    ToggleVisibility,
    DeleteImage,
    RemoveLike,
    PlaceLike,
    Logout,
    DeleteAccount,
    Login,
    Register,
}

impl ActionKind {
    pub const ALL: [ActionKind; 9] = [
        ActionKind::CreateImage,
        ActionKind::ToggleVisibility,
        ActionKind::DeleteImage,
        ActionKind::RemoveLike,
        ActionKind::PlaceLike,
        ActionKind::Logout,
        ActionKind::DeleteAccount,
        ActionKind::Login,
        ActionKind::Register,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::CreateImage => "create_image",
            ActionKind::ToggleVisibility => "toggle_visibility",
            ActionKind::DeleteImage => "delete_image",
            ActionKind::RemoveLike => "remove_like",
            ActionKind::PlaceLike => "place_like",
            ActionKind::Logout => "logout",
            ActionKind::DeleteAccount => "delete_account",
            ActionKind::Login => "login",
            ActionKind::Register => "register",
        }
    }

    pub fn control(&self) -> Control {
        match self {
            ActionKind::CreateImage => Control::CreateButton,
            ActionKind::ToggleVisibility => Control::VisibilityButton,
            ActionKind::DeleteImage => Control::DeleteButton,
            ActionKind::RemoveLike => Control::DeleteLikeButton,
            ActionKind::PlaceLike => Control::PlaceLikeButton,
            ActionKind::Logout => Control::LogoutButton,
            ActionKind::DeleteAccount => Control::DeleteAccountButton,
            ActionKind::Login => Control::LoginButton,
            ActionKind::Register => Control::SignupButton,
        }
    }

    /// PageContext keys whose presence means the control is on the page
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            ActionKind::CreateImage => &[keys::URL_CREATE_IMAGE],
            ActionKind::ToggleVisibility => &[keys::URL_CHANGE_IMAGE_VISIBILITY],
            ActionKind::DeleteImage => &[keys::URL_DELETE_IMAGE, keys::URL_GET_ME_PAGE],
            ActionKind::RemoveLike => &[keys::URL_DELETE_LIKE],
            ActionKind::PlaceLike => &[keys::URL_PLACE_LIKE, keys::URL_LOGIN_USER_PAGE],
            ActionKind::Logout => &[keys::URL_LOGOUT_USER, keys::URL_HOME_PAGE],
            ActionKind::DeleteAccount => &[keys::URL_DELETE_USER, keys::URL_HOME_PAGE],
            ActionKind::Login => &[keys::URL_LOGIN_USER, keys::URL_HOME_PAGE],
            ActionKind::Register => &[
                keys::URL_REGISTER_USER,
                keys::URL_LOGIN_USER,
                keys::URL_HOME_PAGE,
            ],
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user trigger together with the form input it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateImage { prompt: String },
    ToggleVisibility,
    DeleteImage,
    RemoveLike,
    PlaceLike,
    Logout,
    DeleteAccount,
    Login(LoginForm),
    Register(RegisterForm),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::CreateImage { .. } => ActionKind::CreateImage,
            Action::ToggleVisibility => ActionKind::ToggleVisibility,
            Action::DeleteImage => ActionKind::DeleteImage,
            Action::RemoveLike => ActionKind::RemoveLike,
            Action::PlaceLike => ActionKind::PlaceLike,
            Action::Logout => ActionKind::Logout,
            Action::DeleteAccount => ActionKind::DeleteAccount,
            Action::Login(_) => ActionKind::Login,
            Action::Register(_) => ActionKind::Register,
        }
    }
}

/// The effect a handler settled on; the effect itself has already been
/// performed through `PageEffects`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", content = "value", rename_all = "snake_case")]
pub enum ActionOutcome {
    Redirected(String),
    Reloaded,
    ErrorShown(String),
    /// The confirmation prompt was declined; nothing was sent
    Cancelled,
    /// The request settled without a UI effect
    Ignored,
}

/// Which responses let an unchecked action proceed to its UI effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    /// Any response that arrives, whatever its status
    Settled,
    /// Only 2xx responses
    Success,
}

/// Handlers bound to one page. Cheap to clone; clones share the page.
#[derive(Clone)]
pub struct ActionController {
    context: Arc<PageContext>,
    transport: Arc<dyn HttpTransport>,
    effects: Arc<dyn PageEffects>,
    confirm: Arc<dyn Confirm>,
    policy: FailurePolicy,
    busy: BusyControls,
}

impl ActionController {
    pub fn new(
        context: Arc<PageContext>,
        transport: Arc<dyn HttpTransport>,
        effects: Arc<dyn PageEffects>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            context,
            transport,
            effects,
            confirm,
            policy: FailurePolicy::default(),
            busy: BusyControls::new(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Whether the control for `kind` exists on this page
    pub fn is_present(&self, kind: ActionKind) -> bool {
        kind.required_keys().iter().all(|key| self.context.has(key))
    }

    /// Whether `control` is disabled by a handler that has not settled
    pub fn is_busy(&self, control: Control) -> bool {
        self.busy.is_busy(control)
    }

    pub fn available_actions(&self) -> Vec<ActionKind> {
        ActionKind::ALL
            .into_iter()
            .filter(|kind| self.is_present(*kind))
            .collect()
    }

    /// Run the handler for one user trigger.
    ///
    /// Returns `Err` only when the control is absent or the page context lacks
    /// a key the handler needs. Every network outcome is an `Ok` outcome. A
    /// trigger on a disabled control is `Ignored` without running the handler.
    pub async fn dispatch(&self, action: Action) -> Result<ActionOutcome, ActionError> {
        let kind = action.kind();
        if !self.is_present(kind) {
            return Err(ActionError::ControlNotPresent(kind));
        }
        if self.is_busy(kind.control()) {
            tracing::debug!("Control '{}' is disabled; ignoring {}", kind.control().id(), kind);
            return Ok(ActionOutcome::Ignored);
        }

        let mut pending = PendingAction::begin(kind);
        let span = tracing::info_span!("action", kind = %kind, id = %pending.id);

        let outcome = async {
            match action {
                Action::CreateImage { prompt } => self.create_image(&mut pending, &prompt).await,
                Action::ToggleVisibility => self.toggle_visibility().await,
                Action::DeleteImage => self.delete_image().await,
                Action::RemoveLike => self.remove_like().await,
                Action::PlaceLike => self.place_like().await,
                Action::Logout => self.logout().await,
                Action::DeleteAccount => self.delete_account().await,
                Action::Login(form) => self.login(&form).await,
                Action::Register(form) => self.register(&form).await,
            }
        }
        .instrument(span)
        .await?;

        tracing::info!(
            "Action {} ({}) settled in {:?}: {:?}",
            kind,
            pending.id,
            pending.elapsed(),
            outcome
        );

        Ok(outcome)
    }

    fn endpoint(&self, key: &str) -> Result<&str, ActionError> {
        Ok(self.context.require(key)?)
    }

    fn show_error(&self, message: &str) -> ActionOutcome {
        self.effects.show_error(message);
        ActionOutcome::ErrorShown(message.to_string())
    }

    fn redirect(&self, url: &str) -> ActionOutcome {
        self.effects.navigate(url);
        ActionOutcome::Redirected(url.to_string())
    }

    fn reload(&self) -> ActionOutcome {
        self.effects.reload();
        ActionOutcome::Reloaded
    }

    /// Surface a failed request: the body's `detail` verbatim, or the generic
    /// message when the request never completed or the body is unreadable
    fn report_failure(&self, response: Option<&ActionResponse>) -> ActionOutcome {
        let message = response
            .and_then(ActionResponse::error_detail)
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        self.show_error(&message)
    }

    /// Settle a request from an action that does not check its outcome under
    /// the faithful policy. Transport failures and gated-out responses end
    /// silently there; the unified policy surfaces them instead.
    fn settle_unchecked(
        &self,
        result: Result<ActionResponse, TransportError>,
        gate: Gate,
        effect: impl FnOnce() -> ActionOutcome,
    ) -> ActionOutcome {
        match (self.policy, result) {
            (FailurePolicy::Faithful, Ok(response)) => {
                if gate == Gate::Settled || response.is_success() {
                    effect()
                } else {
                    tracing::debug!("Unchecked request returned {}; no effect", response.status);
                    ActionOutcome::Ignored
                }
            }
            (FailurePolicy::Faithful, Err(e)) => {
                tracing::debug!("Unchecked request failed: {}", e);
                ActionOutcome::Ignored
            }
            (FailurePolicy::Unified, Ok(response)) if response.is_success() => effect(),
            (FailurePolicy::Unified, Ok(response)) => self.report_failure(Some(&response)),
            (FailurePolicy::Unified, Err(e)) => {
                tracing::warn!("Request failed: {}", e);
                self.report_failure(None)
            }
        }
    }
}

/// Required form input is present once surrounding whitespace is trimmed
fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}
