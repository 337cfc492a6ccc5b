use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::actions::ActionController;
use crate::config::FailurePolicy;
use crate::context::{keys, PageContext};
use crate::error::TransportError;
use crate::transport::{ActionRequest, ActionResponse, HttpMethod, HttpTransport};
use crate::ui::{lock, Confirm, Control, PageEffects};

type Reply = Result<ActionResponse, TransportError>;

/// Transport double that answers from a per-endpoint script and records
/// every request in the order it was issued
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<(HttpMethod, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<ActionRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next `method url` request
    pub fn reply(self, method: HttpMethod, url: &str, status: u16, body: Value) -> Self {
        self.push(method, url, Ok(ActionResponse::new(status, body.to_string())))
    }

    /// Queue a raw (possibly non-JSON) response body
    pub fn reply_raw(self, method: HttpMethod, url: &str, status: u16, body: &str) -> Self {
        self.push(method, url, Ok(ActionResponse::new(status, body)))
    }

    /// Queue a connectivity failure
    pub fn fail(self, method: HttpMethod, url: &str) -> Self {
        self.push(
            method,
            url,
            Err(TransportError::Network("connection refused".to_string())),
        )
    }

    fn push(self, method: HttpMethod, url: &str, reply: Reply) -> Self {
        lock(&self.replies)
            .entry((method, url.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<ActionRequest> {
        lock(&self.requests).clone()
    }

    /// `"METHOD url"` for every request issued, in order
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ActionRequest) -> Result<ActionResponse, TransportError> {
        let key = (request.method, request.url.clone());
        lock(&self.requests).push(request);

        // Let concurrently dispatched handlers interleave at the I/O boundary
        tokio::task::yield_now().await;

        lock(&self.replies)
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(TransportError::Network(format!(
                    "no scripted reply for {} {}",
                    key.0, key.1
                )))
            })
    }
}

/// Observable effect recorded by `RecordingEffects`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Busy(Control, bool),
    Error(String),
    Navigate(String),
    Reload,
}

#[derive(Debug, Default)]
pub struct RecordingEffects {
    effects: Mutex<Vec<Effect>>,
}

impl RecordingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> Vec<Effect> {
        lock(&self.effects).clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.effects()
            .into_iter()
            .filter_map(|e| match e {
                Effect::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn reloads(&self) -> usize {
        self.effects()
            .iter()
            .filter(|e| matches!(e, Effect::Reload))
            .count()
    }
}

impl PageEffects for RecordingEffects {
    fn set_busy(&self, control: Control, busy: bool) {
        lock(&self.effects).push(Effect::Busy(control, busy));
    }

    fn show_error(&self, text: &str) {
        lock(&self.effects).push(Effect::Error(text.to_string()));
    }

    fn navigate(&self, url: &str) {
        lock(&self.effects).push(Effect::Navigate(url.to_string()));
    }

    fn reload(&self) {
        lock(&self.effects).push(Effect::Reload);
    }
}

/// Confirmation double with a fixed answer that remembers what it was asked
#[derive(Debug)]
pub struct RecordingConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl RecordingConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }
}

impl Confirm for RecordingConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        lock(&self.prompts).push(prompt.to_string());
        self.answer
    }
}

/// A controller wired to test doubles
pub struct Harness {
    pub controller: ActionController,
    pub transport: Arc<ScriptedTransport>,
    pub effects: Arc<RecordingEffects>,
    pub confirm: Arc<RecordingConfirm>,
}

impl Harness {
    pub fn new(context: PageContext, transport: ScriptedTransport) -> Self {
        Self::build(context, transport, true, FailurePolicy::Faithful)
    }

    pub fn build(
        context: PageContext,
        transport: ScriptedTransport,
        confirm_answer: bool,
        policy: FailurePolicy,
    ) -> Self {
        let transport = Arc::new(transport);
        let effects = Arc::new(RecordingEffects::new());
        let confirm = Arc::new(RecordingConfirm::new(confirm_answer));

        let controller = ActionController::new(
            Arc::new(context),
            transport.clone(),
            effects.clone(),
            confirm.clone(),
        )
        .with_policy(policy);

        Self {
            controller,
            transport,
            effects,
            confirm,
        }
    }
}

/// Page context with every endpoint the controller knows about
pub fn full_page(logged_in: bool) -> PageContext {
    let ctx = PageContext::from_pairs([
        (keys::IMAGE_ID, "7"),
        (keys::URL_REFRESH_TOKENS, "/api/auth/refresh"),
        (keys::URL_CREATE_IMAGE, "/images/create"),
        (keys::URL_CHANGE_IMAGE_VISIBILITY, "/images/visibility/7"),
        (keys::URL_DELETE_IMAGE, "/images/delete/7"),
        (keys::URL_DELETE_LIKE, "/likes/7"),
        (keys::URL_PLACE_LIKE, "/likes/place"),
        (keys::URL_LOGOUT_USER, "/api/auth/logout"),
        (keys::URL_DELETE_USER, "/api/auth/delete"),
        (keys::URL_LOGIN_USER, "/api/auth/login"),
        (keys::URL_REGISTER_USER, "/api/auth/register"),
        (keys::URL_HOME_PAGE, "/"),
        (keys::URL_GET_ME_PAGE, "/users/me"),
        (keys::URL_LOGIN_USER_PAGE, "/users/login"),
    ]);

    if logged_in {
        ctx.merged([(keys::LOGGED_IN, "True")])
    } else {
        ctx
    }
}
