// actions/auth.rs - login and registration forms

use serde_json::{json, Value};

use super::{is_filled, ActionController, ActionOutcome, FIELDS_REQUIRED_MESSAGE};
use crate::context::keys;
use crate::error::ActionError;
use crate::transport::ActionRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn is_complete(&self) -> bool {
        is_filled(&self.username) && is_filled(&self.password)
    }

    fn to_body(&self) -> Value {
        json!({
            "username": self.username,
            "password": self.password,
        })
    }
}

/// Registration input. `confirm_password` is only checked for presence here;
/// the backend compares it against `password`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    fn is_complete(&self) -> bool {
        [
            &self.username,
            &self.email,
            &self.password,
            &self.confirm_password,
        ]
        .iter()
        .all(|field| is_filled(field))
    }

    /// Also sent as-is to the login endpoint; the backend ignores the extras
    fn to_body(&self) -> Value {
        json!({
            "username": self.username,
            "email": self.email,
            "password": self.password,
            "confirm_password": self.confirm_password,
        })
    }
}

impl ActionController {
    pub(super) async fn login(&self, form: &LoginForm) -> Result<ActionOutcome, ActionError> {
        let url = self.endpoint(keys::URL_LOGIN_USER)?;
        let home = self.endpoint(keys::URL_HOME_PAGE)?;

        if !form.is_complete() {
            return Ok(self.show_error(FIELDS_REQUIRED_MESSAGE));
        }

        let request = ActionRequest::post(url).with_json(form.to_body());
        match self.transport.send(request).await {
            Ok(response) if response.is_success() => Ok(self.redirect(home)),
            Ok(response) => Ok(self.report_failure(Some(&response))),
            Err(e) => {
                tracing::warn!("Login request failed: {}", e);
                Ok(self.report_failure(None))
            }
        }
    }

    /// Register, then log in with the same body. The chained login only runs
    /// after a 2xx registration, and its result does not change the redirect.
    pub(super) async fn register(&self, form: &RegisterForm) -> Result<ActionOutcome, ActionError> {
        let register_url = self.endpoint(keys::URL_REGISTER_USER)?;
        let login_url = self.endpoint(keys::URL_LOGIN_USER)?;
        let home = self.endpoint(keys::URL_HOME_PAGE)?;

        if !form.is_complete() {
            return Ok(self.show_error(FIELDS_REQUIRED_MESSAGE));
        }

        let body = form.to_body();
        let request = ActionRequest::post(register_url).with_json(body.clone());
        match self.transport.send(request).await {
            Ok(response) if response.is_success() => {}
            Ok(response) => return Ok(self.report_failure(Some(&response))),
            Err(e) => {
                tracing::warn!("Register request failed: {}", e);
                return Ok(self.report_failure(None));
            }
        }

        let login = ActionRequest::post(login_url).with_json(body);
        match self.transport.send(login).await {
            Ok(response) if !response.is_success() => {
                tracing::warn!("Login after registration returned {}", response.status);
            }
            Err(e) => tracing::warn!("Login after registration failed: {}", e),
            Ok(_) => {}
        }

        Ok(self.redirect(home))
    }
}
