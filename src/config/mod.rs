use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub environment: Environment,
    pub http: HttpConfig,
    pub notification: NotificationConfig,
    pub actions: ActionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Base against which relative PageContext URLs are resolved
    pub base_url: String,
    /// The controller imposes no timeout; only a host may opt into one
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub dismiss_after_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsConfig {
    pub failure_policy: FailurePolicy,
}

/// How the unchecked actions (toggle, delete, likes, logout, account delete)
/// treat transport and application failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Settle silently; only the action's own success check gates the UI effect
    #[default]
    Faithful,
    /// Surface failures the way create and login do
    Unified,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faithful" => Ok(FailurePolicy::Faithful),
            "unified" => Ok(FailurePolicy::Unified),
            other => Err(format!("unknown failure policy '{}'", other)),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Faithful => write!(f, "faithful"),
            FailurePolicy::Unified => write!(f, "unified"),
        }
    }
}

impl NotificationConfig {
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // HTTP overrides
        if let Ok(v) = env::var("GALLERY_BASE_URL") {
            self.http.base_url = v.trim().to_string();
        }
        if let Ok(v) = env::var("GALLERY_REQUEST_TIMEOUT_SECS") {
            self.http.request_timeout_secs = v.parse().ok();
        }
        if let Ok(v) = env::var("GALLERY_USER_AGENT") {
            self.http.user_agent = v;
        }

        // Notification overrides
        if let Ok(v) = env::var("GALLERY_NOTIFICATION_DISMISS_MS") {
            self.notification.dismiss_after_ms = v.parse().unwrap_or(self.notification.dismiss_after_ms);
        }

        // Action overrides
        if let Ok(v) = env::var("GALLERY_FAILURE_POLICY") {
            match v.parse() {
                Ok(policy) => self.actions.failure_policy = policy,
                Err(e) => tracing::warn!("Ignoring GALLERY_FAILURE_POLICY: {}", e),
            }
        }

        self
    }

    pub(crate) fn development() -> Self {
        Self {
            environment: Environment::Development,
            http: HttpConfig {
                base_url: "http://127.0.0.1:8000".to_string(),
                request_timeout_secs: None,
                user_agent: default_user_agent(),
            },
            notification: NotificationConfig {
                dismiss_after_ms: 5000,
            },
            actions: ActionsConfig {
                failure_policy: FailurePolicy::Faithful,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            http: HttpConfig {
                base_url: "https://staging.example.com".to_string(),
                request_timeout_secs: None,
                user_agent: default_user_agent(),
            },
            notification: NotificationConfig {
                dismiss_after_ms: 5000,
            },
            actions: ActionsConfig {
                failure_policy: FailurePolicy::Unified,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            http: HttpConfig {
                base_url: "https://app.example.com".to_string(),
                request_timeout_secs: None,
                user_agent: default_user_agent(),
            },
            notification: NotificationConfig {
                dismiss_after_ms: 5000,
            },
            actions: ActionsConfig {
                failure_policy: FailurePolicy::Faithful,
            },
        }
    }
}

fn default_user_agent() -> String {
    format!("gallery-page/{}", env!("CARGO_PKG_VERSION"))
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<ClientConfig> = Lazy::new(ClientConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static ClientConfig {
    &CONFIG
}
