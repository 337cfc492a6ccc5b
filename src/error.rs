// Client Error Types
use serde::Deserialize;
use thiserror::Error;

use crate::actions::ActionKind;

/// Message shown when a request cannot complete or its failure body is unreadable
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Transport-level failures: the request never produced a response
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid endpoint url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// PageContext lookup and parsing errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("Page context is missing key '{0}'")]
    MissingKey(String),

    #[error("Invalid page context: {0}")]
    InvalidJson(String),
}

/// Errors returned from action dispatch.
///
/// These are configuration faults only. Transport and application failures
/// never surface here; handlers turn them into notification effects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Control for action '{0}' is not present on this page")]
    ControlNotPresent(ActionKind),

    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Failure body returned by the backend on non-2xx responses
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
