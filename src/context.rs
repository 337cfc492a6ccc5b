// context.rs - PageContext, the per-page configuration rendered by the server

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::ContextError;

/// Well-known PageContext keys, as rendered on the page's data container
pub mod keys {
    pub const LOGGED_IN: &str = "loggedIn";
    pub const IMAGE_ID: &str = "imageId";

    pub const URL_REFRESH_TOKENS: &str = "urlRefreshTokens";
    pub const URL_CREATE_IMAGE: &str = "urlCreateImage";
    pub const URL_CHANGE_IMAGE_VISIBILITY: &str = "urlChangeImageVisibility";
    pub const URL_DELETE_IMAGE: &str = "urlDeleteImage";
    pub const URL_DELETE_LIKE: &str = "urlDeleteLike";
    pub const URL_PLACE_LIKE: &str = "urlPlaceLike";
    pub const URL_LOGOUT_USER: &str = "urlLogoutUser";
    pub const URL_DELETE_USER: &str = "urlDeleteUser";
    pub const URL_LOGIN_USER: &str = "urlLoginUser";
    pub const URL_REGISTER_USER: &str = "urlRegisterUser";

    pub const URL_HOME_PAGE: &str = "urlHomePage";
    pub const URL_GET_ME_PAGE: &str = "urlGetMePage";
    pub const URL_LOGIN_USER_PAGE: &str = "urlLoginUserPage";
}

/// Immutable key/value configuration attached to a page at render time.
///
/// Holds endpoint URLs, the logged-in flag and entity identifiers. A context is
/// built once and then only read; handlers receive it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageContext {
    values: HashMap<String, String>,
}

impl PageContext {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Build a context from `(key, value)` pairs; later pairs win
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a JSON object into a context.
    ///
    /// Strings are taken verbatim, numbers and booleans are stringified and
    /// `null` entries are dropped. Nested objects and arrays are rejected.
    pub fn from_json(raw: &str) -> Result<Self, ContextError> {
        let parsed: Value =
            serde_json::from_str(raw).map_err(|e| ContextError::InvalidJson(e.to_string()))?;

        let Value::Object(map) = parsed else {
            return Err(ContextError::InvalidJson(
                "page context must be a JSON object".to_string(),
            ));
        };

        let mut values = HashMap::with_capacity(map.len());
        for (key, value) in map {
            match value {
                Value::String(s) => {
                    values.insert(key, s);
                }
                Value::Bool(b) => {
                    values.insert(key, b.to_string());
                }
                Value::Number(n) => {
                    values.insert(key, n.to_string());
                }
                Value::Null => {}
                Value::Array(_) | Value::Object(_) => {
                    return Err(ContextError::InvalidJson(format!(
                        "value for '{}' must be a string, number or boolean",
                        key
                    )));
                }
            }
        }

        Ok(Self { values })
    }

    /// Consume the context and return a new one with `pairs` layered on top
    pub fn merged<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in pairs {
            self.values.insert(k.into(), v.into());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Look up a key that the caller cannot proceed without
    pub fn require(&self, key: &str) -> Result<&str, ContextError> {
        self.get(key)
            .ok_or_else(|| ContextError::MissingKey(key.to_string()))
    }

    /// The logged-in flag is set when present and non-empty.
    /// `"false"` and `"0"` also read as anonymous.
    pub fn is_logged_in(&self) -> bool {
        match self.get(keys::LOGGED_IN).map(str::trim) {
            None | Some("") | Some("0") => false,
            Some(flag) => !flag.eq_ignore_ascii_case("false"),
        }
    }

    pub fn image_id(&self) -> Option<&str> {
        self.get(keys::IMAGE_ID)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
