// ui/navigation.rs - full-page redirects and reloads

use std::sync::Mutex;

use serde::Serialize;

use super::lock;

/// A page transition requested by the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "url", rename_all = "snake_case")]
pub enum Navigation {
    Redirect(String),
    Reload,
}

/// Navigation Helper capability
pub trait Navigator: Send + Sync {
    /// Replace the current page with `url`
    fn redirect_to(&self, url: &str);

    /// Reload the current page from the same URL
    fn refresh_page(&self);
}

/// Navigator for hosts without a real browser: records every transition
/// in order so the host can act on it once the handler settles.
#[derive(Debug, Default)]
pub struct NavigationLog {
    events: Mutex<Vec<Navigation>>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Navigation> {
        lock(&self.events).clone()
    }

    pub fn last(&self) -> Option<Navigation> {
        lock(&self.events).last().cloned()
    }

    pub fn reload_count(&self) -> usize {
        lock(&self.events)
            .iter()
            .filter(|event| matches!(event, Navigation::Reload))
            .count()
    }
}

impl Navigator for NavigationLog {
    fn redirect_to(&self, url: &str) {
        tracing::info!("Redirecting to {}", url);
        lock(&self.events).push(Navigation::Redirect(url.to_string()));
    }

    fn refresh_page(&self) {
        tracing::info!("Reloading page");
        lock(&self.events).push(Navigation::Reload);
    }
}
