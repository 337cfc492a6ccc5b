// bootstrap.rs - silent token refresh at page load

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::context::{keys, PageContext};
use crate::transport::{ActionRequest, HttpTransport};
use crate::ui::PageEffects;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapOutcome {
    /// Viewer already authenticated; no request issued
    AlreadyLoggedIn,
    /// Refresh succeeded and the page was reloaded
    Refreshed,
    /// Refresh failed; the page keeps its anonymous rendering
    StayedAnonymous,
}

/// Session Bootstrapper: runs once per page load, before user interaction.
///
/// For anonymous viewers it POSTs to the refresh-tokens endpoint and reloads
/// on 2xx. Any failure is silent, since a visitor without a valid refresh
/// token is the normal anonymous case.
pub struct SessionBootstrapper {
    context: Arc<PageContext>,
    transport: Arc<dyn HttpTransport>,
    effects: Arc<dyn PageEffects>,
}

impl SessionBootstrapper {
    pub fn new(
        context: Arc<PageContext>,
        transport: Arc<dyn HttpTransport>,
        effects: Arc<dyn PageEffects>,
    ) -> Self {
        Self {
            context,
            transport,
            effects,
        }
    }

    pub async fn run(&self) -> BootstrapOutcome {
        if self.context.is_logged_in() {
            return BootstrapOutcome::AlreadyLoggedIn;
        }

        let Some(url) = self.context.get(keys::URL_REFRESH_TOKENS) else {
            tracing::debug!("Page has no refresh endpoint; staying anonymous");
            return BootstrapOutcome::StayedAnonymous;
        };

        match self.transport.send(ActionRequest::post(url)).await {
            Ok(response) if response.is_success() => {
                tracing::info!("Silent token refresh succeeded; reloading page");
                self.effects.reload();
                BootstrapOutcome::Refreshed
            }
            Ok(response) => {
                tracing::debug!("Silent token refresh rejected with status {}", response.status);
                BootstrapOutcome::StayedAnonymous
            }
            Err(e) => {
                tracing::debug!("Silent token refresh failed: {}", e);
                BootstrapOutcome::StayedAnonymous
            }
        }
    }

    /// Fire-and-forget variant: the page stays interactive while the refresh
    /// is outstanding
    pub fn spawn(self) -> JoinHandle<BootstrapOutcome> {
        tokio::spawn(async move { self.run().await })
    }
}
