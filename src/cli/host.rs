// cli/host.rs - terminal stand-in for the browser page

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::actions::ActionController;
use crate::bootstrap::{BootstrapOutcome, SessionBootstrapper};
use crate::cli::terminal::TerminalConfirm;
use crate::cli::Cli;
use crate::config::{ClientConfig, FailurePolicy};
use crate::context::{keys, PageContext};
use crate::transport::ReqwestTransport;
use crate::ui::{AutoConfirm, Confirm, NavigationLog, NotificationSurface, PageSurface};

/// Everything needed to open the page; one transport (and cookie jar) is
/// shared by every page opened from the same host
pub struct PageHost {
    context: PageContext,
    transport: Arc<ReqwestTransport>,
    confirm: Arc<dyn Confirm>,
    policy: FailurePolicy,
    dismiss_after: Duration,
}

/// A page after load: its context, its surface and the handlers bound to it
pub struct LoadedPage {
    pub context: Arc<PageContext>,
    pub surface: Arc<PageSurface>,
    pub navigation: Arc<NavigationLog>,
    pub controller: ActionController,
    pub bootstrap: BootstrapOutcome,
}

impl PageHost {
    pub fn new(
        context: PageContext,
        transport: ReqwestTransport,
        confirm: Arc<dyn Confirm>,
        policy: FailurePolicy,
        dismiss_after: Duration,
    ) -> Self {
        Self {
            context,
            transport: Arc::new(transport),
            confirm,
            policy,
            dismiss_after,
        }
    }

    pub fn from_cli(cli: &Cli, config: &ClientConfig) -> anyhow::Result<Self> {
        let context = match &cli.context {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read page context {}", path.display()))?;
                PageContext::from_json(&raw)?
            }
            None => PageContext::default(),
        }
        .merged(cli.set.iter().cloned());

        let mut http = config.http.clone();
        if let Some(base_url) = &cli.base_url {
            http.base_url = base_url.clone();
        }
        let transport = ReqwestTransport::from_config(&http)?;

        let confirm: Arc<dyn Confirm> = if cli.yes {
            Arc::new(AutoConfirm(true))
        } else {
            Arc::new(TerminalConfirm)
        };

        let policy = cli.failure_policy.unwrap_or(config.actions.failure_policy);

        tracing::debug!(
            "Page host: {} context keys, base {}, policy {}",
            context.len(),
            transport.base_url(),
            policy
        );

        Ok(Self::new(
            context,
            transport,
            confirm,
            policy,
            config.notification.dismiss_after(),
        ))
    }

    /// Load the page: run the session bootstrapper to completion.
    ///
    /// A successful refresh reloads the page, which the server would render for
    /// an authenticated viewer; the reloaded page carries the logged-in flag.
    pub async fn load(&self) -> LoadedPage {
        let page = self.open(self.context.clone(), BootstrapOutcome::AlreadyLoggedIn);

        let outcome = SessionBootstrapper::new(
            page.context.clone(),
            self.transport.clone(),
            page.surface.clone(),
        )
        .run()
        .await;

        match outcome {
            BootstrapOutcome::Refreshed => {
                let context = self.context.clone().merged([(keys::LOGGED_IN, "True")]);
                self.open(context, outcome)
            }
            _ => LoadedPage {
                bootstrap: outcome,
                ..page
            },
        }
    }

    fn open(&self, context: PageContext, bootstrap: BootstrapOutcome) -> LoadedPage {
        let context = Arc::new(context);
        let navigation = Arc::new(NavigationLog::new());
        let surface = Arc::new(PageSurface::new(
            NotificationSurface::new(self.dismiss_after),
            navigation.clone(),
        ));

        let controller = ActionController::new(
            context.clone(),
            self.transport.clone(),
            surface.clone(),
            self.confirm.clone(),
        )
        .with_policy(self.policy);

        LoadedPage {
            context,
            surface,
            navigation,
            controller,
            bootstrap,
        }
    }
}
