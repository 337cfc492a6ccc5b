pub mod auth;
pub mod image;
pub mod page;

use crate::actions::{Action, ActionOutcome};
use crate::cli::host::PageHost;
use crate::cli::{utils, OutputFormat};
use crate::error::ActionError;

/// Load the page, then fire one action on it and report the effect.
///
/// An error shown on the page fails the command, so rejected actions exit
/// non-zero.
pub async fn run_action(
    host: &PageHost,
    action: Action,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let page = host.load().await;
    let kind = action.kind();

    match page.controller.dispatch(action).await {
        Ok(outcome) => {
            utils::output_outcome(output_format, kind, &outcome, &page)?;
            match outcome {
                ActionOutcome::ErrorShown(message) => Err(anyhow::anyhow!(message)),
                _ => Ok(()),
            }
        }
        Err(e @ ActionError::ControlNotPresent(_)) => {
            utils::output_error(output_format, &e.to_string(), Some("CONTROL_NOT_PRESENT"))?;
            Err(e.into())
        }
        Err(e) => {
            utils::output_error(output_format, &e.to_string(), Some("MISSING_CONTEXT"))?;
            Err(e.into())
        }
    }
}
