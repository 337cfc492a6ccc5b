use serde_json::{json, Value};

use crate::actions::{ActionKind, ActionOutcome};
use crate::bootstrap::BootstrapOutcome;
use crate::cli::host::LoadedPage;
use crate::cli::OutputFormat;

/// Output the settled effect of one action in the appropriate format
pub fn output_outcome(
    output_format: &OutputFormat,
    kind: ActionKind,
    outcome: &ActionOutcome,
    page: &LoadedPage,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": !matches!(outcome, ActionOutcome::ErrorShown(_)),
                "action": kind,
                "outcome": outcome,
                "bootstrap": page.bootstrap,
                "navigation": page.navigation.events(),
                "notification": page.surface.notification().current(),
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => match outcome {
            ActionOutcome::Redirected(url) => println!("✓ {}: redirected to {}", kind, url),
            ActionOutcome::Reloaded => println!("✓ {}: page reloaded", kind),
            // The command fails with this message; the binary prints it
            ActionOutcome::ErrorShown(_) => {}
            ActionOutcome::Cancelled => println!("{}: cancelled", kind),
            ActionOutcome::Ignored => println!("{}: no visible effect", kind),
        },
    }
    Ok(())
}

/// Output the page load result in the appropriate format
pub fn output_bootstrap(output_format: &OutputFormat, page: &LoadedPage) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": true,
                    "bootstrap": page.bootstrap,
                    "logged_in": page.context.is_logged_in(),
                    "navigation": page.navigation.events(),
                }))?
            );
        }
        OutputFormat::Text => match page.bootstrap {
            BootstrapOutcome::AlreadyLoggedIn => println!("✓ Page loaded (logged in)"),
            BootstrapOutcome::Refreshed => println!("✓ Session refreshed; page reloaded as logged in"),
            BootstrapOutcome::StayedAnonymous => println!("✓ Page loaded (anonymous)"),
        },
    }
    Ok(())
}

/// Output the actions whose controls are present on the page
pub fn output_actions(output_format: &OutputFormat, actions: &[ActionKind]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "actions": actions }))?
            );
        }
        OutputFormat::Text => {
            if actions.is_empty() {
                println!("No actions available on this page");
            }
            for kind in actions {
                println!("{:<18} #{}", kind.name(), kind.control().id());
            }
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = Value::from(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}
