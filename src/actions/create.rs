// actions/create.rs - generate a new image from a prompt

use serde::Deserialize;
use serde_json::json;

use super::{is_filled, ActionController, ActionOutcome, PendingAction, PROMPT_REQUIRED_MESSAGE};
use crate::context::keys;
use crate::error::ActionError;
use crate::transport::ActionRequest;

#[derive(Debug, Deserialize)]
struct CreatedImage {
    image_url: String,
}

impl ActionController {
    /// Keeps its control disabled for the whole request. The control is
    /// re-enabled only on failure; success navigates to the new image.
    pub(super) async fn create_image(
        &self,
        pending: &mut PendingAction,
        prompt: &str,
    ) -> Result<ActionOutcome, ActionError> {
        let url = self.endpoint(keys::URL_CREATE_IMAGE)?;

        if !is_filled(prompt) {
            return Ok(self.show_error(PROMPT_REQUIRED_MESSAGE));
        }

        if !pending.disable(self.effects.as_ref(), &self.busy) {
            tracing::debug!("Control '{}' is busy; ignoring", pending.control.id());
            return Ok(ActionOutcome::Ignored);
        }

        let request = ActionRequest::post(url).with_json(json!({ "prompt": prompt }));
        let outcome = match self.transport.send(request).await {
            Ok(response) if response.is_success() => match response.json::<CreatedImage>() {
                Ok(created) => return Ok(self.redirect(&created.image_url)),
                Err(e) => {
                    tracing::warn!("Create response missing image_url: {}", e);
                    self.report_failure(None)
                }
            },
            Ok(response) => self.report_failure(Some(&response)),
            Err(e) => {
                tracing::warn!("Create request failed: {}", e);
                self.report_failure(None)
            }
        };

        pending.restore(self.effects.as_ref(), &self.busy);
        Ok(outcome)
    }
}
