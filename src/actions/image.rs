// actions/image.rs - visibility, deletion and likes on an image page

use serde_json::json;

use super::{ActionController, ActionOutcome, Gate, CONFIRM_DELETE_IMAGE};
use crate::context::keys;
use crate::error::ActionError;
use crate::transport::ActionRequest;

impl ActionController {
    pub(super) async fn toggle_visibility(&self) -> Result<ActionOutcome, ActionError> {
        let url = self.endpoint(keys::URL_CHANGE_IMAGE_VISIBILITY)?;

        let result = self.transport.send(ActionRequest::patch(url)).await;
        Ok(self.settle_unchecked(result, Gate::Settled, || self.reload()))
    }

    pub(super) async fn delete_image(&self) -> Result<ActionOutcome, ActionError> {
        let url = self.endpoint(keys::URL_DELETE_IMAGE)?;
        let list_page = self.endpoint(keys::URL_GET_ME_PAGE)?;

        if !self.confirm.confirm(CONFIRM_DELETE_IMAGE) {
            return Ok(ActionOutcome::Cancelled);
        }

        let result = self.transport.send(ActionRequest::delete(url)).await;
        Ok(self.settle_unchecked(result, Gate::Settled, || self.redirect(list_page)))
    }

    pub(super) async fn remove_like(&self) -> Result<ActionOutcome, ActionError> {
        let url = self.endpoint(keys::URL_DELETE_LIKE)?;

        let result = self.transport.send(ActionRequest::delete(url)).await;
        Ok(self.settle_unchecked(result, Gate::Success, || self.reload()))
    }

    /// Anonymous viewers are sent to the login page without any request
    pub(super) async fn place_like(&self) -> Result<ActionOutcome, ActionError> {
        let url = self.endpoint(keys::URL_PLACE_LIKE)?;

        if !self.context.is_logged_in() {
            let login_page = self.endpoint(keys::URL_LOGIN_USER_PAGE)?;
            return Ok(self.redirect(login_page));
        }

        let image_id = self.endpoint(keys::IMAGE_ID)?;
        let request = ActionRequest::post(url).with_json(json!({ "to_image_id": image_id }));

        let result = self.transport.send(request).await;
        Ok(self.settle_unchecked(result, Gate::Success, || self.reload()))
    }
}
