// actions/account.rs - logout and account deletion

use super::{ActionController, ActionOutcome, Gate, CONFIRM_DELETE_ACCOUNT};
use crate::context::keys;
use crate::error::ActionError;
use crate::transport::ActionRequest;

impl ActionController {
    pub(super) async fn logout(&self) -> Result<ActionOutcome, ActionError> {
        let url = self.endpoint(keys::URL_LOGOUT_USER)?;
        let home = self.endpoint(keys::URL_HOME_PAGE)?;

        let result = self.transport.send(ActionRequest::post(url)).await;
        Ok(self.settle_unchecked(result, Gate::Settled, || self.redirect(home)))
    }

    pub(super) async fn delete_account(&self) -> Result<ActionOutcome, ActionError> {
        let url = self.endpoint(keys::URL_DELETE_USER)?;
        let home = self.endpoint(keys::URL_HOME_PAGE)?;

        if !self.confirm.confirm(CONFIRM_DELETE_ACCOUNT) {
            return Ok(ActionOutcome::Cancelled);
        }

        let result = self.transport.send(ActionRequest::delete(url)).await;
        Ok(self.settle_unchecked(result, Gate::Settled, || self.redirect(home)))
    }
}
