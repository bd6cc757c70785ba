//! The form inside the new account modal.

use std::sync::Arc;

use crate::{
    account::Account,
    coordinator::{ChangeEvent, Coordinator, ModalName, Services},
    form::FormFields,
    gateway::EntityGateway,
};

pub struct CreateAccountForm {
    fields: FormFields,
    accounts: Arc<dyn EntityGateway<Account>>,
    coordinator: Arc<dyn Coordinator>,
}

impl CreateAccountForm {
    pub fn new(services: Services) -> Self {
        Self {
            fields: FormFields::new(),
            accounts: services.accounts,
            coordinator: services.coordinator,
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Create an account from the current fields.
    ///
    /// On success the fields are reset, the modal is closed and the change is
    /// published. On failure the form is left as it is.
    pub async fn submit(&self) {
        match self.accounts.create(&self.fields.data()).await {
            Ok(()) => {
                self.fields.reset();

                if let Some(modal) = self.coordinator.get_modal(ModalName::CreateAccount) {
                    modal.close();
                }

                self.coordinator.publish(ChangeEvent::AccountCreated).await;
            }
            Err(error) => tracing::warn!("could not create account: {error}"),
        }
    }
}
