//! The form inside the new income and new expense modals.

use std::sync::Arc;

use async_trait::async_trait;
use maud::{Markup, html};

use crate::{
    Error,
    account::Account,
    coordinator::{ChangeEvent, Coordinator, ModalName, Refresh, Services},
    dom::{Document, Region},
    endpoints::{EXPENSE_ACCOUNTS_LIST, INCOME_ACCOUNTS_LIST},
    form::FormFields,
    gateway::EntityGateway,
    transaction::{Transaction, TransactionType},
};

/// Creates an income or an expense against an account picked from a list.
pub struct CreateTransactionForm {
    kind: TransactionType,
    accounts_list: Region,
    fields: FormFields,
    accounts: Arc<dyn EntityGateway<Account>>,
    transactions: Arc<dyn EntityGateway<Transaction>>,
    coordinator: Arc<dyn Coordinator>,
}

impl CreateTransactionForm {
    /// Mount the form on the account selector for `kind`.
    ///
    /// # Errors
    /// Returns [Error::EmptyElement] if the selector is missing.
    pub fn new(kind: TransactionType, document: &Document, services: Services) -> Result<Self, Error> {
        let selector = match kind {
            TransactionType::Income => INCOME_ACCOUNTS_LIST,
            TransactionType::Expense => EXPENSE_ACCOUNTS_LIST,
        };
        let accounts_list = document
            .query(selector)
            .ok_or(Error::EmptyElement(selector))?;

        Ok(Self {
            kind,
            accounts_list,
            fields: FormFields::new(),
            accounts: services.accounts,
            transactions: services.transactions,
            coordinator: services.coordinator,
        })
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Replace the options of the account selector with the current accounts.
    pub async fn render_accounts_list(&self) {
        match self.accounts.list(None).await {
            Ok(accounts) => self.accounts_list.replace(account_options_view(&accounts)),
            Err(error) => tracing::warn!("could not list accounts for the {} form: {error}", self.kind),
        }
    }

    /// Create the transaction from the current fields.
    ///
    /// On success the fields are reset, both transaction modals are closed
    /// and the change is published. On failure the form is left as it is.
    pub async fn submit(&self) {
        let data = self.fields.data().with("type", self.kind.as_str());

        match self.transactions.create(&data).await {
            Ok(()) => {
                self.fields.reset();

                [ModalName::NewIncome, ModalName::NewExpense]
                    .into_iter()
                    .filter_map(|name| self.coordinator.get_modal(name))
                    .for_each(|modal| modal.close());

                self.coordinator
                    .publish(ChangeEvent::TransactionCreated)
                    .await;
            }
            Err(error) => tracing::warn!("could not create {}: {error}", self.kind),
        }
    }
}

#[async_trait]
impl Refresh for CreateTransactionForm {
    async fn update(&self) {
        self.render_accounts_list().await;
    }
}

fn account_options_view(accounts: &[Account]) -> Markup {
    html!(
        @for account in accounts {
            option value=(account.id) { (account.name) }
        }
    )
}
