//! The page that shows the name and the transactions of a single account.
//!
//! Rendering issues two independent requests, one for the account and one
//! for its transactions. Each updates only its own region when it resolves,
//! so a failure or delay of one never holds back the other.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use maud::{Markup, html};

use crate::{
    Error,
    account::Account,
    coordinator::{ChangeEvent, Confirm, Coordinator, Page, Refresh, RenderParams, Services},
    dom::{ClickPath, Document, Region},
    endpoints::{CONTENT, CONTENT_TITLE, REMOVE_ACCOUNT, REMOVE_TRANSACTION},
    gateway::EntityGateway,
    html::{CURRENCY_SIGN, format_date, format_sum},
    lock,
    transaction::Transaction,
};

/// The title shown when no account is selected.
pub const TITLE_PLACEHOLDER: &str = "Название счёта";

const REMOVE_ACCOUNT_PROMPT: &str = "Вы действительно хотите удалить счёт?";
const REMOVE_TRANSACTION_PROMPT: &str = "Вы действительно хотите удалить эту транзакцию?";

pub struct TransactionsPage {
    title: Region,
    content: Region,
    accounts: Arc<dyn EntityGateway<Account>>,
    transactions: Arc<dyn EntityGateway<Transaction>>,
    coordinator: Arc<dyn Coordinator>,
    confirm: Arc<dyn Confirm>,
    last_options: Mutex<Option<RenderParams>>,
    /// Bumped by every render and clear. Responses carrying an older
    /// generation are dropped.
    generation: AtomicU64,
}

impl TransactionsPage {
    /// Mount the page on the title and content regions of `document`.
    ///
    /// # Errors
    /// Returns [Error::EmptyElement] if either region is missing.
    pub fn new(document: &Document, services: Services) -> Result<Self, Error> {
        let title = document
            .query(CONTENT_TITLE)
            .ok_or(Error::EmptyElement(CONTENT_TITLE))?;
        let content = document
            .query(CONTENT)
            .ok_or(Error::EmptyElement(CONTENT))?;

        Ok(Self {
            title,
            content,
            accounts: services.accounts,
            transactions: services.transactions,
            coordinator: services.coordinator,
            confirm: services.confirm,
            last_options: Mutex::new(None),
            generation: AtomicU64::new(0),
        })
    }

    /// The parameters of the last render, `None` before the first render and
    /// after a clear.
    pub fn last_options(&self) -> Option<RenderParams> {
        lock(&self.last_options).clone()
    }

    /// Dispatch a click on the page to the remove account or remove
    /// transaction action, whichever button the click landed in.
    pub async fn on_click(&self, path: &ClickPath) {
        if path.closest(REMOVE_ACCOUNT).is_some() {
            self.remove_account().await;
        } else if let Some(button) = path.closest(REMOVE_TRANSACTION) {
            match &button.data_id {
                Some(id) => self.remove_transaction(id).await,
                None => tracing::warn!("remove transaction button has no data-id"),
            }
        }
    }

    /// Remove the account that is currently shown, once the user confirms.
    ///
    /// On success the page is cleared straight away and every component
    /// that depends on accounts is refreshed. Failures leave the page as is.
    pub async fn remove_account(&self) {
        let Some(account_id) = self.last_options().and_then(|params| params.account_id()) else {
            tracing::debug!("no account is shown, nothing to remove");
            return;
        };

        if !self.confirm.confirm(REMOVE_ACCOUNT_PROMPT) {
            tracing::debug!("removal of account {account_id} cancelled");
            return;
        }

        match self.accounts.remove(&account_id).await {
            Ok(()) => {
                self.clear();
                self.coordinator
                    .publish(ChangeEvent::AccountRemoved { id: account_id })
                    .await;
            }
            Err(error) => tracing::warn!("could not remove account {account_id}: {error}"),
        }
    }

    /// Remove a transaction, once the user confirms.
    pub async fn remove_transaction(&self, id: &str) {
        if !self.confirm.confirm(REMOVE_TRANSACTION_PROMPT) {
            tracing::debug!("removal of transaction {id} cancelled");
            return;
        }

        match self.transactions.remove(id).await {
            Ok(()) => {
                self.coordinator
                    .publish(ChangeEvent::TransactionRemoved { id: id.to_owned() })
                    .await
            }
            Err(error) => tracing::warn!("could not remove transaction {id}: {error}"),
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn render_title(&self, name: &str) {
        self.title.replace(html!((name)));
    }

    fn render_transactions(&self, transactions: &[Transaction]) {
        self.content.replace(transactions_view(transactions));
    }
}

#[async_trait]
impl Refresh for TransactionsPage {
    /// Render again with the last parameters. Does nothing if the page has
    /// not been rendered or has been cleared since.
    async fn update(&self) {
        match self.last_options() {
            Some(params) => self.render(params).await,
            None => tracing::debug!("transactions page has nothing to refresh"),
        }
    }
}

#[async_trait]
impl Page for TransactionsPage {
    async fn render(&self, params: RenderParams) {
        let Some(account_id) = params.account_id() else {
            tracing::debug!("not rendering transactions without an account");
            return;
        };

        *lock(&self.last_options) = Some(params.clone());
        let generation = self.next_generation();

        let title = async {
            match self.accounts.get(&account_id).await {
                Ok(account) if self.is_current(generation) => self.render_title(&account.name),
                Ok(_) => tracing::debug!("dropping superseded response for account {account_id}"),
                Err(error) => tracing::warn!("could not get account {account_id}: {error}"),
            }
        };

        let list = async {
            match self.transactions.list(Some(params.as_payload())).await {
                Ok(transactions) if self.is_current(generation) => {
                    self.render_transactions(&transactions)
                }
                Ok(_) => tracing::debug!(
                    "dropping superseded transactions response for account {account_id}"
                ),
                Err(error) => {
                    tracing::warn!("could not list transactions of account {account_id}: {error}")
                }
            }
        };

        tokio::join!(title, list);
    }

    fn clear(&self) {
        self.next_generation();
        self.render_transactions(&[]);
        self.render_title(TITLE_PLACEHOLDER);
        *lock(&self.last_options) = None;
    }
}

/// Newest first: the server lists transactions oldest first.
fn transactions_view(transactions: &[Transaction]) -> Markup {
    html!(
        @for transaction in transactions.iter().rev() {
            (transaction_view(transaction))
        }
    )
}

fn transaction_view(transaction: &Transaction) -> Markup {
    html!(
        div class={ "transaction transaction_" (transaction.kind) " row" }
        {
            div class="col-md-7 transaction__details"
            {
                div class="transaction__icon"
                {
                    span class="fa fa-money fa-2x" {}
                }
                div class="transaction__info"
                {
                    h4 class="transaction__title" { (transaction.name) }
                    div class="transaction__date" { (format_date(&transaction.created_at)) }
                }
            }
            div class="col-md-3"
            {
                div class="transaction__summ"
                {
                    (format_sum(transaction.sum)) " "
                    span class="currency" { (CURRENCY_SIGN) }
                }
            }
            div class="col-md-2 transaction__controls"
            {
                button class="btn btn-danger transaction__remove" data-id=(transaction.id)
                {
                    i class="fa fa-trash" {}
                }
            }
        }
    )
}
