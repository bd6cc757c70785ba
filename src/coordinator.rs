//! The capabilities components use to reach each other.
//!
//! Pages, widgets and forms never hold references to one another. They are
//! handed a [Coordinator] when they are constructed and report successful
//! mutations to it as a [ChangeEvent]. The coordinator decides who needs to
//! refresh.

use std::{fmt, sync::Arc};

use async_trait::async_trait;

use crate::{
    account::Account,
    gateway::EntityGateway,
    request::{Payload, Primitive},
    transaction::Transaction,
    user::User,
};

/// The modals of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalName {
    NewIncome,
    NewExpense,
    CreateAccount,
}

impl ModalName {
    pub const ALL: [ModalName; 3] = [
        ModalName::NewIncome,
        ModalName::NewExpense,
        ModalName::CreateAccount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModalName::NewIncome => "newIncome",
            ModalName::NewExpense => "newExpense",
            ModalName::CreateAccount => "createAccount",
        }
    }
}

impl fmt::Display for ModalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pages that can fill the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageName {
    Transactions,
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageName::Transactions => f.write_str("transactions"),
        }
    }
}

/// The kinds of server data a component can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Accounts,
    Transactions,
}

/// A mutation that the server has confirmed.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    AccountCreated,
    AccountRemoved { id: String },
    TransactionCreated,
    TransactionRemoved { id: String },
}

impl ChangeEvent {
    pub fn topic(&self) -> Topic {
        match self {
            ChangeEvent::AccountCreated | ChangeEvent::AccountRemoved { .. } => Topic::Accounts,
            ChangeEvent::TransactionCreated | ChangeEvent::TransactionRemoved { .. } => {
                Topic::Transactions
            }
        }
    }
}

/// The parameters a page was last rendered with.
///
/// The contents are opaque to everyone but the page, which for the
/// transactions page means `{ account_id }`. They are also sent as the
/// filter of the transaction list request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderParams(Payload);

impl RenderParams {
    pub fn new(payload: Payload) -> Self {
        Self(payload)
    }

    pub fn for_account(account_id: impl Into<String>) -> Self {
        Self(Payload::new().with("account_id", account_id.into()))
    }

    /// The selected account, if any.
    pub fn account_id(&self) -> Option<String> {
        match self.0.get("account_id") {
            Some(Primitive::Text(id)) if id.is_empty() => None,
            Some(id) => Some(id.to_string()),
            None => None,
        }
    }

    pub fn as_payload(&self) -> &Payload {
        &self.0
    }
}

/// A synchronous yes/no prompt shown before destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Anything that can rebuild itself from freshly fetched data.
#[async_trait]
pub trait Refresh: Send + Sync {
    async fn update(&self);
}

/// A view that fills the main area of the dashboard.
#[async_trait]
pub trait Page: Refresh {
    async fn render(&self, params: RenderParams);

    /// Show the empty state and forget the last render parameters.
    fn clear(&self);
}

pub trait Modal: Send + Sync {
    fn open(&self);
    fn close(&self);
    fn is_open(&self) -> bool;
}

/// How components reach pages, widgets, forms and modals they do not own.
#[async_trait]
pub trait Coordinator: Send + Sync {
    fn get_modal(&self, name: ModalName) -> Option<Arc<dyn Modal>>;

    /// Make `name` the active page and render it with `params`.
    async fn show_page(&self, name: PageName, params: RenderParams);

    /// Refresh every widget, the active page and every form.
    async fn update(&self);

    async fn update_widgets(&self);

    async fn update_forms(&self);

    fn current_user(&self) -> Option<User>;

    /// Refresh every live component interested in the topic of `event`.
    async fn publish(&self, event: ChangeEvent);
}

/// The collaborators every component is constructed with.
#[derive(Clone)]
pub struct Services {
    pub accounts: Arc<dyn EntityGateway<Account>>,
    pub transactions: Arc<dyn EntityGateway<Transaction>>,
    pub coordinator: Arc<dyn Coordinator>,
    pub confirm: Arc<dyn Confirm>,
}
