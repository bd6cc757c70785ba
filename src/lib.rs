//! The client side of a personal budget dashboard.
//!
//! Components (pages, widgets and forms) render into regions of a
//! [Document] and fetch their data through an [EntityGateway], which wraps
//! the single-shot [RequestClient]. After a confirmed mutation a component
//! publishes a [ChangeEvent] to the [Coordinator], and the [App] refreshes
//! every component interested in it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error as ThisError;

mod account;
mod app;
mod config;
mod coordinator;
mod dom;
mod endpoints;
mod form;
mod gateway;
mod html;
mod logging;
mod request;
#[cfg(test)]
mod test_utils;
mod transaction;
mod transport;
mod user;

pub use account::{Account, AccountId, AccountsWidget, CreateAccountForm};
pub use app::{App, ModalWindow};
pub use config::Config;
pub use coordinator::{
    ChangeEvent, Confirm, Coordinator, Modal, ModalName, Page, PageName, Refresh, RenderParams,
    Services, Topic,
};
pub use dom::{ClickPath, Document, Node, Region};
pub use form::FormFields;
pub use gateway::{ApiResponse, Entity, EntityGateway, GatewayError, GatewayResult, HttpGateway};
pub use logging::{LOG_BODY_LENGTH_LIMIT, setup_logging};
pub use request::{
    Method, Payload, PreparedRequest, Primitive, RequestClient, RequestError, RequestOptions,
    Transport, TransportResponse, prepare,
};
pub use transaction::{
    CreateTransactionForm, TITLE_PLACEHOLDER, Transaction, TransactionId, TransactionType,
    TransactionsPage, TransactionsWidget,
};
pub use transport::HttpTransport;
pub use user::{FixedSession, Session, User};

/// The errors raised while wiring the dashboard together.
#[derive(Debug, ThisError, PartialEq)]
pub enum Error {
    /// A component was mounted on a document that lacks the region it
    /// renders into.
    #[error("the document has no element matching \"{0}\"")]
    EmptyElement(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not build the HTTP client: {0}")]
    HttpClient(String),

    #[error("invalid CSS selector {0}")]
    InvalidSelector(String),

    #[error("no element matches \"{0}\"")]
    NoMatchingElement(String),
}

/// Lock `mutex`, carrying on with the data if a holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
