use serde::Deserialize;

use crate::{endpoints, gateway::{Entity, deserialize_id}};

pub type AccountId = String;

/// A bank account, card or wallet and the money it holds.
///
/// Accounts are owned by the server and only live as long as the view that
/// fetched them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    /// The id for the account.
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: AccountId,
    /// The name shown in the sidebar and the page title.
    pub name: String,
    /// The balance.
    #[serde(default)]
    pub sum: f64,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, name: impl Into<String>, sum: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sum,
        }
    }
}

impl Entity for Account {
    const URL: &'static str = endpoints::ACCOUNT;
}
