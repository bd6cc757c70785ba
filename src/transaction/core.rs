use std::fmt;

use serde::Deserialize;

use crate::{
    account::AccountId,
    endpoints,
    gateway::{Entity, deserialize_id},
};

pub type TransactionId = String;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An income or expense recorded against an account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub name: String,
    #[serde(default)]
    pub sum: f64,
    /// When the transaction happened, formatted as `2019-03-10 03:20:41`.
    #[serde(default)]
    pub created_at: String,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub account_id: AccountId,
}

impl Entity for Transaction {
    const URL: &'static str = endpoints::TRANSACTION;
}
