//! Command line configuration for the dashboard binary.

use clap::Parser;
use reqwest::Url;

use crate::Error;

/// Render the budget dashboard against a running API server.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// The address of the API server.
    #[arg(long, env = "DASHBOARD_BASE_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// The name of the signed-in user. Nothing is fetched without one.
    #[arg(long, env = "DASHBOARD_USER")]
    pub user: Option<String>,

    /// Select this account after the first update.
    #[arg(long)]
    pub account_id: Option<String>,

    /// Create an account with this name before selecting one.
    #[arg(long, value_name = "NAME")]
    pub new_account: Option<String>,

    /// Record an income with this name in the selected account.
    #[arg(
        long,
        value_name = "NAME",
        requires = "account_id",
        requires = "sum",
        conflicts_with = "new_expense"
    )]
    pub new_income: Option<String>,

    /// Record an expense with this name in the selected account.
    #[arg(long, value_name = "NAME", requires = "account_id", requires = "sum")]
    pub new_expense: Option<String>,

    /// The amount of the new income or expense.
    #[arg(long)]
    pub sum: Option<f64>,

    /// Remove this transaction from the selected account.
    #[arg(long, requires = "account_id")]
    pub remove_transaction: Option<String>,

    /// Remove the selected account.
    #[arg(long, requires = "account_id")]
    pub remove_account: bool,
}

impl Config {
    /// Parse and check the base URL.
    ///
    /// # Errors
    /// Returns [Error::InvalidConfig] if the base URL is not an absolute
    /// `http` or `https` URL.
    pub fn validate(&self) -> Result<Url, Error> {
        let url = Url::parse(&self.base_url)
            .map_err(|error| Error::InvalidConfig(format!("base URL {:?}: {error}", self.base_url)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(Error::InvalidConfig(format!(
                "base URL {:?} has unsupported scheme {scheme:?}",
                self.base_url
            ))),
        }
    }
}
