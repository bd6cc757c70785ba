//! The server resource URLs and the markup hooks of the host document.
//!
//! For resources addressed by ID, e.g. '/account/7', use [format_endpoint].

/// The route to access accounts.
pub const ACCOUNT: &str = "/account";
/// The route to access transactions.
pub const TRANSACTION: &str = "/transaction";

/// The element that shows the name of the selected account.
pub const CONTENT_TITLE: &str = ".content-title";
/// The element that holds the transactions of the selected account.
pub const CONTENT: &str = ".content";
/// The button that removes the selected account.
pub const REMOVE_ACCOUNT: &str = ".remove-account";
/// The per-row button that removes a transaction, carries the ID in `data-id`.
pub const REMOVE_TRANSACTION: &str = ".transaction__remove";

/// The sidebar list of accounts.
pub const ACCOUNTS_PANEL: &str = ".accounts-panel";
/// A single account in the sidebar, carries the ID in `data-id`.
pub const ACCOUNT_ITEM: &str = ".account";
/// The sidebar affordance that opens the new account modal.
pub const CREATE_ACCOUNT: &str = ".create-account";

/// The panel with the new income and new expense buttons.
pub const TRANSACTIONS_PANEL: &str = ".transactions-panel";
pub const CREATE_INCOME_BUTTON: &str = ".create-income-button";
pub const CREATE_EXPENSE_BUTTON: &str = ".create-expense-button";

/// The account selector of the new income form.
pub const INCOME_ACCOUNTS_LIST: &str = "#income-accounts-list";
/// The account selector of the new expense form.
pub const EXPENSE_ACCOUNTS_LIST: &str = "#expense-accounts-list";

/// Every region a complete dashboard document provides.
pub const DOCUMENT_REGIONS: [&str; 6] = [
    CONTENT_TITLE,
    CONTENT,
    ACCOUNTS_PANEL,
    TRANSACTIONS_PANEL,
    INCOME_ACCOUNTS_LIST,
    EXPENSE_ACCOUNTS_LIST,
];

/// Append `id` as the last path segment of `endpoint`.
pub fn format_endpoint(endpoint: &str, id: &str) -> String {
    format!("{endpoint}/{id}")
}
