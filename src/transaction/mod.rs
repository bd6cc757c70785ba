mod core;
mod create_form;
mod transactions_page;
mod transactions_widget;

pub use core::{Transaction, TransactionId, TransactionType};
pub use create_form::CreateTransactionForm;
pub use transactions_page::{TITLE_PLACEHOLDER, TransactionsPage};
pub use transactions_widget::TransactionsWidget;
