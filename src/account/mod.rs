mod accounts_widget;
mod core;
mod create_form;

pub use accounts_widget::AccountsWidget;
pub use core::{Account, AccountId};
pub use create_form::CreateAccountForm;
