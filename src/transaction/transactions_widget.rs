//! The buttons that open the new income and new expense forms.

use std::sync::Arc;

use maud::{Markup, html};

use crate::{
    Error,
    coordinator::{Coordinator, ModalName},
    dom::{ClickPath, Document},
    endpoints::{CREATE_EXPENSE_BUTTON, CREATE_INCOME_BUTTON, TRANSACTIONS_PANEL},
    transaction::TransactionType,
};

pub struct TransactionsWidget {
    coordinator: Arc<dyn Coordinator>,
}

impl TransactionsWidget {
    /// Render the buttons into the transactions panel of `document`.
    ///
    /// # Errors
    /// Returns [Error::EmptyElement] if the panel is missing.
    pub fn new(document: &Document, coordinator: Arc<dyn Coordinator>) -> Result<Self, Error> {
        let element = document
            .query(TRANSACTIONS_PANEL)
            .ok_or(Error::EmptyElement(TRANSACTIONS_PANEL))?;
        element.replace(transactions_panel_view());

        Ok(Self { coordinator })
    }

    pub fn on_click(&self, path: &ClickPath) {
        if path.closest(CREATE_INCOME_BUTTON).is_some() {
            self.open_form(TransactionType::Income);
        } else if path.closest(CREATE_EXPENSE_BUTTON).is_some() {
            self.open_form(TransactionType::Expense);
        }
    }

    /// Open the modal with the form for a new income or expense.
    pub fn open_form(&self, kind: TransactionType) {
        let name = match kind {
            TransactionType::Income => ModalName::NewIncome,
            TransactionType::Expense => ModalName::NewExpense,
        };

        match self.coordinator.get_modal(name) {
            Some(modal) => modal.open(),
            None => tracing::warn!("cannot open modal {name}"),
        }
    }
}

fn transactions_panel_view() -> Markup {
    html!(
        button class="btn btn-success btn-block create-income-button"
        {
            span class="fa fa-thumbs-o-up" {}
            " Доход"
        }
        button class="btn btn-danger btn-block create-expense-button"
        {
            span class="fa fa-thumbs-o-down" {}
            " Расход"
        }
    )
}
