//! The sidebar list of accounts.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use maud::{Markup, html};

use crate::{
    Error,
    account::{Account, AccountId},
    coordinator::{Coordinator, ModalName, PageName, Refresh, RenderParams, Services},
    dom::{ClickPath, Document, Region},
    endpoints::{ACCOUNT_ITEM, ACCOUNTS_PANEL, CREATE_ACCOUNT},
    gateway::EntityGateway,
    html::{CURRENCY_SIGN, format_sum},
    lock,
};

#[derive(Debug, Default)]
struct AccountList {
    accounts: Vec<Account>,
    active: Option<AccountId>,
}

/// Lists the user's accounts and switches the main view to the account
/// that is clicked.
///
/// The list is rebuilt from scratch on every update, it is never patched.
pub struct AccountsWidget {
    element: Region,
    list: Mutex<AccountList>,
    accounts: Arc<dyn EntityGateway<Account>>,
    coordinator: Arc<dyn Coordinator>,
}

impl AccountsWidget {
    /// Mount the widget on the accounts panel of `document`.
    ///
    /// The list stays empty until the first [Refresh::update].
    ///
    /// # Errors
    /// Returns [Error::EmptyElement] if the panel is missing.
    pub fn new(document: &Document, services: Services) -> Result<Self, Error> {
        let element = document
            .query(ACCOUNTS_PANEL)
            .ok_or(Error::EmptyElement(ACCOUNTS_PANEL))?;

        let widget = Self {
            element,
            list: Mutex::new(AccountList::default()),
            accounts: services.accounts,
            coordinator: services.coordinator,
        };
        widget.redraw();

        Ok(widget)
    }

    /// Handle a click inside the panel.
    ///
    /// The create affordance opens the new account modal, a click anywhere
    /// inside an account selects that account.
    pub async fn on_click(&self, path: &ClickPath) {
        if path.closest(CREATE_ACCOUNT).is_some() {
            self.open_create_account();
        } else if let Some(item) = path.closest(ACCOUNT_ITEM) {
            match &item.data_id {
                Some(id) => self.on_select_account(id).await,
                None => tracing::warn!("account item has no data-id"),
            }
        }
    }

    pub fn open_create_account(&self) {
        match self.coordinator.get_modal(ModalName::CreateAccount) {
            Some(modal) => modal.open(),
            None => tracing::warn!("cannot open the new account form"),
        }
    }

    /// Mark `id` as the only active account and show its transactions.
    pub async fn on_select_account(&self, id: &str) {
        lock(&self.list).active = Some(id.to_owned());
        self.redraw();

        self.coordinator
            .show_page(PageName::Transactions, RenderParams::for_account(id))
            .await;
    }

    pub fn active_account(&self) -> Option<AccountId> {
        lock(&self.list).active.clone()
    }

    /// Remove every rendered account. Safe to call on an empty list.
    pub fn clear(&self) {
        *lock(&self.list) = AccountList::default();
        self.redraw();
    }

    pub fn render_item(&self, account: Account) {
        lock(&self.list).accounts.push(account);
        self.redraw();
    }

    fn redraw(&self) {
        let view = accounts_panel_view(&lock(&self.list));
        self.element.replace(view);
    }
}

#[async_trait]
impl Refresh for AccountsWidget {
    /// Fetch the accounts of the signed-in user and replace the list.
    /// Does nothing when nobody is signed in.
    async fn update(&self) {
        if self.coordinator.current_user().is_none() {
            tracing::debug!("not listing accounts, nobody is signed in");
            return;
        }

        match self.accounts.list(None).await {
            Ok(accounts) => {
                self.clear();
                accounts
                    .into_iter()
                    .for_each(|account| self.render_item(account));
            }
            Err(error) => tracing::warn!("could not list accounts: {error}"),
        }
    }
}

fn accounts_panel_view(list: &AccountList) -> Markup {
    html!(
        li class="header"
        {
            "Счета"
            span class="pull-right create-account label label-success" { "Новый счёт" }
        }

        @for account in &list.accounts {
            li.account.active[list.active.as_deref() == Some(account.id.as_str())]
                data-id=(account.id)
            {
                a href="#"
                {
                    span { (account.name) }
                    " / "
                    span { (format_sum(account.sum)) " " (CURRENCY_SIGN) }
                }
            }
        }
    )
}
