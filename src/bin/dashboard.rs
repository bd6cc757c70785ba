use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
    sync::Arc,
};

use clap::Parser;

use budget_dashboard::{
    Account, AccountsWidget, App, Config, Confirm, Coordinator, CreateAccountForm,
    CreateTransactionForm, Document, FixedSession, HttpGateway, HttpTransport, ModalName,
    ModalWindow, PageName, RequestClient, Services, Topic, Transaction, TransactionType,
    TransactionsPage, TransactionsWidget, User, setup_logging,
};

/// Asks on stderr and reads the answer from stdin.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        if let Err(error) = io::stderr().flush() {
            tracing::debug!("could not flush the prompt: {error}");
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }

        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "д" | "да")
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(error) = setup_logging("info") {
        eprintln!("could not set up logging: {error}");
    }

    let config = Config::parse();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), budget_dashboard::Error> {
    let base_url = config.validate()?;
    tracing::info!("using the API at {base_url}");

    let client = RequestClient::new(Arc::new(HttpTransport::new(base_url)?));
    let user = config.user.as_deref().map(|name| User::new("", name));
    let app = Arc::new(App::new(Arc::new(FixedSession::new(user))));

    for name in ModalName::ALL {
        app.register_modal(name, Arc::new(ModalWindow::new(name)));
    }

    let services = Services {
        accounts: Arc::new(HttpGateway::<Account>::new(client.clone())),
        transactions: Arc::new(HttpGateway::<Transaction>::new(client)),
        coordinator: app.clone(),
        confirm: Arc::new(StdinConfirm),
    };
    let document = Document::dashboard();

    let page = Arc::new(TransactionsPage::new(&document, services.clone())?);
    app.register_page(PageName::Transactions, &page, &[Topic::Transactions]);

    let sidebar = Arc::new(AccountsWidget::new(&document, services.clone())?);
    app.register_widget(&sidebar, &[Topic::Accounts, Topic::Transactions]);

    let buttons = TransactionsWidget::new(&document, app.clone())?;

    let income_form = Arc::new(CreateTransactionForm::new(
        TransactionType::Income,
        &document,
        services.clone(),
    )?);
    let expense_form = Arc::new(CreateTransactionForm::new(
        TransactionType::Expense,
        &document,
        services.clone(),
    )?);
    app.register_form(&income_form, &[Topic::Accounts]);
    app.register_form(&expense_form, &[Topic::Accounts]);

    let account_form = CreateAccountForm::new(services);

    app.update().await;

    if let Some(name) = &config.new_account {
        sidebar.open_create_account();
        account_form.fields().set("name", name);
        account_form.submit().await;
    }

    if let Some(account_id) = &config.account_id {
        sidebar.on_select_account(account_id).await;

        let new_transaction = match (&config.new_income, &config.new_expense) {
            (Some(name), _) => Some((&income_form, name)),
            (None, Some(name)) => Some((&expense_form, name)),
            (None, None) => None,
        };
        if let Some((form, name)) = new_transaction {
            buttons.open_form(form.kind());
            form.fields().set("name", name);
            form.fields().set("sum", config.sum.unwrap_or_default());
            form.fields().set("account_id", account_id);
            form.submit().await;
        }

        if let Some(transaction_id) = &config.remove_transaction {
            page.remove_transaction(transaction_id).await;
        }

        if config.remove_account {
            page.remove_account().await;
        }
    }

    println!("{}", document.html());

    Ok(())
}
