use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::{
    account::Account,
    app::ModalWindow,
    coordinator::{
        ChangeEvent, Confirm, Coordinator, Modal, ModalName, PageName, RenderParams, Services,
    },
    gateway::{EntityGateway, GatewayError, GatewayResult},
    request::{Payload, PreparedRequest, RequestError, Transport, TransportResponse},
    transaction::Transaction,
    user::User,
};

/// A [Transport] that replays scripted responses in order.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Result<TransportResponse, RequestError>>>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: &serde_json::Value) {
        self.respond_text(status, &body.to_string());
    }

    pub(crate) fn respond_text(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(TransportResponse {
            status,
            body: body.to_owned(),
        }));
    }

    pub(crate) fn fail(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(RequestError::Transport(message.to_owned())));
    }

    pub(crate) fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse, RequestError> {
        self.requests.lock().unwrap().push(request);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RequestError::Transport("no response scripted".to_owned())))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GatewayCall {
    List(Option<Payload>),
    Get(String),
    Create(Payload),
    Remove(String),
}

/// An [EntityGateway] with scripted results.
///
/// Lists are keyed by the `account_id` of the filter ("" for no filter) and
/// entities by ID. Unscripted lists are empty, unscripted entities are
/// rejected, and creates and removes succeed. A gated call waits until the
/// sender returned by [FakeGateway::gate_list] or [FakeGateway::gate_get]
/// fires or is dropped.
pub(crate) struct FakeGateway<E> {
    lists: Mutex<HashMap<String, GatewayResult<Vec<E>>>>,
    entities: Mutex<HashMap<String, GatewayResult<E>>>,
    create_result: Mutex<GatewayResult<()>>,
    remove_result: Mutex<GatewayResult<()>>,
    list_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    get_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl<E> Default for FakeGateway<E> {
    fn default() -> Self {
        Self {
            lists: Mutex::new(HashMap::new()),
            entities: Mutex::new(HashMap::new()),
            create_result: Mutex::new(Ok(())),
            remove_result: Mutex::new(Ok(())),
            list_gates: Mutex::new(HashMap::new()),
            get_gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl<E> FakeGateway<E> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_list(&self, key: &str, result: GatewayResult<Vec<E>>) {
        self.lists.lock().unwrap().insert(key.to_owned(), result);
    }

    pub(crate) fn set_entity(&self, id: &str, result: GatewayResult<E>) {
        self.entities.lock().unwrap().insert(id.to_owned(), result);
    }

    pub(crate) fn set_create(&self, result: GatewayResult<()>) {
        *self.create_result.lock().unwrap() = result;
    }

    pub(crate) fn set_remove(&self, result: GatewayResult<()>) {
        *self.remove_result.lock().unwrap() = result;
    }

    pub(crate) fn gate_list(&self, key: &str) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        self.list_gates.lock().unwrap().insert(key.to_owned(), receiver);
        sender
    }

    pub(crate) fn gate_get(&self, id: &str) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        self.get_gates.lock().unwrap().insert(id.to_owned(), receiver);
        sender
    }

    pub(crate) fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn list_key(filter: Option<&Payload>) -> String {
    filter
        .and_then(|filter| filter.get("account_id"))
        .map(|id| id.to_string())
        .unwrap_or_default()
}

#[async_trait]
impl<E: Clone + Send + Sync + 'static> EntityGateway<E> for FakeGateway<E> {
    async fn list(&self, filter: Option<&Payload>) -> GatewayResult<Vec<E>> {
        self.record(GatewayCall::List(filter.cloned()));
        let key = list_key(filter);

        let gate = self.list_gates.lock().unwrap().remove(&key);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.lists
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get(&self, id: &str) -> GatewayResult<E> {
        self.record(GatewayCall::Get(id.to_owned()));

        let gate = self.get_gates.lock().unwrap().remove(id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.entities
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or(Err(GatewayError::Rejected(None)))
    }

    async fn create(&self, data: &Payload) -> GatewayResult<()> {
        self.record(GatewayCall::Create(data.clone()));
        self.create_result.lock().unwrap().clone()
    }

    async fn remove(&self, id: &str) -> GatewayResult<()> {
        self.record(GatewayCall::Remove(id.to_owned()));
        self.remove_result.lock().unwrap().clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CoordinatorCall {
    ShowPage(PageName, RenderParams),
    Update,
    UpdateWidgets,
    UpdateForms,
    Publish(ChangeEvent),
}

/// A [Coordinator] that records what it was asked to do.
pub(crate) struct RecordingCoordinator {
    user: Mutex<Option<User>>,
    modals: HashMap<ModalName, Arc<ModalWindow>>,
    calls: Mutex<Vec<CoordinatorCall>>,
}

impl RecordingCoordinator {
    pub(crate) fn new(user: Option<User>) -> Self {
        Self {
            user: Mutex::new(user),
            modals: ModalName::ALL
                .into_iter()
                .map(|name| (name, Arc::new(ModalWindow::new(name))))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn modal(&self, name: ModalName) -> Arc<ModalWindow> {
        self.modals[&name].clone()
    }

    pub(crate) fn calls(&self) -> Vec<CoordinatorCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: CoordinatorCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Coordinator for RecordingCoordinator {
    fn get_modal(&self, name: ModalName) -> Option<Arc<dyn Modal>> {
        self.modals
            .get(&name)
            .map(|modal| modal.clone() as Arc<dyn Modal>)
    }

    async fn show_page(&self, name: PageName, params: RenderParams) {
        self.record(CoordinatorCall::ShowPage(name, params));
    }

    async fn update(&self) {
        self.record(CoordinatorCall::Update);
    }

    async fn update_widgets(&self) {
        self.record(CoordinatorCall::UpdateWidgets);
    }

    async fn update_forms(&self) {
        self.record(CoordinatorCall::UpdateForms);
    }

    fn current_user(&self) -> Option<User> {
        self.user.lock().unwrap().clone()
    }

    async fn publish(&self, event: ChangeEvent) {
        self.record(CoordinatorCall::Publish(event));
    }
}

/// A [Confirm] that always gives the same answer and remembers the prompts.
pub(crate) struct ScriptedConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub(crate) fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_owned());
        self.answer
    }
}

/// Fakes for every collaborator of a component.
pub(crate) struct Harness {
    pub(crate) accounts: Arc<FakeGateway<Account>>,
    pub(crate) transactions: Arc<FakeGateway<Transaction>>,
    pub(crate) coordinator: Arc<RecordingCoordinator>,
    pub(crate) confirm: Arc<ScriptedConfirm>,
}

impl Harness {
    /// A signed-in user who answers "yes" to every prompt.
    pub(crate) fn new() -> Self {
        Self::with(Some(User::new("1", "Alice")), true)
    }

    pub(crate) fn with(user: Option<User>, confirm: bool) -> Self {
        Self {
            accounts: Arc::new(FakeGateway::new()),
            transactions: Arc::new(FakeGateway::new()),
            coordinator: Arc::new(RecordingCoordinator::new(user)),
            confirm: Arc::new(ScriptedConfirm::new(confirm)),
        }
    }

    pub(crate) fn services(&self) -> Services {
        Services {
            accounts: self.accounts.clone(),
            transactions: self.transactions.clone(),
            coordinator: self.coordinator.clone(),
            confirm: self.confirm.clone(),
        }
    }
}
