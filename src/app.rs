//! The concrete [Coordinator]: a registry of the dashboard's live components.
//!
//! Components are registered once they are constructed and are held weakly,
//! so dropping a component removes it from every broadcast. Each registration
//! names the [Topic]s the component depends on, and [App::publish] only
//! refreshes the components interested in the topic of the event.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, Weak,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;

use crate::{
    coordinator::{
        ChangeEvent, Coordinator, Modal, ModalName, Page, PageName, Refresh, RenderParams, Topic,
    },
    lock,
    user::{Session, User},
};

/// A modal window. Only its open/closed state is tracked.
#[derive(Debug)]
pub struct ModalWindow {
    name: ModalName,
    open: AtomicBool,
}

impl ModalWindow {
    pub fn new(name: ModalName) -> Self {
        Self {
            name,
            open: AtomicBool::new(false),
        }
    }
}

impl Modal for ModalWindow {
    fn open(&self) {
        tracing::debug!("opening modal {}", self.name);
        self.open.store(true, Ordering::SeqCst);
    }

    fn close(&self) {
        tracing::debug!("closing modal {}", self.name);
        self.open.store(false, Ordering::SeqCst);
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Widget,
    Form,
}

struct Subscriber {
    role: Role,
    topics: Vec<Topic>,
    component: Weak<dyn Refresh>,
}

struct PageEntry {
    topics: Vec<Topic>,
    page: Weak<dyn Page>,
}

/// Wires pages, widgets, forms and modals together without them knowing
/// about each other.
pub struct App {
    session: Arc<dyn Session>,
    modals: Mutex<HashMap<ModalName, Arc<dyn Modal>>>,
    pages: Mutex<HashMap<PageName, PageEntry>>,
    active_page: Mutex<Option<PageName>>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl App {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self {
            session,
            modals: Mutex::new(HashMap::new()),
            pages: Mutex::new(HashMap::new()),
            active_page: Mutex::new(None),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn register_modal(&self, name: ModalName, modal: Arc<dyn Modal>) {
        lock(&self.modals).insert(name, modal);
    }

    pub fn register_page<P: Page + 'static>(&self, name: PageName, page: &Arc<P>, topics: &[Topic]) {
        let page: Arc<dyn Page> = page.clone();

        lock(&self.pages).insert(
            name,
            PageEntry {
                topics: topics.to_vec(),
                page: Arc::downgrade(&page),
            },
        );
    }

    pub fn register_widget<W: Refresh + 'static>(&self, widget: &Arc<W>, topics: &[Topic]) {
        self.subscribe(Role::Widget, widget.clone(), topics);
    }

    pub fn register_form<F: Refresh + 'static>(&self, form: &Arc<F>, topics: &[Topic]) {
        self.subscribe(Role::Form, form.clone(), topics);
    }

    /// The page that was last shown, if any.
    pub fn active_page(&self) -> Option<PageName> {
        *lock(&self.active_page)
    }

    fn subscribe(&self, role: Role, component: Arc<dyn Refresh>, topics: &[Topic]) {
        lock(&self.subscribers).push(Subscriber {
            role,
            topics: topics.to_vec(),
            component: Arc::downgrade(&component),
        });
    }

    /// Upgrade every live subscriber accepted by `filter`, forgetting the
    /// ones that have been dropped.
    fn live_subscribers(&self, filter: impl Fn(&Subscriber) -> bool) -> Vec<Arc<dyn Refresh>> {
        let mut subscribers = lock(&self.subscribers);
        subscribers.retain(|subscriber| subscriber.component.strong_count() > 0);

        subscribers
            .iter()
            .filter(|subscriber| filter(subscriber))
            .filter_map(|subscriber| subscriber.component.upgrade())
            .collect()
    }

    fn page(&self, name: PageName) -> Option<(Arc<dyn Page>, Vec<Topic>)> {
        let pages = lock(&self.pages);
        let entry = pages.get(&name)?;

        entry
            .page
            .upgrade()
            .map(|page| (page, entry.topics.clone()))
    }

    async fn update_role(&self, role: Role) {
        for component in self.live_subscribers(|subscriber| subscriber.role == role) {
            component.update().await;
        }
    }

    async fn update_active_page(&self, topic: Option<Topic>) {
        let Some(name) = self.active_page() else {
            return;
        };

        match self.page(name) {
            Some((page, topics)) if topic.is_none_or(|topic| topics.contains(&topic)) => {
                page.update().await
            }
            Some(_) => {}
            None => tracing::debug!("active page {name} is no longer mounted"),
        }
    }
}

#[async_trait]
impl Coordinator for App {
    fn get_modal(&self, name: ModalName) -> Option<Arc<dyn Modal>> {
        let modal = lock(&self.modals).get(&name).cloned();

        if modal.is_none() {
            tracing::warn!("no modal registered as {name}");
        }

        modal
    }

    async fn show_page(&self, name: PageName, params: RenderParams) {
        *lock(&self.active_page) = Some(name);

        match self.page(name) {
            Some((page, _)) => page.render(params).await,
            None => tracing::warn!("no page registered as {name}"),
        }
    }

    async fn update(&self) {
        self.update_widgets().await;
        self.update_active_page(None).await;
        self.update_forms().await;
    }

    async fn update_widgets(&self) {
        self.update_role(Role::Widget).await;
    }

    async fn update_forms(&self) {
        self.update_role(Role::Form).await;
    }

    fn current_user(&self) -> Option<User> {
        self.session.current()
    }

    async fn publish(&self, event: ChangeEvent) {
        let topic = event.topic();
        tracing::info!("publishing {event:?}");

        for component in self.live_subscribers(|subscriber| subscriber.topics.contains(&topic)) {
            component.update().await;
        }

        self.update_active_page(Some(topic)).await;
    }
}
