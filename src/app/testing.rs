//! Scripted collaborators for application tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::criteria::{Criteria, OperationResult};
use crate::errors::RepositoryError;
use crate::i18n::I18n;
use crate::models::{BusinessObject, BusinessPartnerGroup, ContactPerson, Customer};
use crate::registry::{ServicesManager, Workbench};
use crate::repository::BoRepository;
use crate::view::{
    BoChooseView, BoEditView, MessageAction, MessageType, MessageView, Selection,
};

/// Repository with scripted results. Unscripted calls succeed with an
/// empty result set (fetch) or echo the record back cleaned (save).
pub struct MockRepository<T: BusinessObject> {
    fetch_results: Mutex<VecDeque<Result<OperationResult<T>, RepositoryError>>>,
    save_results: Mutex<VecDeque<Result<OperationResult<T>, RepositoryError>>>,
    pub fetched_criteria: Mutex<Vec<Criteria>>,
    pub saved_records: Mutex<Vec<T>>,
}

impl<T: BusinessObject> MockRepository<T> {
    pub fn new() -> Self {
        Self {
            fetch_results: Mutex::new(VecDeque::new()),
            save_results: Mutex::new(VecDeque::new()),
            fetched_criteria: Mutex::new(Vec::new()),
            saved_records: Mutex::new(Vec::new()),
        }
    }

    pub fn push_fetch(&self, result: Result<OperationResult<T>, RepositoryError>) {
        self.fetch_results.lock().unwrap().push_back(result);
    }

    pub fn push_save(&self, result: Result<OperationResult<T>, RepositoryError>) {
        self.save_results.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl<T: BusinessObject> BoRepository<T> for MockRepository<T> {
    async fn fetch(&self, criteria: &Criteria) -> Result<OperationResult<T>, RepositoryError> {
        self.fetched_criteria.lock().unwrap().push(criteria.clone());
        self.fetch_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(OperationResult::success(Vec::new())))
    }

    async fn save(&self, record: &T) -> Result<OperationResult<T>, RepositoryError> {
        self.saved_records.lock().unwrap().push(record.clone());
        self.save_results.lock().unwrap().pop_front().unwrap_or_else(|| {
            let mut saved = record.clone();
            saved.mark_clean();
            Ok(OperationResult::success(vec![saved]))
        })
    }
}

/// Choose view recording every interaction. Selections and confirm
/// answers are consumed from scripted queues; an empty selection queue
/// resolves as a cancel.
pub struct MockChooseView<T: BusinessObject> {
    selections: Mutex<VecDeque<Selection<T>>>,
    confirms: Mutex<VecDeque<MessageAction>>,
    pub shown_lists: Mutex<Vec<Vec<T>>>,
    pub messages: Mutex<Vec<(MessageType, String)>>,
    pub proceedings: Mutex<Vec<(MessageType, String)>>,
    pub busy_states: Mutex<Vec<bool>>,
    showed: AtomicBool,
    closed: AtomicBool,
}

impl<T: BusinessObject> MockChooseView<T> {
    pub fn new() -> Self {
        Self {
            selections: Mutex::new(VecDeque::new()),
            confirms: Mutex::new(VecDeque::new()),
            shown_lists: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
            proceedings: Mutex::new(Vec::new()),
            busy_states: Mutex::new(Vec::new()),
            showed: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    pub fn push_selection(&self, selection: Selection<T>) {
        self.selections.lock().unwrap().push_back(selection);
    }

    pub fn push_confirm(&self, answer: MessageAction) {
        self.confirms.lock().unwrap().push_back(answer);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: BusinessObject> MessageView for MockChooseView<T> {
    async fn message(&self, kind: MessageType, text: &str) {
        self.messages.lock().unwrap().push((kind, text.to_string()));
    }

    async fn proceeding(&self, kind: MessageType, text: &str) {
        self.proceedings
            .lock()
            .unwrap()
            .push((kind, text.to_string()));
    }

    async fn busy(&self, on: bool) {
        self.busy_states.lock().unwrap().push(on);
    }

    async fn confirm(&self, _title: &str, _text: &str) -> MessageAction {
        self.confirms
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MessageAction::No)
    }
}

#[async_trait]
impl<T: BusinessObject> BoChooseView<T> for MockChooseView<T> {
    async fn show(&self) {
        self.showed.store(true, Ordering::SeqCst);
    }

    fn is_showed(&self) -> bool {
        self.showed.load(Ordering::SeqCst)
    }

    async fn select_from(&self, records: &[T]) -> Selection<T> {
        self.shown_lists.lock().unwrap().push(records.to_vec());
        self.selections
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Selection::Cancelled)
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Edit view recording every interaction
pub struct MockEditView<T: BusinessObject> {
    confirms: Mutex<VecDeque<MessageAction>>,
    pub shown_records: Mutex<Vec<T>>,
    pub messages: Mutex<Vec<(MessageType, String)>>,
    pub proceedings: Mutex<Vec<(MessageType, String)>>,
    pub busy_states: Mutex<Vec<bool>>,
    showed: AtomicBool,
}

impl<T: BusinessObject> MockEditView<T> {
    pub fn new() -> Self {
        Self {
            confirms: Mutex::new(VecDeque::new()),
            shown_records: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
            proceedings: Mutex::new(Vec::new()),
            busy_states: Mutex::new(Vec::new()),
            showed: AtomicBool::new(false),
        }
    }

    pub fn push_confirm(&self, answer: MessageAction) {
        self.confirms.lock().unwrap().push_back(answer);
    }

    pub fn is_showed(&self) -> bool {
        self.showed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: BusinessObject> MessageView for MockEditView<T> {
    async fn message(&self, kind: MessageType, text: &str) {
        self.messages.lock().unwrap().push((kind, text.to_string()));
    }

    async fn proceeding(&self, kind: MessageType, text: &str) {
        self.proceedings
            .lock()
            .unwrap()
            .push((kind, text.to_string()));
    }

    async fn busy(&self, on: bool) {
        self.busy_states.lock().unwrap().push(on);
    }

    async fn confirm(&self, _title: &str, _text: &str) -> MessageAction {
        self.confirms
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MessageAction::No)
    }
}

#[async_trait]
impl<T: BusinessObject> BoEditView<T> for MockEditView<T> {
    async fn show(&self) {
        self.showed.store(true, Ordering::SeqCst);
    }

    async fn show_record(&self, record: &T) {
        self.shown_records.lock().unwrap().push(record.clone());
    }
}

/// View factory handing out the same mock views on every call, so tests
/// can inspect them after the application ran
pub struct MockWorkbench {
    pub customer_choose: Arc<MockChooseView<Customer>>,
    pub customer_edit: Arc<MockEditView<Customer>>,
    pub group_choose: Arc<MockChooseView<BusinessPartnerGroup>>,
    pub group_edit: Arc<MockEditView<BusinessPartnerGroup>>,
    pub contact_choose: Arc<MockChooseView<ContactPerson>>,
}

impl MockWorkbench {
    pub fn new() -> Self {
        Self {
            customer_choose: Arc::new(MockChooseView::new()),
            customer_edit: Arc::new(MockEditView::new()),
            group_choose: Arc::new(MockChooseView::new()),
            group_edit: Arc::new(MockEditView::new()),
            contact_choose: Arc::new(MockChooseView::new()),
        }
    }
}

impl Workbench for MockWorkbench {
    fn customer_choose_view(&self) -> Arc<dyn BoChooseView<Customer>> {
        self.customer_choose.clone()
    }

    fn customer_edit_view(&self) -> Arc<dyn BoEditView<Customer>> {
        self.customer_edit.clone()
    }

    fn group_choose_view(&self) -> Arc<dyn BoChooseView<BusinessPartnerGroup>> {
        self.group_choose.clone()
    }

    fn group_edit_view(&self) -> Arc<dyn BoEditView<BusinessPartnerGroup>> {
        self.group_edit.clone()
    }

    fn contact_choose_view(&self) -> Arc<dyn BoChooseView<ContactPerson>> {
        self.contact_choose.clone()
    }
}

/// Full hosting context over mocks, with typed handles kept aside for
/// scripting and inspection
pub struct MockServices {
    pub services: Arc<ServicesManager>,
    pub workbench: Arc<MockWorkbench>,
    pub customers: Arc<MockRepository<Customer>>,
    pub groups: Arc<MockRepository<BusinessPartnerGroup>>,
    pub contacts: Arc<MockRepository<ContactPerson>>,
}

impl MockServices {
    pub fn new(auto_choose: bool) -> Self {
        let workbench = Arc::new(MockWorkbench::new());
        let customers = Arc::new(MockRepository::new());
        let groups = Arc::new(MockRepository::new());
        let contacts = Arc::new(MockRepository::new());
        let config = Config {
            auto_choose_single: auto_choose,
            ..Config::default()
        };
        let services = Arc::new(ServicesManager::new(
            workbench.clone(),
            config,
            Arc::new(I18n::new()),
            customers.clone(),
            groups.clone(),
            contacts.clone(),
        ));
        Self {
            services,
            workbench,
            customers,
            groups,
            contacts,
        }
    }
}
