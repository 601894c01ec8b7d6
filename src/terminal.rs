//! Console views and the interactive shell loops
//!
//! The applications only know the view traits; this module is the one
//! place that talks to the terminal. Stdin is wrapped once and shared so
//! every view reads from the same line stream.

use anyhow::Result;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::app::contact::ContactPersonChooseApp;
use crate::app::customer::CustomerEditApp;
use crate::criteria::Criteria;
use crate::i18n::I18n;
use crate::models::{BusinessObject, BusinessPartnerGroup, ContactPerson, Customer};
use crate::registry::{ServicesManager, Workbench};
use crate::view::{
    BoChooseView, BoEditView, MessageAction, MessageType, MessageView, Selection,
};

pub type SharedInput = Arc<Mutex<Lines<BufReader<Stdin>>>>;

pub fn shared_input() -> SharedInput {
    Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()))
}

async fn read_line(input: &SharedInput) -> String {
    match input.lock().await.next_line().await {
        Ok(Some(line)) => line.trim().to_string(),
        _ => String::new(),
    }
}

fn print_message(kind: MessageType, text: &str) {
    println!("[{}] {}", kind.as_str(), text);
}

async fn ask_confirm(input: &SharedInput, title: &str, text: &str) -> MessageAction {
    loop {
        println!("[{}] {}: {} [y/n]", MessageType::Question.as_str(), title, text);
        match read_line(input).await.to_lowercase().as_str() {
            "y" | "yes" => return MessageAction::Yes,
            "n" | "no" | "" => return MessageAction::No,
            _ => continue,
        }
    }
}

/// Choose view rendered as a numbered list on stdout
pub struct ConsoleChooseView<T> {
    title: String,
    input: SharedInput,
    showed: AtomicBool,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> ConsoleChooseView<T> {
    pub fn new(title: impl Into<String>, input: SharedInput) -> Self {
        Self {
            title: title.into(),
            input,
            showed: AtomicBool::new(false),
            _marker: std::marker::PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<T: BusinessObject> MessageView for ConsoleChooseView<T> {
    async fn message(&self, kind: MessageType, text: &str) {
        print_message(kind, text);
    }

    async fn proceeding(&self, _kind: MessageType, text: &str) {
        println!("* {}", text);
    }

    async fn busy(&self, _on: bool) {}

    async fn confirm(&self, title: &str, text: &str) -> MessageAction {
        ask_confirm(&self.input, title, text).await
    }
}

#[async_trait::async_trait]
impl<T: BusinessObject> BoChooseView<T> for ConsoleChooseView<T> {
    async fn show(&self) {
        println!("=== {} ===", self.title);
        self.showed.store(true, Ordering::SeqCst);
    }

    fn is_showed(&self) -> bool {
        self.showed.load(Ordering::SeqCst)
    }

    async fn select_from(&self, records: &[T]) -> Selection<T> {
        if records.is_empty() {
            println!("  (no matching records)");
        }
        for (index, record) in records.iter().enumerate() {
            println!("  {}. {}", index + 1, record.summary());
        }
        println!("Select numbers (comma separated), 'n' for new, empty to cancel:");
        let line = read_line(&self.input).await;
        if line.is_empty() {
            return Selection::Cancelled;
        }
        if line.eq_ignore_ascii_case("n") {
            return Selection::NewRequested;
        }

        let mut picked = Vec::new();
        for part in line.split(',') {
            let Ok(number) = part.trim().parse::<usize>() else {
                return Selection::Cancelled;
            };
            match records.get(number.saturating_sub(1)) {
                Some(record) if number >= 1 => picked.push(record.clone()),
                _ => return Selection::Cancelled,
            }
        }
        Selection::Records(picked)
    }

    async fn close(&self) {
        self.showed.store(false, Ordering::SeqCst);
    }
}

/// Edit view rendering the record as pretty JSON
pub struct ConsoleEditView<T> {
    title: String,
    input: SharedInput,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> ConsoleEditView<T> {
    pub fn new(title: impl Into<String>, input: SharedInput) -> Self {
        Self {
            title: title.into(),
            input,
            _marker: std::marker::PhantomData,
        }
    }
}

#[async_trait::async_trait]
impl<T: BusinessObject + Serialize> MessageView for ConsoleEditView<T> {
    async fn message(&self, kind: MessageType, text: &str) {
        print_message(kind, text);
    }

    async fn proceeding(&self, _kind: MessageType, text: &str) {
        println!("* {}", text);
    }

    async fn busy(&self, _on: bool) {}

    async fn confirm(&self, title: &str, text: &str) -> MessageAction {
        ask_confirm(&self.input, title, text).await
    }
}

#[async_trait::async_trait]
impl<T: BusinessObject + Serialize> BoEditView<T> for ConsoleEditView<T> {
    async fn show(&self) {
        println!("=== {} ===", self.title);
    }

    async fn show_record(&self, record: &T) {
        match serde_json::to_string_pretty(record) {
            Ok(json) => println!("{}", json),
            Err(_) => println!("{}", record.summary()),
        }
    }
}

/// Console view factory. Views are created per request; the shared
/// stdin stream is the only state that outlives them.
pub struct ConsoleWorkbench {
    input: SharedInput,
    i18n: Arc<I18n>,
}

impl ConsoleWorkbench {
    pub fn new(input: SharedInput, i18n: Arc<I18n>) -> Self {
        Self { input, i18n }
    }
}

impl Workbench for ConsoleWorkbench {
    fn customer_choose_view(&self) -> Arc<dyn BoChooseView<Customer>> {
        Arc::new(ConsoleChooseView::new(
            self.i18n.prop("app_customer_choose"),
            self.input.clone(),
        ))
    }

    fn customer_edit_view(&self) -> Arc<dyn BoEditView<Customer>> {
        Arc::new(ConsoleEditView::new(
            self.i18n.prop("app_customer_edit"),
            self.input.clone(),
        ))
    }

    fn group_choose_view(&self) -> Arc<dyn BoChooseView<BusinessPartnerGroup>> {
        Arc::new(ConsoleChooseView::new(
            self.i18n.prop("app_businesspartnergroup_choose"),
            self.input.clone(),
        ))
    }

    fn group_edit_view(&self) -> Arc<dyn BoEditView<BusinessPartnerGroup>> {
        Arc::new(ConsoleEditView::new(
            self.i18n.prop("app_businesspartnergroup_edit"),
            self.input.clone(),
        ))
    }

    fn contact_choose_view(&self) -> Arc<dyn BoChooseView<ContactPerson>> {
        Arc::new(ConsoleChooseView::new(
            self.i18n.prop("app_contactperson_choose"),
            self.input.clone(),
        ))
    }
}

pub async fn run_customer_choose(
    services: &Arc<ServicesManager>,
    criteria: &Criteria,
) -> Result<()> {
    let app = services.customer_choose_app();
    match app.run(criteria).await? {
        Some(records) => {
            println!("{} record(s) chosen:", records.len());
            for record in records {
                println!("  {}", record.summary());
            }
        }
        None => println!("nothing chosen"),
    }
    Ok(())
}

pub async fn run_group_choose(services: &Arc<ServicesManager>, criteria: &Criteria) -> Result<()> {
    let app = services.group_choose_app();
    match app.run(criteria).await? {
        Some(records) => {
            println!("{} record(s) chosen:", records.len());
            for record in records {
                println!("  {}", record.summary());
            }
        }
        None => println!("nothing chosen"),
    }
    Ok(())
}

pub async fn run_contact_choose(
    services: &Arc<ServicesManager>,
    criteria: &Criteria,
) -> Result<()> {
    let app = ContactPersonChooseApp::new(services.clone());
    match app.run(criteria).await? {
        Some(records) => {
            println!("{} record(s) chosen:", records.len());
            for record in records {
                println!("  {}", record.summary());
            }
        }
        None => println!("nothing chosen"),
    }
    Ok(())
}

fn print_edit_help(related: bool) {
    println!("commands:");
    println!("  set <field> <value>   change a field");
    println!("  show                  print the record");
    println!("  save                  persist changes");
    println!("  delete                mark deleted and persist");
    println!("  new                   start a fresh record");
    println!("  clone                 copy the record into a new one");
    if related {
        println!("  group                 choose a business-partner group");
        println!("  contact               choose a contact person");
    }
    println!("  quit                  leave the editor");
}

async fn apply_set<T: BusinessObject>(record: Option<&mut T>, rest: &str) {
    let Some(record) = record else {
        println!("no record loaded");
        return;
    };
    let mut parts = rest.splitn(2, ' ');
    let field = parts.next().unwrap_or("").trim();
    let value = parts.next().unwrap_or("").trim();
    if field.is_empty() {
        println!("usage: set <field> <value>");
        return;
    }
    if !record.set_field_value(field, value) {
        println!("unknown field: {}", field);
    }
}

/// Interactive editor loop for a customer. Related-entity choosers are
/// reachable as `group` and `contact` commands.
pub async fn run_customer_edit(
    services: &Arc<ServicesManager>,
    input: &SharedInput,
    code: Option<String>,
) -> Result<()> {
    let mut app = services.customer_edit_app();
    match code {
        Some(code) => app.run_with(Customer::with_code(&code)).await,
        None => app.run().await,
    }
    print_edit_help(true);

    loop {
        println!("edit>");
        let line = read_line(input).await;
        let (command, rest) = line.split_once(' ').unwrap_or((line.as_str(), ""));
        match command {
            "set" => apply_set(app.edit_data_mut(), rest).await,
            "show" => app.view_showed().await,
            "save" => app.save_data().await,
            "delete" => app.delete_data().await,
            "new" => app.create_data(false).await,
            "clone" => app.create_data(true).await,
            "group" => drive_chooser(&mut app, true).await?,
            "contact" => drive_chooser(&mut app, false).await?,
            "help" => print_edit_help(true),
            "quit" | "q" | "" => break,
            other => println!("unknown command: {}", other),
        }
    }
    Ok(())
}

async fn drive_chooser(app: &mut CustomerEditApp, group: bool) -> Result<()> {
    if group {
        app.choose_business_partner_group().await
    } else {
        app.choose_contact_person().await
    }
}

/// Interactive editor loop for a business-partner group
pub async fn run_group_edit(
    services: &Arc<ServicesManager>,
    input: &SharedInput,
    code: Option<String>,
) -> Result<()> {
    let mut app = services.group_edit_app();
    match code {
        Some(code) => app.run_with(BusinessPartnerGroup::with_code(&code)).await,
        None => app.run().await,
    }
    print_edit_help(false);

    loop {
        println!("edit>");
        let line = read_line(input).await;
        let (command, rest) = line.split_once(' ').unwrap_or((line.as_str(), ""));
        match command {
            "set" => apply_set(app.edit_data_mut(), rest).await,
            "show" => app.view_showed().await,
            "save" => app.save_data().await,
            "delete" => app.delete_data().await,
            "new" => app.create_data(false).await,
            "clone" => app.create_data(true).await,
            "help" => print_edit_help(false),
            "quit" | "q" | "" => break,
            other => println!("unknown command: {}", other),
        }
    }
    Ok(())
}

/// List every registered application identity
pub fn print_apps(services: &Arc<ServicesManager>) {
    let i18n = services.i18n();
    println!("{:<38} {:<32} {}", "ID", "NAME", "BO CODE");
    for descriptor in services.descriptors() {
        println!(
            "{:<38} {:<32} {}",
            descriptor.id,
            i18n.prop(descriptor.name),
            descriptor.bo_code
        );
    }
}
