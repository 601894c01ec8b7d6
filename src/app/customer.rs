//! Customer applications: edit screen with related-entity choosers,
//! plus the customer choose screen

use anyhow::Result;
use std::sync::Arc;
use uuid::uuid;

use crate::app::choose::{ChooseApp, ChooseOutcome};
use crate::app::edit::EditApp;
use crate::criteria::{Condition, ConditionOperation, Criteria};
use crate::models::{fields, yes_no, BusinessObject, Customer};
use crate::registry::{AppDescriptor, ServicesManager};

pub static CUSTOMER_EDIT_APP: AppDescriptor = AppDescriptor::new(
    uuid!("3d9a7c52-86e1-4b08-9f3e-64b0a51c7de2"),
    "app_customer_edit",
    Customer::BO_CODE,
);

pub static CUSTOMER_CHOOSE_APP: AppDescriptor = AppDescriptor::new(
    uuid!("b4f01e9d-2a37-4d55-8c16-0a9f3db2c481"),
    "app_customer_choose",
    Customer::BO_CODE,
);

/// Edit application for customers. Beyond the generic edit lifecycle it
/// wires the two related-entity choosers: business-partner group and
/// contact person.
pub struct CustomerEditApp {
    inner: EditApp<Customer>,
    services: Arc<ServicesManager>,
}

impl CustomerEditApp {
    pub fn new(services: Arc<ServicesManager>) -> Self {
        let inner = EditApp::new(
            &CUSTOMER_EDIT_APP,
            services.customers(),
            services.workbench().customer_edit_view(),
            services.i18n(),
        );
        Self { inner, services }
    }

    pub fn descriptor(&self) -> &'static AppDescriptor {
        self.inner.descriptor()
    }

    pub fn edit_data(&self) -> Option<&Customer> {
        self.inner.edit_data()
    }

    pub fn edit_data_mut(&mut self) -> Option<&mut Customer> {
        self.inner.edit_data_mut()
    }

    pub fn set_edit_data(&mut self, record: Customer) {
        self.inner.set_edit_data(record);
    }

    pub async fn run(&mut self) {
        self.inner.run().await;
    }

    pub async fn run_with(&mut self, record: Customer) {
        self.inner.run_with(record).await;
    }

    pub async fn view_showed(&mut self) {
        self.inner.view_showed().await;
    }

    pub async fn save_data(&mut self) {
        self.inner.save_data().await;
    }

    pub async fn delete_data(&mut self) {
        self.inner.delete_data().await;
    }

    pub async fn create_data(&mut self, clone: bool) {
        self.inner.create_data(clone).await;
    }

    /// Choose a business-partner group for the record under edit.
    /// The currently assigned group is excluded from the candidates.
    /// An empty selection leaves the record untouched.
    pub async fn choose_business_partner_group(&mut self) -> Result<()> {
        let current_group = self
            .inner
            .edit_data()
            .map(|record| record.group.clone())
            .unwrap_or_default();
        let criteria = Criteria::new()
            .with(Condition::new(
                fields::DELETED,
                ConditionOperation::Equal,
                yes_no(false),
            ))
            .with(Condition::new(
                fields::CODE,
                ConditionOperation::NotEqual,
                &current_group,
            ));

        let selected = self.services.run_choose_group(&criteria).await?;
        let mut updated = false;
        if let Some(group) = selected.first() {
            if let Some(record) = self.inner.edit_data_mut() {
                record.group = group.code.clone();
                record.mark_dirty();
                updated = true;
            }
        }
        if updated {
            self.inner.view_showed().await;
        }
        Ok(())
    }

    /// Choose a contact person and copy their reachability fields into
    /// the record under edit. Only active contacts other than the
    /// current one are offered. An empty selection is a no-op.
    pub async fn choose_contact_person(&mut self) -> Result<()> {
        let current_contact = self
            .inner
            .edit_data()
            .map(|record| record.contact_person.clone())
            .unwrap_or_default();
        let criteria = Criteria::new()
            .with(Condition::new(
                fields::ACTIVATED,
                ConditionOperation::Equal,
                yes_no(true),
            ))
            .with(Condition::new(
                fields::NAME,
                ConditionOperation::NotEqual,
                &current_contact,
            ));

        let selected = self.services.run_choose_contact_person(&criteria).await?;
        let mut updated = false;
        if let Some(contact) = selected.first() {
            if let Some(record) = self.inner.edit_data_mut() {
                record.contact_person = contact.name.clone();
                record.telephone1 = contact.telephone1.clone();
                record.telephone2 = contact.telephone2.clone();
                record.mobile_phone = contact.mobile_phone.clone();
                record.fax_number = contact.fax.clone();
                record.mark_dirty();
                updated = true;
            }
        }
        if updated {
            self.inner.view_showed().await;
        }
        Ok(())
    }
}

/// Choose application for customers
pub struct CustomerChooseApp {
    inner: ChooseApp<Customer>,
    services: Arc<ServicesManager>,
}

impl CustomerChooseApp {
    pub fn new(services: Arc<ServicesManager>) -> Self {
        let inner = ChooseApp::new(
            &CUSTOMER_CHOOSE_APP,
            services.customers(),
            services.workbench().customer_choose_view(),
            services.i18n(),
            services.config().auto_choose_single,
        );
        Self { inner, services }
    }

    pub fn descriptor(&self) -> &'static AppDescriptor {
        self.inner.descriptor()
    }

    /// Fetch candidates and resolve the selection. A "new" request tears
    /// this chooser down and hands the hosting context to the editor.
    pub async fn run(mut self, criteria: &Criteria) -> Result<Option<Vec<Customer>>> {
        match self.inner.fetch_data(criteria).await? {
            ChooseOutcome::Chosen(records) => Ok(Some(records)),
            ChooseOutcome::NewRequested => {
                self.new_data().await;
                Ok(None)
            }
            ChooseOutcome::Cancelled => Ok(None),
        }
    }

    async fn new_data(self) {
        let mut editor = CustomerEditApp::new(self.services.clone());
        editor.run().await;
    }
}
