//! Business-partner group applications

use anyhow::Result;
use std::sync::Arc;
use uuid::uuid;

use crate::app::choose::{ChooseApp, ChooseOutcome};
use crate::app::edit::EditApp;
use crate::criteria::Criteria;
use crate::models::{BusinessObject, BusinessPartnerGroup};
use crate::registry::{AppDescriptor, ServicesManager};

pub static GROUP_CHOOSE_APP: AppDescriptor = AppDescriptor::new(
    uuid!("c8e52f14-9d60-47a3-b7f2-51e8c30a96d5"),
    "app_businesspartnergroup_choose",
    BusinessPartnerGroup::BO_CODE,
);

pub static GROUP_EDIT_APP: AppDescriptor = AppDescriptor::new(
    uuid!("1a6d40be-53c9-4f87-9e0b-8cd7215fa3b8"),
    "app_businesspartnergroup_edit",
    BusinessPartnerGroup::BO_CODE,
);

/// Choose application for business-partner groups
pub struct BusinessPartnerGroupChooseApp {
    inner: ChooseApp<BusinessPartnerGroup>,
    services: Arc<ServicesManager>,
}

impl BusinessPartnerGroupChooseApp {
    pub fn new(services: Arc<ServicesManager>) -> Self {
        let inner = ChooseApp::new(
            &GROUP_CHOOSE_APP,
            services.groups(),
            services.workbench().group_choose_view(),
            services.i18n(),
            services.config().auto_choose_single,
        );
        Self { inner, services }
    }

    pub fn descriptor(&self) -> &'static AppDescriptor {
        self.inner.descriptor()
    }

    /// Fetch candidates and resolve the selection. A "new" request tears
    /// this chooser down and launches the group editor in its place.
    pub async fn run(mut self, criteria: &Criteria) -> Result<Option<Vec<BusinessPartnerGroup>>> {
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
        let mut editor = BusinessPartnerGroupEditApp::new(self.services.clone());
        editor.run().await;
    }
}

/// Edit application for business-partner groups
pub struct BusinessPartnerGroupEditApp {
    inner: EditApp<BusinessPartnerGroup>,
}

impl BusinessPartnerGroupEditApp {
    pub fn new(services: Arc<ServicesManager>) -> Self {
        let inner = EditApp::new(
            &GROUP_EDIT_APP,
            services.groups(),
            services.workbench().group_edit_view(),
            services.i18n(),
        );
        Self { inner }
    }

    pub fn descriptor(&self) -> &'static AppDescriptor {
        self.inner.descriptor()
    }

    pub fn edit_data(&self) -> Option<&BusinessPartnerGroup> {
        self.inner.edit_data()
    }

    pub fn edit_data_mut(&mut self) -> Option<&mut BusinessPartnerGroup> {
        self.inner.edit_data_mut()
    }

    pub fn set_edit_data(&mut self, record: BusinessPartnerGroup) {
        self.inner.set_edit_data(record);
    }

    pub async fn run(&mut self) {
        self.inner.run().await;
    }

    pub async fn run_with(&mut self, record: BusinessPartnerGroup) {
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
}
