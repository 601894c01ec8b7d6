//! Application identity and the choose-service registry
//!
//! Every application carries a static identity triple the host shell
//! uses for discovery. The [`ServicesManager`] holds the shared hosting
//! context (repositories, view factory, configuration, localization)
//! and runs choose sub-services on behalf of other applications.

use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

use crate::app::choose::{ChooseApp, ChooseOutcome};
use crate::app::contact::CONTACT_PERSON_CHOOSE_APP;
use crate::app::customer::{CustomerChooseApp, CustomerEditApp, CUSTOMER_CHOOSE_APP, CUSTOMER_EDIT_APP};
use crate::app::group::{
    BusinessPartnerGroupChooseApp, BusinessPartnerGroupEditApp, GROUP_CHOOSE_APP, GROUP_EDIT_APP,
};
use crate::config::Config;
use crate::criteria::Criteria;
use crate::i18n::I18n;
use crate::models::{BusinessPartnerGroup, ContactPerson, Customer};
use crate::repository::{BoRepository, SqliteRepository};
use crate::view::{BoChooseView, BoEditView};

/// Static application identity: (id, name, business-object code).
/// Assigned at definition, never mutated at runtime. The name doubles
/// as the localization key for the application's display title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDescriptor {
    pub id: Uuid,
    pub name: &'static str,
    pub bo_code: &'static str,
}

impl AppDescriptor {
    pub const fn new(id: Uuid, name: &'static str, bo_code: &'static str) -> Self {
        Self { id, name, bo_code }
    }
}

/// Factory for typed views: the navigation/view-hosting context shared
/// when one application launches another
pub trait Workbench: Send + Sync {
    fn customer_choose_view(&self) -> Arc<dyn BoChooseView<Customer>>;
    fn customer_edit_view(&self) -> Arc<dyn BoEditView<Customer>>;
    fn group_choose_view(&self) -> Arc<dyn BoChooseView<BusinessPartnerGroup>>;
    fn group_edit_view(&self) -> Arc<dyn BoEditView<BusinessPartnerGroup>>;
    fn contact_choose_view(&self) -> Arc<dyn BoChooseView<ContactPerson>>;
}

pub struct ServicesManager {
    workbench: Arc<dyn Workbench>,
    config: Config,
    i18n: Arc<I18n>,
    customers: Arc<dyn BoRepository<Customer>>,
    groups: Arc<dyn BoRepository<BusinessPartnerGroup>>,
    contacts: Arc<dyn BoRepository<ContactPerson>>,
}

impl ServicesManager {
    pub fn new(
        workbench: Arc<dyn Workbench>,
        config: Config,
        i18n: Arc<I18n>,
        customers: Arc<dyn BoRepository<Customer>>,
        groups: Arc<dyn BoRepository<BusinessPartnerGroup>>,
        contacts: Arc<dyn BoRepository<ContactPerson>>,
    ) -> Self {
        Self {
            workbench,
            config,
            i18n,
            customers,
            groups,
            contacts,
        }
    }

    /// Context where one SQLite repository backs every record type
    pub fn with_sqlite(
        workbench: Arc<dyn Workbench>,
        config: Config,
        i18n: Arc<I18n>,
        repository: Arc<SqliteRepository>,
    ) -> Self {
        Self::new(
            workbench,
            config,
            i18n,
            repository.clone(),
            repository.clone(),
            repository,
        )
    }

    pub fn workbench(&self) -> Arc<dyn Workbench> {
        self.workbench.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn i18n(&self) -> Arc<I18n> {
        self.i18n.clone()
    }

    pub fn customers(&self) -> Arc<dyn BoRepository<Customer>> {
        self.customers.clone()
    }

    pub fn groups(&self) -> Arc<dyn BoRepository<BusinessPartnerGroup>> {
        self.groups.clone()
    }

    pub fn contacts(&self) -> Arc<dyn BoRepository<ContactPerson>> {
        self.contacts.clone()
    }

    /// All registered application identities, for host discovery
    pub fn descriptors(&self) -> Vec<&'static AppDescriptor> {
        vec![
            &CUSTOMER_CHOOSE_APP,
            &CUSTOMER_EDIT_APP,
            &GROUP_CHOOSE_APP,
            &GROUP_EDIT_APP,
            &CONTACT_PERSON_CHOOSE_APP,
        ]
    }

    /// Resolve a choose application by business-object code
    pub fn find_choose(&self, bo_code: &str) -> Option<&'static AppDescriptor> {
        self.descriptors()
            .into_iter()
            .find(|descriptor| descriptor.bo_code == bo_code && descriptor.name.ends_with("_choose"))
    }

    /// Run the group choose service; empty when nothing was chosen
    pub async fn run_choose_group(
        &self,
        criteria: &Criteria,
    ) -> Result<Vec<BusinessPartnerGroup>> {
        let mut app = ChooseApp::new(
            &GROUP_CHOOSE_APP,
            self.groups.clone(),
            self.workbench.group_choose_view(),
            self.i18n.clone(),
            self.config.auto_choose_single,
        );
        Ok(match app.fetch_data(criteria).await? {
            ChooseOutcome::Chosen(records) => records,
            _ => Vec::new(),
        })
    }

    /// Run the contact-person choose service; empty when nothing was chosen
    pub async fn run_choose_contact_person(
        &self,
        criteria: &Criteria,
    ) -> Result<Vec<ContactPerson>> {
        let mut app = ChooseApp::new(
            &CONTACT_PERSON_CHOOSE_APP,
            self.contacts.clone(),
            self.workbench.contact_choose_view(),
            self.i18n.clone(),
            self.config.auto_choose_single,
        );
        Ok(match app.fetch_data(criteria).await? {
            ChooseOutcome::Chosen(records) => records,
            _ => Vec::new(),
        })
    }

    /// Run the customer choose service; empty when nothing was chosen
    pub async fn run_choose_customer(&self, criteria: &Criteria) -> Result<Vec<Customer>> {
        let mut app = ChooseApp::new(
            &CUSTOMER_CHOOSE_APP,
            self.customers.clone(),
            self.workbench.customer_choose_view(),
            self.i18n.clone(),
            self.config.auto_choose_single,
        );
        Ok(match app.fetch_data(criteria).await? {
            ChooseOutcome::Chosen(records) => records,
            _ => Vec::new(),
        })
    }

    pub fn customer_edit_app(self: &Arc<Self>) -> CustomerEditApp {
        CustomerEditApp::new(self.clone())
    }

    pub fn customer_choose_app(self: &Arc<Self>) -> CustomerChooseApp {
        CustomerChooseApp::new(self.clone())
    }

    pub fn group_edit_app(self: &Arc<Self>) -> BusinessPartnerGroupEditApp {
        BusinessPartnerGroupEditApp::new(self.clone())
    }

    pub fn group_choose_app(self: &Arc<Self>) -> BusinessPartnerGroupChooseApp {
        BusinessPartnerGroupChooseApp::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::MockServices;
    use crate::models::BusinessObject;
    use std::collections::HashSet;

    #[test]
    fn test_descriptors_cover_all_applications() {
        let mock = MockServices::new(true);
        let descriptors = mock.services.descriptors();
        assert_eq!(descriptors.len(), 5);

        let ids: HashSet<Uuid> = descriptors.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), descriptors.len());
    }

    #[test]
    fn test_find_choose_by_bo_code() {
        let mock = MockServices::new(true);
        let found = mock
            .services
            .find_choose(BusinessPartnerGroup::BO_CODE)
            .unwrap();
        assert_eq!(found.name, "app_businesspartnergroup_choose");
        assert!(mock.services.find_choose("CC_BP_UNKNOWN").is_none());
    }
}
