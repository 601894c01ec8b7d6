//! Contact-person choose application
//!
//! Contact persons have no standalone editor here; they are maintained
//! on their parent business partner. The chooser therefore treats a
//! "new" request like a cancel.

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;
use uuid::uuid;

use crate::app::choose::{ChooseApp, ChooseOutcome};
use crate::criteria::Criteria;
use crate::models::{BusinessObject, ContactPerson};
use crate::registry::{AppDescriptor, ServicesManager};

pub static CONTACT_PERSON_CHOOSE_APP: AppDescriptor = AppDescriptor::new(
    uuid!("7b3f2c85-d014-4e69-a1c7-92e5480bd6f3"),
    "app_contactperson_choose",
    ContactPerson::BO_CODE,
);

pub struct ContactPersonChooseApp {
    inner: ChooseApp<ContactPerson>,
}

impl ContactPersonChooseApp {
    pub fn new(services: Arc<ServicesManager>) -> Self {
        let inner = ChooseApp::new(
            &CONTACT_PERSON_CHOOSE_APP,
            services.contacts(),
            services.workbench().contact_choose_view(),
            services.i18n(),
            services.config().auto_choose_single,
        );
        Self { inner }
    }

    pub fn descriptor(&self) -> &'static AppDescriptor {
        self.inner.descriptor()
    }

    pub async fn run(mut self, criteria: &Criteria) -> Result<Option<Vec<ContactPerson>>> {
        match self.inner.fetch_data(criteria).await? {
            ChooseOutcome::Chosen(records) => Ok(Some(records)),
            ChooseOutcome::NewRequested => {
                debug!("contact persons are created on their business partner");
                Ok(None)
            }
            ChooseOutcome::Cancelled => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::MockServices;
    use crate::criteria::OperationResult;
    use crate::view::Selection;

    #[tokio::test]
    async fn test_chosen_contacts_returned() {
        let mock = MockServices::new(false);
        let contact = ContactPerson::with_code("P1");
        mock.contacts
            .push_fetch(Ok(OperationResult::success(vec![contact.clone()])));
        mock.workbench
            .contact_choose
            .push_selection(Selection::Records(vec![contact.clone()]));

        let app = ContactPersonChooseApp::new(mock.services.clone());
        let chosen = app.run(&Criteria::new()).await.unwrap();
        assert_eq!(chosen, Some(vec![contact]));
    }

    #[tokio::test]
    async fn test_new_request_resolves_to_nothing() {
        let mock = MockServices::new(false);
        mock.contacts
            .push_fetch(Ok(OperationResult::success(Vec::new())));
        mock.workbench
            .contact_choose
            .push_selection(Selection::NewRequested);

        let app = ContactPersonChooseApp::new(mock.services.clone());
        let chosen = app.run(&Criteria::new()).await.unwrap();
        assert_eq!(chosen, None);
    }
}
