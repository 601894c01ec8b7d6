//! Generic choose application: query candidates, let the user pick

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::criteria::{Criteria, OperationResult};
use crate::errors::RepositoryError;
use crate::i18n::I18n;
use crate::models::BusinessObject;
use crate::registry::AppDescriptor;
use crate::repository::BoRepository;
use crate::view::{BoChooseView, MessageType, Selection};

/// How a choose run ended
#[derive(Debug, Clone, PartialEq)]
pub enum ChooseOutcome<T> {
    /// Selection finalized with these records
    Chosen(Vec<T>),
    /// The user asked for out-of-band record creation instead
    NewRequested,
    /// Nothing was chosen
    Cancelled,
}

/// Queries a candidate list against the repository and finalizes the
/// user's selection. Holds no record state across fetches; each run is
/// independent.
pub struct ChooseApp<T: BusinessObject> {
    descriptor: &'static AppDescriptor,
    repository: Arc<dyn BoRepository<T>>,
    view: Arc<dyn BoChooseView<T>>,
    i18n: Arc<I18n>,
    auto_choose_single: bool,
    busy: bool,
}

impl<T: BusinessObject> ChooseApp<T> {
    pub fn new(
        descriptor: &'static AppDescriptor,
        repository: Arc<dyn BoRepository<T>>,
        view: Arc<dyn BoChooseView<T>>,
        i18n: Arc<I18n>,
        auto_choose_single: bool,
    ) -> Self {
        Self {
            descriptor,
            repository,
            view,
            i18n,
            auto_choose_single,
            busy: false,
        }
    }

    pub fn descriptor(&self) -> &'static AppDescriptor {
        self.descriptor
    }

    /// Query records matching the criteria and resolve the selection.
    ///
    /// Exactly one match with auto-choose enabled finalizes immediately,
    /// bypassing the list. Repository failures and local processing
    /// failures both end up on the view's message channel; neither
    /// escapes the handler.
    pub async fn fetch_data(&mut self, criteria: &Criteria) -> Result<ChooseOutcome<T>> {
        if self.busy {
            self.view
                .proceeding(
                    MessageType::Warning,
                    &self.i18n.prop("shell_application_busy"),
                )
                .await;
            return Ok(ChooseOutcome::Cancelled);
        }
        self.busy = true;
        self.view.busy(true).await;
        self.view
            .proceeding(
                MessageType::Information,
                &self.i18n.prop("shell_fetching_data"),
            )
            .await;

        let fetched = self.repository.fetch(criteria).await;
        let outcome = self.process_fetched(fetched).await;
        self.busy = false;

        match outcome {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                self.view
                    .message(MessageType::Error, &error.to_string())
                    .await;
                self.view.busy(false).await;
                Ok(ChooseOutcome::Cancelled)
            }
        }
    }

    async fn process_fetched(
        &self,
        fetched: Result<OperationResult<T>, RepositoryError>,
    ) -> Result<ChooseOutcome<T>> {
        let result = fetched?;
        if !result.is_success() {
            anyhow::bail!(result.message);
        }

        if result.results.len() == 1 && self.auto_choose_single {
            // Single match, choose directly without showing the list
            debug!(app = self.descriptor.name, "auto-choosing single result");
            let outcome = self.choose_data(result.results).await;
            return Ok(outcome);
        }

        if !self.view.is_showed() {
            self.view.show().await;
        }
        self.view.busy(false).await;

        match self.view.select_from(&result.results).await {
            Selection::Records(records) if !records.is_empty() => {
                Ok(self.choose_data(records).await)
            }
            Selection::Records(_) => Ok(ChooseOutcome::Cancelled),
            Selection::NewRequested => Ok(ChooseOutcome::NewRequested),
            Selection::Cancelled => Ok(ChooseOutcome::Cancelled),
        }
    }

    /// Finalize the selection and close the screen
    pub async fn choose_data(&self, records: Vec<T>) -> ChooseOutcome<T> {
        self.view.close().await;
        ChooseOutcome::Chosen(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{MockChooseView, MockRepository};
    use crate::models::Customer;
    use crate::registry::AppDescriptor;
    use uuid::uuid;

    static TEST_APP: AppDescriptor = AppDescriptor::new(
        uuid!("5f0e6a3c-1f9d-4b6e-8d25-cc5a4f1f2b10"),
        "app_customer_choose",
        "CC_BP_CUSTOMER",
    );

    fn customer(code: &str) -> Customer {
        Customer::with_code(code)
    }

    fn app(
        repo: Arc<MockRepository<Customer>>,
        view: Arc<MockChooseView<Customer>>,
        auto_choose: bool,
    ) -> ChooseApp<Customer> {
        ChooseApp::new(&TEST_APP, repo, view, Arc::new(I18n::new()), auto_choose)
    }

    #[tokio::test]
    async fn test_single_result_auto_chosen_without_list() {
        let repo = Arc::new(MockRepository::new());
        repo.push_fetch(Ok(OperationResult::success(vec![customer("G1")])));
        let view = Arc::new(MockChooseView::new());

        let mut choose = app(repo, view.clone(), true);
        let outcome = choose.fetch_data(&Criteria::new()).await.unwrap();

        assert_eq!(outcome, ChooseOutcome::Chosen(vec![customer("G1")]));
        assert!(view.shown_lists.lock().unwrap().is_empty());
        assert!(view.is_closed());
    }

    #[tokio::test]
    async fn test_single_result_listed_when_auto_choose_disabled() {
        let repo = Arc::new(MockRepository::new());
        repo.push_fetch(Ok(OperationResult::success(vec![customer("C1")])));
        let view = Arc::new(MockChooseView::new());
        view.push_selection(Selection::Records(vec![customer("C1")]));

        let mut choose = app(repo, view.clone(), false);
        let outcome = choose.fetch_data(&Criteria::new()).await.unwrap();

        assert_eq!(outcome, ChooseOutcome::Chosen(vec![customer("C1")]));
        assert_eq!(view.shown_lists.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_multiple_results_shown_in_returned_order() {
        let repo = Arc::new(MockRepository::new());
        repo.push_fetch(Ok(OperationResult::success(vec![
            customer("C2"),
            customer("C1"),
        ])));
        let view = Arc::new(MockChooseView::new());
        view.push_selection(Selection::Records(vec![customer("C1")]));

        let mut choose = app(repo, view.clone(), true);
        let outcome = choose.fetch_data(&Criteria::new()).await.unwrap();

        assert_eq!(outcome, ChooseOutcome::Chosen(vec![customer("C1")]));
        let lists = view.shown_lists.lock().unwrap();
        let codes: Vec<&str> = lists[0].iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["C2", "C1"]);
        assert!(view.is_showed());
    }

    #[tokio::test]
    async fn test_repository_failure_reported_not_chosen() {
        let repo = Arc::new(MockRepository::new());
        repo.push_fetch(Ok(OperationResult::failure(-1, "backend unavailable")));
        let view = Arc::new(MockChooseView::new());

        let mut choose = app(repo, view.clone(), true);
        let outcome = choose.fetch_data(&Criteria::new()).await.unwrap();

        assert_eq!(outcome, ChooseOutcome::Cancelled);
        let messages = view.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, MessageType::Error);
        assert!(messages[0].1.contains("backend unavailable"));
    }

    #[tokio::test]
    async fn test_transport_error_routed_to_message_channel() {
        let repo = Arc::new(MockRepository::new());
        repo.push_fetch(Err(RepositoryError::Decode("bad row".to_string())));
        let view = Arc::new(MockChooseView::new());

        let mut choose = app(repo, view.clone(), true);
        let outcome = choose.fetch_data(&Criteria::new()).await.unwrap();

        assert_eq!(outcome, ChooseOutcome::Cancelled);
        assert_eq!(view.messages.lock().unwrap()[0].0, MessageType::Error);
    }

    #[tokio::test]
    async fn test_empty_selection_is_cancelled() {
        let repo = Arc::new(MockRepository::new());
        repo.push_fetch(Ok(OperationResult::success(vec![
            customer("C1"),
            customer("C2"),
        ])));
        let view = Arc::new(MockChooseView::new());
        view.push_selection(Selection::Records(Vec::new()));

        let mut choose = app(repo, view, true);
        let outcome = choose.fetch_data(&Criteria::new()).await.unwrap();
        assert_eq!(outcome, ChooseOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_new_requested_passes_through() {
        let repo = Arc::new(MockRepository::new());
        repo.push_fetch(Ok(OperationResult::success(Vec::new())));
        let view = Arc::new(MockChooseView::new());
        view.push_selection(Selection::NewRequested);

        let mut choose = app(repo, view, true);
        let outcome = choose.fetch_data(&Criteria::new()).await.unwrap();
        assert_eq!(outcome, ChooseOutcome::NewRequested);
    }

    #[tokio::test]
    async fn test_busy_guard_rejects_reentry() {
        let repo = Arc::new(MockRepository::new());
        let view = Arc::new(MockChooseView::new());

        let mut choose = app(repo.clone(), view.clone(), true);
        choose.busy = true;
        let outcome = choose.fetch_data(&Criteria::new()).await.unwrap();

        assert_eq!(outcome, ChooseOutcome::Cancelled);
        assert!(repo.fetched_criteria.lock().unwrap().is_empty());
        assert_eq!(view.proceedings.lock().unwrap()[0].0, MessageType::Warning);
    }
}
