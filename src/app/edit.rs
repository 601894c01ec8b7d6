//! Generic edit application: load or create one record, persist changes

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::criteria::OperationResult;
use crate::errors::RepositoryError;
use crate::i18n::I18n;
use crate::models::BusinessObject;
use crate::registry::AppDescriptor;
use crate::repository::BoRepository;
use crate::view::{BoEditView, MessageAction, MessageType};

/// Owns at most one record under edit (`edit_data`) and drives its
/// lifecycle: absent, new in memory, dirty or clean, saved or deleted.
/// Replacing the record discards the previous one wholesale.
pub struct EditApp<T: BusinessObject> {
    descriptor: &'static AppDescriptor,
    repository: Arc<dyn BoRepository<T>>,
    view: Arc<dyn BoEditView<T>>,
    i18n: Arc<I18n>,
    edit_data: Option<T>,
    busy: bool,
}

impl<T: BusinessObject> EditApp<T> {
    pub fn new(
        descriptor: &'static AppDescriptor,
        repository: Arc<dyn BoRepository<T>>,
        view: Arc<dyn BoEditView<T>>,
        i18n: Arc<I18n>,
    ) -> Self {
        Self {
            descriptor,
            repository,
            view,
            i18n,
            edit_data: None,
            busy: false,
        }
    }

    pub fn descriptor(&self) -> &'static AppDescriptor {
        self.descriptor
    }

    pub fn edit_data(&self) -> Option<&T> {
        self.edit_data.as_ref()
    }

    pub fn edit_data_mut(&mut self) -> Option<&mut T> {
        self.edit_data.as_mut()
    }

    /// Replace the record under edit wholesale
    pub fn set_edit_data(&mut self, record: T) {
        self.edit_data = Some(record);
    }

    /// View-ready hook: materialize a fresh record if none is loaded,
    /// then push the current record into the view
    pub async fn view_showed(&mut self) {
        if self.edit_data.is_none() {
            self.edit_data = Some(T::default());
            self.view
                .proceeding(
                    MessageType::Warning,
                    &self.i18n.prop("shell_data_created_new"),
                )
                .await;
        }
        if let Some(record) = &self.edit_data {
            self.view.show_record(record).await;
        }
    }

    /// Show the view and run the view-ready hook
    pub async fn run(&mut self) {
        self.view.show().await;
        self.view_showed().await;
    }

    /// Run against an existing record. When the record carries identity
    /// criteria, the authoritative current version is requeried first;
    /// a record that no longer exists yields a warning and the stale
    /// in-memory copy is kept.
    pub async fn run_with(&mut self, record: T) {
        let criteria = record.identity_criteria();
        if criteria.is_empty() {
            self.edit_data = Some(record);
            self.run().await;
            return;
        }

        match self.repository.fetch(&criteria).await {
            Ok(result) if result.is_success() && !result.results.is_empty() => {
                if let Some(fresh) = result.results.into_iter().next() {
                    self.edit_data = Some(fresh);
                }
            }
            _ => {
                self.view
                    .message(
                        MessageType::Warning,
                        &self.i18n.prop("shell_data_deleted_and_created"),
                    )
                    .await;
                self.edit_data = Some(record);
            }
        }
        self.run().await;
    }

    /// Persist the current record.
    ///
    /// Zero returned records confirm a deletion and release the record;
    /// one returned record replaces `edit_data` with the authoritative
    /// copy; a non-zero result code leaves `edit_data` untouched. Every
    /// completion path clears busy and re-runs the view-ready hook.
    pub async fn save_data(&mut self) {
        if self.busy {
            self.view
                .proceeding(
                    MessageType::Warning,
                    &self.i18n.prop("shell_application_busy"),
                )
                .await;
            return;
        }
        let Some(record) = self.edit_data.clone() else {
            self.view
                .message(MessageType::Error, &self.i18n.prop("shell_no_data_to_save"))
                .await;
            return;
        };

        self.busy = true;
        self.view.busy(true).await;
        self.view
            .proceeding(
                MessageType::Information,
                &self.i18n.prop("shell_saving_data"),
            )
            .await;

        let saved = self.repository.save(&record).await;
        if let Err(error) = self.process_saved(saved).await {
            self.view
                .message(MessageType::Error, &error.to_string())
                .await;
        }

        self.view.busy(false).await;
        self.busy = false;
        self.view_showed().await;
    }

    async fn process_saved(
        &mut self,
        saved: Result<OperationResult<T>, RepositoryError>,
    ) -> Result<()> {
        let result = saved?;
        if !result.is_success() {
            anyhow::bail!(result.message);
        }

        if result.results.is_empty() {
            // Deletion confirmed, release the record
            debug!(app = self.descriptor.name, "delete confirmed by save");
            self.edit_data = None;
            self.view
                .message(
                    MessageType::Success,
                    &format!(
                        "{}{}",
                        self.i18n.prop("shell_data_delete"),
                        self.i18n.prop("shell_successful")
                    ),
                )
                .await;
        } else if let Some(fresh) = result.results.into_iter().next() {
            self.edit_data = Some(fresh);
            self.view
                .message(
                    MessageType::Success,
                    &format!(
                        "{}{}",
                        self.i18n.prop("shell_data_save"),
                        self.i18n.prop("shell_successful")
                    ),
                )
                .await;
        }
        Ok(())
    }

    /// Ask for confirmation, then mark the record deleted and save
    pub async fn delete_data(&mut self) {
        if self.edit_data.is_none() {
            return;
        }
        let title = self.i18n.prop(self.descriptor.name);
        let answer = self
            .view
            .confirm(&title, &self.i18n.prop("whether_to_delete"))
            .await;
        if answer == MessageAction::Yes {
            if let Some(record) = self.edit_data.as_mut() {
                record.mark_deleted();
            }
            self.save_data().await;
        }
    }

    /// Replace the record under edit with a clone of the current one or
    /// a brand-new default. Unsaved edits require confirmation first.
    pub async fn create_data(&mut self, clone: bool) {
        let dirty = self
            .edit_data
            .as_ref()
            .map(|record| record.is_dirty())
            .unwrap_or(false);
        if dirty {
            let title = self.i18n.prop(self.descriptor.name);
            let answer = self
                .view
                .confirm(
                    &title,
                    &self.i18n.prop("data_not_saved_whether_to_continue"),
                )
                .await;
            if answer == MessageAction::No {
                return;
            }
        }

        match (clone, self.edit_data.as_ref()) {
            (true, Some(current)) => {
                self.edit_data = Some(current.clone_as_new());
                self.view
                    .proceeding(
                        MessageType::Warning,
                        &self.i18n.prop("shell_data_cloned_new"),
                    )
                    .await;
            }
            _ => {
                self.edit_data = Some(T::default());
                self.view
                    .proceeding(
                        MessageType::Warning,
                        &self.i18n.prop("shell_data_created_new"),
                    )
                    .await;
            }
        }
        self.view_showed().await;
    }
}
