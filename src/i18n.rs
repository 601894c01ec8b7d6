//! Localized user-facing messages
//!
//! Controllers never hard-code user-visible text; they resolve message
//! keys through an injected [`I18n`] instance. Defaults are built in and
//! can be overridden from a JSON object file (key -> message).

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

const DEFAULTS: &[(&str, &str)] = &[
    ("shell_fetching_data", "Fetching data..."),
    ("shell_saving_data", "Saving data..."),
    ("shell_data_created_new", "A new record was created"),
    ("shell_data_cloned_new", "Record was cloned into a new one"),
    (
        "shell_data_deleted_and_created",
        "The record was deleted or recreated in the meantime; showing the local copy",
    ),
    ("shell_data_save", "Save"),
    ("shell_data_delete", "Delete"),
    ("shell_successful", " successful"),
    ("shell_no_data_to_save", "There is no record to save"),
    ("shell_application_busy", "An operation is already in progress"),
    ("whether_to_delete", "Delete this record?"),
    (
        "data_not_saved_whether_to_continue",
        "The record has unsaved changes. Discard them and continue?",
    ),
    ("app_customer_edit", "Customer - Edit"),
    ("app_customer_choose", "Customer - Choose"),
    ("app_businesspartnergroup_edit", "Business Partner Group - Edit"),
    ("app_businesspartnergroup_choose", "Business Partner Group - Choose"),
    ("app_contactperson_choose", "Contact Person - Choose"),
];

pub struct I18n {
    table: HashMap<String, String>,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}

impl I18n {
    pub fn new() -> Self {
        let table = DEFAULTS
            .iter()
            .map(|(key, message)| (key.to_string(), message.to_string()))
            .collect();
        Self { table }
    }

    /// Defaults merged with overrides read from a JSON object file
    pub fn with_overrides_from(path: &Path) -> Result<Self> {
        let mut i18n = Self::new();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read localization file: {}", path.display()))?;
        let overrides: HashMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid localization file: {}", path.display()))?;
        i18n.table.extend(overrides);
        Ok(i18n)
    }

    /// Resolve a message key. Unknown keys come back bracketed so a
    /// missing translation is visible instead of silent.
    pub fn prop(&self, key: &str) -> String {
        self.table
            .get(key)
            .cloned()
            .unwrap_or_else(|| format!("[{}]", key))
    }
}
