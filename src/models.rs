use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::criteria::{Condition, ConditionOperation, Criteria};

/// Field names shared by criteria building and field access
pub mod fields {
    pub const CODE: &str = "code";
    pub const NAME: &str = "name";
    pub const GROUP: &str = "group";
    pub const CONTACT_PERSON: &str = "contact_person";
    pub const TELEPHONE1: &str = "telephone1";
    pub const TELEPHONE2: &str = "telephone2";
    pub const MOBILE_PHONE: &str = "mobile_phone";
    pub const FAX_NUMBER: &str = "fax_number";
    pub const FAX: &str = "fax";
    pub const ACTIVATED: &str = "activated";
    pub const DELETED: &str = "deleted";
}

/// Y/N representation used in criteria values
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Y"
    } else {
        "N"
    }
}

/// A business object: a domain record with identity, named fields,
/// a soft-delete marker and a dirty flag for unsaved local edits.
pub trait BusinessObject: Clone + Default + Send + Sync + 'static {
    /// Business object code used for registration and service lookup
    const BO_CODE: &'static str;

    /// Unique code identifying this record
    fn code(&self) -> &str;

    /// Read a field by name, normalized to its string form (booleans as Y/N)
    fn field_value(&self, field: &str) -> Option<String>;

    /// Write a field by name, marking the record dirty on success
    fn set_field_value(&mut self, field: &str, value: &str) -> bool;

    /// Criteria locating the authoritative version of this record.
    /// Empty when the record has no identity yet.
    fn identity_criteria(&self) -> Criteria {
        if self.code().is_empty() {
            Criteria::new()
        } else {
            Criteria::new().with(Condition::new(
                fields::CODE,
                ConditionOperation::Equal,
                self.code(),
            ))
        }
    }

    fn is_dirty(&self) -> bool;
    fn mark_dirty(&mut self);
    fn mark_clean(&mut self);

    fn is_deleted(&self) -> bool;
    fn mark_deleted(&mut self);

    /// Copy of this record with identity and dirty/deleted markers cleared,
    /// business fields preserved
    fn clone_as_new(&self) -> Self;

    /// One-line listing form (code plus display name)
    fn summary(&self) -> String {
        let name = self.field_value(fields::NAME).unwrap_or_default();
        format!("{} - {}", self.code(), name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub code: String,
    pub name: String,
    pub group: String,
    pub contact_person: String,
    pub telephone1: String,
    pub telephone2: String,
    pub mobile_phone: String,
    pub fax_number: String,
    pub activated: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dirty: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Default for Customer {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            group: String::new(),
            contact_person: String::new(),
            telephone1: String::new(),
            telephone2: String::new(),
            mobile_phone: String::new(),
            fax_number: String::new(),
            activated: true,
            deleted: false,
            dirty: false,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Customer {
    /// Record carrying only an identity, used to requery the current version
    pub fn with_code(code: &str) -> Self {
        Self {
            code: code.to_string(),
            ..Self::default()
        }
    }
}

impl BusinessObject for Customer {
    const BO_CODE: &'static str = "CC_BP_CUSTOMER";

    fn code(&self) -> &str {
        &self.code
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            fields::CODE => Some(self.code.clone()),
            fields::NAME => Some(self.name.clone()),
            fields::GROUP => Some(self.group.clone()),
            fields::CONTACT_PERSON => Some(self.contact_person.clone()),
            fields::TELEPHONE1 => Some(self.telephone1.clone()),
            fields::TELEPHONE2 => Some(self.telephone2.clone()),
            fields::MOBILE_PHONE => Some(self.mobile_phone.clone()),
            fields::FAX_NUMBER => Some(self.fax_number.clone()),
            fields::ACTIVATED => Some(yes_no(self.activated).to_string()),
            fields::DELETED => Some(yes_no(self.deleted).to_string()),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: &str) -> bool {
        match field {
            fields::CODE => self.code = value.to_string(),
            fields::NAME => self.name = value.to_string(),
            fields::GROUP => self.group = value.to_string(),
            fields::CONTACT_PERSON => self.contact_person = value.to_string(),
            fields::TELEPHONE1 => self.telephone1 = value.to_string(),
            fields::TELEPHONE2 => self.telephone2 = value.to_string(),
            fields::MOBILE_PHONE => self.mobile_phone = value.to_string(),
            fields::FAX_NUMBER => self.fax_number = value.to_string(),
            fields::ACTIVATED => self.activated = value.eq_ignore_ascii_case("y"),
            _ => return false,
        }
        self.dirty = true;
        true
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
        self.dirty = true;
    }

    fn clone_as_new(&self) -> Self {
        Self {
            code: String::new(),
            deleted: false,
            dirty: false,
            created_at: None,
            updated_at: None,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessPartnerGroup {
    pub code: String,
    pub name: String,
    pub activated: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dirty: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Default for BusinessPartnerGroup {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            activated: true,
            deleted: false,
            dirty: false,
            created_at: None,
            updated_at: None,
        }
    }
}

impl BusinessPartnerGroup {
    pub fn with_code(code: &str) -> Self {
        Self {
            code: code.to_string(),
            ..Self::default()
        }
    }
}

impl BusinessObject for BusinessPartnerGroup {
    const BO_CODE: &'static str = "CC_BP_BUSINESSPARTNERGROUP";

    fn code(&self) -> &str {
        &self.code
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            fields::CODE => Some(self.code.clone()),
            fields::NAME => Some(self.name.clone()),
            fields::ACTIVATED => Some(yes_no(self.activated).to_string()),
            fields::DELETED => Some(yes_no(self.deleted).to_string()),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: &str) -> bool {
        match field {
            fields::CODE => self.code = value.to_string(),
            fields::NAME => self.name = value.to_string(),
            fields::ACTIVATED => self.activated = value.eq_ignore_ascii_case("y"),
            _ => return false,
        }
        self.dirty = true;
        true
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
        self.dirty = true;
    }

    fn clone_as_new(&self) -> Self {
        Self {
            code: String::new(),
            deleted: false,
            dirty: false,
            created_at: None,
            updated_at: None,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPerson {
    pub code: String,
    pub name: String,
    pub telephone1: String,
    pub telephone2: String,
    pub mobile_phone: String,
    pub fax: String,
    pub activated: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dirty: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Default for ContactPerson {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            telephone1: String::new(),
            telephone2: String::new(),
            mobile_phone: String::new(),
            fax: String::new(),
            activated: true,
            deleted: false,
            dirty: false,
            created_at: None,
            updated_at: None,
        }
    }
}

impl ContactPerson {
    pub fn with_code(code: &str) -> Self {
        Self {
            code: code.to_string(),
            ..Self::default()
        }
    }
}

impl BusinessObject for ContactPerson {
    const BO_CODE: &'static str = "CC_BP_CONTACTPERSON";

    fn code(&self) -> &str {
        &self.code
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            fields::CODE => Some(self.code.clone()),
            fields::NAME => Some(self.name.clone()),
            fields::TELEPHONE1 => Some(self.telephone1.clone()),
            fields::TELEPHONE2 => Some(self.telephone2.clone()),
            fields::MOBILE_PHONE => Some(self.mobile_phone.clone()),
            fields::FAX => Some(self.fax.clone()),
            fields::ACTIVATED => Some(yes_no(self.activated).to_string()),
            fields::DELETED => Some(yes_no(self.deleted).to_string()),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: &str) -> bool {
        match field {
            fields::CODE => self.code = value.to_string(),
            fields::NAME => self.name = value.to_string(),
            fields::TELEPHONE1 => self.telephone1 = value.to_string(),
            fields::TELEPHONE2 => self.telephone2 = value.to_string(),
            fields::MOBILE_PHONE => self.mobile_phone = value.to_string(),
            fields::FAX => self.fax = value.to_string(),
            fields::ACTIVATED => self.activated = value.eq_ignore_ascii_case("y"),
            _ => return false,
        }
        self.dirty = true;
        true
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
        self.dirty = true;
    }

    fn clone_as_new(&self) -> Self {
        Self {
            code: String::new(),
            deleted: false,
            dirty: false,
            created_at: None,
            updated_at: None,
            ..self.clone()
        }
    }
}
