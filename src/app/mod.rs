//! Applications: choose and edit screens over the shared collaborators

pub mod choose;
pub mod contact;
pub mod customer;
pub mod edit;
pub mod group;

#[cfg(test)]
pub(crate) mod testing;

pub use choose::{ChooseApp, ChooseOutcome};
pub use contact::{ContactPersonChooseApp, CONTACT_PERSON_CHOOSE_APP};
pub use customer::{CustomerChooseApp, CustomerEditApp, CUSTOMER_CHOOSE_APP, CUSTOMER_EDIT_APP};
pub use edit::EditApp;
pub use group::{
    BusinessPartnerGroupChooseApp, BusinessPartnerGroupEditApp, GROUP_CHOOSE_APP, GROUP_EDIT_APP,
};
