//! Business partner desk: choose and edit applications for customers,
//! business-partner groups and contact persons over pluggable
//! repository and view collaborators.

pub mod app;
pub mod cli;
pub mod config;
pub mod criteria;
pub mod errors;
pub mod i18n;
pub mod models;
pub mod registry;
pub mod repository;
pub mod terminal;
pub mod view;

pub use app::{ChooseApp, ChooseOutcome, EditApp};
pub use criteria::{Condition, ConditionOperation, Criteria, OperationResult};
pub use errors::RepositoryError;
pub use models::{BusinessObject, BusinessPartnerGroup, ContactPerson, Customer};
pub use registry::{AppDescriptor, ServicesManager, Workbench};
pub use repository::{BoRepository, SqliteRepository};
pub use view::{BoChooseView, BoEditView, MessageAction, MessageType, MessageView, Selection};
