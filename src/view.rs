//! View collaborator contracts
//!
//! The applications never render anything themselves; they talk to these
//! traits. User-originated view events are modeled as async-resolving
//! methods (`select_from`, `confirm`) so a controller awaits the outcome
//! inside a single logical handler instead of juggling stored callbacks.

use async_trait::async_trait;

use crate::models::BusinessObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Information,
    Success,
    Warning,
    Error,
    Question,
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Information => "INFO",
            MessageType::Success => "SUCCESS",
            MessageType::Warning => "WARNING",
            MessageType::Error => "ERROR",
            MessageType::Question => "QUESTION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAction {
    Yes,
    No,
}

/// What the user did with a displayed candidate list
#[derive(Debug, Clone)]
pub enum Selection<T> {
    /// One or more records picked from the list
    Records(Vec<T>),
    /// Out-of-band record creation requested instead of a pick
    NewRequested,
    /// List dismissed without choosing
    Cancelled,
}

/// Message and status channel every view exposes
#[async_trait]
pub trait MessageView: Send + Sync {
    /// Route a user-facing message (the generic message channel)
    async fn message(&self, kind: MessageType, text: &str);

    /// Transient status line shown while an operation is running
    async fn proceeding(&self, kind: MessageType, text: &str);

    /// Toggle the busy indicator
    async fn busy(&self, on: bool);

    /// Yes/no question, resolved by the user
    async fn confirm(&self, title: &str, text: &str) -> MessageAction;
}

/// View hosting a selectable candidate list
#[async_trait]
pub trait BoChooseView<T: BusinessObject>: MessageView {
    /// Make the view visible
    async fn show(&self);

    fn is_showed(&self) -> bool;

    /// Display the candidate list and resolve with the user's selection
    async fn select_from(&self, records: &[T]) -> Selection<T>;

    /// Close the view after the selection was finalized
    async fn close(&self);
}

/// View hosting a single editable record
#[async_trait]
pub trait BoEditView<T: BusinessObject>: MessageView {
    /// Make the view visible
    async fn show(&self);

    /// Push the current record into the view
    async fn show_record(&self, record: &T);
}
