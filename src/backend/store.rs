//! Document store contract and the message record shape

use super::error::StoreError;
use super::ListenerId;
use chrono::{DateTime, Utc};

/// Collection every panel reads and writes
pub const MESSAGES_COLLECTION: &str = "messages";

/// A stored message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub author_email: String,
    /// Absent until the store has stamped it
    pub created_at: Option<DateTime<Utc>>,
}

/// How the creation time of a new record is filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampField {
    /// Stamped by the store when the write is applied
    Server,
    Unset,
}

/// Payload for [`DocumentStore::insert`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub text: String,
    pub author_email: String,
    pub created_at: TimestampField,
}

/// Update payload; only the text of a message is editable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePatch {
    pub text: String,
}

impl MessagePatch {
    pub fn text(text: impl Into<String>) -> Self {
        MessagePatch { text: text.into() }
    }
}

/// Ordering of a live query's result set, always ascending.
///
/// Ordering by a field excludes documents that lack it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    CreatedAt,
}

impl OrderBy {
    /// Stored field name
    pub fn field_name(self) -> &'static str {
        match self {
            OrderBy::CreatedAt => "createdAt",
        }
    }
}

/// Callback receiving the full result set (or the failure) on every change
pub type SnapshotListener = Box<dyn FnMut(Result<Vec<Message>, StoreError>)>;

/// A collection-oriented document database.
///
/// Reads return whole result sets; there is no paging or partial snapshot.
pub trait DocumentStore {
    /// Append a record and return its id
    fn insert(&self, collection: &str, message: NewMessage) -> Result<String, StoreError>;

    fn fetch_all(&self, collection: &str) -> Result<Vec<Message>, StoreError>;

    fn update(&self, collection: &str, id: &str, patch: MessagePatch) -> Result<(), StoreError>;

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Start a live query. The listener fires once with the current result set and
    /// then after every change to the collection, until [`DocumentStore::unsubscribe`].
    fn subscribe(&self, collection: &str, order: OrderBy, listener: SnapshotListener)
        -> ListenerId;

    fn unsubscribe(&self, id: ListenerId);
}
