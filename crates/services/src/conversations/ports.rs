use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::UserId;

/// Server-assigned conversation document id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ConversationId(pub String);

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        ConversationId(id)
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Draft submitted to the store when two users first make contact.
///
/// The creation timestamp is server-assigned at write time and therefore
/// absent here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewConversation {
    /// Exactly two members, ordered [caller, counterpart]
    pub members: [UserId; 2],
    pub last_message: String,
    pub last_sender: UserId,
}

impl NewConversation {
    /// Build the initial record for a first contact between two users.
    pub fn first_contact(caller: UserId, counterpart: UserId) -> Self {
        Self {
            members: [caller.clone(), counterpart],
            last_message: String::new(),
            last_sender: caller,
        }
    }
}

/// Stored conversation record, as returned by the remote document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub members: [UserId; 2],
    pub last_message: String,
    pub last_sender: UserId,
    /// Server-assigned write timestamp
    pub updated_at: DateTime<Utc>,
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum ConversationError {
    #[error("Not signed in")]
    Unauthenticated,

    #[error("Invalid counterpart: {0}")]
    InvalidCounterpart(String),

    #[error("Failed to write conversation: {0}")]
    StoreWrite(String),
}

/// Remote document store holding the conversation collection.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Create a new conversation document; the store assigns id and timestamp.
    async fn create(&self, draft: NewConversation) -> anyhow::Result<Conversation>;

    async fn get(&self, id: &ConversationId) -> anyhow::Result<Option<Conversation>>;

    async fn list_for_member(&self, member: &UserId) -> anyhow::Result<Vec<Conversation>>;
}
