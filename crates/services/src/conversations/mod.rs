pub mod ports;

pub use ports::*;

use std::sync::Arc;
use tracing::info;

use crate::auth::{SessionProvider, UserId};

/// Chat-session bootstrap over the remote conversation store.
///
/// Both backends are injected so call sites never depend on ambient SDK
/// singletons.
pub struct ChatService {
    store: Arc<dyn ConversationStore>,
    session: Arc<dyn SessionProvider>,
}

impl ChatService {
    pub fn new(store: Arc<dyn ConversationStore>, session: Arc<dyn SessionProvider>) -> Self {
        Self { store, session }
    }

    /// Create a conversation with `counterpart` and navigate to it.
    ///
    /// The caller must be authenticated; that precondition is checked before
    /// any store write is attempted. On success the navigation callback is
    /// invoked exactly once with the path of the new conversation. On store
    /// failure the error propagates and no navigation happens.
    ///
    /// No uniqueness check is performed: calling this twice for the same pair
    /// creates two separate conversations.
    pub async fn start_conversation<F>(
        &self,
        counterpart: &UserId,
        navigate: F,
    ) -> Result<Conversation, ConversationError>
    where
        F: FnOnce(&str),
    {
        if counterpart.0.is_empty() {
            return Err(ConversationError::InvalidCounterpart(
                "counterpart id is empty".to_string(),
            ));
        }

        let caller = self
            .session
            .current_user()
            .ok_or(ConversationError::Unauthenticated)?;

        if caller == *counterpart {
            return Err(ConversationError::InvalidCounterpart(format!(
                "cannot start a conversation with self: {counterpart}"
            )));
        }

        info!("Starting conversation between {caller} and {counterpart}");

        let conversation = self
            .store
            .create(NewConversation::first_contact(caller, counterpart.clone()))
            .await
            .map_err(|e| ConversationError::StoreWrite(format!("{e}")))?;

        info!("Created conversation: {}", conversation.id);

        navigate(&format!("/chat/{}", conversation.id));

        Ok(conversation)
    }

    /// Fetch a single conversation by id.
    pub async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, ConversationError> {
        self.store
            .get(id)
            .await
            .map_err(|e| ConversationError::StoreWrite(format!("{e}")))
    }

    /// List the caller's conversations, most recent first.
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>, ConversationError> {
        let caller = self
            .session
            .current_user()
            .ok_or(ConversationError::Unauthenticated)?;

        let mut conversations = self
            .store
            .list_for_member(&caller)
            .await
            .map_err(|e| ConversationError::StoreWrite(format!("{e}")))?;

        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(conversations)
    }
}
