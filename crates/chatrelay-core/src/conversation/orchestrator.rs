//! ReplyOrchestrator -- one conversational turn.
//!
//! Reads the session history, asks the inference provider for a reply,
//! then appends the user message followed by the assistant reply.
//!
//! The two appends are not transactional: if the assistant append fails
//! after the user append succeeded, the user message stays stored.

use chatrelay_types::error::ConversationError;
use chatrelay_types::message::{Message, MessageView, SessionId};
use tracing::{info, warn};

use crate::conversation::store::ConversationStore;
use crate::inference::provider::InferenceProvider;
use crate::storage::kv_store::KvStore;

pub struct ReplyOrchestrator<K: KvStore, P: InferenceProvider> {
    store: ConversationStore<K>,
    provider: P,
}

impl<K: KvStore, P: InferenceProvider> ReplyOrchestrator<K, P> {
    pub fn new(store: ConversationStore<K>, provider: P) -> Self {
        Self { store, provider }
    }

    /// Access the conversation store (history reads and resets go straight here).
    pub fn store(&self) -> &ConversationStore<K> {
        &self.store
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Generate and persist a reply to `user_text` within `session_id`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if `user_text` is blank; the store is not touched.
    /// - `InferenceFailure` if the provider call fails; nothing is appended.
    /// - `StorageUnavailable` if history cannot be read or written.
    pub async fn handle_message(
        &self,
        session_id: &SessionId,
        user_text: &str,
    ) -> Result<String, ConversationError> {
        if user_text.is_empty() {
            return Err(ConversationError::InvalidRequest(
                "message must not be empty".to_string(),
            ));
        }

        let history = self.store.get_history(session_id).await?;
        let context: Vec<MessageView> = history.iter().map(Message::view).collect();

        let output = self
            .provider
            .generate(&context, user_text)
            .await
            .map_err(|e| {
                warn!(
                    session_id = %session_id,
                    provider = self.provider.name(),
                    error = %e,
                    "Inference call failed"
                );
                ConversationError::InferenceFailure(e.to_string())
            })?;
        let reply = output.into_reply();

        self.store.append(session_id, Message::user(user_text)).await?;
        self.store
            .append(session_id, Message::assistant(reply.clone()))
            .await?;

        info!(
            session_id = %session_id,
            prior_messages = history.len(),
            reply_chars = reply.len(),
            "Reply generated"
        );

        Ok(reply)
    }
}
