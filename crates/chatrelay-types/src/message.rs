//! Conversation message and session identifier types.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single turn in a conversation.
///
/// Immutable once created. `timestamp` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: i64,
}

impl Message {
    /// Create a message stamped with the current time.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Client-facing projection without server-internal fields.
    pub fn view(&self) -> MessageView {
        MessageView {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// The `{role, content}` shape exposed to HTTP clients and sent to the
/// inference provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    pub role: MessageRole,
    pub content: String,
}

/// Opaque, client-generated conversation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Key prefix under which sessions are stored in the KV primitive.
    pub const KEY_PREFIX: &'static str = "session:";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier for clients that did not send one.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Use the client-supplied id, or generate one when it is absent or blank.
    pub fn or_generate(id: Option<String>) -> Self {
        match id {
            Some(id) if !id.trim().is_empty() => Self(id),
            _ => Self::generate(),
        }
    }

    /// Recover a session id from a storage key, if the key belongs to a session.
    pub fn from_storage_key(key: &str) -> Option<Self> {
        key.strip_prefix(Self::KEY_PREFIX).map(Self::new)
    }

    pub fn storage_key(&self) -> String {
        format!("{}{}", Self::KEY_PREFIX, self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let parsed: MessageRole = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
        assert!("moderator".parse::<MessageRole>().is_err());
    }

    #[test]
    fn test_message_role_serde_lowercase() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_message_view_drops_timestamp() {
        let msg = Message::user("hello");
        let json = serde_json::to_value(msg.view()).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn test_session_id_or_generate() {
        assert_eq!(SessionId::or_generate(Some("abc".into())).as_str(), "abc");

        let generated = SessionId::or_generate(None);
        assert!(!generated.as_str().is_empty());

        let blank = SessionId::or_generate(Some("  ".into()));
        assert_ne!(blank.as_str().trim(), "");
    }

    #[test]
    fn test_generated_session_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_storage_key_roundtrip() {
        let id = SessionId::new("abc");
        assert_eq!(id.storage_key(), "session:abc");
        assert_eq!(SessionId::from_storage_key("session:abc"), Some(id));
        assert_eq!(SessionId::from_storage_key("other:abc"), None);
    }

    #[test]
    fn test_session_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&SessionId::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
