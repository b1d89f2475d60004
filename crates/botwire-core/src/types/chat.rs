use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::ChatType;
use crate::error::ValidationError;
use crate::types::Message;

/// Target of a chat-scoped operation: a numeric id or an `@username`.
///
/// Serializes flat, as a bare integer or a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl ChatId {
    /// Parse user input. `@name` is a username; anything else must be a
    /// non-zero integer.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.len() > 1 && input.starts_with('@') {
            return Ok(Self::Username(input.to_owned()));
        }
        match input.parse::<i64>() {
            Ok(id) if id != 0 => Ok(Self::Id(id)),
            _ => Err(ValidationError::InvalidChatId(input.to_owned())),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl TryFrom<&str> for ChatId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for ChatId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl FromStr for ChatId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(name) => f.write_str(name),
        }
    }
}

impl From<ChatId> for Value {
    fn from(chat: ChatId) -> Self {
        match chat {
            ChatId::Id(id) => Value::from(id),
            ChatId::Username(name) => Value::String(name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: ChatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    // Returned only by getChat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<ChatPermissions>,
    /// Seconds between consecutive messages for unprivileged members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow_mode_delay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_auto_delete_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_chat_id: Option<i64>,
}

impl Chat {
    pub fn chat_id(&self) -> ChatId {
        ChatId::Id(self.id)
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ChatType::Group | ChatType::Supergroup)
    }
}

/// What non-administrator members may do. Unset flags are left out of the
/// payload and keep the chat's current setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPermissions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_send_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_send_media_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_send_polls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_send_other_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_add_web_page_previews: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_change_info: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_invite_users: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_pin_messages: Option<bool>,
}

impl ChatPermissions {
    /// Every permission revoked.
    pub fn read_only() -> Self {
        Self {
            can_send_messages: Some(false),
            can_send_media_messages: Some(false),
            can_send_polls: Some(false),
            can_send_other_messages: Some(false),
            can_add_web_page_previews: Some(false),
            can_change_info: Some(false),
            can_invite_users: Some(false),
            can_pin_messages: Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_chat_references() {
        assert_eq!(ChatId::parse("-1001234").unwrap(), ChatId::Id(-1001234));
        assert_eq!(
            ChatId::parse("@channel").unwrap(),
            ChatId::Username("@channel".into())
        );
        assert!(ChatId::parse("").is_err());
        assert!(ChatId::parse("@").is_err());
        assert!(ChatId::parse("0").is_err());
        assert!(ChatId::parse("channel").is_err());
    }

    #[test]
    fn chat_id_is_flat_on_the_wire() {
        assert_eq!(serde_json::to_value(ChatId::Id(42)).unwrap(), json!(42));
        assert_eq!(
            serde_json::to_value(ChatId::Username("@x".into())).unwrap(),
            json!("@x")
        );
        let back: ChatId = serde_json::from_value(json!("@x")).unwrap();
        assert_eq!(back, ChatId::Username("@x".into()));
    }

    #[test]
    fn chat_tolerates_unknown_keys_and_types() {
        let chat: Chat = serde_json::from_value(json!({
            "id": -100,
            "type": "forum_of_the_future",
            "title": "t",
            "brand_new_field": {"nested": true}
        }))
        .unwrap();
        assert_eq!(chat.kind, ChatType::Unknown);
        assert_eq!(chat.title.as_deref(), Some("t"));
        assert!(chat.permissions.is_none());
    }

    #[test]
    fn permissions_skip_unset_flags() {
        let perms = ChatPermissions {
            can_send_messages: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&perms).unwrap(),
            json!({"can_send_messages": true})
        );
    }
}
