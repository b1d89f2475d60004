use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::ChatMemberStatus;
use crate::types::{Chat, User};

/// A user's membership in a chat.
///
/// The platform sends a different set of keys per status; all of them are
/// optional here and `status` tells which apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMember {
    #[serde(default)]
    pub status: ChatMemberStatus,
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_anonymous: Option<bool>,
    /// Restricted and kicked members: when the restriction ends.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub until_date: Option<DateTime<Utc>>,

    // Administrator rights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_be_edited: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_manage_chat: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_delete_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_restrict_members: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_promote_members: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_change_info: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_invite_users: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_pin_messages: Option<bool>,

    // Restricted members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_member: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_send_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_send_media_messages: Option<bool>,
}

impl ChatMember {
    /// Creator or administrator.
    pub fn is_privileged(&self) -> bool {
        matches!(
            self.status,
            ChatMemberStatus::Creator | ChatMemberStatus::Administrator
        )
    }

    /// Still part of the chat, possibly with restrictions.
    pub fn is_present(&self) -> bool {
        match self.status {
            ChatMemberStatus::Left | ChatMemberStatus::Kicked => false,
            ChatMemberStatus::Restricted => self.is_member.unwrap_or(false),
            _ => true,
        }
    }
}

/// A membership change, delivered as `my_chat_member` or `chat_member`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
    pub from: User,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    pub old_chat_member: ChatMember,
    pub new_chat_member: ChatMember,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kicked_member_with_until_date() {
        let member: ChatMember = serde_json::from_value(json!({
            "status": "kicked",
            "user": {"id": 9, "is_bot": false, "first_name": "Eve"},
            "until_date": 1_900_000_000
        }))
        .unwrap();
        assert_eq!(member.status, ChatMemberStatus::Kicked);
        assert_eq!(member.until_date.map(|d| d.timestamp()), Some(1_900_000_000));
        assert!(!member.is_present());
        assert!(!member.is_privileged());
    }

    #[test]
    fn future_status_is_unknown_but_present() {
        let member: ChatMember = serde_json::from_value(json!({
            "status": "owner",
            "user": {"id": 1, "is_bot": false, "first_name": "O"},
            "is_anonymous": false
        }))
        .unwrap();
        assert_eq!(member.status, ChatMemberStatus::Unknown);
        assert!(member.is_present());
    }

    #[test]
    fn restricted_presence_follows_is_member() {
        let member: ChatMember = serde_json::from_value(json!({
            "status": "restricted",
            "user": {"id": 2, "is_bot": false, "first_name": "R"},
            "is_member": true,
            "can_send_messages": false
        }))
        .unwrap();
        assert!(member.is_present());
        assert_eq!(member.can_send_messages, Some(false));
    }
}
