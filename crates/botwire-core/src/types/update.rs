use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::UpdateType;
use crate::types::{Chat, ChatMemberUpdated, Location, Message, Poll, User};

/// An incoming event from `getUpdates`. At most one payload field is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_channel_post: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_query: Option<InlineQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_inline_result: Option<ChosenInlineResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_query: Option<ShippingQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_checkout_query: Option<PreCheckoutQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_answer: Option<PollAnswer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_chat_member: Option<ChatMemberUpdated>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_member: Option<ChatMemberUpdated>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_join_request: Option<ChatJoinRequest>,
}

impl Update {
    pub fn update_type(&self) -> UpdateType {
        if self.message.is_some() {
            UpdateType::Message
        } else if self.edited_message.is_some() {
            UpdateType::EditedMessage
        } else if self.channel_post.is_some() {
            UpdateType::ChannelPost
        } else if self.edited_channel_post.is_some() {
            UpdateType::EditedChannelPost
        } else if self.inline_query.is_some() {
            UpdateType::InlineQuery
        } else if self.chosen_inline_result.is_some() {
            UpdateType::ChosenInlineResult
        } else if self.callback_query.is_some() {
            UpdateType::CallbackQuery
        } else if self.shipping_query.is_some() {
            UpdateType::ShippingQuery
        } else if self.pre_checkout_query.is_some() {
            UpdateType::PreCheckoutQuery
        } else if self.poll.is_some() {
            UpdateType::Poll
        } else if self.poll_answer.is_some() {
            UpdateType::PollAnswer
        } else if self.my_chat_member.is_some() {
            UpdateType::MyChatMember
        } else if self.chat_member.is_some() {
            UpdateType::ChatMember
        } else if self.chat_join_request.is_some() {
            UpdateType::ChatJoinRequest
        } else {
            UpdateType::Unknown
        }
    }

    /// The message carried by any of the four message-like payloads.
    pub fn any_message(&self) -> Option<&Message> {
        self.message
            .as_ref()
            .or(self.edited_message.as_ref())
            .or(self.channel_post.as_ref())
            .or(self.edited_channel_post.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    pub query: String,
    pub offset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChosenInlineResult {
    pub result_id: String,
    pub from: User,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    pub chat_instance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_short_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuery {
    pub id: String,
    pub from: User,
    pub invoice_payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreCheckoutQuery {
    pub id: String,
    pub from: User,
    pub currency: String,
    pub total_amount: i64,
    pub invoice_payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollAnswer {
    pub poll_id: String,
    pub user: User,
    /// Empty when the vote was retracted.
    #[serde(default)]
    pub option_ids: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatJoinRequest {
    pub chat: Chat,
    pub from: User,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_updates() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 1,
            "callback_query": {
                "id": "q",
                "from": {"id": 1, "is_bot": false, "first_name": "A"},
                "chat_instance": "ci",
                "data": "press"
            }
        }))
        .unwrap();
        assert_eq!(update.update_type(), UpdateType::CallbackQuery);
        assert!(update.any_message().is_none());

        let update: Update = serde_json::from_value(json!({
            "update_id": 2,
            "channel_post": {
                "message_id": 4,
                "date": 1,
                "chat": {"id": -100, "type": "channel", "title": "news"},
                "text": "hi"
            }
        }))
        .unwrap();
        assert_eq!(update.update_type(), UpdateType::ChannelPost);
        assert_eq!(update.any_message().map(|m| m.message_id), Some(4));
    }

    #[test]
    fn payload_from_a_newer_platform_is_unknown() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 3,
            "message_reaction": {"chat": {"id": 1}}
        }))
        .unwrap();
        assert_eq!(update.update_type(), UpdateType::Unknown);
    }
}
