use serde_json::Value;

use crate::codec::WireEnum;
use crate::enums::{ChatAction, ParseMode};
use crate::envelope::{Constraint, Envelope, FieldSpec, OperationSchema, Param};
use crate::error::ValidationError;
use crate::requests::Request;
use crate::types::{ChatId, Message, MessageEntity};

pub static SEND_MESSAGE: OperationSchema = OperationSchema {
    operation: "sendMessage",
    fields: &[
        FieldSpec::always("ChatId").with_constraint(Constraint::NonZeroChat),
        FieldSpec::always("Text").with_constraint(Constraint::NonEmptyText),
        FieldSpec::optional("ParseMode"),
        FieldSpec::optional("Entities"),
        FieldSpec::optional("DisableWebPagePreview"),
        FieldSpec::optional("DisableNotification"),
        FieldSpec::optional("ProtectContent"),
        FieldSpec::optional("ReplyToMessageId").with_constraint(Constraint::PositiveId),
        FieldSpec::optional("AllowSendingWithoutReply"),
        FieldSpec::optional("ReplyMarkup"),
    ],
};

pub static SEND_CHAT_ACTION: OperationSchema = OperationSchema {
    operation: "sendChatAction",
    fields: &[
        FieldSpec::always("ChatId").with_constraint(Constraint::NonZeroChat),
        FieldSpec::always("Action"),
    ],
};

pub static DELETE_MESSAGE: OperationSchema = OperationSchema {
    operation: "deleteMessage",
    fields: &[
        FieldSpec::always("ChatId").with_constraint(Constraint::NonZeroChat),
        FieldSpec::always("MessageId").with_constraint(Constraint::PositiveId),
    ],
};

/// Send a text message.
#[derive(Debug, Clone)]
pub struct SendMessage(Envelope);

impl SendMessage {
    pub fn new(chat_id: impl Into<ChatId>, text: impl Into<String>) -> Result<Self, ValidationError> {
        Envelope::construct(
            &SEND_MESSAGE,
            [
                ("ChatId", Param::from(chat_id.into())),
                ("Text", Param::from(text.into())),
            ],
        )
        .map(Self)
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Result<Self, ValidationError> {
        self.0.set("ParseMode", mode.encode())?;
        Ok(self)
    }

    /// Explicit formatting spans, instead of a parse mode.
    pub fn entities(mut self, entities: &[MessageEntity]) -> Result<Self, ValidationError> {
        let value = serde_json::to_value(entities).map_err(|err| ValidationError::InvalidValue {
            field: "entities".into(),
            reason: err.to_string(),
        })?;
        self.0.set("Entities", value)?;
        Ok(self)
    }

    pub fn disable_web_page_preview(mut self, disable: bool) -> Result<Self, ValidationError> {
        self.0.set("DisableWebPagePreview", disable)?;
        Ok(self)
    }

    /// Deliver silently; recipients get a notification with no sound.
    pub fn disable_notification(mut self, disable: bool) -> Result<Self, ValidationError> {
        self.0.set("DisableNotification", disable)?;
        Ok(self)
    }

    pub fn protect_content(mut self, protect: bool) -> Result<Self, ValidationError> {
        self.0.set("ProtectContent", protect)?;
        Ok(self)
    }

    pub fn reply_to_message_id(mut self, message_id: i64) -> Result<Self, ValidationError> {
        self.0.set("ReplyToMessageId", message_id)?;
        Ok(self)
    }

    pub fn allow_sending_without_reply(mut self, allow: bool) -> Result<Self, ValidationError> {
        self.0.set("AllowSendingWithoutReply", allow)?;
        Ok(self)
    }

    /// Keyboard markup, passed through as JSON.
    pub fn reply_markup(mut self, markup: Value) -> Result<Self, ValidationError> {
        self.0.set("ReplyMarkup", markup)?;
        Ok(self)
    }
}

impl Request for SendMessage {
    type Response = Message;

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

/// Show a status such as "typing…" for about five seconds.
#[derive(Debug, Clone)]
pub struct SendChatAction(Envelope);

impl SendChatAction {
    pub fn new(chat_id: impl Into<ChatId>, action: ChatAction) -> Result<Self, ValidationError> {
        Envelope::construct(
            &SEND_CHAT_ACTION,
            [
                ("ChatId", Param::from(chat_id.into())),
                ("Action", Param::from(action.encode())),
            ],
        )
        .map(Self)
    }
}

impl Request for SendChatAction {
    type Response = bool;

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

/// Delete a message. Messages older than 48 hours can only be deleted by
/// their sender.
#[derive(Debug, Clone)]
pub struct DeleteMessage(Envelope);

impl DeleteMessage {
    pub fn new(chat_id: impl Into<ChatId>, message_id: i64) -> Result<Self, ValidationError> {
        Envelope::construct(
            &DELETE_MESSAGE,
            [
                ("ChatId", Param::from(chat_id.into())),
                ("MessageId", Param::from(message_id)),
            ],
        )
        .map(Self)
    }
}

impl Request for DeleteMessage {
    type Response = bool;

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::MessageEntityType;
    use serde_json::json;

    #[test]
    fn minimal_send_message() {
        let request = SendMessage::new(ChatId::parse("@news").unwrap(), "hello").unwrap();
        assert_eq!(
            Value::Object(request.payload()),
            json!({"chat_id": "@news", "text": "hello"})
        );
    }

    #[test]
    fn parse_mode_uses_its_override_token() {
        let request = SendMessage::new(1, "<b>hi</b>")
            .unwrap()
            .parse_mode(ParseMode::Html)
            .unwrap()
            .disable_notification(true)
            .unwrap();
        let payload = request.payload();
        assert_eq!(payload["parse_mode"], json!("HTML"));
        assert_eq!(payload["disable_notification"], json!(true));
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = SendMessage::new(1, "   ").unwrap_err();
        assert_eq!(err.field(), Some("text"));
    }

    #[test]
    fn reply_to_must_be_positive() {
        let err = SendMessage::new(1, "x")
            .unwrap()
            .reply_to_message_id(-4)
            .unwrap_err();
        assert_eq!(err.field(), Some("reply_to_message_id"));
    }

    #[test]
    fn reply_to_zero_is_rejected_not_dropped() {
        let err = SendMessage::new(1, "x")
            .unwrap()
            .reply_to_message_id(0)
            .unwrap_err();
        assert_eq!(err.field(), Some("reply_to_message_id"));
    }

    #[test]
    fn entities_serialize_with_tokens() {
        let entity = MessageEntity {
            kind: MessageEntityType::TextLink,
            offset: 0,
            length: 4,
            url: Some("https://example.org".into()),
            user: None,
            language: None,
        };
        let request = SendMessage::new(1, "link").unwrap().entities(&[entity]).unwrap();
        assert_eq!(
            request.payload()["entities"],
            json!([{"type": "text_link", "offset": 0, "length": 4, "url": "https://example.org"}])
        );
    }

    #[test]
    fn chat_action_token() {
        let request = SendChatAction::new(7, ChatAction::UploadDocument).unwrap();
        assert_eq!(request.operation_name(), "sendChatAction");
        assert_eq!(request.payload()["action"], json!("upload_document"));
    }

    #[test]
    fn delete_message_requires_positive_id() {
        assert!(DeleteMessage::new(7, 0).is_err());
        let request = DeleteMessage::new(7, 99).unwrap();
        assert_eq!(
            Value::Object(request.payload()),
            json!({"chat_id": 7, "message_id": 99})
        );
    }
}
