use crate::envelope::{Constraint, Envelope, FieldSpec, OperationSchema, Param};
use crate::error::ValidationError;
use crate::requests::Request;
use crate::types::{Chat, ChatId, ChatMember};

pub static GET_CHAT: OperationSchema = OperationSchema {
    operation: "getChat",
    fields: &[FieldSpec::always("ChatId").with_constraint(Constraint::NonZeroChat)],
};

pub static GET_CHAT_MEMBER: OperationSchema = OperationSchema {
    operation: "getChatMember",
    fields: &[
        FieldSpec::always("ChatId").with_constraint(Constraint::NonZeroChat),
        FieldSpec::always("UserId").with_constraint(Constraint::PositiveId),
    ],
};

/// Up-to-date information about a chat.
#[derive(Debug, Clone)]
pub struct GetChat(Envelope);

impl GetChat {
    pub fn new(chat_id: impl Into<ChatId>) -> Result<Self, ValidationError> {
        Envelope::construct(&GET_CHAT, [("ChatId", Param::from(chat_id.into()))]).map(Self)
    }
}

impl Request for GetChat {
    type Response = Chat;

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct GetChatMember(Envelope);

impl GetChatMember {
    pub fn new(chat_id: impl Into<ChatId>, user_id: i64) -> Result<Self, ValidationError> {
        Envelope::construct(
            &GET_CHAT_MEMBER,
            [
                ("ChatId", Param::from(chat_id.into())),
                ("UserId", Param::from(user_id)),
            ],
        )
        .map(Self)
    }
}

impl Request for GetChatMember {
    type Response = ChatMember;

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}
