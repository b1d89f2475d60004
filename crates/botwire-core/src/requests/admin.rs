use chrono::{DateTime, Utc};

use crate::envelope::{Constraint, Envelope, FieldSpec, OperationSchema, Param, Transform};
use crate::error::ValidationError;
use crate::requests::Request;
use crate::types::{ChatId, ChatPermissions};

pub static BAN_CHAT_MEMBER: OperationSchema = OperationSchema {
    operation: "banChatMember",
    fields: &[
        FieldSpec::always("ChatId").with_constraint(Constraint::NonZeroChat),
        FieldSpec::always("UserId").with_constraint(Constraint::PositiveId),
        FieldSpec::optional("UntilDate").with_transform(Transform::UnixSeconds),
        FieldSpec::optional_flag("RevokeMessages"),
    ],
};

pub static UNBAN_CHAT_MEMBER: OperationSchema = OperationSchema {
    operation: "unbanChatMember",
    fields: &[
        FieldSpec::always("ChatId").with_constraint(Constraint::NonZeroChat),
        FieldSpec::always("UserId").with_constraint(Constraint::PositiveId),
        FieldSpec::optional_flag("OnlyIfBanned"),
    ],
};

pub static RESTRICT_CHAT_MEMBER: OperationSchema = OperationSchema {
    operation: "restrictChatMember",
    fields: &[
        FieldSpec::always("ChatId").with_constraint(Constraint::NonZeroChat),
        FieldSpec::always("UserId").with_constraint(Constraint::PositiveId),
        FieldSpec::always("Permissions"),
        FieldSpec::optional("UntilDate").with_transform(Transform::UnixSeconds),
    ],
};

/// Ban a user from a group, supergroup or channel.
///
/// In supergroups and channels the user cannot rejoin through invite links
/// until unbanned. The bot must be an administrator with the right to
/// restrict members.
#[derive(Debug, Clone)]
pub struct BanChatMember(Envelope);

impl BanChatMember {
    pub fn new(chat_id: impl Into<ChatId>, user_id: i64) -> Result<Self, ValidationError> {
        Envelope::construct(
            &BAN_CHAT_MEMBER,
            [
                ("ChatId", Param::from(chat_id.into())),
                ("UserId", Param::from(user_id)),
            ],
        )
        .map(Self)
    }

    /// When the ban ends. Bans shorter than 30 seconds or longer than 366
    /// days are permanent.
    pub fn until_date(mut self, until: DateTime<Utc>) -> Result<Self, ValidationError> {
        self.0.set("UntilDate", until)?;
        Ok(self)
    }

    /// Also delete the user's messages in the chat. Always on for
    /// supergroups and channels.
    pub fn revoke_messages(mut self, revoke: bool) -> Result<Self, ValidationError> {
        self.0.set("RevokeMessages", revoke)?;
        Ok(self)
    }
}

impl Request for BanChatMember {
    type Response = bool;

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

/// Lift a ban. With `only_if_banned` unset this also removes a user who is
/// currently a member.
#[derive(Debug, Clone)]
pub struct UnbanChatMember(Envelope);

impl UnbanChatMember {
    pub fn new(chat_id: impl Into<ChatId>, user_id: i64) -> Result<Self, ValidationError> {
        Envelope::construct(
            &UNBAN_CHAT_MEMBER,
            [
                ("ChatId", Param::from(chat_id.into())),
                ("UserId", Param::from(user_id)),
            ],
        )
        .map(Self)
    }

    pub fn only_if_banned(mut self, only: bool) -> Result<Self, ValidationError> {
        self.0.set("OnlyIfBanned", only)?;
        Ok(self)
    }
}

impl Request for UnbanChatMember {
    type Response = bool;

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

/// Change what a supergroup member may do.
#[derive(Debug, Clone)]
pub struct RestrictChatMember(Envelope);

impl RestrictChatMember {
    pub fn new(
        chat_id: impl Into<ChatId>,
        user_id: i64,
        permissions: &ChatPermissions,
    ) -> Result<Self, ValidationError> {
        let permissions =
            serde_json::to_value(permissions).map_err(|err| ValidationError::InvalidValue {
                field: "permissions".into(),
                reason: err.to_string(),
            })?;
        Envelope::construct(
            &RESTRICT_CHAT_MEMBER,
            [
                ("ChatId", Param::from(chat_id.into())),
                ("UserId", Param::from(user_id)),
                ("Permissions", Param::from(permissions)),
            ],
        )
        .map(Self)
    }

    pub fn until_date(mut self, until: DateTime<Utc>) -> Result<Self, ValidationError> {
        self.0.set("UntilDate", until)?;
        Ok(self)
    }
}

impl Request for RestrictChatMember {
    type Response = bool;

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}
