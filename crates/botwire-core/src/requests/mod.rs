//! Typed requests, one per remote operation.
//!
//! Each request wraps an [`Envelope`] built from its static schema and adds
//! typed constructors and setters. Setters validate immediately and return
//! the request back, so calls chain with `?`.

mod admin;
mod chats;
mod messages;
mod updates;

use serde::de::DeserializeOwned;

use crate::envelope::{Envelope, OperationSchema, Payload};

pub use admin::{
    BanChatMember, RestrictChatMember, UnbanChatMember, BAN_CHAT_MEMBER, RESTRICT_CHAT_MEMBER,
    UNBAN_CHAT_MEMBER,
};
pub use chats::{GetChat, GetChatMember, GET_CHAT, GET_CHAT_MEMBER};
pub use messages::{
    DeleteMessage, SendChatAction, SendMessage, DELETE_MESSAGE, SEND_CHAT_ACTION, SEND_MESSAGE,
};
pub use updates::{GetMe, GetUpdates, GET_ME, GET_UPDATES};

/// An outbound operation with a typed result.
pub trait Request {
    /// Type of the `result` key in a successful reply.
    type Response: DeserializeOwned;

    fn envelope(&self) -> &Envelope;

    fn operation_name(&self) -> &'static str {
        self.envelope().operation_name()
    }

    fn payload(&self) -> Payload {
        self.envelope().serialize()
    }
}

/// Every schema this crate declares.
pub fn schemas() -> [&'static OperationSchema; 10] {
    [
        &GET_ME,
        &GET_UPDATES,
        &SEND_MESSAGE,
        &SEND_CHAT_ACTION,
        &DELETE_MESSAGE,
        &GET_CHAT,
        &GET_CHAT_MEMBER,
        &BAN_CHAT_MEMBER,
        &UNBAN_CHAT_MEMBER,
        &RESTRICT_CHAT_MEMBER,
    ]
}

/// Look a schema up by its operation name, e.g. `banChatMember`.
pub fn schema_for(operation: &str) -> Option<&'static OperationSchema> {
    schemas()
        .into_iter()
        .find(|schema| schema.operation == operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::to_snake_case;
    use std::collections::HashSet;

    #[test]
    fn wire_names_never_collide_within_a_schema() {
        for schema in schemas() {
            let names = schema.wire_names();
            let unique: HashSet<&String> = names.iter().collect();
            assert_eq!(unique.len(), names.len(), "collision in {}", schema.operation);
        }
    }

    #[test]
    fn wire_names_are_stable_under_the_transform() {
        for schema in schemas() {
            for name in schema.wire_names() {
                assert_eq!(to_snake_case(&name), name);
            }
        }
    }

    #[test]
    fn operation_names_are_unique_and_non_empty() {
        let mut seen = HashSet::new();
        for schema in schemas() {
            assert!(!schema.operation.is_empty());
            assert!(seen.insert(schema.operation));
        }
    }

    #[test]
    fn lookup_by_operation() {
        let schema = schema_for("banChatMember").unwrap();
        assert_eq!(
            schema.wire_names(),
            vec!["chat_id", "user_id", "until_date", "revoke_messages"]
        );
        assert!(schema_for("kickChatMember").is_none());
    }
}
