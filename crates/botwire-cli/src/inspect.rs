//! `botwire parse` and `botwire decode`: read platform output back into
//! typed entities.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use botwire_core::enums::{
    ChatAction, ChatMemberStatus, ChatType, MessageEntityType, MessageType, ParseMode, PollType,
    UpdateType,
};
use botwire_core::types::{ChatMember, Message, Update};
use botwire_core::{decode_response, WireEnum};
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Message,
    Update,
    /// A `getUpdates` result list.
    Updates,
    ChatMember,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnumKind {
    MessageType,
    ChatType,
    ChatMemberStatus,
    ChatAction,
    ParseMode,
    MessageEntityType,
    UpdateType,
    PollType,
}

/// Parse a saved reply and summarize it. Accepts the full
/// `{"ok": .., "result": ..}` body or a bare entity.
pub fn parse_file(path: &Path, kind: EntityKind) -> Result<Value> {
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_bytes(&raw, kind).with_context(|| format!("parsing {} as {kind:?}", path.display()))
}

pub fn parse_bytes(raw: &[u8], kind: EntityKind) -> Result<Value> {
    let summary = match kind {
        EntityKind::Message => summarize_message(&entity::<Message>(raw)?),
        EntityKind::Update => summarize_update(&entity::<Update>(raw)?),
        EntityKind::Updates => Value::Array(
            entity::<Vec<Update>>(raw)?
                .iter()
                .map(summarize_update)
                .collect(),
        ),
        EntityKind::ChatMember => summarize_member(&entity::<ChatMember>(raw)?),
    };
    Ok(summary)
}

fn entity<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(raw).context("not JSON")?;
    if value.get("ok").is_some_and(Value::is_boolean) {
        return Ok(decode_response(std::any::type_name::<T>(), raw)?);
    }
    Ok(serde_json::from_value(value)?)
}

fn summarize_message(message: &Message) -> Value {
    let entities: Vec<Value> = message
        .entities
        .iter()
        .map(|entity| json!({"type": entity.kind, "text": message.entity_text(entity)}))
        .collect();
    json!({
        "message_id": message.message_id,
        "type": message.message_type(),
        "chat": message.chat.chat_id(),
        "chat_type": message.chat.kind,
        "group": message.chat.is_group(),
        "from": message.from.as_ref().map(|user| user.full_name()),
        "from_mention": message.from.as_ref().and_then(|user| user.mention()),
        "date": message.date.to_rfc3339(),
        "text": message.text.as_deref().or(message.caption.as_deref()),
        "entities": entities,
    })
}

fn summarize_update(update: &Update) -> Value {
    json!({
        "update_id": update.update_id,
        "type": update.update_type(),
        "message": update.any_message().map(summarize_message),
    })
}

fn summarize_member(member: &ChatMember) -> Value {
    json!({
        "user": member.user.id,
        "name": member.user.full_name(),
        "mention": member.user.mention(),
        "status": member.status,
        "privileged": member.is_privileged(),
        "present": member.is_present(),
    })
}

/// Decode a token, or list every token when none is given.
pub fn describe(kind: EnumKind, token: Option<&str>) -> Value {
    match kind {
        EnumKind::MessageType => describe_as::<MessageType>(token),
        EnumKind::ChatType => describe_as::<ChatType>(token),
        EnumKind::ChatMemberStatus => describe_as::<ChatMemberStatus>(token),
        EnumKind::ChatAction => describe_as::<ChatAction>(token),
        EnumKind::ParseMode => describe_as::<ParseMode>(token),
        EnumKind::MessageEntityType => describe_as::<MessageEntityType>(token),
        EnumKind::UpdateType => describe_as::<UpdateType>(token),
        EnumKind::PollType => describe_as::<PollType>(token),
    }
}

fn describe_as<E: WireEnum>(token: Option<&str>) -> Value {
    let Some(token) = token else {
        let tokens: Vec<&str> = E::table().tokens().collect();
        return json!({"enum": E::NAME, "tokens": tokens});
    };
    let member = E::decode(token);
    json!({
        "enum": E::NAME,
        "input": token,
        "member": format!("{member:?}"),
        "token": member.encode(),
        "known": member.is_known(),
    })
}
