//! `botwire render`: build a request envelope from flags and print its
//! payload without sending it.

use anyhow::{anyhow, bail, Context, Result};
use botwire_core::enums::ParseMode;
use botwire_core::envelope::{Envelope, Param, Payload};
use botwire_core::requests::{
    schema_for, schemas, BAN_CHAT_MEMBER, GET_UPDATES, SEND_MESSAGE, UNBAN_CHAT_MEMBER,
};
use botwire_core::{ChatId, WireEnum};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde_json::Value;

use crate::settings::CliSettings;

#[derive(Debug, Subcommand)]
pub enum RenderCommand {
    /// Ban a user from a chat
    Ban {
        /// Chat id or @username
        #[arg(long, allow_hyphen_values = true)]
        chat: Option<String>,
        #[arg(long)]
        user: i64,
        /// End of the ban, RFC 3339
        #[arg(long)]
        until: Option<String>,
        /// Delete the user's messages too; `--revoke=false` sends an explicit no
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        revoke: Option<bool>,
    },

    /// Lift a ban
    Unban {
        #[arg(long, allow_hyphen_values = true)]
        chat: Option<String>,
        #[arg(long)]
        user: i64,
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        only_if_banned: Option<bool>,
    },

    /// Send a text message
    Send {
        #[arg(long, allow_hyphen_values = true)]
        chat: Option<String>,
        #[arg(long)]
        text: String,
        /// Markdown, MarkdownV2 or HTML
        #[arg(long)]
        parse_mode: Option<String>,
        /// Deliver without a notification sound
        #[arg(long)]
        silent: bool,
    },

    /// Poll for updates
    Updates {
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<i64>,
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long)]
        timeout: Option<i64>,
    },

    /// Any known operation, fields given as name=value
    Raw {
        /// Operation name, e.g. getChatMember
        #[arg(long)]
        op: String,
        /// Field assignment; the value is read as JSON, else as a string
        #[arg(long = "field", value_parser = parse_assignment, allow_hyphen_values = true)]
        fields: Vec<(String, Value)>,
    },
}

type Fields = Vec<(&'static str, Param)>;

impl RenderCommand {
    /// Returns the operation name and its wire payload.
    pub fn render(self, settings: &CliSettings) -> Result<(&'static str, Payload)> {
        let envelope = match self {
            RenderCommand::Ban {
                chat,
                user,
                until,
                revoke,
            } => {
                let mut fields = chat_field(chat, settings)?;
                fields.push(("UserId", Param::from(user)));
                if let Some(until) = until {
                    fields.push(("UntilDate", Param::from(parse_instant(&until)?)));
                }
                if let Some(revoke) = revoke {
                    fields.push(("RevokeMessages", Param::from(revoke)));
                }
                Envelope::construct(&BAN_CHAT_MEMBER, fields)?
            }
            RenderCommand::Unban {
                chat,
                user,
                only_if_banned,
            } => {
                let mut fields = chat_field(chat, settings)?;
                fields.push(("UserId", Param::from(user)));
                if let Some(only) = only_if_banned {
                    fields.push(("OnlyIfBanned", Param::from(only)));
                }
                Envelope::construct(&UNBAN_CHAT_MEMBER, fields)?
            }
            RenderCommand::Send {
                chat,
                text,
                parse_mode,
                silent,
            } => {
                let mut fields = chat_field(chat, settings)?;
                fields.push(("Text", Param::from(text)));
                if let Some(token) = parse_mode.or_else(|| settings.defaults.parse_mode.clone()) {
                    fields.push(("ParseMode", Param::from(parse_mode_token(&token)?)));
                }
                fields.push(("DisableNotification", Param::from(silent)));
                Envelope::construct(&SEND_MESSAGE, fields)?
            }
            RenderCommand::Updates {
                offset,
                limit,
                timeout,
            } => {
                let fields: Fields = [("Offset", offset), ("Limit", limit), ("Timeout", timeout)]
                    .into_iter()
                    .filter_map(|(name, value)| value.map(|v| (name, Param::from(v))))
                    .collect();
                Envelope::construct(&GET_UPDATES, fields)?
            }
            RenderCommand::Raw { op, fields } => {
                let schema = schema_for(&op).ok_or_else(|| {
                    let known: Vec<&str> = schemas().iter().map(|s| s.operation).collect();
                    anyhow!("unknown operation `{op}`; known: {}", known.join(", "))
                })?;
                Envelope::construct(
                    schema,
                    fields.into_iter().map(|(name, value)| (name, Param::from(value))),
                )?
            }
        };
        Ok((envelope.operation_name(), envelope.serialize()))
    }
}

/// The chat field, from the flag or the configured default. Left out when
/// neither is set so construction reports it missing.
fn chat_field(chat: Option<String>, settings: &CliSettings) -> Result<Fields> {
    let Some(raw) = chat.or_else(|| settings.defaults.chat.clone()) else {
        return Ok(Vec::new());
    };
    let chat = ChatId::parse(&raw)?;
    Ok(vec![("ChatId", Param::from(chat))])
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    let at = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("`{raw}` is not an RFC 3339 timestamp"))?;
    Ok(at.with_timezone(&Utc))
}

fn parse_mode_token(token: &str) -> Result<&'static str> {
    let mode = ParseMode::decode(token);
    if !mode.is_known() {
        bail!("unknown parse mode `{token}`; expected Markdown, MarkdownV2 or HTML");
    }
    Ok(mode.encode())
}

fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))?;
    if name.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((name.to_owned(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(command: RenderCommand) -> Result<(&'static str, Payload)> {
        command.render(&CliSettings::default())
    }

    #[test]
    fn ban_without_options() {
        let (op, payload) = render(RenderCommand::Ban {
            chat: Some("-100".into()),
            user: 42,
            until: None,
            revoke: None,
        })
        .unwrap();
        assert_eq!(op, "banChatMember");
        assert_eq!(Value::Object(payload), json!({"chat_id": -100, "user_id": 42}));
    }

    #[test]
    fn ban_until_is_converted() {
        let (_, payload) = render(RenderCommand::Ban {
            chat: Some("@group".into()),
            user: 42,
            until: Some("2030-01-01T00:00:00Z".into()),
            revoke: Some(true),
        })
        .unwrap();
        assert_eq!(payload["until_date"], json!(1_893_456_000));
        assert_eq!(payload["revoke_messages"], json!(true));
    }

    #[test]
    fn explicit_no_revoke_is_rendered() {
        let (_, payload) = render(RenderCommand::Ban {
            chat: Some("-100".into()),
            user: 42,
            until: None,
            revoke: Some(false),
        })
        .unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({"chat_id": -100, "user_id": 42, "revoke_messages": false})
        );
    }

    #[test]
    fn missing_chat_names_the_field() {
        let err = render(RenderCommand::Unban {
            chat: None,
            user: 1,
            only_if_banned: None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("chat_id"), "{err}");
    }

    #[test]
    fn default_chat_and_parse_mode_come_from_settings() {
        let mut settings = CliSettings::default();
        settings.defaults.chat = Some("@ops".into());
        settings.defaults.parse_mode = Some("HTML".into());
        let (_, payload) = RenderCommand::Send {
            chat: None,
            text: "hi".into(),
            parse_mode: None,
            silent: false,
        }
        .render(&settings)
        .unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({"chat_id": "@ops", "text": "hi", "parse_mode": "HTML"})
        );
    }

    #[test]
    fn bogus_parse_mode_is_rejected() {
        let err = render(RenderCommand::Send {
            chat: Some("1".into()),
            text: "hi".into(),
            parse_mode: Some("rtf".into()),
            silent: false,
        })
        .unwrap_err();
        assert!(err.to_string().contains("rtf"));
    }

    #[test]
    fn raw_operation() {
        let (op, payload) = render(RenderCommand::Raw {
            op: "getChatMember".into(),
            fields: vec![
                parse_assignment("chat_id=@room").unwrap(),
                parse_assignment("UserId=7").unwrap(),
            ],
        })
        .unwrap();
        assert_eq!(op, "getChatMember");
        assert_eq!(Value::Object(payload), json!({"chat_id": "@room", "user_id": 7}));
    }

    #[test]
    fn raw_unknown_operation_lists_the_known_ones() {
        let err = render(RenderCommand::Raw {
            op: "kickChatMember".into(),
            fields: vec![],
        })
        .unwrap_err();
        assert!(err.to_string().contains("banChatMember"));
    }

    #[test]
    fn assignments() {
        assert_eq!(parse_assignment("limit=5").unwrap(), ("limit".into(), json!(5)));
        assert_eq!(parse_assignment("text=hi there").unwrap(), ("text".into(), json!("hi there")));
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=3").is_err());
    }
}
