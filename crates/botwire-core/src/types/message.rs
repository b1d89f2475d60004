use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{MessageEntityType, MessageType};
use crate::types::{
    Animation, Audio, Chat, Contact, Dice, Document, Game, Invoice, Location, PhotoSize, Poll,
    Sticker, SuccessfulPayment, User, Venue, Video, VideoNote, Voice,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    /// Set when the message was sent on behalf of a chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_chat: Option<Chat>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    pub chat: Chat,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_from: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_from_chat: Option<Chat>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub forward_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via_bot: Option<User>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub edit_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,

    // Content. At most one of these is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<MessageEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photo: Vec<PhotoSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker: Option<Sticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_note: Option<VideoNote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Voice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption_entities: Vec<MessageEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice: Option<Dice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<Game>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<Invoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_payment: Option<SuccessfulPayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_website: Option<String>,

    // Service messages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_chat_members: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_chat_member: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_chat_photo: Vec<PhotoSize>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub delete_chat_photo: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub group_chat_created: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub supergroup_chat_created: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub channel_chat_created: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_auto_delete_timer_changed: Option<MessageAutoDeleteTimerChanged>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_from_chat_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity_alert_triggered: Option<ProximityAlertTriggered>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_chat_scheduled: Option<VoiceChatScheduled>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_chat_started: Option<VoiceChatStarted>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_chat_ended: Option<VoiceChatEnded>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_chat_participants_invited: Option<VoiceChatParticipantsInvited>,

    /// Inline keyboard attached to the message, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<serde_json::Value>,
}

impl Message {
    /// Classify the message by the content it carries.
    ///
    /// Checked in a fixed order: a venue also carries a location and an
    /// animation also carries a document, so the more specific kind wins.
    pub fn message_type(&self) -> MessageType {
        if self.text.is_some() {
            MessageType::Text
        } else if !self.photo.is_empty() {
            MessageType::Photo
        } else if self.audio.is_some() {
            MessageType::Audio
        } else if self.video.is_some() {
            MessageType::Video
        } else if self.voice.is_some() {
            MessageType::Voice
        } else if self.animation.is_some() || self.document.is_some() {
            MessageType::Document
        } else if self.sticker.is_some() {
            MessageType::Sticker
        } else if self.venue.is_some() {
            MessageType::Venue
        } else if self.location.is_some() {
            MessageType::Location
        } else if self.contact.is_some() {
            MessageType::Contact
        } else if self.game.is_some() {
            MessageType::Game
        } else if self.video_note.is_some() {
            MessageType::VideoNote
        } else if self.invoice.is_some() {
            MessageType::Invoice
        } else if self.successful_payment.is_some() {
            MessageType::SuccessfulPayment
        } else if self.connected_website.is_some() {
            MessageType::WebsiteConnected
        } else if !self.new_chat_members.is_empty() {
            MessageType::ChatMembersAdded
        } else if self.left_chat_member.is_some() {
            MessageType::ChatMemberLeft
        } else if self.new_chat_title.is_some() {
            MessageType::ChatTitleChanged
        } else if !self.new_chat_photo.is_empty() {
            MessageType::ChatPhotoChanged
        } else if self.pinned_message.is_some() {
            MessageType::MessagePinned
        } else if self.delete_chat_photo {
            MessageType::ChatPhotoDeleted
        } else if self.group_chat_created {
            MessageType::GroupCreated
        } else if self.supergroup_chat_created {
            MessageType::SupergroupCreated
        } else if self.channel_chat_created {
            MessageType::ChannelCreated
        } else if self.migrate_to_chat_id.is_some_and(|id| id != 0) {
            MessageType::MigratedToSupergroup
        } else if self.migrate_from_chat_id.is_some_and(|id| id != 0) {
            MessageType::MigratedFromGroup
        } else if self.poll.is_some() {
            MessageType::Poll
        } else if self.dice.is_some() {
            MessageType::Dice
        } else if self.message_auto_delete_timer_changed.is_some() {
            MessageType::MessageAutoDeleteTimerChanged
        } else if self.proximity_alert_triggered.is_some() {
            MessageType::ProximityAlertTriggered
        } else if self.voice_chat_scheduled.is_some() {
            MessageType::VoiceChatScheduled
        } else if self.voice_chat_started.is_some() {
            MessageType::VoiceChatStarted
        } else if self.voice_chat_ended.is_some() {
            MessageType::VoiceChatEnded
        } else if self.voice_chat_participants_invited.is_some() {
            MessageType::VoiceChatParticipantsInvited
        } else {
            MessageType::Unknown
        }
    }

    /// Text of the entity, sliced out of `text` or `caption`.
    ///
    /// Offsets and lengths are in UTF-16 code units.
    pub fn entity_text(&self, entity: &MessageEntity) -> Option<String> {
        let source = self.text.as_deref().or(self.caption.as_deref())?;
        let units: Vec<u16> = source.encode_utf16().collect();
        let end = entity.offset.checked_add(entity.length)?;
        let slice = units.get(entity.offset..end)?;
        String::from_utf16(slice).ok()
    }
}

/// A highlighted span in a message text or caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: MessageEntityType,
    pub offset: usize,
    pub length: usize,
    /// For `text_link` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// For `text_mention` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// For `pre` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAutoDeleteTimerChanged {
    pub message_auto_delete_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProximityAlertTriggered {
    pub traveler: User,
    pub watcher: User,
    pub distance: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceChatScheduled {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub start_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceChatStarted {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceChatEnded {
    /// Duration in seconds.
    pub duration: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceChatParticipantsInvited {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
}
