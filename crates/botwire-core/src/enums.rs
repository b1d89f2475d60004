//! String-valued sets used on the wire.

use crate::wire_enum;

wire_enum! {
    /// Kind of content a [`Message`](crate::types::Message) carries.
    ///
    /// Derived from the message fields, see
    /// [`Message::message_type`](crate::types::Message::message_type).
    pub enum MessageType {
        Text,
        Photo,
        Audio,
        Video,
        Voice,
        Document,
        Sticker,
        Location,
        Contact,
        Venue,
        Game,
        VideoNote,
        Invoice,
        SuccessfulPayment,
        WebsiteConnected,
        ChatMembersAdded,
        ChatMemberLeft,
        ChatTitleChanged,
        ChatPhotoChanged,
        MessagePinned,
        ChatPhotoDeleted,
        GroupCreated,
        SupergroupCreated,
        ChannelCreated,
        /// The group was migrated; `migrate_to_chat_id` is set.
        MigratedToSupergroup,
        /// The supergroup was created from a group; `migrate_from_chat_id` is set.
        MigratedFromGroup,
        Poll,
        Dice,
        MessageAutoDeleteTimerChanged,
        ProximityAlertTriggered,
        VoiceChatScheduled,
        VoiceChatStarted,
        VoiceChatEnded,
        VoiceChatParticipantsInvited,
    }
}

wire_enum! {
    /// Type of a chat.
    pub enum ChatType {
        Private,
        Group,
        Supergroup,
        Channel,
        /// Inline query sent from a private chat with the sender.
        Sender,
    }
}

wire_enum! {
    /// Membership status of a user in a chat.
    pub enum ChatMemberStatus {
        Creator,
        Administrator,
        Member,
        Left,
        Kicked,
        Restricted,
    }
}

wire_enum! {
    /// Status shown to the other side while the bot prepares a reply.
    pub enum ChatAction {
        Typing,
        UploadPhoto,
        RecordVideo,
        UploadVideo,
        RecordVoice,
        UploadVoice,
        UploadDocument,
        ChooseSticker,
        FindLocation,
        RecordVideoNote,
        UploadVideoNote,
    }
}

wire_enum! {
    /// Text formatting mode. The platform expects these tokens verbatim.
    pub enum ParseMode {
        Markdown = "Markdown",
        Html = "HTML",
        MarkdownV2 = "MarkdownV2",
    }
}

wire_enum! {
    /// Kind of a [`MessageEntity`](crate::types::MessageEntity).
    pub enum MessageEntityType {
        Mention,
        Hashtag,
        Cashtag,
        BotCommand,
        Url,
        Email,
        PhoneNumber,
        Bold,
        Italic,
        Underline,
        Strikethrough,
        Spoiler,
        Code,
        Pre,
        TextLink,
        TextMention,
    }
}

wire_enum! {
    /// Kind of an [`Update`](crate::types::Update); also the tokens accepted by
    /// `allowed_updates`.
    pub enum UpdateType {
        Message,
        InlineQuery,
        ChosenInlineResult,
        CallbackQuery,
        EditedMessage,
        ChannelPost,
        EditedChannelPost,
        ShippingQuery,
        PreCheckoutQuery,
        Poll,
        PollAnswer,
        MyChatMember,
        ChatMember,
        ChatJoinRequest,
    }
}

wire_enum! {
    pub enum PollType {
        Regular,
        Quiz,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::WireEnum;
    use std::collections::HashSet;

    fn assert_codec_laws<E: WireEnum>() {
        let mut seen = HashSet::new();
        for member in E::MEMBERS {
            let token = member.value.encode();
            assert!(seen.insert(token), "{} reuses token {token}", E::NAME);
            assert_eq!(E::decode(token), member.value, "{} round trip", E::NAME);
            assert_eq!(E::decode(token).encode(), token);
        }
        assert_eq!(E::decode(""), E::FALLBACK);
        assert_eq!(E::decode("some-token-the-library-has-never-seen"), E::FALLBACK);
    }

    #[test]
    fn every_enum_obeys_the_codec_laws() {
        assert_codec_laws::<MessageType>();
        assert_codec_laws::<ChatType>();
        assert_codec_laws::<ChatMemberStatus>();
        assert_codec_laws::<ChatAction>();
        assert_codec_laws::<ParseMode>();
        assert_codec_laws::<MessageEntityType>();
        assert_codec_laws::<UpdateType>();
        assert_codec_laws::<PollType>();
    }

    #[test]
    fn platform_tokens() {
        assert_eq!(MessageType::MigratedToSupergroup.encode(), "migrated_to_supergroup");
        assert_eq!(MessageType::VideoNote.encode(), "video_note");
        assert_eq!(ChatType::Supergroup.encode(), "supergroup");
        assert_eq!(ChatAction::RecordVideoNote.encode(), "record_video_note");
        assert_eq!(MessageEntityType::BotCommand.encode(), "bot_command");
        assert_eq!(MessageEntityType::Url.encode(), "url");
        assert_eq!(UpdateType::ChosenInlineResult.encode(), "chosen_inline_result");
        assert_eq!(UpdateType::MyChatMember.encode(), "my_chat_member");
    }

    #[test]
    fn parse_mode_overrides() {
        assert_eq!(ParseMode::Html.encode(), "HTML");
        assert_eq!(ParseMode::MarkdownV2.encode(), "MarkdownV2");
        assert_eq!(ParseMode::decode("HTML"), ParseMode::Html);
        assert_eq!(ParseMode::decode("html"), ParseMode::Unknown);
    }

    #[test]
    fn member_status_in_json() {
        let status: ChatMemberStatus = serde_json::from_str("\"kicked\"").unwrap();
        assert_eq!(status, ChatMemberStatus::Kicked);
        let status: ChatMemberStatus = serde_json::from_str("\"owner\"").unwrap();
        assert_eq!(status, ChatMemberStatus::Unknown);
    }
}
