//! Entities returned by the platform.
//!
//! Deserialization ignores keys this client does not know and leaves
//! missing optional keys at their defaults. Optional keys are skipped when
//! serializing, never written as `null`.

mod chat;
mod media;
mod member;
mod message;
mod update;
mod user;

pub use chat::{Chat, ChatId, ChatPermissions};
pub use media::{
    Animation, Audio, Contact, Dice, Document, Game, Invoice, Location, PhotoSize, Poll,
    PollOption, Sticker, SuccessfulPayment, Venue, Video, VideoNote, Voice,
};
pub use member::{ChatMember, ChatMemberUpdated};
pub use message::{
    Message, MessageAutoDeleteTimerChanged, MessageEntity, ProximityAlertTriggered,
    VoiceChatEnded, VoiceChatParticipantsInvited, VoiceChatScheduled, VoiceChatStarted,
};
pub use update::{
    CallbackQuery, ChatJoinRequest, ChosenInlineResult, InlineQuery, PollAnswer,
    PreCheckoutQuery, ShippingQuery, Update,
};
pub use user::User;
