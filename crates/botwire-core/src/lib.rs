//! botwire-core: Typed request envelopes, entities and the enum wire codec
//! for the Bot API.
//!
//! Every outbound call is an [`Envelope`]: a fixed operation name plus the
//! values of the fields declared in that operation's static
//! [`OperationSchema`]. A single serializer walks the schema and produces a
//! snake_case JSON object; sending it is left to a [`Transport`].
//!
//! # Modules
//! - `naming`    identifier → snake_case wire names
//! - `codec`     `WireEnum` trait and the `wire_enum!` macro
//! - `enums`     closed string-valued sets (chat kinds, parse modes, ...)
//! - `envelope`  field policies, operation schemas and the serializer
//! - `requests`  typed wrappers over envelopes, one per operation
//! - `types`     response entities (users, chats, messages, updates)
//! - `response`  the `{ ok, result, description }` response wrapper
//! - `client`    transport seam and `BotClient` dispatcher
//! - `error`     validation and dispatch errors

pub mod client;
pub mod codec;
pub mod enums;
pub mod envelope;
pub mod error;
pub mod naming;
pub mod requests;
pub mod response;
pub mod types;

pub use client::{decode_response, BotClient, Transport};
pub use codec::WireEnum;
pub use envelope::{
    Constraint, Envelope, FieldPolicy, FieldSpec, OperationSchema, Param, Payload, Transform,
};
pub use error::{Error, TransportError, ValidationError};
pub use requests::Request;
pub use response::{ApiResponse, ResponseParameters};
pub use types::ChatId;

#[doc(hidden)]
pub use serde as __serde;
