//! Dispatch: hand a serialized request to a [`Transport`] and decode the
//! reply.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::envelope::Payload;
use crate::error::{Error, TransportError};
use crate::requests::Request;
use crate::response::ApiResponse;

/// Moves a payload to the platform and returns the raw reply body.
///
/// The library ships no implementation; an HTTP client, a test double or a
/// recorder all fit here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, operation: &str, payload: &Payload) -> Result<Vec<u8>, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, operation: &str, payload: &Payload) -> Result<Vec<u8>, TransportError> {
        (**self).send(operation, payload).await
    }
}

#[derive(Debug, Clone)]
pub struct BotClient<T> {
    transport: T,
}

impl<T: Transport> BotClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Serialize, send, decode. No retries; the caller decides what to do
    /// with `Error::Api` and its `retry_after` hint.
    pub async fn execute<R>(&self, request: &R) -> Result<R::Response, Error>
    where
        R: Request + Sync,
    {
        let operation = request.operation_name();
        let payload = request.payload();
        debug!(operation, fields = payload.len(), "sending request");
        let raw = self
            .transport
            .send(operation, &payload)
            .await
            .map_err(Error::Transport)?;
        decode_response(operation, &raw)
    }
}

/// Decode a raw reply body into the operation's result type.
///
/// Keys this client does not know are ignored.
pub fn decode_response<T: DeserializeOwned>(operation: &str, raw: &[u8]) -> Result<T, Error> {
    let response: ApiResponse<T> = serde_json::from_slice(raw).map_err(Error::Decode)?;
    if !response.ok {
        warn!(
            operation,
            code = response.error_code,
            description = response.description.as_deref().unwrap_or_default(),
            "request rejected"
        );
    }
    response.into_result()
}
