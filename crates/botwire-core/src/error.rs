use thiserror::Error;

use crate::response::ResponseParameters;

/// Error returned by a [`Transport`](crate::Transport). Passed through to the
/// caller untouched.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A request could not be built. Raised at construction or assignment time,
/// never at serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("field `{field}` is required and fixed at construction")]
    NotOptional { field: String },

    #[error("operation `{operation}` has no field `{field}`")]
    UnknownField {
        operation: &'static str,
        field: String,
    },

    #[error("invalid chat reference {0:?}: expected a numeric id or an @username")]
    InvalidChatId(String),
}

impl ValidationError {
    /// Wire name of the offending field, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::InvalidValue { field, .. }
            | Self::NotOptional { field }
            | Self::UnknownField { field, .. } => Some(field.as_str()),
            Self::InvalidChatId(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Response decode error: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),

    #[error("API error {code}: {description}")]
    Api {
        code: i32,
        description: String,
        parameters: Option<ResponseParameters>,
    },

    #[error("Response marked ok but carried no result")]
    MissingResult,
}

impl Error {
    /// Seconds the platform asked us to wait before retrying, if any.
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            Self::Api {
                parameters: Some(params),
                ..
            } => params.retry_after,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_the_culprit() {
        let err = ValidationError::MissingField {
            field: "chat_id".into(),
        };
        assert_eq!(err.field(), Some("chat_id"));
        assert_eq!(err.to_string(), "missing required field `chat_id`");
        assert_eq!(ValidationError::InvalidChatId("x".into()).field(), None);
    }

    #[test]
    fn retry_after_only_from_api_errors() {
        let err = Error::Api {
            code: 429,
            description: "Too Many Requests".into(),
            parameters: Some(ResponseParameters {
                migrate_to_chat_id: None,
                retry_after: Some(7),
            }),
        };
        assert_eq!(err.retry_after(), Some(7));
        assert_eq!(Error::MissingResult.retry_after(), None);
    }
}
