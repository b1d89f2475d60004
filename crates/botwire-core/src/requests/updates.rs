use serde_json::Value;

use crate::codec::WireEnum;
use crate::enums::UpdateType;
use crate::envelope::{Constraint, Envelope, FieldSpec, OperationSchema, Param};
use crate::error::ValidationError;
use crate::requests::Request;
use crate::types::{Update, User};

pub static GET_ME: OperationSchema = OperationSchema {
    operation: "getMe",
    fields: &[],
};

pub static GET_UPDATES: OperationSchema = OperationSchema {
    operation: "getUpdates",
    fields: &[
        FieldSpec::optional("Offset"),
        FieldSpec::optional("Limit").with_constraint(Constraint::Range { min: 1, max: 100 }),
        FieldSpec::optional("Timeout").with_constraint(Constraint::Range {
            min: 0,
            max: i32::MAX as i64,
        }),
        FieldSpec::optional("AllowedUpdates"),
    ],
};

/// Basic information about the bot itself.
#[derive(Debug, Clone)]
pub struct GetMe(Envelope);

impl GetMe {
    pub fn new() -> Result<Self, ValidationError> {
        Envelope::construct(&GET_ME, std::iter::empty::<(&str, Param)>()).map(Self)
    }
}

impl Request for GetMe {
    type Response = User;

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

/// Long-poll for incoming updates.
///
/// An update is confirmed once `get_updates` is called with an offset
/// greater than its `update_id`. A negative offset counts from the end of
/// the queue and forgets everything before it.
#[derive(Debug, Clone)]
pub struct GetUpdates(Envelope);

impl GetUpdates {
    pub fn new() -> Result<Self, ValidationError> {
        Envelope::construct(&GET_UPDATES, std::iter::empty::<(&str, Param)>()).map(Self)
    }

    pub fn offset(mut self, offset: i64) -> Result<Self, ValidationError> {
        self.0.set("Offset", offset)?;
        Ok(self)
    }

    /// Between 1 and 100.
    pub fn limit(mut self, limit: i64) -> Result<Self, ValidationError> {
        self.0.set("Limit", limit)?;
        Ok(self)
    }

    /// Long-polling timeout in seconds. Zero means short polling.
    pub fn timeout(mut self, seconds: i64) -> Result<Self, ValidationError> {
        self.0.set("Timeout", seconds)?;
        Ok(self)
    }

    pub fn allowed_updates(mut self, kinds: &[UpdateType]) -> Result<Self, ValidationError> {
        if let Some(kind) = kinds.iter().find(|kind| !kind.is_known()) {
            return Err(ValidationError::InvalidValue {
                field: "allowed_updates".into(),
                reason: format!("cannot subscribe to {kind:?} updates"),
            });
        }
        let tokens: Vec<Value> = kinds
            .iter()
            .map(|kind| Value::from(kind.encode()))
            .collect();
        self.0.set("AllowedUpdates", Value::Array(tokens))?;
        Ok(self)
    }
}

impl Request for GetUpdates {
    type Response = Vec<Update>;

    fn envelope(&self) -> &Envelope {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_me_has_an_empty_payload() {
        let request = GetMe::new().unwrap();
        assert_eq!(request.operation_name(), "getMe");
        assert!(request.payload().is_empty());
    }

    #[test]
    fn polling_parameters() {
        let request = GetUpdates::new()
            .unwrap()
            .offset(-1)
            .unwrap()
            .timeout(30)
            .unwrap()
            .allowed_updates(&[UpdateType::Message, UpdateType::ChatMember])
            .unwrap();
        assert_eq!(
            Value::Object(request.payload()),
            json!({"offset": -1, "timeout": 30, "allowed_updates": ["message", "chat_member"]})
        );
    }

    #[test]
    fn limit_is_bounded() {
        let err = GetUpdates::new().unwrap().limit(101).unwrap_err();
        assert_eq!(err.field(), Some("limit"));
        assert!(GetUpdates::new().unwrap().limit(100).is_ok());
    }

    #[test]
    fn zero_limit_is_rejected_not_dropped() {
        let err = GetUpdates::new().unwrap().limit(0).unwrap_err();
        assert_eq!(err.field(), Some("limit"));
    }

    #[test]
    fn zero_timeout_is_allowed_and_omitted() {
        let request = GetUpdates::new().unwrap().timeout(0).unwrap();
        assert!(request.payload().is_empty());
    }

    #[test]
    fn unknown_kind_cannot_be_requested() {
        let err = GetUpdates::new()
            .unwrap()
            .allowed_updates(&[UpdateType::Unknown])
            .unwrap_err();
        assert_eq!(err.field(), Some("allowed_updates"));
    }
}
