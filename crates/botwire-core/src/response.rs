//! The `{ ok, result, description, error_code }` wrapper around every
//! platform reply.

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ResponseParameters>,
}

/// Hints attached to a failed call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseParameters {
    /// The group moved to a supergroup with this id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    /// Flood control: seconds to wait before repeating the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u32>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T, Error> {
        if !self.ok {
            return Err(Error::Api {
                code: self.error_code.unwrap_or_default(),
                description: self.description.unwrap_or_default(),
                parameters: self.parameters,
            });
        }
        self.result.ok_or(Error::MissingResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::User;

    #[test]
    fn ok_response_yields_result() {
        let raw = r#"{"ok": true, "result": {"id": 1, "is_bot": true, "first_name": "bot", "has_main_web_app": false}}"#;
        let response: ApiResponse<User> = serde_json::from_str(raw).unwrap();
        let user = response.into_result().unwrap();
        assert_eq!(user.id, 1);
        assert!(user.is_bot);
    }

    #[test]
    fn error_body_becomes_api_error() {
        let raw = r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#;
        let response: ApiResponse<bool> = serde_json::from_str(raw).unwrap();
        match response.into_result() {
            Err(Error::Api {
                code, description, ..
            }) => {
                assert_eq!(code, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn migration_hint_is_kept() {
        let raw = r#"{"ok": false, "error_code": 400, "description": "migrated",
                      "parameters": {"migrate_to_chat_id": -1009}}"#;
        let response: ApiResponse<bool> = serde_json::from_str(raw).unwrap();
        let err = response.into_result().unwrap_err();
        assert!(matches!(
            err,
            Error::Api { parameters: Some(ResponseParameters { migrate_to_chat_id: Some(-1009), .. }), .. }
        ));
    }

    #[test]
    fn ok_without_result() {
        let response: ApiResponse<bool> = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(matches!(response.into_result(), Err(Error::MissingResult)));
    }
}
