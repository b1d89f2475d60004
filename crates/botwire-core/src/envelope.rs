//! Typed request envelope and the generic serializer.
//!
//! Each operation is described once by a static [`OperationSchema`]: the
//! remote operation name plus its fields in declaration order. Each
//! [`FieldSpec`] carries:
//!   - a [`FieldPolicy`] (always emitted, omitted while at its default, or
//!     omitted only while unset),
//!   - a [`Transform`] applied before the default check and emission,
//!   - a [`Constraint`] checked when the value is assigned.
//!
//! An [`Envelope`] holds the values for one invocation. Required fields are
//! checked at construction, constraints at assignment; [`Envelope::serialize`]
//! itself cannot fail.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ValidationError;
use crate::naming::to_snake_case;
use crate::types::ChatId;

/// Wire payload: snake_case keys in declaration order.
pub type Payload = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Always emitted, even at the type default. Must be supplied at
    /// construction.
    Always,
    /// Emitted only when the value differs from the type default.
    IgnoreDefault,
    /// Emitted whenever set, including `false` or zero; omitted only while
    /// unset.
    IgnoreNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    None,
    /// Calendar instant → integer seconds since the Unix epoch.
    UnixSeconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    None,
    /// Integer greater than zero.
    PositiveId,
    /// Non-zero numeric chat id or an `@username`.
    NonZeroChat,
    /// Integer within `min..=max`.
    Range { min: i64, max: i64 },
    /// String with at least one non-whitespace character.
    NonEmptyText,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Declared PascalCase name; the wire name is derived from it.
    pub name: &'static str,
    pub policy: FieldPolicy,
    pub transform: Transform,
    pub constraint: Constraint,
}

impl FieldSpec {
    pub const fn always(name: &'static str) -> Self {
        Self {
            name,
            policy: FieldPolicy::Always,
            transform: Transform::None,
            constraint: Constraint::None,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            policy: FieldPolicy::IgnoreDefault,
            transform: Transform::None,
            constraint: Constraint::None,
        }
    }

    /// Optional field whose default is "absent" rather than the zero value,
    /// so an explicit `false` still goes out.
    pub const fn optional_flag(name: &'static str) -> Self {
        Self {
            name,
            policy: FieldPolicy::IgnoreNull,
            transform: Transform::None,
            constraint: Constraint::None,
        }
    }

    pub const fn with_transform(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }

    pub const fn with_constraint(self, constraint: Constraint) -> Self {
        Self { constraint, ..self }
    }

    pub fn wire_name(&self) -> String {
        to_snake_case(self.name)
    }

    /// Matches either the declared name or the wire name.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.wire_name() == name
    }

    /// Transform and validate a value for this field.
    ///
    /// Every non-null value is checked against the constraint, including
    /// type defaults; `null` on a required field is reported as missing.
    fn encode(&self, param: Param) -> Result<Value, ValidationError> {
        let value = self
            .transform
            .apply(param)
            .map_err(|reason| self.invalid(reason))?;
        if value.is_null() {
            if self.policy == FieldPolicy::Always {
                return Err(ValidationError::MissingField {
                    field: self.wire_name(),
                });
            }
            return Ok(value);
        }
        self.constraint
            .check(&value)
            .map_err(|reason| self.invalid(reason))?;
        Ok(value)
    }

    fn invalid(&self, reason: String) -> ValidationError {
        ValidationError::InvalidValue {
            field: self.wire_name(),
            reason,
        }
    }
}

impl Transform {
    fn apply(self, param: Param) -> Result<Value, String> {
        match (self, param) {
            (Transform::UnixSeconds, Param::Instant(at)) => Ok(Value::from(at.timestamp())),
            (Transform::UnixSeconds, Param::Json(value))
                if value.is_null() || value.is_i64() || value.is_u64() =>
            {
                Ok(value)
            }
            (Transform::UnixSeconds, other) => {
                Err(format!("expected a calendar instant, got {}", other.kind()))
            }
            (Transform::None, Param::Instant(at)) => Ok(Value::String(at.to_rfc3339())),
            (Transform::None, Param::Chat(chat)) => Ok(chat.into()),
            (Transform::None, Param::Json(value)) => Ok(value),
        }
    }
}

impl Constraint {
    fn check(self, value: &Value) -> Result<(), String> {
        match self {
            Constraint::None => Ok(()),
            Constraint::PositiveId => match value.as_i64() {
                Some(id) if id > 0 => Ok(()),
                _ => Err(format!("must be a positive integer, got {value}")),
            },
            Constraint::NonZeroChat => match value {
                Value::Number(n) if n.as_i64().is_some_and(|id| id != 0) => Ok(()),
                Value::String(s) => ChatId::parse(s).map(|_| ()).map_err(|err| err.to_string()),
                _ => Err(format!("expected a chat id or @username, got {value}")),
            },
            Constraint::Range { min, max } => match value.as_i64() {
                Some(n) if (min..=max).contains(&n) => Ok(()),
                _ => Err(format!("must be an integer between {min} and {max}, got {value}")),
            },
            Constraint::NonEmptyText => match value.as_str() {
                Some(s) if !s.trim().is_empty() => Ok(()),
                _ => Err("must be non-empty text".to_string()),
            },
        }
    }
}

/// Whether a wire value equals its type's default: zero, empty, false or
/// null.
pub fn is_default(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// The remote operation name and its declared fields.
#[derive(Debug)]
pub struct OperationSchema {
    pub operation: &'static str,
    pub fields: &'static [FieldSpec],
}

impl OperationSchema {
    pub fn lookup(&self, name: &str) -> Result<(usize, &FieldSpec), ValidationError> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, spec)| spec.matches(name))
            .ok_or_else(|| ValidationError::UnknownField {
                operation: self.operation,
                field: name.to_owned(),
            })
    }

    pub fn wire_names(&self) -> Vec<String> {
        self.fields.iter().map(FieldSpec::wire_name).collect()
    }

    pub fn required(&self) -> impl Iterator<Item = &FieldSpec> + '_ {
        self.fields
            .iter()
            .filter(|spec| spec.policy == FieldPolicy::Always)
    }
}

/// A field value before transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Json(Value),
    Chat(ChatId),
    Instant(DateTime<Utc>),
}

impl Param {
    fn kind(&self) -> &'static str {
        match self {
            Param::Json(Value::Null) => "null",
            Param::Json(Value::Bool(_)) => "boolean",
            Param::Json(Value::Number(_)) => "number",
            Param::Json(Value::String(_)) => "string",
            Param::Json(Value::Array(_)) => "array",
            Param::Json(Value::Object(_)) => "object",
            Param::Chat(_) => "chat reference",
            Param::Instant(_) => "calendar instant",
        }
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        Param::Json(value)
    }
}

impl From<ChatId> for Param {
    fn from(chat: ChatId) -> Self {
        Param::Chat(chat)
    }
}

impl From<DateTime<Utc>> for Param {
    fn from(at: DateTime<Utc>) -> Self {
        Param::Instant(at)
    }
}

impl From<i64> for Param {
    fn from(n: i64) -> Self {
        Param::Json(Value::from(n))
    }
}

impl From<i32> for Param {
    fn from(n: i32) -> Self {
        Param::Json(Value::from(n))
    }
}

impl From<bool> for Param {
    fn from(flag: bool) -> Self {
        Param::Json(Value::Bool(flag))
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::Json(Value::String(s.to_owned()))
    }
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Param::Json(Value::String(s))
    }
}

/// One invocation of an operation.
#[derive(Clone)]
pub struct Envelope {
    schema: &'static OperationSchema,
    values: Vec<Value>,
}

impl Envelope {
    /// Build an envelope, assigning the given fields in order.
    ///
    /// Fails on the first invalid value, or if any `Always` field is left
    /// unassigned.
    pub fn construct<I, K, P>(schema: &'static OperationSchema, fields: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: Into<Param>,
    {
        let mut values = vec![Value::Null; schema.fields.len()];
        for (name, param) in fields {
            let (index, spec) = schema.lookup(name.as_ref())?;
            values[index] = spec.encode(param.into())?;
        }
        if let Some((spec, _)) = schema
            .fields
            .iter()
            .zip(&values)
            .find(|(spec, value)| spec.policy == FieldPolicy::Always && value.is_null())
        {
            return Err(ValidationError::MissingField {
                field: spec.wire_name(),
            });
        }
        Ok(Self { schema, values })
    }

    pub fn operation_name(&self) -> &'static str {
        self.schema.operation
    }

    pub fn schema(&self) -> &'static OperationSchema {
        self.schema
    }

    /// Assign an optional field.
    pub fn set(&mut self, field: &str, value: impl Into<Param>) -> Result<&mut Self, ValidationError> {
        let schema = self.schema;
        let (index, spec) = schema.lookup(field)?;
        if spec.policy == FieldPolicy::Always {
            return Err(ValidationError::NotOptional {
                field: spec.wire_name(),
            });
        }
        self.values[index] = spec.encode(value.into())?;
        Ok(self)
    }

    /// Return an optional field to its default.
    pub fn unset(&mut self, field: &str) -> Result<&mut Self, ValidationError> {
        let schema = self.schema;
        let (index, spec) = schema.lookup(field)?;
        if spec.policy == FieldPolicy::Always {
            return Err(ValidationError::NotOptional {
                field: spec.wire_name(),
            });
        }
        self.values[index] = Value::Null;
        Ok(self)
    }

    /// Transformed value of a field, `None` while unset.
    pub fn get(&self, field: &str) -> Option<&Value> {
        let (index, _) = self.schema.lookup(field).ok()?;
        let value = &self.values[index];
        (!value.is_null()).then_some(value)
    }

    /// Produce the wire payload. The operation name is not part of it.
    pub fn serialize(&self) -> Payload {
        let mut payload = Payload::new();
        for (spec, value) in self.schema.fields.iter().zip(&self.values) {
            let emit = match spec.policy {
                FieldPolicy::Always => true,
                FieldPolicy::IgnoreDefault => !is_default(value),
                FieldPolicy::IgnoreNull => !value.is_null(),
            };
            if emit {
                payload.insert(spec.wire_name(), value.clone());
            }
        }
        debug!(
            operation = self.schema.operation,
            fields = payload.len(),
            "serialized request"
        );
        payload
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("operation", &self.schema.operation)
            .field("payload", &self.serialize())
            .finish()
    }
}
