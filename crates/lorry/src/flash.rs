//! Flash call-form resolution.
//!
//! `flash` is polymorphic over call shape. Every accepted form normalizes
//! into a [`FlashRequest`] before the core logic runs; a request carrying no
//! title, no message, and no fields is a read. Only two positional values
//! plus a trailing fields record are meaningful; the type system rules out
//! any further positions.

use serde_json::{Map, Value};

/// Canonical argument shape for [`crate::Carrier::flash`].
#[derive(Clone, Debug, Default)]
pub struct FlashRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub fields: Map<String, Value>,
}

impl FlashRequest {
    /// An empty request: consumes the pending session entry, if any.
    pub fn read() -> Self {
        Self::default()
    }

    /// Returns `true` if this request carries nothing to write.
    /// Blank strings count as absent.
    pub fn is_read(&self) -> bool {
        is_blank(&self.title) && is_blank(&self.message) && self.fields.is_empty()
    }

    /// Title with blanks normalized away.
    pub fn title(&self) -> Option<&str> {
        present(&self.title)
    }

    /// Message with blanks normalized away.
    pub fn message(&self) -> Option<&str> {
        present(&self.message)
    }
}

fn is_blank(text: &Option<String>) -> bool {
    present(text).is_none()
}

fn present(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

impl From<()> for FlashRequest {
    fn from((): ()) -> Self {
        Self::read()
    }
}

// A single plain value sets the message, not the title.
impl From<&str> for FlashRequest {
    fn from(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::default()
        }
    }
}

impl From<String> for FlashRequest {
    fn from(message: String) -> Self {
        Self {
            message: Some(message),
            ..Self::default()
        }
    }
}

impl From<(&str, &str)> for FlashRequest {
    fn from((title, message): (&str, &str)) -> Self {
        Self {
            title: Some(title.to_string()),
            message: Some(message.to_string()),
            ..Self::default()
        }
    }
}

// A structured first argument is the fields record; a plain one is the
// message. Null reads.
impl From<Value> for FlashRequest {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self {
                fields,
                ..Self::default()
            },
            Value::String(message) => Self::from(message),
            Value::Null => Self::read(),
            other => Self::from(other.to_string()),
        }
    }
}

// Two arguments where the second is structured: the fields record plus a
// sole plain value, which sets the message.
impl From<(&str, Value)> for FlashRequest {
    fn from((first, second): (&str, Value)) -> Self {
        match second {
            Value::Object(fields) => Self {
                message: Some(first.to_string()),
                fields,
                ..Self::default()
            },
            Value::String(message) => Self::from((first, message.as_str())),
            Value::Null => Self::from(first),
            other => Self::from((first, other.to_string().as_str())),
        }
    }
}

impl From<(&str, &str, Value)> for FlashRequest {
    fn from((title, message, fields): (&str, &str, Value)) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            title: Some(title.to_string()),
            message: Some(message.to_string()),
            fields,
        }
    }
}
