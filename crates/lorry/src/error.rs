//! Error descriptor attachment.
//!
//! `throw` is data attachment, not control flow: it records a standardized
//! descriptor under the `err` data key for the host (typically an HTTP
//! layer) to consume later. Nothing is raised and no chain unwinds.

use serde::{Deserialize, Serialize};

/// The standardized error descriptor stored under the `err` data key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub name: String,
    pub code: u16,
    pub message: String,
    pub level: u32,
}

/// Canonical argument shape for [`crate::Carrier::throw`].
///
/// The operation accepts several call forms; each converts into this request
/// before the descriptor is built. A textual first argument shifts the
/// positions right and leaves the code at its 500 default.
#[derive(Clone, Debug, Default)]
pub struct ThrowRequest {
    pub code: Option<u16>,
    pub message: Option<String>,
    pub name: Option<String>,
    pub level: u32,
}

impl ThrowRequest {
    pub fn code(code: u16) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }
}

impl From<()> for ThrowRequest {
    fn from((): ()) -> Self {
        Self::default()
    }
}

impl From<u16> for ThrowRequest {
    fn from(code: u16) -> Self {
        Self::code(code)
    }
}

// Shifted form: a textual first argument is the message, code stays 500.
impl From<&str> for ThrowRequest {
    fn from(message: &str) -> Self {
        Self::default().message(message)
    }
}

impl From<String> for ThrowRequest {
    fn from(message: String) -> Self {
        Self::default().message(message)
    }
}

impl From<(u16, &str)> for ThrowRequest {
    fn from((code, message): (u16, &str)) -> Self {
        Self::code(code).message(message)
    }
}

impl From<(u16, &str, &str)> for ThrowRequest {
    fn from((code, message, name): (u16, &str, &str)) -> Self {
        Self::code(code).message(message).name(name)
    }
}

impl From<(u16, &str, &str, u32)> for ThrowRequest {
    fn from((code, message, name, level): (u16, &str, &str, u32)) -> Self {
        Self::code(code).message(message).name(name).level(level)
    }
}

impl From<(&str, &str)> for ThrowRequest {
    fn from((message, name): (&str, &str)) -> Self {
        Self::default().message(message).name(name)
    }
}

impl From<(&str, &str, u32)> for ThrowRequest {
    fn from((message, name, level): (&str, &str, u32)) -> Self {
        Self::default().message(message).name(name).level(level)
    }
}
