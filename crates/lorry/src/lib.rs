//! Lorry: a self-protecting, request-scoped data carrier.
//!
//! A [`Carrier`] behaves like an open mutable record for arbitrary
//! caller-supplied keys while guaranteeing that its own operations can never
//! be shadowed by data, on any mutation path.
//!
//! # Key pieces
//!
//! - [`Carrier`] — deep merge, replace, reset, guarded accessors, flash
//!   messages, and error descriptors, all chainable
//! - [`CarrierConfig`] — construction-time options: display name, logging
//!   flags, session handle, flash slot id
//! - [`SessionStore`] / [`MemorySession`] — the external session the
//!   one-shot flash handshake reads and writes
//! - [`DiagnosticSink`] / [`TracingSink`] / [`MemorySink`] — the two-channel
//!   destination for trace and error lines
//! - [`FlashRequest`] / [`ThrowRequest`] — canonical shapes behind the
//!   polymorphic `flash` and `throw` call forms
//!
//! Status codes resolve through the `lorry-status` registry; unknown codes
//! keep their numeric value and fall back to the 500 entry's text.
//!
//! # Example
//!
//! ```
//! use lorry::{Carrier, CarrierConfig};
//! use serde_json::json;
//!
//! let mut carrier = Carrier::with_data(json!({"user": "alice"}), CarrierConfig::default());
//! carrier
//!     .merge(json!({"cart": {"items": 2}}))
//!     .flash(("Saved", "All good"))
//!     .throw(404);
//!
//! assert_eq!(carrier.value("user"), Some(&json!("alice")));
//! assert_eq!(carrier.err_descriptor().unwrap().name, "NotFound");
//! ```

pub mod carrier;
pub mod config;
pub mod diag;
pub mod error;
pub mod flash;
pub mod merge;
pub mod session;
pub mod slot;

pub use carrier::{Carrier, ERR_KEY, FLASH_KEY, RESERVED_OPS};
pub use config::CarrierConfig;
pub use diag::{Channel, DiagnosticSink, MemorySink, TracingSink};
pub use error::{ErrorDescriptor, ThrowRequest};
pub use flash::FlashRequest;
pub use session::{MemorySession, SessionError, SessionStore};
pub use slot::{Callable, Slot};
