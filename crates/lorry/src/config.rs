//! Carrier construction options.

use std::fmt;
use std::sync::Arc;

use crate::diag::{DiagnosticSink, TracingSink};
use crate::session::SessionStore;

/// Options fixed at carrier construction, immutable thereafter.
///
/// The configuration never appears in the carrier's data space: it cannot be
/// merged over, replaced, reset, or enumerated.
#[derive(Clone)]
pub struct CarrierConfig {
    /// Display label prefixed to every diagnostic line.
    pub name: String,
    /// Emit error-channel diagnostics: thrown errors and blocked mutations.
    pub error_logging: bool,
    /// Emit info-channel traces for merge, reset, and flash.
    pub verbose: bool,
    /// External session the flash handshake reads and writes.
    pub session: Option<Arc<dyn SessionStore>>,
    /// Flash slot identifier within the session.
    pub slot_id: String,
    /// Destination for diagnostic lines.
    pub sink: Arc<dyn DiagnosticSink>,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            error_logging: false,
            verbose: false,
            session: None,
            slot_id: "default".into(),
            sink: Arc::new(TracingSink),
        }
    }
}

impl fmt::Debug for CarrierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarrierConfig")
            .field("name", &self.name)
            .field("error_logging", &self.error_logging)
            .field("verbose", &self.verbose)
            .field("session", &self.session.is_some())
            .field("slot_id", &self.slot_id)
            .finish_non_exhaustive()
    }
}
