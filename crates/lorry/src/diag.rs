//! Diagnostic sink: the channel the carrier writes human-readable lines to.
//!
//! Two independent channels: an informational one for merge/reset/flash
//! traces, and an error one for thrown errors and blocked mutations. The
//! default sink forwards to `tracing`; [`MemorySink`] captures lines for
//! tests and embedding.

use std::sync::Mutex;

use tracing::{error, info};

/// Destination for the carrier's diagnostic lines.
///
/// Emission is best-effort: implementations must not panic, and the carrier
/// never fails an operation over a diagnostic.
pub trait DiagnosticSink: Send + Sync {
    fn info(&self, line: &str);
    fn error(&self, line: &str);
}

/// The channel a captured line was emitted on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Info,
    Error,
}

/// Forwards diagnostic lines to the `tracing` macros.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn info(&self, line: &str) {
        info!(target: "lorry", "{line}");
    }

    fn error(&self, line: &str) {
        error!(target: "lorry", "{line}");
    }
}

/// Collects diagnostic lines in memory, for tests and local embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Channel, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every captured line, in emission order.
    pub fn lines(&self) -> Vec<(Channel, String)> {
        self.lines.lock().expect("sink lock poisoned").clone()
    }

    /// Info-channel lines only.
    pub fn infos(&self) -> Vec<String> {
        self.channel(Channel::Info)
    }

    /// Error-channel lines only.
    pub fn errors(&self) -> Vec<String> {
        self.channel(Channel::Error)
    }

    fn channel(&self, channel: Channel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, line)| line)
            .collect()
    }

    fn push(&self, channel: Channel, line: &str) {
        self.lines
            .lock()
            .expect("sink lock poisoned")
            .push((channel, line.to_string()));
    }
}

impl DiagnosticSink for MemorySink {
    fn info(&self, line: &str) {
        self.push(Channel::Info, line);
    }

    fn error(&self, line: &str) {
        self.push(Channel::Error, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_routes_channels() {
        let sink = MemorySink::new();
        sink.info("hello");
        sink.error("boom");
        sink.info("again");

        assert_eq!(sink.infos(), vec!["hello", "again"]);
        assert_eq!(sink.errors(), vec!["boom"]);
        assert_eq!(sink.lines().len(), 3);
    }
}
