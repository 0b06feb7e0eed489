/*!
Diagnostics sink shared by the device registry and the router.

This module defines:
- `Diagnostics`: fire-and-forget `info`/`warning` events. Implementations must never block or fail.
- `TracingDiagnostics`: forwards events to the `tracing` facade.
- `RecordingDiagnostics`: keeps events in memory so callers (and tests) can inspect them.
*/

use std::sync::{Arc, Mutex};

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
}

pub trait Diagnostics: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
}

/// Default sink, emits under the `netroute` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn info(&self, message: &str) {
        tracing::info!(target: "netroute", "{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(target: "netroute", "{message}");
    }
}

/// In-memory sink. Clones share the same event buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: Level, message: &str) {
        // A poisoned buffer still holds valid events
        let mut events = match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push((level, message.to_string()));
    }

    pub fn events(&self) -> Vec<(Level, String)> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        match self.events.lock() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn warning(&self, message: &str) {
        self.push(Level::Warning, message);
    }
}
