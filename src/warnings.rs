//! Side channel for non-fatal builder notices.
//!
//! Switching a builder from one representation of a concept to another is
//! allowed but reported: first [`MIXED_REPRESENTATION_WARNING`], then
//! [`OVERWRITE_WARNING`]. Where those notices go is decided by the
//! [`WarningSink`] attached to the builder.

use crate::config::{Config, WarningMode};
use std::sync::{Arc, Mutex, OnceLock};

pub const MIXED_REPRESENTATION_WARNING: &str = "Do not mix with other representation!";
pub const OVERWRITE_WARNING: &str = "Overwriting.";

pub trait WarningSink: Send + Sync {
    fn warn(&self, variant: &str, message: &str);
}

/// Emits every notice as a `tracing` warning event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&self, variant: &str, message: &str) {
        tracing::warn!(variant, "[REPR {}] {}", variant, message);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl WarningSink for SilentSink {
    fn warn(&self, _variant: &str, _message: &str) {}
}

/// Keeps notices in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Recorded messages without their variant names.
    pub fn messages(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .map(|(_, message)| message)
            .collect()
    }

    /// Recorded `(variant, message)` pairs.
    pub fn entries(&self) -> Vec<(String, String)> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn clear(&self) {
        match self.entries.lock() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl WarningSink for RecordingSink {
    fn warn(&self, variant: &str, message: &str) {
        let entry = (variant.to_string(), message.to_string());
        match self.entries.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

static DEFAULT_SINK: OnceLock<Arc<dyn WarningSink>> = OnceLock::new();

/// Process-wide default sink, resolved once from the environment.
///
/// An unreadable `ESQUERY_WARNINGS` value falls back to logging.
pub fn default_sink() -> Arc<dyn WarningSink> {
    DEFAULT_SINK
        .get_or_init(|| match Config::from_env() {
            Ok(config) => config.default_sink(),
            Err(e) => {
                tracing::warn!("[CONFIG] {}, falling back to logged warnings", e);
                sink_for(WarningMode::Log)
            }
        })
        .clone()
}

/// Replace the process-wide default before any builder has asked for it.
///
/// Returns `false` when the default was already resolved; existing and later
/// builders then keep the earlier sink.
pub fn install_default_sink(sink: Arc<dyn WarningSink>) -> bool {
    DEFAULT_SINK.set(sink).is_ok()
}

pub(crate) fn sink_for(mode: WarningMode) -> Arc<dyn WarningSink> {
    match mode {
        WarningMode::Log => Arc::new(TracingSink),
        WarningMode::Silent => Arc::new(SilentSink),
    }
}
