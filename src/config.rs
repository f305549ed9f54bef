use crate::enums::WARNING_MODE;
use crate::error::{EsqueryError, Result};
use crate::warnings::{sink_for, WarningSink};
use std::env;
use std::sync::Arc;

/// How representation-conflict notices are reported by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarningMode {
    #[default]
    Log,
    Silent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub warnings: WarningMode,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional: ESQUERY_WARNINGS (`log` or `silent`, case-insensitive, defaults to `log`)
    pub fn from_env() -> Result<Self> {
        let warnings = match env::var("ESQUERY_WARNINGS") {
            Ok(raw) => match WARNING_MODE.validate(raw.trim()) {
                Ok(mode) if mode == "silent" => WarningMode::Silent,
                Ok(_) => WarningMode::Log,
                Err(e) => return Err(EsqueryError::Config(e.to_string())),
            },
            Err(_) => WarningMode::Log,
        };

        Ok(Self { warnings })
    }

    pub fn default_sink(&self) -> Arc<dyn WarningSink> {
        sink_for(self.warnings)
    }
}
