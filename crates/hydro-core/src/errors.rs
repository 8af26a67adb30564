//! Structured error types shared across the catchment simulation crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`HydroError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (zone names, columns, paths, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for catchment simulation and climate queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HydroError {
    /// A zone has no manager registered under its name.
    #[error("lookup error: {0}")]
    Lookup(ErrorInfo),
    /// A phenomenon column requested by an aggregate query does not exist.
    #[error("missing column: {0}")]
    MissingColumn(ErrorInfo),
    /// A column filter matched nothing, so there is no first result to return.
    #[error("empty match: {0}")]
    EmptyMatch(ErrorInfo),
    /// A date range whose end does not fall strictly after its start.
    #[error("invalid range: {0}")]
    InvalidRange(ErrorInfo),
    /// Malformed dates, numbers or delimited records.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// Filesystem failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Invalid configuration or sampling problem definitions.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Failures raised by a zone's own per-step update.
    #[error("zone error: {0}")]
    Zone(ErrorInfo),
    /// Serialization failures.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl HydroError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HydroError::Lookup(info)
            | HydroError::MissingColumn(info)
            | HydroError::EmptyMatch(info)
            | HydroError::InvalidRange(info)
            | HydroError::Parse(info)
            | HydroError::Io(info)
            | HydroError::Config(info)
            | HydroError::Zone(info)
            | HydroError::Serde(info) => info,
        }
    }

    /// Wraps an I/O failure, recording the offending path.
    pub fn io(code: &str, path: &std::path::Path, err: impl ToString) -> Self {
        HydroError::Io(
            ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
        )
    }
}
