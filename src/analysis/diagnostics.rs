//! Diagnostics emitted during analysis
//!
//! Measurement-quality problems are reported here instead of failing the
//! analysis, so a presenter can show them next to whatever values could
//! still be derived.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational progress message
    Info,
    /// Data-quality problem; results may be inaccurate or zeroed
    Warning,
    /// Problem the operator has to act on
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Create an info diagnostic
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Collects diagnostics and mirrors them to the `log` facade
#[derive(Debug, Default)]
pub(crate) struct DiagnosticSink {
    entries: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn info(&mut self, message: &str) {
        log::debug!("{}", message);
        self.entries.push(Diagnostic::info(message));
    }

    pub(crate) fn warn(&mut self, message: &str) {
        log::warn!("{}", message);
        self.entries.push(Diagnostic::warning(message));
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

/// True if any diagnostic is at least `severity`
pub fn has_severity(diagnostics: &[Diagnostic], severity: Severity) -> bool {
    diagnostics.iter().any(|d| d.severity >= severity)
}
