//! Error types for the I-V analysis engine

use std::fmt;

/// Errors that can occur during I-V analysis and data file handling
///
/// Data-quality problems in a sweep (no zero crossing, low J_sc, too few
/// samples past the crossing) are *not* errors; they are reported as
/// [`Diagnostic`](crate::analysis::diagnostics::Diagnostic)s next to a
/// best-effort record. This enum covers malformed input and failures the
/// caller has to act on.
#[derive(Debug)]
pub enum AnalysisError {
    /// Invalid input parameters (mismatched lengths, non-finite samples, ...)
    InvalidInput(String),

    /// Data file contents could not be interpreted
    InvalidData(String),

    /// A required column is missing from a data file
    MissingColumn(String),

    /// Measurement profile failed validation
    InvalidProfile(String),

    /// Numerical error (division by zero, overflow, ...)
    NumericalError(String),

    /// Underlying I/O error
    Io(std::io::Error),

    /// CSV reading or writing error
    Csv(csv::Error),

    /// JSON (de)serialization error
    Json(serde_json::Error),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            AnalysisError::MissingColumn(col) => write!(f, "Could not find column '{}'", col),
            AnalysisError::InvalidProfile(msg) => write!(f, "Invalid profile: {}", msg),
            AnalysisError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
            AnalysisError::Io(e) => write!(f, "I/O error: {}", e),
            AnalysisError::Csv(e) => write!(f, "CSV error: {}", e),
            AnalysisError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Io(e) => Some(e),
            AnalysisError::Csv(e) => Some(e),
            AnalysisError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(e: std::io::Error) -> Self {
        AnalysisError::Io(e)
    }
}

impl From<csv::Error> for AnalysisError {
    fn from(e: csv::Error) -> Self {
        AnalysisError::Csv(e)
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        AnalysisError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = AnalysisError::MissingColumn("Voltage (V)".to_string());
        assert_eq!(e.to_string(), "Could not find column 'Voltage (V)'");

        let e = AnalysisError::InvalidInput("length mismatch".to_string());
        assert!(e.to_string().starts_with("Invalid input"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;
        let e: AnalysisError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(e.source().is_some());
        assert!(e.to_string().contains("gone"));
    }
}
