//! Analysis metadata structures

use serde::{Deserialize, Serialize};

/// How far the analysis of a scan got
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Nothing to compute yet (empty arrays, missing area or illumination)
    Skipped,
    /// The curve does not pass through one of the anchors; record is zeroed
    NoCrossing,
    /// All parameters were computed
    Computed,
}

/// Analysis metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Number of samples in the scan
    pub sample_count: usize,

    /// True if the arrays were reversed into ascending-voltage order
    pub reversed: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,

    /// How far the analysis got
    pub outcome: ScanOutcome,
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self {
            sample_count: 0,
            reversed: false,
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            outcome: ScanOutcome::Skipped,
        }
    }
}
