//! Configuration parameters for I-V analysis

use serde::{Deserialize, Serialize};

/// Analysis configuration parameters
///
/// The thresholds here are empirical heuristics carried over from bench use
/// of the source-meter rig; they are exposed rather than re-derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // Crossing detection
    /// Absolute tolerance for "sample is at the anchor point" checks (default: 1e-8)
    pub crossing_atol: f64,

    /// Relative tolerance for the same checks, scaled by the anchor value (default: 1e-5)
    pub crossing_rtol: f64,

    // Short-circuit current
    /// J_sc at or above this value (mA) triggers a "J_sc too low" warning (default: -0.1)
    ///
    /// Photocurrent is negative under the source-meter sign convention, so a
    /// value near zero or positive means the cell is barely generating.
    pub jsc_warning_threshold: f64,

    /// Value substituted for a J_sc indistinguishable from zero (default: 1e-7)
    pub jsc_floor: f64,

    // Units
    /// Factor applied to V / mA slopes to obtain ohms (default: 1000.0)
    pub resistance_scale: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            crossing_atol: 1e-8,
            crossing_rtol: 1e-5,
            jsc_warning_threshold: -0.1,
            jsc_floor: 1e-7,
            resistance_scale: 1e3,
        }
    }
}

impl AnalysisConfig {
    /// `|a - b| <= atol + rtol * |b|`, the closeness test used for anchor checks
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.crossing_atol + self.crossing_rtol * b.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.crossing_atol, 1e-8);
        assert_eq!(config.jsc_warning_threshold, -0.1);
        assert_eq!(config.jsc_floor, 1e-7);
    }

    #[test]
    fn test_is_close() {
        let config = AnalysisConfig::default();
        assert!(config.is_close(0.0, 0.0));
        assert!(config.is_close(5e-9, 0.0));
        assert!(!config.is_close(1e-6, 0.0));
        // Relative part scales with b
        assert!(config.is_close(1000.005, 1000.0));
        assert!(!config.is_close(0.0, 0.05));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"jsc_warning_threshold": -0.5}"#)
            .expect("partial config should deserialize");
        assert_eq!(config.jsc_warning_threshold, -0.5);
        assert_eq!(config.crossing_atol, 1e-8);
    }
}
