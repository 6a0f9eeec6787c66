//! Analysis result types

use super::diagnostics::Diagnostic;
use super::metadata::{AnalysisMetadata, ScanOutcome};
use serde::{Deserialize, Serialize};

/// Photovoltaic figures of merit for one scan direction
///
/// All fields are zero when the scan could not be analyzed. The field
/// names serialize with the conventional capitalization (`J_sc`, `V_oc`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    /// Short-circuit current density (mA/cm²)
    #[serde(rename = "J_sc")]
    pub j_sc: f64,

    /// Open-circuit voltage (V)
    #[serde(rename = "V_oc")]
    pub v_oc: f64,

    /// Shunt resistance (Ω)
    #[serde(rename = "R_sh")]
    pub r_sh: f64,

    /// Series resistance (Ω)
    #[serde(rename = "R_s")]
    pub r_s: f64,

    /// Power at the maximum power point (mW/cm², negative while generating)
    pub max_power: f64,

    /// Voltage at the maximum power point (V)
    #[serde(rename = "V_mpp")]
    pub v_mpp: f64,

    /// Current density at the maximum power point (mA/cm²)
    #[serde(rename = "I_mpp")]
    pub i_mpp: f64,

    /// Power conversion efficiency (%)
    #[serde(rename = "PCE")]
    pub pce: f64,

    /// Fill factor (%)
    #[serde(rename = "FF")]
    pub ff: f64,
}

impl ParameterRecord {
    /// The all-zero record
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// True if every field is zero
    pub fn is_zeroed(&self) -> bool {
        *self == Self::zeroed()
    }

    /// Field names paired with values, in record order
    ///
    /// Used by presenters and writers that need to walk the record.
    pub fn fields(&self) -> [(&'static str, f64); 9] {
        [
            ("J_sc", self.j_sc),
            ("V_oc", self.v_oc),
            ("R_sh", self.r_sh),
            ("R_s", self.r_s),
            ("max_power", self.max_power),
            ("V_mpp", self.v_mpp),
            ("I_mpp", self.i_mpp),
            ("PCE", self.pce),
            ("FF", self.ff),
        ]
    }
}

/// Result of analyzing one scan direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanAnalysis {
    /// Derived parameters
    pub params: ParameterRecord,

    /// Diagnostics raised while analyzing, in order
    pub diagnostics: Vec<Diagnostic>,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

impl ScanAnalysis {
    /// Zeroed result carrying the given diagnostics
    pub(crate) fn zeroed(
        sample_count: usize,
        outcome: ScanOutcome,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            params: ParameterRecord::zeroed(),
            diagnostics,
            metadata: AnalysisMetadata {
                sample_count,
                outcome,
                ..AnalysisMetadata::default()
            },
        }
    }

    /// True if parameters were actually computed
    pub fn is_computed(&self) -> bool {
        self.metadata.outcome == ScanOutcome::Computed
    }
}

/// Results for both directions of a hysteresis sweep
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepAnalysis {
    /// Forward (increasing voltage) scan, `None` if not measured
    pub forward: Option<ScanAnalysis>,

    /// Reverse (decreasing voltage) scan, `None` if not measured
    pub reverse: Option<ScanAnalysis>,
}

impl SweepAnalysis {
    /// All diagnostics, forward first
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.forward
            .iter()
            .chain(self.reverse.iter())
            .flat_map(|scan| scan.diagnostics.iter())
    }

    /// Both directions present
    pub fn is_hysteresis(&self) -> bool {
        self.forward.is_some() && self.reverse.is_some()
    }
}

/// Timing of a sweep, attached to results after analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepTiming {
    /// Time spent on the scan (s)
    pub sweep_time_s: f64,

    /// Voltage sweep rate (V/s)
    pub volt_rate: f64,
}

impl SweepTiming {
    /// Timing to attach to each direction of a sweep
    ///
    /// A hysteresis sweep measures both directions back to back, so each
    /// direction is credited half of the total sweep time.
    pub fn split(sweep_time_s: f64, volt_rate: f64, both_directions: bool) -> Self {
        let sweep_time_s = if both_directions {
            sweep_time_s / 2.0
        } else {
            sweep_time_s
        };
        Self {
            sweep_time_s,
            volt_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_record() {
        let record = ParameterRecord::zeroed();
        assert!(record.is_zeroed());
        assert!(record.fields().iter().all(|(_, v)| *v == 0.0));
    }

    #[test]
    fn test_record_serializes_conventional_names() {
        let record = ParameterRecord {
            j_sc: -20.0,
            v_oc: 1.1,
            ..ParameterRecord::zeroed()
        };
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["J_sc"], -20.0);
        assert_eq!(json["V_oc"], 1.1);
        assert!(json.get("max_power").is_some());
        assert!(json.get("j_sc").is_none());
    }

    #[test]
    fn test_fields_order() {
        let names: Vec<&str> = ParameterRecord::zeroed()
            .fields()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(
            names,
            ["J_sc", "V_oc", "R_sh", "R_s", "max_power", "V_mpp", "I_mpp", "PCE", "FF"]
        );
    }

    #[test]
    fn test_timing_split() {
        let both = SweepTiming::split(10.0, 0.05, true);
        assert_eq!(both.sweep_time_s, 5.0);
        assert_eq!(both.volt_rate, 0.05);

        let single = SweepTiming::split(10.0, 0.05, false);
        assert_eq!(single.sweep_time_s, 10.0);
    }

    #[test]
    fn test_sweep_diagnostics_forward_first() {
        let forward = ScanAnalysis::zeroed(
            3,
            ScanOutcome::NoCrossing,
            vec![Diagnostic::warning("forward")],
        );
        let reverse = ScanAnalysis::zeroed(
            3,
            ScanOutcome::NoCrossing,
            vec![Diagnostic::warning("reverse")],
        );
        let sweep = SweepAnalysis {
            forward: Some(forward),
            reverse: Some(reverse),
        };
        let messages: Vec<&str> = sweep.diagnostics().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, ["forward", "reverse"]);
        assert!(sweep.is_hysteresis());
    }
}
