//! Measurement profile
//!
//! The sweep settings and device context an I-V measurement is run with.
//! Profiles are stored as JSON and validated on load and before save.
//!
//! ```json
//! {
//!   "area": 0.09,
//!   "curr_limit": 100.0,
//!   "start_volt": -0.2,
//!   "stop_volt": 1.2,
//!   "volt_step": 0.02,
//!   "settle_time": 0.05,
//!   "illum": 100.0,
//!   "hysteresis": true,
//!   "curr_density": true
//! }
//! ```

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Measurement profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementProfile {
    /// Device area (cm²)
    pub area: f64,
    /// Source-meter current compliance limit (mA)
    pub curr_limit: f64,
    /// First voltage of the sweep (V)
    pub start_volt: f64,
    /// Last voltage of the sweep (V)
    pub stop_volt: f64,
    /// Voltage step (V)
    pub volt_step: f64,
    /// Settling time before each reading (s)
    pub settle_time: f64,
    /// Illumination intensity (mW/cm²)
    pub illum: f64,
    /// Sweep back to the start voltage after reaching the stop voltage
    pub hysteresis: bool,
    /// Present current density rather than current
    pub curr_density: bool,
}

impl Default for MeasurementProfile {
    fn default() -> Self {
        Self {
            area: 1.0,
            curr_limit: 100.0,
            start_volt: -0.2,
            stop_volt: 1.2,
            volt_step: 0.02,
            settle_time: 0.05,
            illum: 100.0,
            hysteresis: false,
            curr_density: true,
        }
    }
}

impl MeasurementProfile {
    /// Check value ranges
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidProfile`] naming the first offending field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let numeric = [
            ("area", self.area),
            ("curr_limit", self.curr_limit),
            ("start_volt", self.start_volt),
            ("stop_volt", self.stop_volt),
            ("volt_step", self.volt_step),
            ("settle_time", self.settle_time),
            ("illum", self.illum),
        ];
        if let Some((name, value)) = numeric.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(name, *value, "must be finite"));
        }

        if self.area <= 0.0 {
            return Err(invalid("area", self.area, "must be positive"));
        }
        if self.illum <= 0.0 {
            return Err(invalid("illum", self.illum, "must be positive"));
        }
        if self.curr_limit <= 0.0 {
            return Err(invalid("curr_limit", self.curr_limit, "must be positive"));
        }
        if self.volt_step <= 0.0 {
            return Err(invalid("volt_step", self.volt_step, "must be positive"));
        }
        if self.settle_time < 0.0 {
            return Err(invalid("settle_time", self.settle_time, "must not be negative"));
        }
        if self.start_volt == self.stop_volt {
            return Err(invalid("stop_volt", self.stop_volt, "must differ from start_volt"));
        }
        Ok(())
    }

    /// `(lower, upper)` voltage bound of the sweep regardless of direction
    pub fn voltage_bounds(&self) -> (f64, f64) {
        if self.stop_volt > self.start_volt {
            (self.start_volt, self.stop_volt)
        } else {
            (self.stop_volt, self.start_volt)
        }
    }
}

fn invalid(field: &str, value: f64, reason: &str) -> AnalysisError {
    AnalysisError::InvalidProfile(format!("{} = {} {}", field, value, reason))
}

/// Load and validate a profile
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<MeasurementProfile, AnalysisError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let profile: MeasurementProfile = serde_json::from_str(&text)?;
    profile.validate()?;

    log::info!("Loaded profile from {}", path.display());
    Ok(profile)
}

/// Validate and save a profile as pretty-printed JSON
pub fn save_profile<P: AsRef<Path>>(
    path: P,
    profile: &MeasurementProfile,
) -> Result<(), AnalysisError> {
    profile.validate()?;

    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(profile)?)?;

    log::info!("Saved profile to {}", path.display());
    Ok(())
}
