//! # solar-iv
//!
//! I-V curve analysis for solar cells characterized with a programmable
//! source-meter. Given a voltage sweep and the measured current, derives the
//! photovoltaic figures of merit and reports data-quality problems as
//! diagnostics rather than failing.
//!
//! ## Features
//!
//! - **Anchor extraction**: V_oc and J_sc by zero-crossing interpolation, robust to
//!   descending or noisy traces
//! - **Resistances**: shunt and series resistance from local slopes at the anchors
//! - **Maximum power point**: PCE and fill factor, area normalized
//! - **Hysteresis sweeps**: forward and reverse scans sorted and analyzed independently
//! - **Data files**: CSV load/save, results logging, JSON measurement profiles
//!
//! ## Quick Start
//!
//! ```
//! use solar_iv::{analyze_scan, AnalysisConfig};
//!
//! // One forward sweep: volts and milliamps
//! let voltage = [-0.1, 0.0, 0.1, 0.2, 0.3, 0.4];
//! let current = [-5.1, -5.0, -4.8, -4.0, -1.5, 3.0];
//!
//! let result = analyze_scan(&voltage, &current, 0.5, 100.0, &AnalysisConfig::default())?;
//!
//! println!("V_oc: {:.3} V, J_sc: {:.2} mA/cm2", result.params.v_oc, result.params.j_sc);
//! println!("FF: {:.1} %, PCE: {:.2} %", result.params.ff, result.params.pce);
//! for diagnostic in &result.diagnostics {
//!     println!("{}", diagnostic);
//! }
//! # Ok::<(), solar_iv::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! CSV / sweep → Scan sorting → Orientation → Anchors → Slopes → MPP → ParameterRecord
//!                                                                    + Diagnostics
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use analysis::diagnostics::{Diagnostic, Severity};
pub use analysis::iv_curve::analyze_scan;
pub use analysis::metadata::{AnalysisMetadata, ScanOutcome};
pub use analysis::result::{ParameterRecord, ScanAnalysis, SweepAnalysis, SweepTiming};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use preprocessing::sweep::{sort_scans, Scan, SweepData};

/// Analyze both directions of a sweep
///
/// Forward and reverse scans are analyzed independently with
/// [`analyze_scan`]; an empty direction gives `None`.
///
/// # Arguments
///
/// * `data` - Sorted sweep data (see [`sort_scans`])
/// * `area` - Device area in cm²
/// * `illum` - Illumination intensity in mW/cm²
/// * `config` - Analysis configuration
///
/// # Errors
///
/// The first [`AnalysisError`] raised by either direction.
///
/// # Example
///
/// ```
/// use solar_iv::{analyze_sweep, sort_scans, AnalysisConfig, Scan};
///
/// // Hysteresis run: up then back down in one column set
/// let voltage = vec![0.0, 0.1, 0.2, 0.3, 0.3, 0.2, 0.1, 0.0];
/// let current = vec![-4.0, -3.8, -3.0, 1.0, 1.2, -2.8, -3.7, -4.0];
/// let data = sort_scans(Scan::from_measurement(voltage, current, 1.0), Scan::default());
///
/// let sweep = analyze_sweep(&data, 1.0, 100.0, &AnalysisConfig::default())?;
/// assert!(sweep.is_hysteresis());
/// # Ok::<(), solar_iv::AnalysisError>(())
/// ```
pub fn analyze_sweep(
    data: &SweepData,
    area: f64,
    illum: f64,
    config: &AnalysisConfig,
) -> Result<SweepAnalysis, AnalysisError> {
    log::debug!(
        "Analyzing sweep: {} forward, {} reverse samples",
        data.forward.len(),
        data.reverse.len()
    );

    let analyze_direction = |scan: &Scan| -> Result<Option<ScanAnalysis>, AnalysisError> {
        if scan.is_empty() {
            return Ok(None);
        }
        analyze_scan(&scan.voltage, &scan.current, area, illum, config).map(Some)
    };

    Ok(SweepAnalysis {
        forward: analyze_direction(&data.forward)?,
        reverse: analyze_direction(&data.reverse)?,
    })
}
