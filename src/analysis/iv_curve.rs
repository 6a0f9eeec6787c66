//! I-V curve analysis
//!
//! Derives photovoltaic figures of merit from one scan direction of a
//! source-meter sweep. Sign convention: photocurrent is negative, so a
//! generating cell has negative current below V_oc and negative power.
//!
//! # Pipeline
//!
//! 1. Orientation normalization (ascending voltage)
//! 2. Anchor interpolation: V_oc (I = 0) and J_sc (V = 0)
//! 3. Nearest measured samples to both anchors
//! 4. Crossing plausibility (zeroed record if the curve misses an anchor)
//! 5. J_sc sanity
//! 6. Shunt/series resistance from local slopes
//! 7. Maximum power point
//! 8. PCE, FF, and area normalization
//!
//! Data-quality problems become [`Diagnostic`]s; only malformed input or a
//! non-finite result is an [`AnalysisError`].
//!
//! # Example
//!
//! ```
//! use solar_iv::{analyze_scan, AnalysisConfig};
//!
//! let voltage = [-0.1, 0.0, 0.1, 0.2, 0.3];
//! let current = [-10.5, -10.0, -8.0, -4.0, 2.0];
//!
//! let result = analyze_scan(&voltage, &current, 1.0, 100.0, &AnalysisConfig::default())?;
//! assert!((result.params.j_sc + 10.0).abs() < 1e-9);
//! assert!(result.params.v_oc > 0.2 && result.params.v_oc < 0.3);
//! # Ok::<(), solar_iv::AnalysisError>(())
//! ```

use super::diagnostics::{Diagnostic, DiagnosticSink};
use super::metadata::{AnalysisMetadata, ScanOutcome};
use super::result::{ParameterRecord, ScanAnalysis};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::interpolation::{find_nearest, interp};
use crate::features::power::max_power_point;
use crate::features::slope::{current_steps, resistance, slope_anchor, voltage_step};
use crate::preprocessing::orientation::normalize_orientation;
use std::time::Instant;

/// Warning when no measured sample sits at V = 0
pub const MSG_NO_ZERO_VOLT: &str = "Data does not cross or touch 0V";
/// Warning when no measured sample sits at I = 0
pub const MSG_NO_ZERO_CURRENT: &str = "Data does not cross or touch 0mA";
/// Warning when J_sc is near zero or has the wrong sign
pub const MSG_JSC_TOO_LOW: &str = "Cell J_sc too low - results may be inaccurate";
/// Warning when the J_sc anchor is the last sample
pub const MSG_SHORT_PAST_ZERO_VOLT: &str = "Not enough values past 0V";
/// Warning when the V_oc anchor is the last sample
pub const MSG_SHORT_PAST_ZERO_CURRENT: &str = "Not enough values past 0mA";
/// Warning when the current does not change across the J_sc anchor
pub const MSG_FLAT_AT_ZERO_VOLT: &str = "Flat current at 0V - R_sh unbounded";
/// Warning when the current does not change across the V_oc anchor
pub const MSG_FLAT_AT_ZERO_CURRENT: &str = "Flat current at 0mA - R_s unbounded";
/// Info when J_sc sits on 0mA and is replaced by the configured floor
pub const MSG_JSC_FLOOR: &str = "J_sc at 0mA - replaced by floor value";

/// Analyze one scan direction
///
/// # Arguments
///
/// * `voltage` - Voltage samples in volts, forward or reverse order
/// * `current` - Current samples in milliamps, same length as `voltage`
/// * `area` - Device area in cm²
/// * `illum` - Illumination intensity in mW/cm²
/// * `config` - Tolerances and thresholds
///
/// # Returns
///
/// A [`ScanAnalysis`] with the parameter record and any diagnostics. Empty
/// arrays or a zero `area`/`illum` mean "nothing to compute yet" and give a
/// zeroed record without diagnostics.
///
/// # Errors
///
/// * [`AnalysisError::InvalidInput`] for unequal lengths, non-finite samples,
///   a negative or non-finite `area`/`illum`, or a scan too short to form a slope
/// * [`AnalysisError::NumericalError`] if a derived parameter is undefined
///   (for example V_oc = 0 leaves the fill factor undefined). A flat current
///   across an anchor is not an error: the resistance is kept as infinity
///   and a warning is emitted.
pub fn analyze_scan(
    voltage: &[f64],
    current: &[f64],
    area: f64,
    illum: f64,
    config: &AnalysisConfig,
) -> Result<ScanAnalysis, AnalysisError> {
    let start_time = Instant::now();

    if voltage.is_empty() || current.is_empty() || area == 0.0 || illum == 0.0 {
        log::debug!("Nothing to analyze: empty scan or missing area/illumination");
        return Ok(ScanAnalysis::zeroed(voltage.len(), ScanOutcome::Skipped, vec![]));
    }

    validate_inputs(voltage, current, area, illum)?;

    log::debug!(
        "Analyzing scan: {} samples, area={} cm2, illum={} mW/cm2",
        voltage.len(),
        area,
        illum
    );

    let oriented = normalize_orientation(voltage, current);
    let voltage: &[f64] = &oriented.voltage;
    let current: &[f64] = &oriented.current;
    let mut sink = DiagnosticSink::new();

    // Anchors: clamp to the boundary sample when the curve does not cross
    let v_oc = interp(0.0, current, voltage).ok_or_else(empty_scan)?;
    let mut j_sc = interp(0.0, voltage, current).ok_or_else(empty_scan)?;

    let v_idx = find_nearest(voltage, v_oc).ok_or_else(empty_scan)?;
    let j_idx = find_nearest(current, j_sc).ok_or_else(empty_scan)?;

    log::debug!(
        "Anchors: V_oc={:.6} V (nearest sample {}), J_sc={:.6} mA (nearest sample {})",
        v_oc,
        v_idx,
        j_sc,
        j_idx
    );

    // A measured sample sitting on the interpolated anchor but away from the
    // axis means interpolation was clamped, i.e. the curve never crossed
    let missing_crossing = if config.is_close(current[j_idx], j_sc)
        && !config.is_close(voltage[j_idx], 0.0)
    {
        Some(MSG_NO_ZERO_VOLT)
    } else if config.is_close(voltage[v_idx], v_oc) && !config.is_close(current[v_idx], 0.0) {
        Some(MSG_NO_ZERO_CURRENT)
    } else {
        None
    };

    if let Some(message) = missing_crossing {
        sink.warn(message);
        return Ok(finish(
            ParameterRecord::zeroed(),
            sink.into_vec(),
            voltage.len(),
            oriented.reversed,
            ScanOutcome::NoCrossing,
            start_time,
        ));
    }

    if j_sc >= config.jsc_warning_threshold {
        sink.warn(MSG_JSC_TOO_LOW);
    }
    if config.is_close(j_sc, 0.0) {
        sink.info(MSG_JSC_FLOOR);
        j_sc = config.jsc_floor;
    }

    // Resistances from forward differences at the anchors
    let steps = current_steps(current);
    let step = voltage_step(voltage).ok_or_else(|| {
        AnalysisError::InvalidInput(
            "at least two samples are needed to estimate resistances".to_string(),
        )
    })?;

    let j_anchor = slope_anchor(j_idx, steps.len()).ok_or_else(empty_scan)?;
    if j_anchor.shifted {
        sink.warn(MSG_SHORT_PAST_ZERO_VOLT);
    }
    let v_anchor = slope_anchor(v_idx, steps.len()).ok_or_else(empty_scan)?;
    if v_anchor.shifted {
        sink.warn(MSG_SHORT_PAST_ZERO_CURRENT);
    }

    let r_sh = resistance(step, steps[j_anchor.index], config.resistance_scale);
    let r_s = resistance(step, steps[v_anchor.index], config.resistance_scale);
    if r_sh.is_infinite() {
        sink.warn(MSG_FLAT_AT_ZERO_VOLT);
    }
    if r_s.is_infinite() {
        sink.warn(MSG_FLAT_AT_ZERO_CURRENT);
    }

    let mpp = max_power_point(voltage, current).ok_or_else(empty_scan)?;

    let pce = (mpp.power / illum).abs() * 100.0;
    // FF from un-scaled J_sc and I_mpp; area scaling comes after
    let ff = mpp.voltage * mpp.current / (v_oc * j_sc) * 100.0;

    let params = ParameterRecord {
        j_sc: j_sc / area,
        v_oc,
        r_sh,
        r_s,
        max_power: mpp.power / area,
        v_mpp: mpp.voltage,
        i_mpp: mpp.current / area,
        pce: pce / area,
        ff,
    };

    // An unbounded resistance is reported above; anything else non-finite is undefined
    let undefined = params.fields().into_iter().find(|&(name, v)| {
        let unbounded_resistance = (name == "R_sh" || name == "R_s") && v == f64::INFINITY;
        !v.is_finite() && !unbounded_resistance
    });
    if let Some((name, value)) = undefined {
        return Err(AnalysisError::NumericalError(format!(
            "{} evaluated to {} (V_oc={}, J_sc={}, R_sh={}, R_s={})",
            name, value, v_oc, j_sc, r_sh, r_s
        )));
    }

    log::debug!(
        "Scan parameters: V_oc={:.4} V, J_sc={:.4} mA/cm2, FF={:.2}%, PCE={:.3}%",
        params.v_oc,
        params.j_sc,
        params.ff,
        params.pce
    );

    Ok(finish(
        params,
        sink.into_vec(),
        voltage.len(),
        oriented.reversed,
        ScanOutcome::Computed,
        start_time,
    ))
}

fn validate_inputs(
    voltage: &[f64],
    current: &[f64],
    area: f64,
    illum: f64,
) -> Result<(), AnalysisError> {
    if voltage.len() != current.len() {
        return Err(AnalysisError::InvalidInput(format!(
            "voltage and current differ in length ({} vs {})",
            voltage.len(),
            current.len()
        )));
    }
    if let Some(idx) = voltage
        .iter()
        .zip(current.iter())
        .position(|(v, i)| !v.is_finite() || !i.is_finite())
    {
        return Err(AnalysisError::InvalidInput(format!(
            "non-finite sample at index {}",
            idx
        )));
    }
    if !(area.is_finite() && area > 0.0) {
        return Err(AnalysisError::InvalidInput(format!("invalid device area: {}", area)));
    }
    if !(illum.is_finite() && illum > 0.0) {
        return Err(AnalysisError::InvalidInput(format!("invalid illumination: {}", illum)));
    }
    Ok(())
}

fn empty_scan() -> AnalysisError {
    AnalysisError::InvalidInput("empty scan".to_string())
}

fn finish(
    params: ParameterRecord,
    diagnostics: Vec<Diagnostic>,
    sample_count: usize,
    reversed: bool,
    outcome: ScanOutcome,
    start_time: Instant,
) -> ScanAnalysis {
    ScanAnalysis {
        params,
        diagnostics,
        metadata: AnalysisMetadata {
            sample_count,
            reversed,
            processing_time_ms: start_time.elapsed().as_secs_f32() * 1000.0,
            outcome,
            ..AnalysisMetadata::default()
        },
    }
}
