//! Local slope and resistance estimation
//!
//! Shunt and series resistance are read from the inverse slope of the I-V
//! curve at the two anchors: near V = 0 the curve is dominated by the shunt
//! path, near I = 0 by the series path. The slope uses a forward difference
//! from the anchor sample to the next one.

/// Per-step current differences `current[i + 1] - current[i]`
///
/// Empty for fewer than two samples.
pub fn current_steps(current: &[f64]) -> Vec<f64> {
    current.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Voltage step size of the sweep, `|voltage[0] - voltage[1]|`
///
/// Sweeps are driven with a fixed step, so the first step stands for all.
/// Returns `None` for fewer than two samples.
pub fn voltage_step(voltage: &[f64]) -> Option<f64> {
    match voltage {
        [v0, v1, ..] => Some((v0 - v1).abs()),
        _ => None,
    }
}

/// Where a forward difference is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlopeAnchor {
    /// Index into the difference array
    pub index: usize,
    /// True if the anchor was the final sample and had to be moved back one step
    pub shifted: bool,
}

/// Clamp an anchor sample index to a valid forward-difference index
///
/// An anchor on the last sample has no "next" sample; it is moved back by
/// one and flagged so the caller can warn. Returns `None` if there are no
/// differences at all.
pub fn slope_anchor(sample_index: usize, step_count: usize) -> Option<SlopeAnchor> {
    if step_count == 0 {
        return None;
    }
    if sample_index >= step_count {
        return Some(SlopeAnchor {
            index: step_count - 1,
            shifted: true,
        });
    }
    Some(SlopeAnchor {
        index: sample_index,
        shifted: false,
    })
}

/// Resistance from a voltage step (V) and current difference (mA)
///
/// `scale` converts V/mA into ohms (1000 for milliamp data). A zero current
/// difference yields `f64::INFINITY`; the caller decides whether that is
/// acceptable.
pub fn resistance(voltage_step: f64, current_step: f64, scale: f64) -> f64 {
    voltage_step / current_step.abs() * scale
}
