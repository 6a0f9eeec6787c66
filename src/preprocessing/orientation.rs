//! Scan orientation normalization
//!
//! Interpolation and slope estimation work on ascending-voltage data. A
//! reverse sweep (or anything that is not strictly ascending) is flipped so
//! forward and reverse scans take the same path through the analyzer.

use std::borrow::Cow;

/// True if every step of `voltage` is strictly positive
///
/// Vacuously true for zero or one sample.
pub fn is_strictly_ascending(voltage: &[f64]) -> bool {
    voltage.windows(2).all(|w| w[1] - w[0] > 0.0)
}

/// Voltage and current in ascending-voltage orientation
#[derive(Debug, Clone)]
pub struct OrientedScan<'a> {
    /// Voltage samples (V)
    pub voltage: Cow<'a, [f64]>,
    /// Current samples (mA)
    pub current: Cow<'a, [f64]>,
    /// True if the input was reversed
    pub reversed: bool,
}

/// Reverse both arrays unless voltage is already strictly ascending
///
/// Borrows the input untouched in the common forward case.
pub fn normalize_orientation<'a>(voltage: &'a [f64], current: &'a [f64]) -> OrientedScan<'a> {
    if is_strictly_ascending(voltage) {
        return OrientedScan {
            voltage: Cow::Borrowed(voltage),
            current: Cow::Borrowed(current),
            reversed: false,
        };
    }

    log::debug!("Voltage not ascending, reversing {} samples", voltage.len());
    OrientedScan {
        voltage: Cow::Owned(voltage.iter().rev().copied().collect()),
        current: Cow::Owned(current.iter().rev().copied().collect()),
        reversed: true,
    }
}
