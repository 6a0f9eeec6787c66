//! Forward/reverse scan sorting
//!
//! A source-meter run or a data file delivers one or two column sets of
//! samples. A hysteresis run may also put both directions back to back in a
//! single column set. This module sorts whatever arrives into a forward
//! (increasing voltage) and a reverse (decreasing voltage) scan.
//!
//! Supported layouts:
//!
//! | first column set   | second column set |
//! |--------------------|-------------------|
//! | forward            | -                 |
//! | reverse            | -                 |
//! | forward + reverse  | -                 |
//! | reverse + forward  | -                 |
//! | forward            | reverse           |
//! | reverse            | forward           |

use serde::{Deserialize, Serialize};

/// One scan direction: voltage, current and current density samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    /// Voltage samples (V)
    pub voltage: Vec<f64>,
    /// Current samples (mA)
    pub current: Vec<f64>,
    /// Current density samples (mA/cm²)
    pub current_density: Vec<f64>,
}

impl Scan {
    /// Scan from explicit columns
    pub fn new(voltage: Vec<f64>, current: Vec<f64>, current_density: Vec<f64>) -> Self {
        Self {
            voltage,
            current,
            current_density,
        }
    }

    /// Scan from a live measurement, deriving current density from the device area
    pub fn from_measurement(voltage: Vec<f64>, current: Vec<f64>, area: f64) -> Self {
        let current_density = current.iter().map(|c| c / area).collect();
        Self {
            voltage,
            current,
            current_density,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    /// True if the scan holds no samples
    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }

    /// Split into `[..mid]` and `[mid..]`
    fn split_at(self, mid: usize) -> (Scan, Scan) {
        fn cut(mut column: Vec<f64>, mid: usize) -> (Vec<f64>, Vec<f64>) {
            let tail = column.split_off(mid.min(column.len()));
            (column, tail)
        }
        let (v_head, v_tail) = cut(self.voltage, mid);
        let (c_head, c_tail) = cut(self.current, mid);
        let (d_head, d_tail) = cut(self.current_density, mid);
        (
            Scan::new(v_head, c_head, d_head),
            Scan::new(v_tail, c_tail, d_tail),
        )
    }
}

/// Samples sorted into scan directions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepData {
    /// Increasing-voltage scan (may be empty)
    pub forward: Scan,
    /// Decreasing-voltage scan (may be empty)
    pub reverse: Scan,
}

impl SweepData {
    /// True if neither direction holds samples
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty() && self.reverse.is_empty()
    }
}

/// Sort one or two column sets into forward and reverse scans
///
/// `second` is the optional second column set; pass an empty [`Scan`] when
/// there is none. Two column sets are assumed to be one direction each.
///
/// Direction is read from the slope at the start of `first`; a slope at the
/// end that disagrees means `first` holds two back-to-back scans, split at
/// the midpoint.
pub fn sort_scans(first: Scan, second: Scan) -> SweepData {
    let has_second = !second.is_empty();

    let voltage = &first.voltage;
    let n = voltage.len();
    let (first_is_forward, first_is_two_scans) = if n < 2 {
        (true, false)
    } else {
        let starts_up = voltage[1] > voltage[0];
        let ends_up = voltage[n - 1] > voltage[n - 2];
        (starts_up, starts_up != ends_up)
    };

    log::debug!(
        "Sorting scans: {} samples, second set: {}, forward start: {}, two scans: {}",
        first.len(),
        has_second,
        first_is_forward,
        first_is_two_scans
    );

    if has_second {
        return if first_is_forward {
            SweepData {
                forward: first,
                reverse: second,
            }
        } else {
            SweepData {
                forward: second,
                reverse: first,
            }
        };
    }

    if first_is_two_scans {
        let mid = first.len() / 2;
        let (head, tail) = first.split_at(mid);
        return if first_is_forward {
            SweepData {
                forward: head,
                reverse: tail,
            }
        } else {
            SweepData {
                forward: tail,
                reverse: head,
            }
        };
    }

    if first_is_forward {
        SweepData {
            forward: first,
            reverse: Scan::default(),
        }
    } else {
        SweepData {
            forward: Scan::default(),
            reverse: first,
        }
    }
}
