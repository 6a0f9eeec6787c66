//! Anchor-point interpolation and nearest-sample lookup
//!
//! The two anchors of an I-V curve are roots of the sampled curve:
//! V_oc is where current crosses zero, J_sc is where voltage crosses zero.
//! Both are found by piecewise-linear interpolation.
//!
//! # Example
//!
//! ```
//! use solar_iv::features::interpolation::{interp, find_nearest};
//!
//! let voltage = [0.0, 0.1, 0.2];
//! let current = [-2.0, -1.0, 1.0];
//!
//! let v_oc = interp(0.0, &current, &voltage).unwrap();
//! assert!((v_oc - 0.15).abs() < 1e-12);
//! assert_eq!(find_nearest(&voltage, 0.12), Some(1));
//! ```

/// Piecewise-linear interpolation of `fp` at abscissa `x`
///
/// Unlike a textbook `interp`, `xp` does not have to be ascending: real
/// sweeps often have current *decreasing* with voltage, and noise makes the
/// current trace locally non-monotonic.
///
/// # Algorithm
///
/// 1. The overall direction of `xp` is taken from its first and last samples.
/// 2. If `x` is outside `[xp[0], xp[n-1]]` (in that direction), the result is
///    clamped to `fp[0]` or `fp[n-1]`. A curve that never crosses `x` therefore
///    yields a boundary value instead of an error.
/// 3. Otherwise the first segment (in scan order) whose endpoints bracket `x`
///    is linearly interpolated.
///
/// # Returns
///
/// `None` if either slice is empty. Only the common prefix of `xp` and `fp`
/// is considered.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> Option<f64> {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return None;
    }

    let first = xp[0];
    let last = xp[n - 1];

    if last >= first {
        if x <= first {
            return Some(fp[0]);
        }
        if x >= last {
            return Some(fp[n - 1]);
        }
    } else {
        if x >= first {
            return Some(fp[0]);
        }
        if x <= last {
            return Some(fp[n - 1]);
        }
    }

    for i in 0..n - 1 {
        let x0 = xp[i];
        let x1 = xp[i + 1];
        let brackets = (x0 <= x && x <= x1) || (x1 <= x && x <= x0);
        if !brackets {
            continue;
        }

        if x == x0 {
            return Some(fp[i]);
        }
        if x == x1 {
            return Some(fp[i + 1]);
        }

        let t = (x - x0) / (x1 - x0);
        return Some(fp[i] + t * (fp[i + 1] - fp[i]));
    }

    // x lies strictly between xp[0] and xp[n-1], so some segment brackets it
    Some(fp[n - 1])
}

/// Index of the sample closest to `value` (minimum absolute difference)
///
/// Ties resolve to the lowest index. Returns `None` for an empty slice.
pub fn find_nearest(samples: &[f64], value: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &sample) in samples.iter().enumerate() {
        let distance = (sample - value).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((idx, distance)),
        }
    }
    best.map(|(idx, _)| idx)
}
