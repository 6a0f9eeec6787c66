//! Maximum power point detection

/// Maximum power point of a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerPoint {
    /// Sample index of the maximum power point
    pub index: usize,
    /// Power at that point (mW, negative while generating)
    pub power: f64,
    /// Voltage at that point (V)
    pub voltage: f64,
    /// Current at that point (mA)
    pub current: f64,
}

/// Find the maximum power point
///
/// Power is `voltage * current`. Under the source-meter sign convention a
/// generating cell produces negative power, so the maximum output is the
/// *minimum* product. Ties resolve to the lowest index.
///
/// Returns `None` for empty input.
pub fn max_power_point(voltage: &[f64], current: &[f64]) -> Option<PowerPoint> {
    let mut best: Option<PowerPoint> = None;
    for (index, (&v, &i)) in voltage.iter().zip(current.iter()).enumerate() {
        let power = v * i;
        match best {
            Some(point) if power >= point.power => {}
            _ => {
                best = Some(PowerPoint {
                    index,
                    power,
                    voltage: v,
                    current: i,
                })
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_power_point() {
        let voltage = [-0.1, 0.0, 0.1, 0.2];
        let current = [2.0, 1.0, -1.0, -3.0];
        let mpp = max_power_point(&voltage, &current).unwrap();
        assert_eq!(mpp.index, 3);
        assert!((mpp.power + 0.6).abs() < 1e-12);
        assert_eq!(mpp.voltage, 0.2);
        assert_eq!(mpp.current, -3.0);
    }

    #[test]
    fn test_max_power_point_tie_prefers_first() {
        let voltage = [1.0, 2.0];
        let current = [-2.0, -1.0];
        assert_eq!(max_power_point(&voltage, &current).unwrap().index, 0);
    }

    #[test]
    fn test_max_power_point_empty() {
        assert!(max_power_point(&[], &[]).is_none());
    }
}
