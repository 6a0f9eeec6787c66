//! Integration tests for the I-V analysis pipeline

use chrono::{NaiveDate, NaiveDateTime};
use solar_iv::analysis::iv_curve::MSG_NO_ZERO_CURRENT;
use solar_iv::io::loader::load_data;
use solar_iv::io::paths::get_file_paths;
use solar_iv::io::profile::{load_profile, save_profile, MeasurementProfile};
use solar_iv::io::writer::{save_data, save_results, RESULTS_HEADERS};
use solar_iv::{
    analyze_scan, analyze_sweep, AnalysisConfig, AnalysisError, ScanOutcome, SweepTiming,
};
use std::path::PathBuf;

fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
}

/// Fresh scratch directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("solar-iv-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn measured_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 8, 19)
        .and_then(|d| d.and_hms_opt(14, 2, 30))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: f64 = 0.5;
    const ILLUM: f64 = 100.0;

    #[test]
    fn test_hysteresis_file() {
        let data = load_data(fixture_path("hysteresis_cell.csv")).expect("Failed to load fixture");
        assert_eq!(data.forward.len(), 11);
        assert_eq!(data.reverse.len(), 11);
        assert_eq!(data.forward.voltage[0], -0.2);
        assert_eq!(data.reverse.voltage[0], 0.8);

        let sweep = analyze_sweep(&data, AREA, ILLUM, &AnalysisConfig::default())
            .expect("Analysis should succeed");
        assert!(sweep.is_hysteresis());
        assert_eq!(sweep.diagnostics().count(), 0);

        let forward = sweep.forward.as_ref().unwrap();
        assert!(forward.is_computed());
        assert!(!forward.metadata.reversed);
        let p = forward.params;
        assert!((p.v_oc - 0.55).abs() < 1e-9, "V_oc = {}", p.v_oc);
        assert!((p.j_sc + 22.0).abs() < 1e-9, "J_sc = {}", p.j_sc);
        assert!((p.r_sh - 50.0).abs() < 1e-6);
        assert!((p.r_s - 50.0).abs() < 1e-6);
        assert!((p.max_power + 3.0).abs() < 1e-9);
        assert!((p.v_mpp - 0.3).abs() < 1e-12);
        assert!((p.i_mpp + 10.0).abs() < 1e-9);
        assert!((p.pce - 3.0).abs() < 1e-9);
        let expected_ff = (0.3 * -5.0) / (0.55 * -11.0) * 100.0;
        assert!((p.ff - expected_ff).abs() < 1e-6, "FF = {}", p.ff);

        let reverse = sweep.reverse.as_ref().unwrap();
        assert!(reverse.is_computed());
        assert!(reverse.metadata.reversed);
        let p = reverse.params;
        assert!((p.v_oc - 0.525).abs() < 1e-9, "V_oc = {}", p.v_oc);
        assert!((p.j_sc + 21.0).abs() < 1e-9, "J_sc = {}", p.j_sc);
        assert!((p.v_mpp - 0.3).abs() < 1e-12);
        assert!((p.max_power + 2.7).abs() < 1e-9);
    }

    #[test]
    fn test_dark_scan_reports_missing_crossing() {
        let data = load_data(fixture_path("dark_reverse.csv")).expect("Failed to load fixture");
        assert!(data.forward.is_empty());

        let sweep = analyze_sweep(&data, AREA, ILLUM, &AnalysisConfig::default()).unwrap();
        assert!(sweep.forward.is_none());

        let reverse = sweep.reverse.unwrap();
        assert!(reverse.params.is_zeroed());
        assert_eq!(reverse.metadata.outcome, ScanOutcome::NoCrossing);
        assert_eq!(reverse.diagnostics.len(), 1);
        assert_eq!(reverse.diagnostics[0].message, MSG_NO_ZERO_CURRENT);
    }

    #[test]
    fn test_scan_direction_does_not_change_parameters() {
        let data = load_data(fixture_path("hysteresis_cell.csv")).unwrap();
        let config = AnalysisConfig::default();

        let scan = &data.forward;
        let as_measured = analyze_scan(&scan.voltage, &scan.current, AREA, ILLUM, &config).unwrap();

        let rev_v: Vec<f64> = scan.voltage.iter().rev().copied().collect();
        let rev_i: Vec<f64> = scan.current.iter().rev().copied().collect();
        let flipped = analyze_scan(&rev_v, &rev_i, AREA, ILLUM, &config).unwrap();

        assert_eq!(as_measured.params, flipped.params);
        assert_eq!(as_measured.diagnostics, flipped.diagnostics);
    }

    #[test]
    fn test_area_only_scales_area_normalized_fields() {
        let data = load_data(fixture_path("hysteresis_cell.csv")).unwrap();
        let config = AnalysisConfig::default();
        let scan = &data.reverse;

        let small = analyze_scan(&scan.voltage, &scan.current, 0.25, ILLUM, &config)
            .unwrap()
            .params;
        let large = analyze_scan(&scan.voltage, &scan.current, 1.0, ILLUM, &config)
            .unwrap()
            .params;

        assert!((small.j_sc - 4.0 * large.j_sc).abs() < 1e-9);
        assert!((small.pce - 4.0 * large.pce).abs() < 1e-9);
        assert!((small.max_power - 4.0 * large.max_power).abs() < 1e-9);
        assert!((small.i_mpp - 4.0 * large.i_mpp).abs() < 1e-9);
        assert_eq!(small.v_oc, large.v_oc);
        assert_eq!(small.ff, large.ff);
        assert_eq!(small.r_sh, large.r_sh);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_data(fixture_path("does_not_exist.csv"));
        assert!(matches!(result, Err(AnalysisError::Io(_))));
    }

    #[test]
    fn test_save_data_round_trip() {
        let dir = scratch_dir("data");
        let (data_path, _) = get_file_paths(&dir, "cell-7", "light", measured_at()).unwrap();

        let data = load_data(fixture_path("hysteresis_cell.csv")).unwrap();
        save_data(&data_path, &data).expect("Save should succeed");

        let reloaded = load_data(&data_path).expect("Saved file should load");
        assert_eq!(reloaded, data);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_measurement_session() {
        let dir = scratch_dir("session");
        let profile_path = dir.join("profile.json");

        let profile = MeasurementProfile {
            area: AREA,
            start_volt: -0.2,
            stop_volt: 0.8,
            volt_step: 0.1,
            hysteresis: true,
            ..MeasurementProfile::default()
        };
        save_profile(&profile_path, &profile).unwrap();
        let profile = load_profile(&profile_path).unwrap();

        let data = load_data(fixture_path("hysteresis_cell.csv")).unwrap();
        let sweep =
            analyze_sweep(&data, profile.area, profile.illum, &AnalysisConfig::default()).unwrap();

        let (_, results_path) = get_file_paths(&dir, "cell-7", "light", measured_at()).unwrap();
        let timing = SweepTiming::split(4.4, 0.5, sweep.is_hysteresis());
        for _ in 0..2 {
            save_results(
                &results_path,
                "light",
                sweep.forward.as_ref().map(|s| &s.params),
                sweep.reverse.as_ref().map(|s| &s.params),
                &profile,
                timing,
                measured_at(),
            )
            .unwrap();
        }

        let mut rdr = csv::Reader::from_path(&results_path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), RESULTS_HEADERS);

        let rows: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[0][0], "2022/08/19");
        assert_eq!(&rows[0][1], "14:02:30");
        assert_eq!(&rows[0][3], "forward");
        assert_eq!(&rows[1][3], "reverse");
        assert_eq!(rows[0][13].parse::<f64>().unwrap(), 2.2);
        // Forward runs low to high, reverse high to low
        assert_eq!(rows[0][17].parse::<f64>().unwrap(), -0.2);
        assert_eq!(rows[1][17].parse::<f64>().unwrap(), 0.8);
        assert_eq!(rows[0][5].parse::<f64>().unwrap(), sweep.forward.unwrap().params.v_oc);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
