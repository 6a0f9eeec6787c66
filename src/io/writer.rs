//! Data and results file writers
//!
//! Two outputs per measurement:
//! - a data file with the raw sweep (readable by [`load_data`](super::loader::load_data))
//! - a results file, appended to, with one row per scan direction holding the
//!   derived parameters and the profile the sweep was run with

use super::loader::DATA_HEADERS;
use super::profile::MeasurementProfile;
use crate::analysis::result::{ParameterRecord, SweepTiming};
use crate::error::AnalysisError;
use crate::preprocessing::sweep::{Scan, SweepData};
use chrono::NaiveDateTime;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Results file header, in column order
pub const RESULTS_HEADERS: [&str; 22] = [
    "Date",
    "Time",
    "Experiment Name",
    "Scan Direction",
    "J_sc (mA/cm2)",
    "V_oc (V)",
    "R_shunt (Ohm)",
    "R_series (Ohm)",
    "Max Power (mW/cm2)",
    "V_mpp (V)",
    "I_mpp (mA)",
    "PCE (%)",
    "FF (%)",
    "Sweep Time (s)",
    "Volt Rate (V/s)",
    "Device Area (cm2)",
    "Current Limit (mA)",
    "Start Volt (V)",
    "Stop Volt (V)",
    "Volt Step (V)",
    "Settle Time (s)",
    "Illumination (mW/cm2)",
];

/// Save sweep data, creating parent directories as needed
///
/// Only scans that hold samples are written; a hysteresis sweep gets two
/// column sets, forward first.
pub fn save_data<P: AsRef<Path>>(path: P, data: &SweepData) -> Result<(), AnalysisError> {
    if data.is_empty() {
        return Err(AnalysisError::InvalidInput("No data to save".to_string()));
    }

    let path = path.as_ref();
    create_parent_dir(path)?;
    write_data(File::create(path)?, data)?;

    log::info!("Saved data to {}", path.display());
    Ok(())
}

/// Write sweep data as CSV to any writer (see [`save_data`])
pub fn write_data<W: Write>(writer: W, data: &SweepData) -> Result<(), AnalysisError> {
    let scans: Vec<&Scan> = [&data.forward, &data.reverse]
        .into_iter()
        .filter(|scan| !scan.is_empty())
        .collect();

    let mut wtr = csv::Writer::from_writer(writer);

    let header: Vec<&str> = scans.iter().flat_map(|_| DATA_HEADERS).collect();
    wtr.write_record(&header)?;

    let rows = scans.iter().map(|scan| scan.len()).max().unwrap_or(0);
    for i in 0..rows {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        for scan in &scans {
            for column in [&scan.voltage, &scan.current, &scan.current_density] {
                record.push(column.get(i).map(f64::to_string).unwrap_or_default());
            }
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Append one results row per analyzed direction
///
/// A direction is written only if its record has a non-zero J_sc; a zeroed
/// record means the scan could not be analyzed. The header row is written
/// when the file is new or empty.
///
/// # Errors
///
/// [`AnalysisError::InvalidInput`] if no direction qualifies, plus any I/O
/// or CSV error.
pub fn save_results<P: AsRef<Path>>(
    path: P,
    experiment: &str,
    forward: Option<&ParameterRecord>,
    reverse: Option<&ParameterRecord>,
    profile: &MeasurementProfile,
    timing: SweepTiming,
    now: NaiveDateTime,
) -> Result<(), AnalysisError> {
    let rows = results_rows(experiment, forward, reverse, profile, timing, now);
    if rows.is_empty() {
        return Err(AnalysisError::InvalidInput("No results to save".to_string()));
    }

    let path = path.as_ref();
    create_parent_dir(path)?;

    let needs_header = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if needs_header {
        wtr.write_record(RESULTS_HEADERS)?;
    }
    for row in &rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;

    log::info!("Saved {} result row(s) to {}", rows.len(), path.display());
    Ok(())
}

/// Build results rows without writing them
pub fn results_rows(
    experiment: &str,
    forward: Option<&ParameterRecord>,
    reverse: Option<&ParameterRecord>,
    profile: &MeasurementProfile,
    timing: SweepTiming,
    now: NaiveDateTime,
) -> Vec<Vec<String>> {
    let date = now.format("%Y/%m/%d").to_string();
    let time = now.format("%H:%M:%S").to_string();
    let (low, high) = profile.voltage_bounds();

    [
        ("forward", forward, low, high),
        ("reverse", reverse, high, low),
    ]
    .into_iter()
    .filter_map(|(direction, record, start, stop)| {
        let record = record.filter(|r| r.j_sc != 0.0)?;
        let mut row = vec![
            date.clone(),
            time.clone(),
            experiment.to_string(),
            direction.to_string(),
        ];
        row.extend(record.fields().iter().map(|(_, v)| v.to_string()));
        row.extend(
            [
                timing.sweep_time_s,
                timing.volt_rate,
                profile.area,
                profile.curr_limit,
                start,
                stop,
                profile.volt_step,
                profile.settle_time,
                profile.illum,
            ]
            .iter()
            .map(f64::to_string),
        );
        Some(row)
    })
    .collect()
}

fn create_parent_dir(path: &Path) -> Result<(), AnalysisError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}
