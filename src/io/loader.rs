//! Data file loading
//!
//! Reads the CSV layout written by [`save_data`](super::writer::save_data)
//! and by the acquisition software: one or two sets of
//! `Voltage (V)`, `Current (mA)`, `Current Density (mA/cm2)` columns. A
//! second set may repeat the header text verbatim or carry a `.1` suffix
//! (as spreadsheet tools rename duplicates). Either set may end before the
//! other; the shorter one is padded with blank cells.
//!
//! # Example
//!
//! ```
//! use solar_iv::io::loader::load_data_from_reader;
//!
//! let csv = "Voltage (V),Current (mA),Current Density (mA/cm2)\n\
//!            0.0,-2.0,-4.0\n\
//!            0.1,-1.0,-2.0\n";
//! let data = load_data_from_reader(csv.as_bytes())?;
//! assert_eq!(data.forward.voltage, vec![0.0, 0.1]);
//! assert!(data.reverse.is_empty());
//! # Ok::<(), solar_iv::AnalysisError>(())
//! ```

use crate::error::AnalysisError;
use crate::preprocessing::sweep::{sort_scans, Scan, SweepData};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Voltage column header
pub const VOLTAGE_HEADER: &str = "Voltage (V)";
/// Current column header
pub const CURRENT_HEADER: &str = "Current (mA)";
/// Current density column header
pub const DENSITY_HEADER: &str = "Current Density (mA/cm2)";
/// Column set in file order
pub const DATA_HEADERS: [&str; 3] = [VOLTAGE_HEADER, CURRENT_HEADER, DENSITY_HEADER];

const DUPLICATE_SUFFIX: &str = ".1";

/// Load a data file and sort it into forward and reverse scans
///
/// # Errors
///
/// * [`AnalysisError::Io`] if the file cannot be opened
/// * [`AnalysisError::MissingColumn`] if a required header is absent
/// * [`AnalysisError::InvalidData`] for non-numeric cells or an empty file
/// * [`AnalysisError::Csv`] for malformed CSV (e.g. rows of differing length)
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<SweepData, AnalysisError> {
    let path = path.as_ref();
    log::debug!("Loading data file: {}", path.display());

    let file = File::open(path)?;
    let data = load_data_from_reader(BufReader::new(file))?;

    log::info!(
        "Loaded data from {} ({} forward, {} reverse samples)",
        path.display(),
        data.forward.len(),
        data.reverse.len()
    );
    Ok(data)
}

/// Load data from any reader (see [`load_data`])
pub fn load_data_from_reader<R: Read>(reader: R) -> Result<SweepData, AnalysisError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let first_cols = locate_first_set(&headers)?;
    let second_cols = locate_second_set(&headers, &first_cols);

    if second_cols.is_none() {
        log::debug!("Single column set found");
    }

    let mut first = ColumnSet::new(first_cols);
    let mut second = second_cols.map(ColumnSet::new);

    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        let row = idx + 1;

        first.push_row(&record, row, &headers)?;
        if let Some(set) = second.as_mut() {
            set.push_row(&record, row, &headers)?;
        }
    }

    let first = first.into_scan();
    let second = second.map(ColumnSet::into_scan).unwrap_or_default();

    if first.is_empty() && second.is_empty() {
        return Err(AnalysisError::InvalidData("Empty data file".to_string()));
    }
    if first.is_empty() {
        return Ok(sort_scans(second, Scan::default()));
    }
    Ok(sort_scans(first, second))
}

/// One `Voltage`/`Current`/`Density` column triple being read
///
/// Either set may end before the other: a row whose three cells are all
/// blank ends the set, and a value after that is a gap.
struct ColumnSet {
    cols: [usize; 3],
    values: [Vec<f64>; 3],
    ended_at: Option<usize>,
}

impl ColumnSet {
    fn new(cols: [usize; 3]) -> Self {
        Self {
            cols,
            values: [Vec::new(), Vec::new(), Vec::new()],
            ended_at: None,
        }
    }

    fn push_row(
        &mut self,
        record: &csv::StringRecord,
        row: usize,
        headers: &csv::StringRecord,
    ) -> Result<(), AnalysisError> {
        let cells = self.cols.map(|c| record.get(c).unwrap_or(""));
        if cells.iter().all(|c| c.is_empty()) {
            self.ended_at.get_or_insert(row);
            return Ok(());
        }
        if let Some(end) = self.ended_at {
            return Err(AnalysisError::InvalidData(format!(
                "Gap in column '{}' between rows {} and {}",
                &headers[self.cols[0]], end, row
            )));
        }
        for ((column, cell), &col_idx) in self.values.iter_mut().zip(cells).zip(self.cols.iter()) {
            column.push(parse_cell(cell, row, &headers[col_idx])?);
        }
        Ok(())
    }

    fn into_scan(self) -> Scan {
        let [voltage, current, density] = self.values;
        Scan::new(voltage, current, density)
    }
}

fn locate_first_set(headers: &csv::StringRecord) -> Result<[usize; 3], AnalysisError> {
    let mut cols = [0usize; 3];
    for (slot, name) in cols.iter_mut().zip(DATA_HEADERS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))?;
    }
    Ok(cols)
}

/// Second column set, only if all three columns are present
fn locate_second_set(headers: &csv::StringRecord, first: &[usize; 3]) -> Option<[usize; 3]> {
    let mut cols = [0usize; 3];
    for ((slot, name), &first_idx) in cols.iter_mut().zip(DATA_HEADERS).zip(first.iter()) {
        let suffixed = format!("{}{}", name, DUPLICATE_SUFFIX);
        *slot = headers
            .iter()
            .enumerate()
            .find(|&(i, h)| h == suffixed || (h == name && i != first_idx))
            .map(|(i, _)| i)?;
    }
    Some(cols)
}

fn parse_cell(cell: &str, row: usize, column: &str) -> Result<f64, AnalysisError> {
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AnalysisError::InvalidData(format!(
            "Non numeric data detected in row {}, column '{}': '{}'",
            row, column, cell
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Voltage (V),Current (mA),Current Density (mA/cm2)";

    #[test]
    fn test_single_reverse_scan() {
        let csv = format!("{}\n0.2,1.0,2.0\n0.1,-1.0,-2.0\n0.0,-3.0,-6.0\n", HEADER);
        let data = load_data_from_reader(csv.as_bytes()).unwrap();
        assert!(data.forward.is_empty());
        assert_eq!(data.reverse.voltage, vec![0.2, 0.1, 0.0]);
        assert_eq!(data.reverse.current_density, vec![2.0, -2.0, -6.0]);
    }

    #[test]
    fn test_duplicated_headers() {
        let csv = format!(
            "{},{}\n0.0,-3.0,-6.0,0.1,-1.0,-2.0\n0.1,-1.0,-2.0,0.0,-3.0,-6.0\n",
            HEADER, HEADER
        );
        let data = load_data_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(data.forward.voltage, vec![0.0, 0.1]);
        assert_eq!(data.reverse.voltage, vec![0.1, 0.0]);
        assert_eq!(data.reverse.current, vec![-1.0, -3.0]);
    }

    #[test]
    fn test_suffixed_headers() {
        let csv = "Voltage (V).1,Current (mA).1,Current Density (mA/cm2).1,\
                   Voltage (V),Current (mA),Current Density (mA/cm2)\n\
                   0.0,-3.0,-6.0,0.1,-1.0,-2.0\n\
                   0.1,-1.0,-2.0,0.0,-3.0,-6.0\n";
        let data = load_data_from_reader(csv.as_bytes()).unwrap();
        // First set is the un-suffixed one, which runs downward
        assert_eq!(data.reverse.voltage, vec![0.1, 0.0]);
        assert_eq!(data.forward.voltage, vec![0.0, 0.1]);
    }

    #[test]
    fn test_shorter_second_set() {
        let csv = format!(
            "{},{}\n0.0,-3.0,-6.0,0.1,-1.0,-2.0\n0.1,-1.0,-2.0,,,\n",
            HEADER, HEADER
        );
        let data = load_data_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(data.forward.len(), 2);
        assert_eq!(data.reverse.len(), 1);
    }

    #[test]
    fn test_shorter_first_set() {
        let csv = format!(
            "{},{}\n0.0,-3.0,-6.0,0.2,1.0,2.0\n,,,0.1,-1.0,-2.0\n,,,0.0,-3.0,-6.0\n",
            HEADER, HEADER
        );
        let data = load_data_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(data.forward.voltage, vec![0.0]);
        assert_eq!(data.reverse.voltage, vec![0.2, 0.1, 0.0]);
    }

    #[test]
    fn test_gap_in_column_set() {
        let csv = format!(
            "{},{}\n0.0,-3.0,-6.0,0.2,1.0,2.0\n,,,0.1,-1.0,-2.0\n0.1,-1.0,-2.0,0.0,-3.0,-6.0\n",
            HEADER, HEADER
        );
        let err = load_data_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Gap"), "{}", err);
    }

    #[test]
    fn test_missing_column() {
        let csv = "Voltage (V),Current (mA)\n0.0,1.0\n";
        match load_data_from_reader(csv.as_bytes()) {
            Err(AnalysisError::MissingColumn(col)) => assert_eq!(col, DENSITY_HEADER),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric() {
        let csv = format!("{}\n0.0,abc,1.0\n", HEADER);
        let err = load_data_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidData(_)));
        assert!(err.to_string().contains("Non numeric"));
    }

    #[test]
    fn test_empty_file() {
        let csv = format!("{}\n", HEADER);
        let err = load_data_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Empty data file"));
    }

    #[test]
    fn test_ragged_rows() {
        let csv = format!("{}\n0.0,1.0\n", HEADER);
        assert!(matches!(
            load_data_from_reader(csv.as_bytes()),
            Err(AnalysisError::Csv(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_data("definitely/not/here.csv"),
            Err(AnalysisError::Io(_))
        ));
    }
}
