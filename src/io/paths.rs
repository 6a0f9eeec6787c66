//! Output file locations
//!
//! Measurements are filed per user, per day, per device:
//!
//! ```text
//! <user>/<date>/<device>/data/<date> <time> <device> <experiment> data.csv
//! <user>/<date>/<device>/<date> <device> results.csv
//! ```

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Data and results file paths for a measurement
///
/// Returns `None` if the user directory, device name or experiment name is empty.
pub fn get_file_paths(
    user_dir: &Path,
    device: &str,
    experiment: &str,
    now: NaiveDateTime,
) -> Option<(PathBuf, PathBuf)> {
    if user_dir.as_os_str().is_empty() || device.is_empty() || experiment.is_empty() {
        return None;
    }

    let date = now.format("%Y-%m-%d").to_string();
    let time = now.format("%H-%M-%S").to_string();

    let core = user_dir.join(&date).join(device);
    let data_name = format!("{} {} {} {} data.csv", date, time, device, experiment);
    let results_name = format!("{} {} results.csv", date, device);

    Some((core.join("data").join(data_name), core.join(results_name)))
}

/// User directory for any folder picked inside it
///
/// Everything from the first dated component (`\d+-\d+-\d+`) onward is
/// dropped, so picking `<user>/2022-08-19/cell-3` yields `<user>`. A path with
/// no dated component is returned unchanged.
pub fn user_root(path: &Path) -> PathBuf {
    path.components()
        .take_while(|c| !contains_date(&c.as_os_str().to_string_lossy()))
        .collect()
}

/// True if `s` contains `digits-digits-digits`
fn contains_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    (0..bytes.len()).any(|start| {
        let mut pos = start;
        for group in 0..3 {
            let digits = bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
            if digits == 0 {
                return false;
            }
            pos += digits;
            if group < 2 {
                if bytes.get(pos) != Some(&b'-') {
                    return false;
                }
                pos += 1;
            }
        }
        true
    })
}
