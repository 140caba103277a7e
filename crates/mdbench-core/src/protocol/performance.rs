use std::path::{Path, PathBuf};
use thiserror::Error;

/// Header of the throughput column in the engine's log output.
pub const SPEED_COLUMN: &str = "Speed (ns/day)";

/// Default file name of the engine's performance log, expected next to the
/// equilibrated structure.
pub const SPEED_LOG_NAME: &str = "simulation.log";

#[derive(Debug, Error)]
pub enum PerformanceError {
    #[error("Failed to read performance log '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Performance log '{path}' has no '{column}' column")]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("Performance log '{path}' contains no data rows")]
    EmptyLog { path: PathBuf },
    #[error("Invalid throughput value '{value}' in performance log '{path}'")]
    InvalidValue { path: PathBuf, value: String },
}

/// Extracts the final ns/day figure from an engine performance log.
///
/// The log is a headered CSV that the engine appends to as the production
/// run progresses; throughput stabilizes over the run, so the LAST row of
/// the speed column is the number reported.
///
/// # Errors
///
/// Returns an error if the log cannot be parsed as CSV, lacks the speed
/// column, has no data rows, or its final speed value is not a float.
pub fn extract_ns_per_day(log_path: &Path) -> Result<f64, PerformanceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(log_path)
        .map_err(|source| PerformanceError::Csv {
            path: log_path.to_path_buf(),
            source,
        })?;

    let speed_index = reader
        .headers()
        .map_err(|source| PerformanceError::Csv {
            path: log_path.to_path_buf(),
            source,
        })?
        .iter()
        .position(|h| h == SPEED_COLUMN)
        .ok_or(PerformanceError::MissingColumn {
            path: log_path.to_path_buf(),
            column: SPEED_COLUMN,
        })?;

    let mut last_value: Option<String> = None;
    for record in reader.records() {
        let record = record.map_err(|source| PerformanceError::Csv {
            path: log_path.to_path_buf(),
            source,
        })?;
        if let Some(value) = record.get(speed_index) {
            last_value = Some(value.to_string());
        }
    }

    let value = last_value.ok_or(PerformanceError::EmptyLog {
        path: log_path.to_path_buf(),
    })?;
    value
        .parse::<f64>()
        .map_err(|_| PerformanceError::InvalidValue {
            path: log_path.to_path_buf(),
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_log(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("simulation.log");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn extracts_the_last_row_of_the_speed_column() {
        let (_dir, path) = write_log(
            "Step,Time (ps),Speed (ns/day)\n\
             1000,4.0,0.0\n\
             2000,8.0,105.2\n\
             3000,12.0,118.7\n",
        );
        let speed = extract_ns_per_day(&path).unwrap();
        assert!((speed - 118.7).abs() < 1e-9);
    }

    #[test]
    fn tolerates_padded_fields() {
        let (_dir, path) = write_log(
            "Step, Time (ps), Speed (ns/day)\n\
             1000, 4.0, 99.5\n",
        );
        let speed = extract_ns_per_day(&path).unwrap();
        assert!((speed - 99.5).abs() < 1e-9);
    }

    #[test]
    fn fails_when_the_speed_column_is_missing() {
        let (_dir, path) = write_log("Step,Time (ps)\n1000,4.0\n");
        let result = extract_ns_per_day(&path);
        assert!(matches!(
            result,
            Err(PerformanceError::MissingColumn { .. })
        ));
    }

    #[test]
    fn fails_when_the_log_has_no_data_rows() {
        let (_dir, path) = write_log("Step,Time (ps),Speed (ns/day)\n");
        let result = extract_ns_per_day(&path);
        assert!(matches!(result, Err(PerformanceError::EmptyLog { .. })));
    }

    #[test]
    fn fails_on_unparsable_speed_values() {
        let (_dir, path) = write_log("Speed (ns/day)\nfast\n");
        let result = extract_ns_per_day(&path);
        assert!(matches!(
            result,
            Err(PerformanceError::InvalidValue { .. })
        ));
    }

    #[test]
    fn fails_when_the_log_is_absent() {
        let dir = tempdir().unwrap();
        let result = extract_ns_per_day(&dir.path().join("missing.log"));
        assert!(matches!(result, Err(PerformanceError::Csv { .. })));
    }
}
