//! CSV export of the measurement record.
//!
//! One row per measurement in collection order, under a
//! `Measurement,cm` header. Unset values are written as empty cells so
//! a partially measured animal still exports cleanly.

use cowtape_measure::MeasurementRecord;

/// Column headers of the exported table.
pub const HEADER: [&str; 2] = ["Measurement", "cm"];

/// Errors that can occur while writing CSV.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The CSV writer failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV writer could not be flushed into the buffer.
    #[error("CSV export failed: {0}")]
    Flush(String),

    /// The written bytes were not UTF-8.
    #[error("CSV export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize `record` as CSV text.
///
/// Values are written at full precision; rounding is left to whatever
/// opens the file.
///
/// # Errors
///
/// Returns [`ExportError`] if the CSV writer fails.
pub fn to_csv(record: &MeasurementRecord) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for (kind, value) in record.iter() {
        let cell = value.map(|v| v.to_string()).unwrap_or_default();
        writer.write_record([kind.label(), cell.as_str()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_has_blank_values() {
        let csv = to_csv(&MeasurementRecord::default()).unwrap();
        assert_eq!(
            csv,
            "Measurement,cm\nHeight,\nBody Length,\nHeart Girth,\n"
        );
    }

    #[test]
    fn recorded_values_are_written() {
        let record = MeasurementRecord {
            height: Some(131.5),
            body_length: Some(150.0),
            girth: None,
        };
        let csv = to_csv(&record).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Measurement,cm");
        assert_eq!(lines[1], "Height,131.5");
        assert_eq!(lines[2], "Body Length,150");
        assert_eq!(lines[3], "Heart Girth,");
    }

    #[test]
    fn girth_keeps_full_precision() {
        let record = MeasurementRecord {
            girth: Some(std::f64::consts::PI),
            ..MeasurementRecord::default()
        };
        let csv = to_csv(&record).unwrap();
        assert!(csv.contains("Heart Girth,3.141592653589793\n"));
    }
}
