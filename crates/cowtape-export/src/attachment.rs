//! Downloadable files.

use cowtape_measure::{MeasurementRecord, Snapshot};

use crate::table::{ExportError, to_csv};

/// File name of the measurement table download.
pub const CSV_FILENAME: &str = "measurements.csv";

/// File name of the annotated image download.
pub const SNAPSHOT_FILENAME: &str = "annotated_measurement.png";

/// A file ready to hand to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Suggested download name.
    pub filename: &'static str,
    /// MIME type for the Blob.
    pub mime: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// The measurement table as `measurements.csv`.
///
/// # Errors
///
/// Returns [`ExportError`] if CSV serialization fails.
pub fn csv_attachment(record: &MeasurementRecord) -> Result<Attachment, ExportError> {
    Ok(Attachment {
        filename: CSV_FILENAME,
        mime: "text/csv",
        bytes: to_csv(record)?.into_bytes(),
    })
}

/// The annotated snapshot as a PNG, if one was captured.
#[must_use]
pub fn snapshot_attachment(snapshot: Option<&Snapshot>) -> Option<Attachment> {
    snapshot.map(|s| Attachment {
        filename: SNAPSHOT_FILENAME,
        mime: "image/png",
        bytes: s.png_bytes().to_vec(),
    })
}
