//! cowtape-export: Pure serializers for downloads (sans-IO)
//!
//! Converts a measurement record into CSV and wraps the annotated
//! snapshot as a PNG attachment. Browser download plumbing lives in
//! `cowtape-io`.

pub mod attachment;
pub mod table;

pub use attachment::{
    Attachment, CSV_FILENAME, SNAPSHOT_FILENAME, csv_attachment, snapshot_attachment,
};
pub use table::{ExportError, HEADER, to_csv};
