//! cowtape-io: Browser I/O and Dioxus component library.
//!
//! Handles file uploads, Blob downloads, PNG Blob URLs for the photo and
//! snapshot, pointer-to-image coordinate mapping, and provides the
//! reusable UI components of the cowtape web application.

pub mod components;
pub mod download;
pub mod pointer;
pub mod raster;

pub use components::{
    CalibrationInput, ExportPanel, FileUpload, MeasureCanvas, MeasurementTable, NoticeList,
    StepControls,
};
