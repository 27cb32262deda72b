//! Dioxus UI components for cowtape.
//!
//! Provides the photo upload zone, the drawing surface with its tool
//! bar, the calibration input, step controls with notices, the
//! measurement table, and the export panel.

mod calibration;
mod export;
mod measure_canvas;
mod notices;
mod step_controls;
mod table;
mod upload;

pub use calibration::CalibrationInput;
pub use export::ExportPanel;
pub use measure_canvas::{MeasureCanvas, SURFACE_ID};
pub use notices::NoticeList;
pub use step_controls::StepControls;
pub use table::MeasurementTable;
pub use upload::FileUpload;
