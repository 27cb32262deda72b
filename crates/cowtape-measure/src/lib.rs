//! cowtape-measure: Pure measurement core (sans-IO).
//!
//! Turns lines drawn over a cattle photograph into body measurements:
//! annotation records -> two-point segment -> pixel length ->
//! centimeters, filed in order as height, body length, and heart girth.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and JSON records and returns structured data. All browser
//! interaction lives in `cowtape-io`.

pub mod annotation;
pub mod canvas;
pub mod decode;
pub mod sequencer;
pub mod session;
pub mod snapshot;
pub mod types;

pub use annotation::{AnnotationShape, extract_endpoints, extract_last_line};
pub use canvas::{Canvas, DrawTool, DrawingSurface, StrokeStyle};
pub use decode::{NormalizedImage, ResizeFilter};
pub use sequencer::{MeasurementRecord, MeasurementStep, Registration, Sequencer};
pub use session::{
    Committed, Level, LoadedImage, MeasurementRow, Notice, Session, SessionEvent, SessionView,
};
pub use snapshot::Snapshot;
pub use types::{
    CalibrationScale, Dimensions, LineSegment, MeasureConfig, MeasureError, MeasurementKind,
    Point, RgbaImage,
};
