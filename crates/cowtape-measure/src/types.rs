//! Shared types for the cowtape measurement core.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decode::ResizeFilter;

/// Re-export `RgbaImage` so downstream crates can pass decoded and
/// rendered rasters around without depending on `image` directly.
pub use image::RgbaImage;

/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A straight segment between two points.
///
/// The endpoints carry no ordering invariant: a segment drawn from
/// withers to hoof measures the same as one drawn hoof to withers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    /// Where the stroke started.
    pub start: Point,
    /// Where the stroke ended.
    pub end: Point,
}

impl LineSegment {
    /// Create a segment from its two endpoints.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Length of the segment in pixels.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Pixels-per-centimeter conversion factor for the photographed scene.
///
/// The value is whatever the user typed; it is only checked when a
/// pixel length is converted, so an invalid entry never blocks editing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationScale(f64);

impl CalibrationScale {
    /// Default scale used until the user enters their own.
    pub const DEFAULT_PIXELS_PER_CM: f64 = 32.0;

    /// Wrap a pixels-per-centimeter value.
    #[must_use]
    pub const fn new(pixels_per_cm: f64) -> Self {
        Self(pixels_per_cm)
    }

    /// The raw pixels-per-centimeter value.
    #[must_use]
    pub const fn pixels_per_cm(self) -> f64 {
        self.0
    }

    /// Whether this scale can convert pixels to centimeters.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Convert a pixel length to centimeters.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidCalibration`] if the scale is not
    /// a finite positive number.
    pub fn to_cm(self, pixels: f64) -> Result<f64, MeasureError> {
        if !self.is_valid() {
            return Err(MeasureError::InvalidCalibration(self.0));
        }
        Ok(pixels / self.0)
    }
}

impl Default for CalibrationScale {
    fn default() -> Self {
        Self(Self::DEFAULT_PIXELS_PER_CM)
    }
}

/// The three body measurements, in the order they are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementKind {
    /// Hoof to withers.
    Height,
    /// Shoulder to rump.
    BodyLength,
    /// Chest circumference, estimated from a drawn diameter.
    Girth,
}

impl MeasurementKind {
    /// All kinds in collection order.
    pub const ALL: [Self; 3] = [Self::Height, Self::BodyLength, Self::Girth];

    /// Display label for tables and exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Height => "Height",
            Self::BodyLength => "Body Length",
            Self::Girth => "Heart Girth",
        }
    }

    /// What the user should draw for this measurement.
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Height => "Draw a line from hoof to withers",
            Self::BodyLength => "Draw a line from shoulder to rump",
            Self::Girth => "Draw a line across the chest (diameter)",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configuration for a measuring session.
///
/// Mirrors what the page exposes: the calibration scale the user edits,
/// plus fixed parameters for image normalization and stroke rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureConfig {
    /// Pixels per centimeter in the photographed depth plane.
    pub pixels_per_cm: f64,

    /// Longest allowed image side after upload. Larger images are
    /// downscaled with their aspect ratio preserved.
    pub max_dimension: u32,

    /// Resampling filter used when downscaling uploads.
    pub resize_filter: ResizeFilter,

    /// Stroke width in pixels for drawn annotations in snapshots.
    pub stroke_width: f32,

    /// Stroke color (straight RGBA) for drawn annotations.
    pub stroke_color: [u8; 4],
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            pixels_per_cm: CalibrationScale::DEFAULT_PIXELS_PER_CM,
            max_dimension: 2000,
            resize_filter: ResizeFilter::default(),
            stroke_width: 3.0,
            stroke_color: [255, 0, 0, 255],
        }
    }
}

impl MeasureConfig {
    /// The configured calibration as a [`CalibrationScale`].
    #[must_use]
    pub const fn scale(&self) -> CalibrationScale {
        CalibrationScale::new(self.pixels_per_cm)
    }

    /// Check the configuration for values no session can work with.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidCalibration`] for a non-positive or
    /// non-finite scale, and [`MeasureError::InvalidConfig`] for a zero
    /// `max_dimension` or a non-positive stroke width.
    pub fn validate(&self) -> Result<(), MeasureError> {
        if !self.scale().is_valid() {
            return Err(MeasureError::InvalidCalibration(self.pixels_per_cm));
        }
        if self.max_dimension == 0 {
            return Err(MeasureError::InvalidConfig(
                "max_dimension must be at least 1".into(),
            ));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(MeasureError::InvalidConfig(format!(
                "stroke_width must be positive, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }
}

/// Errors reported back to the user.
///
/// Every variant is recoverable: the session state is left as it was
/// and the user can redraw, re-upload, or fix the calibration.
#[derive(Debug, thiserror::Error)]
pub enum MeasureError {
    /// The uploaded file was empty.
    #[error("uploaded image is empty")]
    EmptyInput,

    /// The uploaded bytes are not a decodable image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The drawing surface has no objects.
    #[error("no line detected; draw a straight line and try again")]
    NoLineDrawn,

    /// The last drawn object is not a line, point path, or box.
    #[error("couldn't extract endpoints from the drawn object; try drawing a straight line")]
    UnrecognizedAnnotationShape,

    /// A coordinate field is present but not numeric.
    #[error("invalid coordinates in the drawn object: {0}")]
    InvalidCoordinates(String),

    /// The calibration scale cannot convert pixels to centimeters.
    #[error("invalid calibration: pixels per cm must be positive, got {0}")]
    InvalidCalibration(f64),

    /// The drawing surface had nothing to rasterize.
    #[error("couldn't capture the annotated image; the measurement was still recorded")]
    SnapshotUnavailable,

    /// All three measurements are already recorded.
    #[error("all measurements are recorded; reset to measure again")]
    SequenceComplete,

    /// Encoding the snapshot as PNG failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    /// Session configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (Point::new(0.0, 0.0), Point::new(3.0, 4.0)),
            (Point::new(-12.5, 7.0), Point::new(40.25, -3.0)),
            (Point::new(1e6, 1e-6), Point::new(-1e6, 2.0)),
        ];
        for (a, b) in pairs {
            assert!((a.distance(b) - b.distance(a)).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn distance_three_four_five() {
        assert!((Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn segment_length_ignores_direction() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(40.0, 60.0);
        assert!(
            (LineSegment::new(a, b).length() - LineSegment::new(b, a).length()).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn scale_converts_pixels() {
        let scale = CalibrationScale::default();
        assert!((scale.to_cm(32.0).unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_and_negative_scales_are_rejected() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = CalibrationScale::new(value).to_cm(10.0);
            assert!(
                matches!(result, Err(MeasureError::InvalidCalibration(_))),
                "scale {value} should be rejected"
            );
        }
    }

    #[test]
    fn default_config_is_valid() {
        let config = MeasureConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.pixels_per_cm - 32.0).abs() < f64::EPSILON);
        assert_eq!(config.max_dimension, 2000);
    }

    #[test]
    fn config_rejects_zero_max_dimension() {
        let config = MeasureConfig {
            max_dimension: 0,
            ..MeasureConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MeasureError::InvalidConfig(_))
        ));
    }

    #[test]
    fn config_rejects_negative_scale() {
        let config = MeasureConfig {
            pixels_per_cm: -4.0,
            ..MeasureConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MeasureError::InvalidCalibration(_))
        ));
    }

    #[test]
    fn config_serde_round_trip() {
        let config = MeasureConfig {
            pixels_per_cm: 12.5,
            ..MeasureConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: MeasureConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn kind_labels() {
        let labels: Vec<_> = MeasurementKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, ["Height", "Body Length", "Heart Girth"]);
    }
}
