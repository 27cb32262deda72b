//! One user's measuring session.
//!
//! A [`Session`] owns everything that lives for the duration of a page
//! visit: the configuration (including the calibration the user edits),
//! the drawing surface, the measurement [`Sequencer`], and the latest
//! annotated [`Snapshot`]. The UI feeds it [`SessionEvent`]s through
//! [`Session::handle`], renders the returned [`Notice`]s, and redraws from
//! [`Session::view`]. Nothing is global; a second tab gets a second
//! session.
//!
//! Every failure is reported as a notice and leaves the session as it
//! was, so the user can redraw, re-upload, or fix the calibration and try
//! again.

use std::fmt;

use crate::annotation::extract_last_line;
use crate::canvas::{Canvas, DrawingSurface, StrokeStyle};
use crate::decode::{self, NormalizedImage};
use crate::sequencer::{MeasurementRecord, MeasurementStep, Registration, Sequencer};
use crate::snapshot::Snapshot;
use crate::types::{Dimensions, MeasureConfig, MeasureError, MeasurementKind};

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// A measurement was committed.
    Success,
    /// Neutral status.
    Info,
    /// Something degraded but the action went through.
    Warning,
    /// The action was rejected.
    Error,
}

/// User-visible feedback for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Presentation level.
    pub level: Level,
    /// Message text.
    pub message: String,
}

impl Notice {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl From<&MeasureError> for Notice {
    fn from(err: &MeasureError) -> Self {
        let level = match err {
            MeasureError::SnapshotUnavailable | MeasureError::SequenceComplete => Level::Warning,
            _ => Level::Error,
        };
        Self::new(level, err.to_string())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A user action against the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A file was chosen for upload.
    Upload {
        /// Raw file contents.
        bytes: Vec<u8>,
        /// Name as reported by the browser.
        filename: String,
    },
    /// The calibration input changed.
    SetCalibration(f64),
    /// "Register measurement" was pressed.
    Register,
    /// "Reset all measurements" was pressed.
    Reset,
}

/// The uploaded photo currently on the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    /// Name as uploaded.
    pub filename: String,
    /// Size after normalization; annotation coordinates use this space.
    pub dimensions: Dimensions,
    /// Size before downscaling.
    pub original_dimensions: Dimensions,
}

/// A measurement that was committed.
#[derive(Debug)]
pub struct Committed {
    /// What was recorded.
    pub registration: Registration,
    /// Set when the annotated snapshot could not be captured.
    pub snapshot_error: Option<MeasureError>,
}

/// One row of the measurement table.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    /// Which measurement.
    pub kind: MeasurementKind,
    /// Value in centimeters, if recorded.
    pub value_cm: Option<f64>,
}

impl MeasurementRow {
    /// Value with two decimals, or `-` when unset.
    #[must_use]
    pub fn display_value(&self) -> String {
        self.value_cm
            .map_or_else(|| String::from("-"), |v| format!("{v:.2}"))
    }
}

/// Everything the page needs to redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    /// The step the next registration applies to.
    pub step: MeasurementStep,
    /// Drawing instruction for the current step, `None` once done.
    pub instruction: Option<&'static str>,
    /// Table rows in collection order.
    pub rows: Vec<MeasurementRow>,
    /// The photo on the surface, if any.
    pub image: Option<LoadedImage>,
    /// Objects currently drawn.
    pub object_count: usize,
    /// Whether an annotated snapshot is available for download.
    pub has_snapshot: bool,
    /// Calibration as currently entered.
    pub pixels_per_cm: f64,
}

/// Session-scoped measuring state.
#[derive(Debug)]
pub struct Session<S = Canvas> {
    config: MeasureConfig,
    surface: S,
    sequencer: Sequencer,
    image: Option<LoadedImage>,
    snapshot: Option<Snapshot>,
}

impl Session<Canvas> {
    /// A session drawing on an in-memory [`Canvas`].
    #[must_use]
    pub fn new(config: MeasureConfig) -> Self {
        let canvas = Canvas::new(StrokeStyle::from(&config));
        Self::with_surface(config, canvas)
    }
}

impl Default for Session<Canvas> {
    fn default() -> Self {
        Self::new(MeasureConfig::default())
    }
}

impl<S: DrawingSurface> Session<S> {
    /// Decode an upload and put it on the surface.
    ///
    /// Recorded measurements are kept; only the drawing is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidConfig`] if the normalization
    /// settings are unusable, or [`MeasureError::EmptyInput`] or
    /// [`MeasureError::ImageDecode`]; the previous photo stays in place.
    pub fn load_image(
        &mut self,
        bytes: &[u8],
        filename: &str,
    ) -> Result<&LoadedImage, MeasureError> {
        self.config.validate().or_else(|e| match e {
            // The calibration only matters when registering.
            MeasureError::InvalidCalibration(_) => Ok(()),
            other => Err(other),
        })?;

        let NormalizedImage {
            rgba,
            dimensions,
            original_dimensions,
        } = decode::normalize(bytes, &self.config)?;

        self.surface.set_background(rgba);
        tracing::info!(
            "loaded {filename}: {}x{}",
            dimensions.width,
            dimensions.height
        );
        Ok(self.image.insert(LoadedImage {
            filename: filename.to_owned(),
            dimensions,
            original_dimensions,
        }))
    }

    /// Apply one user action and describe the outcome.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<Notice> {
        match event {
            SessionEvent::Upload { bytes, filename } => match self.load_image(&bytes, &filename) {
                Ok(image) => {
                    let mut notices = vec![Notice::new(
                        Level::Info,
                        format!(
                            "Loaded {} ({}x{})",
                            image.filename, image.dimensions.width, image.dimensions.height
                        ),
                    )];
                    if image.dimensions != image.original_dimensions {
                        notices.push(Notice::new(
                            Level::Info,
                            format!(
                                "Downscaled from {}x{}; calibrate against the displayed size",
                                image.original_dimensions.width, image.original_dimensions.height
                            ),
                        ));
                    }
                    notices
                }
                Err(e) => {
                    tracing::warn!("upload of {filename} rejected: {e}");
                    vec![Notice::from(&e)]
                }
            },
            SessionEvent::SetCalibration(pixels_per_cm) => self
                .set_calibration(pixels_per_cm)
                .err()
                .map(|e| Notice::from(&e))
                .into_iter()
                .collect(),
            SessionEvent::Register => match self.register() {
                Ok(committed) => {
                    let mut notices = vec![Notice::new(
                        Level::Success,
                        committed.registration.to_string(),
                    )];
                    if let Some(ref e) = committed.snapshot_error {
                        notices.push(Notice::from(e));
                    }
                    notices
                }
                Err(e) => vec![Notice::from(&e)],
            },
            SessionEvent::Reset => {
                self.reset();
                vec![Notice::new(Level::Info, "All measurements cleared")]
            }
        }
    }

    /// A session drawing on `surface`.
    #[must_use]
    pub fn with_surface(config: MeasureConfig, surface: S) -> Self {
        Self {
            config,
            surface,
            sequencer: Sequencer::new(),
            image: None,
            snapshot: None,
        }
    }

    /// Update the calibration.
    ///
    /// The value is stored even when invalid so the input reflects what
    /// the user typed; registrations fail until it is fixed.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InvalidCalibration`] if the new value
    /// cannot be used for measuring, or any other problem
    /// [`MeasureConfig::validate`] finds with the resulting configuration.
    pub fn set_calibration(&mut self, pixels_per_cm: f64) -> Result<(), MeasureError> {
        self.config.pixels_per_cm = pixels_per_cm;
        self.config.validate()
    }

    /// Measure the most recent drawing and file it under the current step.
    ///
    /// On success the surface is rendered into the annotated snapshot and
    /// then cleared for the next line. A surface with nothing to render
    /// does not block the measurement; the failure is returned in
    /// [`Committed::snapshot_error`] and the last good snapshot stays
    /// available for export.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::SequenceComplete`] once all measurements are
    /// recorded, the extraction errors of
    /// [`extract_last_line`](crate::annotation::extract_last_line), or
    /// [`MeasureError::InvalidCalibration`]. Session state is unchanged.
    pub fn register(&mut self) -> Result<Committed, MeasureError> {
        if self.sequencer.step() == MeasurementStep::Done {
            return Err(MeasureError::SequenceComplete);
        }

        let segment = extract_last_line(self.surface.objects())?;
        let registration = self
            .sequencer
            .register(&segment, self.config.scale())
            .inspect_err(|e| tracing::warn!("registration rejected: {e}"))?;

        tracing::info!(
            "{} = {:.2} cm from {:.1} px",
            registration.kind,
            registration.value_cm,
            registration.pixels
        );

        let snapshot_error = match self.capture() {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                None
            }
            Err(e) => {
                tracing::warn!("snapshot not captured, keeping the previous one: {e}");
                Some(e)
            }
        };

        self.surface.clear();

        Ok(Committed {
            registration,
            snapshot_error,
        })
    }

    fn capture(&self) -> Result<Snapshot, MeasureError> {
        let rendered = self
            .surface
            .render()
            .ok_or(MeasureError::SnapshotUnavailable)?;
        Snapshot::from_rgba(&rendered)
    }

    /// Clear all measurements, the snapshot, and the drawing.
    pub fn reset(&mut self) {
        self.sequencer.reset();
        self.snapshot = None;
        self.surface.clear();
        tracing::info!("session reset");
    }

    /// The current render description.
    #[must_use]
    pub fn view(&self) -> SessionView {
        let step = self.sequencer.step();
        SessionView {
            step,
            instruction: step.kind().map(MeasurementKind::instruction),
            rows: self
                .sequencer
                .record()
                .iter()
                .map(|(kind, value_cm)| MeasurementRow { kind, value_cm })
                .collect(),
            image: self.image.clone(),
            object_count: self.surface.objects().len(),
            has_snapshot: self.snapshot.is_some(),
            pixels_per_cm: self.config.pixels_per_cm,
        }
    }

    /// The step the next registration applies to.
    #[must_use]
    pub const fn step(&self) -> MeasurementStep {
        self.sequencer.step()
    }

    /// Measurements recorded so far.
    #[must_use]
    pub const fn record(&self) -> &MeasurementRecord {
        self.sequencer.record()
    }

    /// The latest annotated snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// The photo on the surface, if any.
    #[must_use]
    pub const fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    /// The drawing surface.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The drawing surface, for adding or undoing drawings.
    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
