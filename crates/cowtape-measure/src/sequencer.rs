//! The measurement workflow: height, then body length, then girth.
//!
//! [`Sequencer`] holds the current [`MeasurementStep`] and the
//! [`MeasurementRecord`] filled so far. Each successful
//! [`register`](Sequencer::register) sets exactly one field and advances
//! the step; failures leave both untouched.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CalibrationScale, LineSegment, MeasureError, MeasurementKind};

/// Which measurement the next registered line is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MeasurementStep {
    /// Waiting for the hoof-to-withers line.
    #[default]
    Height,
    /// Waiting for the shoulder-to-rump line.
    BodyLength,
    /// Waiting for the chest diameter line.
    Girth,
    /// All three measurements are recorded.
    Done,
}

impl MeasurementStep {
    /// The measurement collected in this step, or `None` once done.
    #[must_use]
    pub const fn kind(self) -> Option<MeasurementKind> {
        match self {
            Self::Height => Some(MeasurementKind::Height),
            Self::BodyLength => Some(MeasurementKind::BodyLength),
            Self::Girth => Some(MeasurementKind::Girth),
            Self::Done => None,
        }
    }

    /// The step after this one. `Done` is terminal.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Height => Self::BodyLength,
            Self::BodyLength => Self::Girth,
            Self::Girth | Self::Done => Self::Done,
        }
    }

    /// One-based position for "Step n" prompts, `None` once done.
    #[must_use]
    pub const fn number(self) -> Option<usize> {
        match self {
            Self::Height => Some(1),
            Self::BodyLength => Some(2),
            Self::Girth => Some(3),
            Self::Done => None,
        }
    }
}

impl fmt::Display for MeasurementStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.number(), self.kind()) {
            (Some(n), Some(kind)) => write!(f, "Step {n}: {kind}"),
            _ => f.write_str("All measurements completed"),
        }
    }
}

/// Measured values in centimeters, unset until registered.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Hoof to withers.
    pub height: Option<f64>,
    /// Shoulder to rump.
    pub body_length: Option<f64>,
    /// Estimated chest circumference.
    pub girth: Option<f64>,
}

impl MeasurementRecord {
    /// Value recorded for `kind`, if any.
    #[must_use]
    pub const fn get(&self, kind: MeasurementKind) -> Option<f64> {
        match kind {
            MeasurementKind::Height => self.height,
            MeasurementKind::BodyLength => self.body_length,
            MeasurementKind::Girth => self.girth,
        }
    }

    fn set(&mut self, kind: MeasurementKind, value: f64) {
        let slot = match kind {
            MeasurementKind::Height => &mut self.height,
            MeasurementKind::BodyLength => &mut self.body_length,
            MeasurementKind::Girth => &mut self.girth,
        };
        *slot = Some(value);
    }

    /// `(kind, value)` pairs in collection order.
    pub fn iter(&self) -> impl Iterator<Item = (MeasurementKind, Option<f64>)> + '_ {
        MeasurementKind::ALL.into_iter().map(|k| (k, self.get(k)))
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.height.is_none() && self.body_length.is_none() && self.girth.is_none()
    }
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Registration {
    /// Which measurement was filled.
    pub kind: MeasurementKind,
    /// Stored value in centimeters.
    pub value_cm: f64,
    /// Length of the drawn segment in pixels.
    pub pixels: f64,
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MeasurementKind::Girth => write!(
                f,
                "{} estimated: {:.2} cm (\u{3c0} \u{d7} diameter)",
                self.kind, self.value_cm
            ),
            _ => write!(f, "{} recorded: {:.2} cm", self.kind, self.value_cm),
        }
    }
}

/// Convert a drawn chest diameter to an estimated girth.
///
/// This is the circumference of a circle with that diameter. A cow's
/// chest is not circular, so treat the result as a rough proxy rather
/// than a tape measurement.
#[must_use]
pub fn girth_from_diameter(diameter_cm: f64) -> f64 {
    diameter_cm * PI
}

/// Step-by-step measurement state machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequencer {
    step: MeasurementStep,
    record: MeasurementRecord,
}

impl Sequencer {
    /// A fresh sequencer waiting for the height line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The step the next registration applies to.
    #[must_use]
    pub const fn step(&self) -> MeasurementStep {
        self.step
    }

    /// Values recorded so far.
    #[must_use]
    pub const fn record(&self) -> &MeasurementRecord {
        &self.record
    }

    /// File `segment` under the current step and advance.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::SequenceComplete`] once all three values
    /// are recorded, and [`MeasureError::InvalidCalibration`] if `scale`
    /// is not positive. Neither changes the step or the record.
    pub fn register(
        &mut self,
        segment: &LineSegment,
        scale: CalibrationScale,
    ) -> Result<Registration, MeasureError> {
        let Some(kind) = self.step.kind() else {
            return Err(MeasureError::SequenceComplete);
        };

        let pixels = segment.length();
        let dist_cm = scale.to_cm(pixels)?;
        let value_cm = match kind {
            MeasurementKind::Girth => girth_from_diameter(dist_cm),
            MeasurementKind::Height | MeasurementKind::BodyLength => dist_cm,
        };

        self.record.set(kind, value_cm);
        self.step = self.step.next();

        Ok(Registration {
            kind,
            value_cm,
            pixels,
        })
    }

    /// Clear every value and return to the height step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn unit_line() -> LineSegment {
        LineSegment::new(Point::new(0.0, 0.0), Point::new(32.0, 0.0))
    }

    fn scale() -> CalibrationScale {
        CalibrationScale::new(32.0)
    }

    #[test]
    fn starts_waiting_for_height() {
        let seq = Sequencer::new();
        assert_eq!(seq.step(), MeasurementStep::Height);
        assert!(seq.record().is_empty());
    }

    #[test]
    fn height_is_one_centimeter() {
        let mut seq = Sequencer::new();
        let reg = seq.register(&unit_line(), scale()).unwrap();
        assert_eq!(reg.kind, MeasurementKind::Height);
        assert!((reg.value_cm - 1.0).abs() < f64::EPSILON);
        assert_eq!(seq.record().height, Some(1.0));
        assert_eq!(seq.step(), MeasurementStep::BodyLength);
    }

    #[test]
    fn girth_multiplies_by_pi() {
        let mut seq = Sequencer::new();
        seq.register(&unit_line(), scale()).unwrap();
        seq.register(&unit_line(), scale()).unwrap();
        let reg = seq.register(&unit_line(), scale()).unwrap();
        assert_eq!(reg.kind, MeasurementKind::Girth);
        assert!((reg.value_cm - PI).abs() < 1e-12);
        assert_eq!(seq.record().girth, Some(reg.value_cm));
    }

    #[test]
    fn three_registrations_fill_in_order_then_reject() {
        let mut seq = Sequencer::new();
        let lines = [
            LineSegment::new(Point::new(0.0, 0.0), Point::new(0.0, 64.0)),
            LineSegment::new(Point::new(0.0, 0.0), Point::new(96.0, 0.0)),
            LineSegment::new(Point::new(0.0, 0.0), Point::new(32.0, 0.0)),
        ];

        seq.register(&lines[0], scale()).unwrap();
        assert_eq!(seq.record().height, Some(2.0));
        assert_eq!(seq.record().body_length, None);

        seq.register(&lines[1], scale()).unwrap();
        assert_eq!(seq.record().body_length, Some(3.0));
        assert_eq!(seq.record().girth, None);

        seq.register(&lines[2], scale()).unwrap();
        assert_eq!(seq.step(), MeasurementStep::Done);

        let before = *seq.record();
        let fourth = seq.register(&lines[0], scale());
        assert!(matches!(fourth, Err(MeasureError::SequenceComplete)));
        assert_eq!(*seq.record(), before);
        assert_eq!(seq.step(), MeasurementStep::Done);
    }

    #[test]
    fn invalid_scale_changes_nothing() {
        for bad in [0.0, -32.0] {
            let mut seq = Sequencer::new();
            let result = seq.register(&unit_line(), CalibrationScale::new(bad));
            assert!(matches!(result, Err(MeasureError::InvalidCalibration(_))));
            assert_eq!(seq.step(), MeasurementStep::Height);
            assert!(seq.record().is_empty());
        }
    }

    #[test]
    fn reset_from_every_step() {
        for registrations in 0..=3 {
            let mut seq = Sequencer::new();
            for _ in 0..registrations {
                seq.register(&unit_line(), scale()).unwrap();
            }
            seq.reset();
            assert_eq!(seq.step(), MeasurementStep::Height);
            assert!(seq.record().is_empty());
        }
    }

    #[test]
    fn step_display() {
        assert_eq!(MeasurementStep::Height.to_string(), "Step 1: Height");
        assert_eq!(MeasurementStep::Girth.to_string(), "Step 3: Heart Girth");
        assert_eq!(
            MeasurementStep::Done.to_string(),
            "All measurements completed"
        );
    }

    #[test]
    fn registration_messages() {
        let height = Registration {
            kind: MeasurementKind::Height,
            value_cm: 1.0,
            pixels: 32.0,
        };
        assert_eq!(height.to_string(), "Height recorded: 1.00 cm");

        let girth = Registration {
            kind: MeasurementKind::Girth,
            value_cm: PI,
            pixels: 32.0,
        };
        assert_eq!(
            girth.to_string(),
            "Heart Girth estimated: 3.14 cm (\u{3c0} \u{d7} diameter)"
        );
    }
}
