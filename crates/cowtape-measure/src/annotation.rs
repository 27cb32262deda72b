//! Annotation records and line extraction.
//!
//! The drawing surface reports each drawn object as a JSON mapping whose
//! fields depend on the tool that produced it:
//!
//! - straight lines carry `x1, y1, x2, y2`,
//! - freehand paths carry a `points` list,
//! - rectangles carry `left, top, width, height`.
//!
//! [`AnnotationShape`] classifies a record into one of those encodings and
//! [`AnnotationShape::endpoints`] reduces any of them to a [`LineSegment`].
//! Records are matched in that priority order, so an object that carries
//! both line fields and a bounding box is treated as a line.

use serde_json::{Map, Value, json};

use crate::types::{LineSegment, MeasureError, Point};

/// A drawn object, normalized to one of the supported encodings.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationShape {
    /// Explicit straight line.
    Line {
        /// First endpoint.
        start: Point,
        /// Second endpoint.
        end: Point,
    },
    /// Point path; only its first and last points matter for measuring.
    Path {
        /// Ordered path points, at least two.
        points: Vec<Point>,
    },
    /// Axis-aligned box, measured along its diagonal.
    Rect {
        /// Top-left corner.
        origin: Point,
        /// Horizontal extent.
        width: f64,
        /// Vertical extent.
        height: f64,
    },
}

impl AnnotationShape {
    /// Classify a drawing-surface record.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::UnrecognizedAnnotationShape`] if the record
    /// has none of the supported field sets, and
    /// [`MeasureError::InvalidCoordinates`] if a matched field is not
    /// numeric.
    pub fn from_object(object: &Value) -> Result<Self, MeasureError> {
        let Some(fields) = object.as_object() else {
            return Err(MeasureError::UnrecognizedAnnotationShape);
        };

        if has_all(fields, &["x1", "y1", "x2", "y2"]) {
            return Ok(Self::Line {
                start: Point::new(coord(fields, "x1")?, coord(fields, "y1")?),
                end: Point::new(coord(fields, "x2")?, coord(fields, "y2")?),
            });
        }

        if let Some(Value::Array(raw)) = fields.get("points")
            && let [first, interior @ .., last] = raw.as_slice()
        {
            // Only the ends are measured; unreadable interior points are dropped.
            let mut points = Vec::with_capacity(raw.len());
            points.push(path_point(first)?);
            points.extend(interior.iter().filter_map(|p| path_point(p).ok()));
            points.push(path_point(last)?);
            return Ok(Self::Path { points });
        }

        if has_all(fields, &["left", "top", "width", "height"]) {
            return Ok(Self::Rect {
                origin: Point::new(coord(fields, "left")?, coord(fields, "top")?),
                width: coord(fields, "width")?,
                height: coord(fields, "height")?,
            });
        }

        Err(MeasureError::UnrecognizedAnnotationShape)
    }

    /// The two points a measurement is taken between.
    #[must_use]
    pub fn endpoints(&self) -> LineSegment {
        match self {
            Self::Line { start, end } => LineSegment::new(*start, *end),
            Self::Path { points } => {
                // Construction guarantees at least two points.
                let first = points.first().copied().unwrap_or(Point::new(0.0, 0.0));
                let last = points.last().copied().unwrap_or(first);
                LineSegment::new(first, last)
            }
            Self::Rect {
                origin,
                width,
                height,
            } => LineSegment::new(
                *origin,
                Point::new(origin.x + width, origin.y + height),
            ),
        }
    }

    /// Encode back into the record format the drawing surface emits.
    #[must_use]
    pub fn to_object(&self) -> Value {
        match self {
            Self::Line { start, end } => json!({
                "type": "line",
                "x1": start.x,
                "y1": start.y,
                "x2": end.x,
                "y2": end.y,
            }),
            Self::Path { points } => json!({
                "type": "path",
                "points": points
                    .iter()
                    .map(|p| json!({ "x": p.x, "y": p.y }))
                    .collect::<Vec<_>>(),
            }),
            Self::Rect {
                origin,
                width,
                height,
            } => json!({
                "type": "rect",
                "left": origin.x,
                "top": origin.y,
                "width": width,
                "height": height,
            }),
        }
    }
}

/// Extract the measured segment from a single record.
///
/// # Errors
///
/// See [`AnnotationShape::from_object`].
pub fn extract_endpoints(object: &Value) -> Result<LineSegment, MeasureError> {
    AnnotationShape::from_object(object).map(|shape| shape.endpoints())
}

/// Extract the measured segment from the most recently drawn record.
///
/// `objects` is in drawing order, so the last entry wins.
///
/// # Errors
///
/// Returns [`MeasureError::NoLineDrawn`] if `objects` is empty, otherwise
/// the errors of [`extract_endpoints`].
pub fn extract_last_line(objects: &[Value]) -> Result<LineSegment, MeasureError> {
    let last = objects.last().ok_or(MeasureError::NoLineDrawn)?;
    extract_endpoints(last)
}

fn has_all(fields: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().all(|k| fields.contains_key(*k))
}

fn coord(fields: &Map<String, Value>, key: &str) -> Result<f64, MeasureError> {
    match fields.get(key) {
        Some(value) => number(value).ok_or_else(|| {
            MeasureError::InvalidCoordinates(format!("{key} is not a number: {value}"))
        }),
        None => Err(MeasureError::InvalidCoordinates(format!("{key} is missing"))),
    }
}

/// Read a path point, accepting `{x, y}`, `{X, Y}`, or `[x, y]`.
fn path_point(value: &Value) -> Result<Point, MeasureError> {
    match value {
        Value::Object(fields) => {
            let x = fields.get("x").or_else(|| fields.get("X"));
            let y = fields.get("y").or_else(|| fields.get("Y"));
            match (x.and_then(number), y.and_then(number)) {
                (Some(x), Some(y)) => Ok(Point::new(x, y)),
                _ => Err(MeasureError::InvalidCoordinates(format!(
                    "path point has no numeric x/y: {value}"
                ))),
            }
        }
        Value::Array(pair) if pair.len() == 2 => match (number(&pair[0]), number(&pair[1])) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(MeasureError::InvalidCoordinates(format!(
                "path point is not numeric: {value}"
            ))),
        },
        _ => Err(MeasureError::InvalidCoordinates(format!(
            "unsupported path point: {value}"
        ))),
    }
}

/// Interpret a JSON value as a finite coordinate.
///
/// Numeric strings are accepted since some drawing tools serialize
/// coordinates as text.
fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn line_record_returns_listed_points() {
        let obj = json!({ "type": "line", "x1": 12.5, "y1": 40, "x2": 300.25, "y2": 41 });
        let seg = extract_endpoints(&obj).unwrap();
        assert_eq!(seg.start, Point::new(12.5, 40.0));
        assert_eq!(seg.end, Point::new(300.25, 41.0));
    }

    #[test]
    fn line_fields_take_priority_over_box() {
        // Line objects from canvas widgets also carry a bounding box.
        let obj = json!({
            "x1": 0, "y1": 0, "x2": 10, "y2": 0,
            "left": 100, "top": 100, "width": 5, "height": 5,
        });
        let seg = extract_endpoints(&obj).unwrap();
        assert_eq!(seg.end, Point::new(10.0, 0.0));
    }

    #[test]
    fn path_returns_first_and_last_points() {
        let obj = json!({
            "points": [
                { "x": 1, "y": 2 },
                { "x": 50, "y": -7 },
                { "x": 99, "y": 3 },
                { "x": 7, "y": 8 },
            ]
        });
        let seg = extract_endpoints(&obj).unwrap();
        assert_eq!(seg.start, Point::new(1.0, 2.0));
        assert_eq!(seg.end, Point::new(7.0, 8.0));
    }

    #[test]
    fn unreadable_interior_points_are_ignored() {
        let obj = json!({
            "points": [
                { "x": 0, "y": 0 },
                { "x": null, "y": "abc" },
                "garbage",
                { "x": 32, "y": 0 },
            ]
        });
        let seg = extract_endpoints(&obj).unwrap();
        assert_eq!(seg.start, Point::new(0.0, 0.0));
        assert_eq!(seg.end, Point::new(32.0, 0.0));

        let shape = AnnotationShape::from_object(&obj).unwrap();
        assert!(matches!(shape, AnnotationShape::Path { ref points } if points.len() == 2));
    }

    #[test]
    fn path_accepts_uppercase_keys_and_pairs() {
        let obj = json!({ "points": [{ "X": 3, "Y": 4 }, [10, 20]] });
        let seg = extract_endpoints(&obj).unwrap();
        assert_eq!(seg.start, Point::new(3.0, 4.0));
        assert_eq!(seg.end, Point::new(10.0, 20.0));
    }

    #[test]
    fn short_path_falls_through_to_box() {
        let obj = json!({
            "points": [{ "x": 1, "y": 1 }],
            "left": 5, "top": 6, "width": 10, "height": 20,
        });
        let seg = extract_endpoints(&obj).unwrap();
        assert_eq!(seg.start, Point::new(5.0, 6.0));
        assert_eq!(seg.end, Point::new(15.0, 26.0));
    }

    #[test]
    fn box_returns_top_left_and_bottom_right() {
        let obj = json!({ "type": "rect", "left": 20, "top": 30, "width": 64, "height": 0 });
        let seg = extract_endpoints(&obj).unwrap();
        assert_eq!(seg.start, Point::new(20.0, 30.0));
        assert_eq!(seg.end, Point::new(84.0, 30.0));
    }

    #[test]
    fn unknown_shape_is_unrecognized() {
        let obj = json!({ "type": "circle", "radius": 4 });
        assert!(matches!(
            extract_endpoints(&obj),
            Err(MeasureError::UnrecognizedAnnotationShape)
        ));
        assert!(matches!(
            extract_endpoints(&json!("line")),
            Err(MeasureError::UnrecognizedAnnotationShape)
        ));
    }

    #[test]
    fn non_numeric_coordinate_is_invalid() {
        let obj = json!({ "x1": "left", "y1": 0, "x2": 1, "y2": null });
        assert!(matches!(
            extract_endpoints(&obj),
            Err(MeasureError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn path_point_without_coordinates_is_invalid() {
        let obj = json!({ "points": [{ "x": 1, "y": 2 }, { "z": 3 }] });
        assert!(matches!(
            extract_endpoints(&obj),
            Err(MeasureError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let obj = json!({ "x1": "1.5", "y1": " 2 ", "x2": "3", "y2": "4e1" });
        let seg = extract_endpoints(&obj).unwrap();
        assert_eq!(seg.start, Point::new(1.5, 2.0));
        assert_eq!(seg.end, Point::new(3.0, 40.0));
    }

    #[test]
    fn empty_collection_has_no_line() {
        assert!(matches!(
            extract_last_line(&[]),
            Err(MeasureError::NoLineDrawn)
        ));
    }

    #[test]
    fn last_object_wins() {
        let objects = vec![
            json!({ "x1": 0, "y1": 0, "x2": 1, "y2": 1 }),
            json!({ "left": 0, "top": 0, "width": 3, "height": 4 }),
        ];
        let seg = extract_last_line(&objects).unwrap();
        assert!((seg.length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn shapes_survive_record_encoding() {
        let shapes = [
            AnnotationShape::Line {
                start: Point::new(1.0, 2.0),
                end: Point::new(3.0, 4.0),
            },
            AnnotationShape::Path {
                points: vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(9.0, 1.0)],
            },
            AnnotationShape::Rect {
                origin: Point::new(10.0, 10.0),
                width: 4.0,
                height: 2.0,
            },
        ];
        for shape in shapes {
            let back = AnnotationShape::from_object(&shape.to_object()).unwrap();
            assert_eq!(back, shape);
        }
    }
}
