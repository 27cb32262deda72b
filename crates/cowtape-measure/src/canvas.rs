//! The drawing surface: a photo with annotation strokes on top.
//!
//! [`DrawingSurface`] is what a [`Session`](crate::Session) needs from
//! whatever hosts the drawing: the ordered annotation records, and a
//! raster of the current state for the annotated snapshot. [`Canvas`] is
//! the in-memory implementation the web app drives; it renders strokes
//! with `tiny-skia` so snapshots look the same on every platform.

use serde_json::Value;
use tiny_skia::{ColorU8, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::annotation::AnnotationShape;
use crate::types::{Dimensions, MeasureConfig, Point, RgbaImage};

/// Host of the user's annotations.
pub trait DrawingSurface {
    /// Drawn objects in drawing order (most recent last).
    fn objects(&self) -> &[Value];

    /// Rasterize the current state, or `None` if there is nothing to
    /// render.
    fn render(&self) -> Option<RgbaImage>;

    /// Remove all drawn objects so the next measurement starts clean.
    fn clear(&mut self);

    /// Show `image` behind the drawings. Existing drawings are discarded
    /// since their coordinates belong to the old image.
    fn set_background(&mut self, image: RgbaImage);
}

/// Which shape a pointer drag produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawTool {
    /// Straight line between press and release.
    #[default]
    Line,
    /// Every pointer position along the drag.
    Freehand,
    /// Box spanned by press and release.
    Rect,
}

impl DrawTool {
    /// All tools in toolbar order.
    pub const ALL: [Self; 3] = [Self::Line, Self::Freehand, Self::Rect];

    /// Toolbar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Freehand => "Freehand",
            Self::Rect => "Box",
        }
    }

    /// Build the shape for a finished drag.
    ///
    /// `trail` is every pointer position from press to release. Returns
    /// `None` when the drag has fewer than two positions.
    #[must_use]
    pub fn shape(self, trail: &[Point]) -> Option<AnnotationShape> {
        let (&start, &end) = (trail.first()?, trail.last()?);
        if trail.len() < 2 {
            return None;
        }
        Some(match self {
            Self::Line => AnnotationShape::Line { start, end },
            Self::Freehand => AnnotationShape::Path {
                points: trail.to_vec(),
            },
            Self::Rect => AnnotationShape::Rect {
                origin: Point::new(start.x.min(end.x), start.y.min(end.y)),
                width: (end.x - start.x).abs(),
                height: (end.y - start.y).abs(),
            },
        })
    }
}

/// Stroke appearance for rendered annotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Line width in image pixels.
    pub width: f32,
    /// Straight RGBA color.
    pub color: [u8; 4],
}

impl From<&MeasureConfig> for StrokeStyle {
    fn from(config: &MeasureConfig) -> Self {
        Self {
            width: config.stroke_width,
            color: config.stroke_color,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::from(&MeasureConfig::default())
    }
}

/// In-memory drawing surface over an uploaded photo.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    background: Option<RgbaImage>,
    objects: Vec<Value>,
    stroke: StrokeStyle,
}

impl Canvas {
    /// An empty canvas with no photo.
    #[must_use]
    pub fn new(stroke: StrokeStyle) -> Self {
        Self {
            background: None,
            objects: Vec::new(),
            stroke,
        }
    }

    /// The photo, if one is loaded.
    #[must_use]
    pub const fn background(&self) -> Option<&RgbaImage> {
        self.background.as_ref()
    }

    /// Size of the photo, if one is loaded.
    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.background.as_ref().map(|bg| Dimensions {
            width: bg.width(),
            height: bg.height(),
        })
    }

    /// Append a drawn shape.
    pub fn push(&mut self, shape: &AnnotationShape) {
        self.objects.push(shape.to_object());
    }

    /// Append a raw record, as reported by an external drawing widget.
    pub fn push_object(&mut self, object: Value) {
        self.objects.push(object);
    }

    /// Remove the most recent object.
    pub fn undo(&mut self) -> Option<Value> {
        self.objects.pop()
    }

    /// Number of drawn objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether nothing is drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drawn objects that parse as a supported shape, for previews.
    pub fn shapes(&self) -> impl Iterator<Item = AnnotationShape> + '_ {
        self.objects
            .iter()
            .filter_map(|obj| AnnotationShape::from_object(obj).ok())
    }
}

impl DrawingSurface for Canvas {
    fn objects(&self) -> &[Value] {
        &self.objects
    }

    fn render(&self) -> Option<RgbaImage> {
        let background = self.background.as_ref()?;
        let shapes: Vec<_> = self.shapes().collect();
        if shapes.len() < self.objects.len() {
            tracing::debug!(
                "skipping {} unrenderable object(s)",
                self.objects.len() - shapes.len()
            );
        }
        render_annotations(background, &shapes, self.stroke)
    }

    fn clear(&mut self) {
        self.objects.clear();
    }

    fn set_background(&mut self, image: RgbaImage) {
        self.background = Some(image);
        self.objects.clear();
    }
}

/// Composite `shapes` as strokes over `background`.
///
/// Returns `None` if the background has a zero dimension.
#[must_use]
pub fn render_annotations(
    background: &RgbaImage,
    shapes: &[AnnotationShape],
    style: StrokeStyle,
) -> Option<RgbaImage> {
    let (width, height) = background.dimensions();
    let mut pixmap = Pixmap::new(width, height)?;

    // tiny-skia works in premultiplied alpha.
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(background.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    let stroke = Stroke {
        width: style.width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    let mut paint = Paint::default();
    let [r, g, b, a] = style.color;
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    for shape in shapes {
        if let Some(path) = shape_path(shape) {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    let mut out = RgbaImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Some(out)
}

#[allow(clippy::cast_possible_truncation)]
fn shape_path(shape: &AnnotationShape) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    match shape {
        AnnotationShape::Line { start, end } => {
            pb.move_to(start.x as f32, start.y as f32);
            pb.line_to(end.x as f32, end.y as f32);
        }
        AnnotationShape::Path { points } => {
            let (first, rest) = points.split_first()?;
            pb.move_to(first.x as f32, first.y as f32);
            for p in rest {
                pb.line_to(p.x as f32, p.y as f32);
            }
        }
        AnnotationShape::Rect {
            origin,
            width,
            height,
        } => {
            let (l, t) = (origin.x as f32, origin.y as f32);
            let (r, b) = ((origin.x + width) as f32, (origin.y + height) as f32);
            pb.move_to(l, t);
            pb.line_to(r, t);
            pb.line_to(r, b);
            pb.line_to(l, b);
            pb.close();
        }
    }
    pb.finish()
}
