//! Drawing surface over the uploaded photo.
//!
//! An inline SVG whose `viewBox` is the photo size shows the photo, the
//! shapes already on the session's [`Canvas`](cowtape_measure::Canvas),
//! and the drag in progress. Pointer positions are mapped into photo
//! pixels with [`pointer::client_to_image`], so the records pushed into
//! the session use the same coordinate space the snapshot is rendered in.

use std::fmt::Write;

use cowtape_measure::{AnnotationShape, DrawTool, DrawingSurface, Point, Session};
use dioxus::prelude::*;

use crate::pointer;

/// DOM id of the drawing SVG, used to locate it on screen.
pub const SURFACE_ID: &str = "cowtape-surface";

/// Props for the [`MeasureCanvas`] component.
#[derive(Props, Clone, PartialEq)]
pub struct MeasureCanvasProps {
    /// The session whose canvas receives the drawings.
    session: Signal<Session>,
    /// Blob URL of the photo on the canvas.
    photo_url: Option<String>,
}

/// Tool bar and drawing area.
#[component]
pub fn MeasureCanvas(props: MeasureCanvasProps) -> Element {
    let mut session = props.session;
    let mut tool = use_signal(DrawTool::default);
    let mut trail = use_signal(Vec::<Point>::new);
    let mut drawing = use_signal(|| false);

    let Some(dims) = session.read().surface().dimensions() else {
        return rsx! {
            div { class: "surface-empty", "Upload a photo to start measuring." }
        };
    };

    let locate = move |evt: &PointerEvent| -> Option<Point> {
        let rect = pointer::surface_rect(SURFACE_ID)
            .inspect_err(|e| tracing::warn!("{e}"))
            .ok()?;
        let client = evt.client_coordinates();
        pointer::client_to_image(client.x, client.y, rect, dims)
    };

    let mut finish = move || {
        if !drawing() {
            return;
        }
        drawing.set(false);
        let points = std::mem::take(&mut *trail.write());
        if let Some(shape) = tool().shape(&points) {
            session.write().surface_mut().push(&shape);
        }
    };

    let shapes: Vec<String> = session.read().surface().shapes().map(|s| path_data(&s)).collect();
    let pending = tool().shape(&trail.read()).map(|s| path_data(&s));
    let stroke_width = session.read().config().stroke_width;
    let stroke = css_color(session.read().config().stroke_color);
    let has_objects = !session.read().surface().is_empty();
    let (w, h) = (dims.width, dims.height);

    rsx! {
        div { class: "canvas-panel",
            div { class: "toolbar",
                for t in DrawTool::ALL {
                    button {
                        key: "{t.label()}",
                        class: if tool() == t { "btn btn-selected" } else { "btn" },
                        onclick: move |_| tool.set(t),
                        {t.label()}
                    }
                }
                button {
                    class: "btn",
                    disabled: !has_objects,
                    onclick: move |_| {
                        session.write().surface_mut().undo();
                    },
                    "Undo"
                }
                button {
                    class: "btn",
                    disabled: !has_objects,
                    onclick: move |_| session.write().surface_mut().clear(),
                    "Clear drawing"
                }
            }

            svg {
                id: SURFACE_ID,
                xmlns: "http://www.w3.org/2000/svg",
                view_box: "0 0 {w} {h}",
                "preserveAspectRatio": "xMidYMid meet",
                class: "surface",
                onpointerdown: move |evt| {
                    evt.prevent_default();
                    if let Some(p) = locate(&evt) {
                        trail.set(vec![p]);
                        drawing.set(true);
                    }
                },
                onpointermove: move |evt| {
                    if !drawing() {
                        return;
                    }
                    if let Some(p) = locate(&evt) {
                        let mut points = trail.write();
                        if tool() != DrawTool::Freehand {
                            points.truncate(1);
                        }
                        points.push(p);
                    }
                },
                onpointerup: move |_| finish(),
                onpointerleave: move |_| finish(),

                if let Some(ref url) = props.photo_url {
                    image {
                        "href": "{url}",
                        width: "{w}",
                        height: "{h}",
                    }
                }
                for (i, d) in shapes.iter().enumerate() {
                    path {
                        key: "{i}",
                        d: "{d}",
                        fill: "none",
                        stroke: "{stroke}",
                        stroke_width: "{stroke_width}",
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                    }
                }
                if let Some(ref d) = pending {
                    path {
                        d: "{d}",
                        fill: "none",
                        stroke: "{stroke}",
                        stroke_width: "{stroke_width}",
                        stroke_dasharray: "6 4",
                        stroke_linecap: "round",
                    }
                }
            }
        }
    }
}

/// SVG path `d` attribute for a shape, in photo pixels.
fn path_data(shape: &AnnotationShape) -> String {
    let mut d = String::new();
    match shape {
        AnnotationShape::Line { start, end } => {
            let _ = write!(d, "M{:.1},{:.1} L{:.1},{:.1}", start.x, start.y, end.x, end.y);
        }
        AnnotationShape::Path { points } => {
            for (i, p) in points.iter().enumerate() {
                let cmd = if i == 0 { "M" } else { " L" };
                let _ = write!(d, "{cmd}{:.1},{:.1}", p.x, p.y);
            }
        }
        AnnotationShape::Rect {
            origin,
            width,
            height,
        } => {
            let _ = write!(
                d,
                "M{:.1},{:.1} h{:.1} v{:.1} h{:.1} Z",
                origin.x, origin.y, width, height, -width
            );
        }
    }
    d
}

fn css_color([r, g, b, a]: [u8; 4]) -> String {
    format!("rgba({r},{g},{b},{:.3})", f64::from(a) / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_path() {
        let shape = AnnotationShape::Line {
            start: Point::new(1.0, 2.0),
            end: Point::new(30.24, 4.0),
        };
        assert_eq!(path_data(&shape), "M1.0,2.0 L30.2,4.0");
    }

    #[test]
    fn freehand_path_visits_every_point() {
        let shape = AnnotationShape::Path {
            points: vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(9.0, 1.0)],
        };
        assert_eq!(path_data(&shape), "M0.0,0.0 L5.0,5.0 L9.0,1.0");
    }

    #[test]
    fn rect_path_closes() {
        let shape = AnnotationShape::Rect {
            origin: Point::new(10.0, 20.0),
            width: 30.0,
            height: 40.0,
        };
        assert_eq!(path_data(&shape), "M10.0,20.0 h30.0 v40.0 h-30.0 Z");
    }

    #[test]
    fn stroke_color_as_css() {
        assert_eq!(css_color([255, 0, 0, 255]), "rgba(255,0,0,1.000)");
    }
}
