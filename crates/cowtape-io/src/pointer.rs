//! Mapping pointer positions onto image pixels.
//!
//! The drawing surface is an SVG whose `viewBox` is the image size but
//! whose on-screen size follows the layout. Pointer events arrive in
//! client (viewport) coordinates and must be rescaled into image space
//! before they become annotation points.

use cowtape_measure::{Dimensions, Point};

/// On-screen placement of the drawing surface, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

/// Errors locating the drawing surface in the page.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// The element is missing from the DOM.
    #[error("drawing surface element {0:?} not found")]
    MissingElement(String),
}

/// Read the bounding rectangle of the element with `id`.
///
/// # Errors
///
/// Returns [`CanvasError::MissingElement`] if there is no window,
/// document, or element with that id.
pub fn surface_rect(id: &str) -> Result<SurfaceRect, CanvasError> {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .ok_or_else(|| CanvasError::MissingElement(id.to_owned()))?;
    let rect = element.get_bounding_client_rect();
    Ok(SurfaceRect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    })
}

/// Convert a client-space position into image pixel coordinates.
///
/// The surface preserves aspect ratio (`xMidYMid meet`), so the image
/// may be letterboxed inside `rect`; positions are clamped to the image.
/// Returns `None` for a collapsed surface.
#[must_use]
pub fn client_to_image(
    client_x: f64,
    client_y: f64,
    rect: SurfaceRect,
    image: Dimensions,
) -> Option<Point> {
    let (iw, ih) = (f64::from(image.width), f64::from(image.height));
    if rect.width <= 0.0 || rect.height <= 0.0 || iw <= 0.0 || ih <= 0.0 {
        return None;
    }

    let scale = (rect.width / iw).min(rect.height / ih);
    let offset_x = iw.mul_add(-scale, rect.width) / 2.0;
    let offset_y = ih.mul_add(-scale, rect.height) / 2.0;

    let x = ((client_x - rect.left - offset_x) / scale).clamp(0.0, iw);
    let y = ((client_y - rect.top - offset_y) / scale).clamp(0.0, ih);
    Some(Point::new(x, y))
}
