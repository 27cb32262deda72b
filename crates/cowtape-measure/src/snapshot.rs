//! PNG snapshot of the annotated photo.

use std::fmt;

use image::ImageEncoder;

use crate::types::{Dimensions, MeasureError, RgbaImage};

/// The annotated canvas at the last registration, encoded as PNG.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Vec<u8>,
    dimensions: Dimensions,
}

impl Snapshot {
    /// Encode a rendered canvas.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::PngEncode`] if PNG encoding fails.
    pub fn from_rgba(image: &RgbaImage) -> Result<Self, MeasureError> {
        let mut png = Vec::new();
        image::codecs::png::PngEncoder::new(&mut png)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| MeasureError::PngEncode(e.to_string()))?;
        Ok(Self {
            png,
            dimensions: Dimensions {
                width: image.width(),
                height: image.height(),
            },
        })
    }

    /// The encoded PNG.
    #[must_use]
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Size of the captured image.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("png_len", &self.png.len())
            .field("dimensions", &self.dimensions)
            .finish()
    }
}
