//! Upload decoding and normalization.
//!
//! Turns raw upload bytes (JPEG, PNG, BMP, WebP) into the RGBA raster the
//! drawing surface shows:
//!
//! 1. decode, rejecting empty or unrecognized input,
//! 2. apply the EXIF orientation so portrait phone photos stand upright,
//! 3. drop to 8-bit RGBA regardless of the source color type,
//! 4. downscale so the longest side fits `max_dimension`.
//!
//! Annotation coordinates are in the normalized image's pixel space, so
//! the calibration scale must be measured against the normalized image.

use std::fmt;
use std::io::Cursor;

use image::{DynamicImage, ImageDecoder, ImageReader};
use serde::{Deserialize, Serialize};

use crate::types::{Dimensions, MeasureConfig, MeasureError, RgbaImage};

/// Resampling filter used when downscaling an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizeFilter {
    /// Nearest-neighbor: fastest, blocky artifacts.
    Nearest,
    /// Bilinear interpolation: fast, decent quality.
    Triangle,
    /// Bicubic (Catmull-Rom): moderate speed, good quality.
    CatmullRom,
    /// Lanczos with 3 lobes: slowest, sharpest for photos.
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    const fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            Self::Nearest => image::imageops::FilterType::Nearest,
            Self::Triangle => image::imageops::FilterType::Triangle,
            Self::CatmullRom => image::imageops::FilterType::CatmullRom,
            Self::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => f.write_str("Nearest"),
            Self::Triangle => f.write_str("Triangle"),
            Self::CatmullRom => f.write_str("CatmullRom"),
            Self::Lanczos3 => f.write_str("Lanczos3"),
        }
    }
}

/// An upload after decoding and normalization.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    /// Upright 8-bit RGBA pixels.
    pub rgba: RgbaImage,
    /// Size of `rgba`.
    pub dimensions: Dimensions,
    /// Size of the decoded image before downscaling (after orientation).
    pub original_dimensions: Dimensions,
}

impl NormalizedImage {
    /// Whether the upload was shrunk to fit the size bound.
    #[must_use]
    pub fn downscaled(&self) -> bool {
        self.dimensions != self.original_dimensions
    }
}

/// Decode raw image bytes, honoring the EXIF orientation tag.
///
/// # Errors
///
/// Returns [`MeasureError::EmptyInput`] if `bytes` is empty.
/// Returns [`MeasureError::ImageDecode`] if the format is unrecognized or
/// the data is corrupt.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, MeasureError> {
    if bytes.is_empty() {
        return Err(MeasureError::EmptyInput);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Shrink `image` so neither side exceeds `max_dimension`.
///
/// Aspect ratio is preserved. Images already within bounds are returned
/// unchanged.
#[must_use]
pub fn fit_within(image: DynamicImage, max_dimension: u32, filter: ResizeFilter) -> DynamicImage {
    if image.width().max(image.height()) <= max_dimension {
        return image;
    }
    image.resize(max_dimension, max_dimension, filter.to_image_filter())
}

/// Decode and normalize an upload for display and measuring.
///
/// # Errors
///
/// See [`decode`].
pub fn normalize(bytes: &[u8], config: &MeasureConfig) -> Result<NormalizedImage, MeasureError> {
    let decoded = decode(bytes)?;
    let original_dimensions = Dimensions {
        width: decoded.width(),
        height: decoded.height(),
    };

    let rgba = fit_within(decoded, config.max_dimension, config.resize_filter).to_rgba8();
    let dimensions = Dimensions {
        width: rgba.width(),
        height: rgba.height(),
    };

    if dimensions != original_dimensions {
        tracing::debug!(
            "downscaled upload from {}x{} to {}x{}",
            original_dimensions.width,
            original_dimensions.height,
            dimensions.width,
            dimensions.height,
        );
    }

    Ok(NormalizedImage {
        rgba,
        dimensions,
        original_dimensions,
    })
}
