//! Integration test: measure a synthetic photo end to end and export
//! both downloads.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use cowtape_measure::{AnnotationShape, MeasureConfig, Point, Session, SessionEvent};

fn photo_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([110, 90, 70, 255]));
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgba8,
    )
    .unwrap();
    buf
}

fn horizontal(y: f64, length: f64) -> AnnotationShape {
    AnnotationShape::Line {
        start: Point::new(10.0, y),
        end: Point::new(10.0 + length, y),
    }
}

#[test]
fn partial_session_exports_blank_cells() {
    let mut session = Session::new(MeasureConfig::default());
    session.handle(SessionEvent::Upload {
        bytes: photo_png(200, 120),
        filename: "cow.png".into(),
    });
    session.surface_mut().push(&horizontal(30.0, 64.0));
    session.handle(SessionEvent::Register);

    let csv = cowtape_export::csv_attachment(session.record()).unwrap();
    let text = String::from_utf8(csv.bytes).unwrap();
    assert_eq!(text, "Measurement,cm\nHeight,2\nBody Length,\nHeart Girth,\n");

    let png = cowtape_export::snapshot_attachment(session.snapshot()).expect("snapshot");
    let decoded = image::load_from_memory(&png.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (200, 120));
    // The registered line is burned into the snapshot in the stroke color.
    assert_eq!(decoded.get_pixel(40, 30).0, [255, 0, 0, 255]);
}

#[test]
fn reset_removes_snapshot_download() {
    let mut session = Session::new(MeasureConfig::default());
    session.handle(SessionEvent::Upload {
        bytes: photo_png(50, 50),
        filename: "cow.png".into(),
    });
    session.surface_mut().push(&horizontal(10.0, 32.0));
    session.handle(SessionEvent::Register);
    assert!(cowtape_export::snapshot_attachment(session.snapshot()).is_some());

    session.handle(SessionEvent::Reset);
    assert!(cowtape_export::snapshot_attachment(session.snapshot()).is_none());
    let csv = cowtape_export::to_csv(session.record()).unwrap();
    assert_eq!(csv, "Measurement,cm\nHeight,\nBody Length,\nHeart Girth,\n");
}
