//! Integration test: upload a photo, register three lines through the
//! public session API, and check the record and snapshot.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use cowtape_measure::{
    AnnotationShape, DrawTool, Level, MeasureConfig, MeasurementStep, Point, Session,
    SessionEvent,
};
use serde_json::json;

fn photo_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
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

#[test]
fn three_tools_fill_the_record() {
    let mut session = Session::new(MeasureConfig {
        pixels_per_cm: 10.0,
        ..MeasureConfig::default()
    });

    let notices = session.handle(SessionEvent::Upload {
        bytes: photo_png(300, 200),
        filename: "heifer.png".into(),
    });
    assert_eq!(notices[0].level, Level::Info);

    // Height with the line tool: 150 px straight down.
    let line = DrawTool::Line
        .shape(&[Point::new(100.0, 20.0), Point::new(100.0, 170.0)])
        .expect("line from two points");
    session.surface_mut().push(&line);
    let notices = session.handle(SessionEvent::Register);
    assert_eq!(notices[0].message, "Height recorded: 15.00 cm");

    // Body length with a freehand stroke; only the ends count.
    let trail = [
        Point::new(20.0, 100.0),
        Point::new(90.0, 60.0),
        Point::new(160.0, 140.0),
        Point::new(220.0, 100.0),
    ];
    let path = DrawTool::Freehand.shape(&trail).expect("path");
    session.surface_mut().push(&path);
    session.handle(SessionEvent::Register);
    assert_eq!(session.record().body_length, Some(20.0));

    // Girth from a raw box record as an external widget would send it.
    session
        .surface_mut()
        .push_object(json!({ "type": "rect", "left": 50, "top": 50, "width": 30, "height": 40 }));
    let notices = session.handle(SessionEvent::Register);
    assert_eq!(notices[0].level, Level::Success);
    let girth = session.record().girth.unwrap();
    assert!((girth - 5.0 * std::f64::consts::PI).abs() < 1e-9);

    assert_eq!(session.step(), MeasurementStep::Done);
    let snapshot = session.snapshot().expect("snapshot after registration");
    assert_eq!(snapshot.dimensions().width, 300);

    // Anything further is refused until reset.
    session.surface_mut().push(&AnnotationShape::Line {
        start: Point::new(0.0, 0.0),
        end: Point::new(1.0, 1.0),
    });
    let notices = session.handle(SessionEvent::Register);
    assert_eq!(notices[0].level, Level::Warning);

    session.handle(SessionEvent::Reset);
    assert!(session.record().is_empty());
    assert!(session.snapshot().is_none());
    assert_eq!(session.step(), MeasurementStep::Height);
}
