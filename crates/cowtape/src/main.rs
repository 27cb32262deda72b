use cowtape_io::{
    CalibrationInput, ExportPanel, FileUpload, MeasureCanvas, MeasurementTable, NoticeList,
    StepControls, raster,
};
use cowtape_measure::{Level, Notice, Session, SessionEvent};
use dioxus::prelude::*;

fn main() {
    dioxus::launch(app);
}

/// Swap the Blob URL held in `slot`, revoking the one it replaces.
fn replace_url(mut slot: Signal<Option<String>>, next: Option<String>) {
    if let Some(ref old) = slot.take() {
        raster::revoke_blob_url(old);
    }
    slot.set(next);
}

/// Root application component.
///
/// Holds the measuring [`Session`] in a signal, routes every user action
/// through [`Session::handle`], and keeps Blob URLs for the photo and the
/// annotated snapshot in step with the session.
fn app() -> Element {
    // --- Application state ---
    let mut session = use_signal(Session::default);
    let mut notices = use_signal(Vec::<Notice>::new);
    let photo_url = use_signal(|| Option::<String>::None);
    let snapshot_url = use_signal(|| Option::<String>::None);

    // Revoke outstanding Blob URLs when the app is torn down.
    use_drop(move || {
        for slot in [photo_url, snapshot_url] {
            if let Some(ref url) = *slot.peek() {
                raster::revoke_blob_url(url);
            }
        }
    });

    // Re-encode the snapshot preview after anything that may change it.
    let refresh_snapshot = move || {
        let next = session.read().snapshot().and_then(|snap| {
            raster::png_to_blob_url(snap.png_bytes())
                .inspect_err(|e| tracing::warn!("snapshot preview failed: {e}"))
                .ok()
        });
        replace_url(snapshot_url, next);
    };

    // --- Event handlers ---
    let on_upload = move |(bytes, filename): (Vec<u8>, String)| {
        let result = session.write().handle(SessionEvent::Upload { bytes, filename });
        let loaded = result.first().is_some_and(|n| n.level == Level::Info);
        if loaded {
            let next = session.read().surface().background().and_then(|bg| {
                raster::rgba_image_to_blob_url(bg)
                    .inspect_err(|e| tracing::warn!("photo preview failed: {e}"))
                    .ok()
            });
            replace_url(photo_url, next);
        }
        notices.set(result);
    };

    let on_calibration = move |pixels_per_cm: f64| {
        let result = session
            .write()
            .handle(SessionEvent::SetCalibration(pixels_per_cm));
        notices.set(result);
    };

    let on_register = move |()| {
        let result = session.write().handle(SessionEvent::Register);
        refresh_snapshot();
        notices.set(result);
    };

    let on_reset = move |()| {
        let result = session.write().handle(SessionEvent::Reset);
        refresh_snapshot();
        notices.set(result);
    };

    let view = session.read().view();

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "app",
            header {
                h1 { "cowtape" }
                p { class: "muted",
                    "Measure cattle height, body length and heart girth from a photo"
                }
            }

            main {
                section { class: "workspace",
                    FileUpload { on_upload }
                    if let Some(ref image) = view.image {
                        p { class: "muted",
                            "{image.filename}: {image.dimensions.width}x{image.dimensions.height} px"
                        }
                    }
                    MeasureCanvas { session, photo_url: photo_url() }
                }

                aside { class: "sidebar",
                    CalibrationInput { value: view.pixels_per_cm, on_change: on_calibration }
                    StepControls {
                        step: view.step,
                        instruction: view.instruction,
                        object_count: view.object_count,
                        on_register,
                        on_reset,
                    }
                    NoticeList { notices: notices() }
                    MeasurementTable { rows: view.rows.clone() }
                    ExportPanel { session, snapshot_url: snapshot_url() }
                }
            }
        }
    }
}
