//! Export panel component with download buttons.

use cowtape_measure::Session;
use dioxus::prelude::*;

use crate::download;

/// Props for the [`ExportPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ExportPanelProps {
    /// Session to export from; read on click.
    session: Signal<Session>,
    /// Blob URL of the annotated snapshot for the preview.
    snapshot_url: Option<String>,
}

/// Download buttons for the measurement table and the annotated photo.
///
/// The CSV is always available, with empty cells for unrecorded values.
/// The PNG button is disabled until a measurement has been registered.
#[component]
pub fn ExportPanel(props: ExportPanelProps) -> Element {
    let session = props.session;
    let has_snapshot = session.read().snapshot().is_some();
    let mut export_error = use_signal(|| Option::<String>::None);

    let csv_click = move |_| {
        let outcome = cowtape_export::csv_attachment(session.read().record())
            .map_err(|e| e.to_string())
            .and_then(|file| download::download_attachment(&file).map_err(|e| e.to_string()));
        export_error.set(outcome.err().map(|e| format!("Download failed: {e}")));
    };

    let png_click = move |_| {
        let Some(file) = cowtape_export::snapshot_attachment(session.read().snapshot()) else {
            export_error.set(Some("No annotated image yet".into()));
            return;
        };
        export_error.set(
            download::download_attachment(&file)
                .err()
                .map(|e| format!("Download failed: {e}")),
        );
    };

    rsx! {
        div { class: "export",
            h3 { "Export" }

            if let Some(ref err) = export_error() {
                p { class: "text-error", "{err}" }
            }

            div { class: "button-row",
                button { class: "btn btn-primary", onclick: csv_click, "Download CSV" }
                button {
                    class: "btn btn-primary",
                    disabled: !has_snapshot,
                    onclick: png_click,
                    "Download annotated image"
                }
            }

            if let Some(ref url) = props.snapshot_url {
                img {
                    class: "snapshot",
                    src: "{url}",
                    alt: "Photo with the most recent measurement line",
                }
            }
        }
    }
}
