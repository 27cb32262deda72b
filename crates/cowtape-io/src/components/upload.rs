//! Photo upload component with drag-and-drop and file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;

/// Allowed file extensions for photo uploads.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Check whether a filename has an allowed photo extension.
fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ext))
    })
}

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Called with the raw file bytes and filename after a successful read.
    on_upload: EventHandler<(Vec<u8>, String)>,
}

/// A drop zone with a file picker button.
///
/// Accepts PNG and JPEG photos. Extension and read failures are shown
/// inline; decoding is left to the session, which reports its own
/// notice.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let process_files = move |files: Vec<FileData>| async move {
        let Some(file) = files.first() else {
            return;
        };
        let name = file.name();
        if !has_allowed_extension(&name) {
            error.set(Some(format!("Unsupported file type: {name}")));
            return;
        }
        match file.read_bytes().await {
            Ok(bytes) => {
                error.set(None);
                props.on_upload.call((bytes.to_vec(), name));
            }
            Err(e) => {
                error.set(Some(format!("Failed to read file: {e}")));
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    rsx! {
        div {
            class: if dragging() { "upload upload-active" } else { "upload" },
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            if let Some(ref err) = error() {
                p { class: "text-error", "{err}" }
            }

            label { class: "btn btn-primary",
                input {
                    r#type: "file",
                    accept: ".png,.jpg,.jpeg",
                    class: "hidden",
                    onchange: handle_files,
                }
                "Upload cow photo"
            }
            p { class: "muted", "PNG or JPEG, or drop a file here" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_extensions_are_accepted() {
        assert!(has_allowed_extension("cow.jpg"));
        assert!(has_allowed_extension("cow.JPEG"));
        assert!(has_allowed_extension("side.view.png"));
    }

    #[test]
    fn other_files_are_rejected() {
        assert!(!has_allowed_extension("cow.webp"));
        assert!(!has_allowed_extension("notes.txt"));
        assert!(!has_allowed_extension("png"));
    }
}
