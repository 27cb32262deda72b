//! Offering exports as browser downloads.
//!
//! Dioxus has no download API, so an [`Attachment`] is wrapped in a
//! `Blob`, linked from a temporary `<a download>` element, and clicked.
//!
//! Requires a browser environment (`wasm32-unknown-unknown` target).

use cowtape_export::Attachment;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{BlobPropertyBag, Document, HtmlAnchorElement, HtmlElement};

/// Errors that can occur when offering a download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// There is no window, document, or body to host the link.
    #[error("no document to attach the download link to")]
    NoDocument,

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    Js(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

/// Hand `file` to the browser as a download named `file.filename`.
///
/// # Errors
///
/// Returns [`DownloadError::NoDocument`] outside a page, or
/// [`DownloadError::Js`] if creating the Blob, its URL, or the link fails.
pub fn download_attachment(file: &Attachment) -> Result<(), DownloadError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(DownloadError::NoDocument)?;
    let body = document.body().ok_or(DownloadError::NoDocument)?;

    let url = object_url(file)?;
    let clicked = click_link(&document, &body, &url, file.filename);
    let _ = web_sys::Url::revoke_object_url(&url);
    clicked
}

fn object_url(file: &Attachment) -> Result<String, DownloadError> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(file.bytes.as_slice()));
    let opts = BlobPropertyBag::new();
    opts.set_type(file.mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    Ok(web_sys::Url::create_object_url_with_blob(&blob)?)
}

fn click_link(
    document: &Document,
    body: &HtmlElement,
    url: &str,
    filename: &str,
) -> Result<(), DownloadError> {
    let link: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|e| DownloadError::Js(format!("created element is not a link: {e:?}")))?;
    link.set_href(url);
    link.set_download(filename);

    body.append_child(&link)?;
    link.click();
    // The download has started; a leftover link is harmless.
    let _ = body.remove_child(&link);
    Ok(())
}
