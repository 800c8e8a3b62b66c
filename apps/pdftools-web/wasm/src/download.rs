//! Saves response bytes through a temporary object URL and anchor click

use js_sys::{Array, Uint8Array};
use pdftools_core::ui::Downloader;
use pdftools_core::UiError;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url};

use crate::dom::dom_error;

pub struct BlobDownloader {
    document: Document,
}

impl BlobDownloader {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn click_link(&self, url: &str, filename: &str) -> Result<(), UiError> {
        let anchor: HtmlAnchorElement = self
            .document
            .create_element("a")
            .map_err(dom_error)?
            .dyn_into()
            .map_err(|_| UiError::Dom("created element is not an anchor".to_string()))?;
        anchor.set_href(url);
        anchor.set_download(filename);

        let body = self
            .document
            .body()
            .ok_or_else(|| UiError::MissingElement("body".to_string()))?;
        body.append_child(&anchor).map_err(dom_error)?;
        anchor.click();
        body.remove_child(&anchor).map_err(dom_error)?;
        Ok(())
    }
}

impl Downloader for BlobDownloader {
    fn download(&self, filename: &str, bytes: &[u8]) -> Result<(), UiError> {
        let parts = Array::of1(&Uint8Array::from(bytes));
        let props = BlobPropertyBag::new();
        props.set_type("application/pdf");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &props).map_err(dom_error)?;

        let url = Url::create_object_url_with_blob(&blob).map_err(dom_error)?;
        let result = self.click_link(&url, filename);
        // The click has already handed the blob to the browser
        let _ = Url::revoke_object_url(&url);
        result
    }
}
