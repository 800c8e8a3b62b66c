//! `fetch`-backed transport

use js_sys::Uint8Array;
use pdftools_core::{HttpResponse, Transport, TransportError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response, Window};

use crate::dom::js_error_message;

pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

fn transport_error(value: JsValue) -> TransportError {
    TransportError(js_error_message(&value))
}

impl Transport<FormData> for FetchTransport {
    async fn post(&self, url: &str, payload: FormData) -> Result<HttpResponse, TransportError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&payload);

        let request = Request::new_with_str_and_init(url, &opts).map_err(transport_error)?;

        let resp_value = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(transport_error)?;
        let resp: Response = resp_value.dyn_into().map_err(transport_error)?;

        let content_disposition = resp
            .headers()
            .get("Content-Disposition")
            .map_err(transport_error)?;

        let buffer = JsFuture::from(resp.array_buffer().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;
        let body = Uint8Array::new(&buffer).to_vec();

        Ok(HttpResponse {
            status: resp.status(),
            content_disposition,
            body,
        })
    }
}
