//! WASM bindings for the PDF tools page
//!
//! Binds the tabbed upload/submit page to `pdftools-core`. All behavior lives
//! in the core; this crate only supplies `web-sys` handles and event wiring.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { mount, copyText } from './pkg/pdftools_wasm.js';
//!
//! await init();
//! mount(JSON.stringify({ api_base: "", log_level: "debug" }));
//!
//! // The extracted-text panel's copy button calls this
//! window.copyText = copyText;
//! ```

pub mod bindings;
pub mod dom;
pub mod download;
pub mod fetch;
pub mod logging;
pub mod timer;

use std::cell::RefCell;
use std::rc::Rc;

use pdftools_core::{Operation, OperationInfo, Page, UiConfig};
use tracing::info;
use wasm_bindgen::prelude::*;

use crate::dom::{Browser, DomLookup};

thread_local! {
    static PAGE: RefCell<Option<Rc<Page<Browser>>>> = const { RefCell::new(None) };
}

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse the optional mount config; blank input means defaults.
pub fn parse_config(config_json: Option<&str>) -> Result<UiConfig, String> {
    match config_json.map(str::trim) {
        Some(json) if !json.is_empty() => UiConfig::from_json(json).map_err(|e| e.to_string()),
        _ => Ok(UiConfig::default()),
    }
}

/// Bind the page. Call once after the DOM is ready.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<(), JsValue> {
    if PAGE.with(|slot| slot.borrow().is_some()) {
        return Err(JsValue::from_str("Page is already mounted"));
    }

    let config = parse_config(config_json.as_deref()).map_err(|e| JsValue::from_str(&e))?;
    logging::init(&config.log_level);

    let lookup = DomLookup::new()?;
    let handles = lookup.page_handles()?;
    let page = Rc::new(Page::new(handles, config).map_err(to_js)?);
    bindings::bind_events(&page, &lookup)?;

    info!(version = env!("CARGO_PKG_VERSION"), "pdf tools mounted");
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    Ok(())
}

fn with_page<R>(f: impl FnOnce(&Page<Browser>) -> R) -> Result<R, JsValue> {
    PAGE.with(|slot| {
        slot.borrow()
            .as_deref()
            .map(f)
            .ok_or_else(|| JsValue::from_str("Page is not mounted"))
    })
}

/// Copy the extracted text and confirm with a notification
#[wasm_bindgen(js_name = copyText)]
pub fn copy_text() -> Result<(), JsValue> {
    with_page(|page| page.copy_text())
}

#[wasm_bindgen(js_name = activateTab)]
pub fn activate_tab(tab_id: &str) -> Result<(), JsValue> {
    with_page(|page| page.activate_tab(tab_id))?.map_err(to_js)
}

#[wasm_bindgen(js_name = formatFileSize)]
pub fn format_file_size(bytes: f64) -> String {
    // Negative and NaN inputs saturate to zero
    pdftools_core::format_file_size(bytes as u64)
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Operation catalogue: endpoints, element ids and response modes
#[wasm_bindgen]
pub fn operations() -> Result<JsValue, JsValue> {
    let infos: Vec<OperationInfo> = Operation::ALL.into_iter().map(OperationInfo::from).collect();
    serde_wasm_bindgen::to_value(&infos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
