//! `setTimeout`-backed timer

use std::time::Duration;

use pdftools_core::ui::Timer;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::dom::js_error_message;

/// A scheduled timeout. Owns its callback, so dropping the handle (after
/// `cancel` or once the timeout has fired) frees it.
pub struct TimeoutHandle {
    id: Option<i32>,
    _callback: Closure<dyn FnMut()>,
}

impl TimeoutHandle {
    /// Browser timeout id, `None` if scheduling failed
    pub fn id(&self) -> Option<i32> {
        self.id
    }
}

pub struct BrowserTimer {
    window: Window,
}

impl BrowserTimer {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Timer for BrowserTimer {
    type Handle = TimeoutHandle;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimeoutHandle {
        let closure = Closure::once(move || callback());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let id = match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis,
            ) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(error = %js_error_message(&e), "could not schedule timeout");
                None
            }
        };
        TimeoutHandle {
            id,
            _callback: closure,
        }
    }

    fn cancel(&self, handle: TimeoutHandle) {
        if let Some(id) = handle.id {
            self.window.clear_timeout_with_handle(id);
        }
    }
}
