//! DOM event wiring
//!
//! Listeners live for the page lifetime, so closures are leaked with
//! `forget()` once registered.

use std::rc::Rc;

use pdftools_core::{Operation, Page};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, Event, EventTarget};

use crate::dom::{Browser, DomLookup, DroppedFiles};

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn bind_events(page: &Rc<Page<Browser>>, lookup: &DomLookup) -> Result<(), JsValue> {
    bind_tabs(page, lookup)?;
    let operations: Vec<_> = page.operations().collect();
    for op in operations {
        bind_operation(page, op)?;
    }
    Ok(())
}

fn bind_tabs(page: &Rc<Page<Browser>>, lookup: &DomLookup) -> Result<(), JsValue> {
    for (tab_id, button) in lookup.tab_buttons() {
        let page = Rc::clone(page);
        listen(&button, "click", move |_| {
            // Unknown ids are logged by the controller
            let _ = page.activate_tab(&tab_id);
        })?;
    }
    Ok(())
}

fn bind_operation(page: &Rc<Page<Browser>>, op: Operation) -> Result<(), JsValue> {
    let (Some(zone), Some(submitter)) = (page.zone(op), page.submitter(op)) else {
        return Ok(());
    };
    let zone_el = zone.zone().clone();
    let zone_target: &EventTarget = zone_el.inner();

    {
        let zone = Rc::clone(&zone);
        listen(zone_target, "click", move |_| zone.click())?;
    }
    {
        let zone = Rc::clone(&zone);
        listen(zone_target, "dragover", move |event| {
            event.prevent_default();
            zone.drag_over();
        })?;
    }
    {
        let zone = Rc::clone(&zone);
        listen(zone_target, "dragleave", move |_| zone.drag_leave())?;
    }
    {
        let zone = Rc::clone(&zone);
        listen(zone_target, "drop", move |event| {
            event.prevent_default();
            let files = event
                .dyn_ref::<DragEvent>()
                .and_then(DragEvent::data_transfer)
                .and_then(|transfer| transfer.files());
            match files {
                Some(files) => {
                    zone.drop_files(DroppedFiles(files));
                }
                None => zone.drag_leave(),
            }
        })?;
    }
    {
        let input = zone.input().clone();
        let zone = Rc::clone(&zone);
        listen(input.inner(), "change", move |_| zone.files_changed())?;
    }

    let form = submitter.form().inner().clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();
        let submitter = Rc::clone(&submitter);
        spawn_local(async move {
            let outcome = submitter.submit().await;
            debug!(operation = ?submitter.operation(), ?outcome, "submit finished");
        });
    })?;

    Ok(())
}
