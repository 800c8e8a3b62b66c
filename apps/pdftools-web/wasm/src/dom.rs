//! `web-sys` implementations of the page handle traits

use pdftools_core::ui::{
    Display, FileInput, FileListView, FileSet, FormHandle, Platform, TextArea, UiElement,
};
use pdftools_core::{Operation, OperationHandles, PageHandles, SelectedFileEntry, UiError};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, FileList, FormData, HtmlDocument, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlTextAreaElement,
};

use crate::download::BlobDownloader;
use crate::fetch::FetchTransport;
use crate::timer::BrowserTimer;

/// The browser platform
pub struct Browser;

impl Platform for Browser {
    type Element = DomElement;
    type FileInput = DomFileInput;
    type FileList = DomFileList;
    type Form = DomForm;
    type TextArea = DomTextArea;
    type Timer = BrowserTimer;
    type Transport = FetchTransport;
    type Downloader = BlobDownloader;
}

/// Best-effort message for a thrown JS value
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        String::from(err.message())
    } else if let Some(text) = value.as_string() {
        text
    } else {
        format!("{:?}", value)
    }
}

pub(crate) fn dom_error(value: JsValue) -> UiError {
    UiError::Dom(js_error_message(&value))
}

fn log_failure(action: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!(action, error = %js_error_message(&e), "DOM update failed");
    }
}

#[derive(Clone)]
pub struct DomElement(HtmlElement);

impl DomElement {
    pub fn new(element: HtmlElement) -> Self {
        Self(element)
    }

    pub fn inner(&self) -> &HtmlElement {
        &self.0
    }
}

impl UiElement for DomElement {
    fn add_class(&self, class: &str) {
        log_failure("add class", self.0.class_list().add_1(class));
    }

    fn remove_class(&self, class: &str) {
        log_failure("remove class", self.0.class_list().remove_1(class));
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_class_name(&self, name: &str) {
        self.0.set_class_name(name);
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_style(&self, property: &str, value: &str) {
        log_failure("set style", self.0.style().set_property(property, value));
    }

    fn set_display(&self, display: Display) {
        self.set_style("display", display.as_css());
    }
}

/// Files carried by a drop event
pub struct DroppedFiles(pub FileList);

impl FileSet for DroppedFiles {
    fn len(&self) -> usize {
        self.0.length() as usize
    }
}

#[derive(Clone)]
pub struct DomFileInput(HtmlInputElement);

impl DomFileInput {
    pub fn inner(&self) -> &HtmlInputElement {
        &self.0
    }
}

impl FileInput for DomFileInput {
    type Files = DroppedFiles;

    fn open_picker(&self) {
        self.0.click();
    }

    fn assign(&self, files: DroppedFiles) {
        self.0.set_files(Some(&files.0));
    }

    fn selected(&self) -> Vec<SelectedFileEntry> {
        let Some(list) = self.0.files() else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|file| SelectedFileEntry::new(file.name(), file.size() as u64))
            .collect()
    }
}

/// Renders `div.file-item` rows under an upload zone
pub struct DomFileList {
    container: Element,
    document: Document,
}

impl DomFileList {
    fn item(&self, label: &str) -> Result<Element, JsValue> {
        let item = self.document.create_element("div")?;
        item.set_class_name("file-item");

        let icon = self.document.create_element("i")?;
        icon.set_class_name("fas fa-file-pdf");
        item.append_child(&icon)?;

        let text = self.document.create_element("span")?;
        text.set_text_content(Some(label));
        item.append_child(&text)?;

        Ok(item)
    }
}

impl FileListView for DomFileList {
    fn clear(&self) {
        self.container.set_inner_html("");
    }

    fn append(&self, label: &str) {
        let result = self
            .item(label)
            .and_then(|item| self.container.append_child(&item).map(|_| ()));
        log_failure("append file item", result);
    }
}

pub struct DomForm(HtmlFormElement);

impl DomForm {
    pub fn inner(&self) -> &HtmlFormElement {
        &self.0
    }
}

impl FormHandle for DomForm {
    type Payload = FormData;

    fn encode(&self) -> Result<FormData, UiError> {
        FormData::new_with_form(&self.0).map_err(dom_error)
    }

    fn field(&self, name: &str) -> Option<String> {
        FormData::new_with_form(&self.0).ok()?.get(name).as_string()
    }

    fn set_busy(&self, busy: bool) {
        let button = match self.0.query_selector("[type=submit]") {
            Ok(Some(button)) => button,
            _ => return,
        };
        let result = if busy {
            button.set_attribute("disabled", "")
        } else {
            button.remove_attribute("disabled")
        };
        log_failure("toggle submit", result);
    }
}

pub struct DomTextArea {
    area: HtmlTextAreaElement,
    document: Document,
}

impl TextArea for DomTextArea {
    fn set_value(&self, value: &str) {
        self.area.set_value(value);
    }

    fn value(&self) -> String {
        self.area.value()
    }

    fn select_and_copy(&self) -> bool {
        self.area.select();
        let Some(html) = self.document.dyn_ref::<HtmlDocument>() else {
            return false;
        };
        match html.exec_command("copy") {
            Ok(copied) => copied,
            Err(e) => {
                debug!(error = %js_error_message(&e), "copy command rejected");
                false
            }
        }
    }
}

/// Id lookups against the current document
pub struct DomLookup {
    document: Document,
}

impl DomLookup {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        Ok(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn by_id<T: JsCast>(&self, id: &str) -> Option<T> {
        self.document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    pub fn element(&self, id: &str) -> Option<DomElement> {
        self.by_id::<HtmlElement>(id).map(DomElement)
    }

    pub fn input(&self, id: &str) -> Option<DomFileInput> {
        self.by_id::<HtmlInputElement>(id).map(DomFileInput)
    }

    pub fn form(&self, id: &str) -> Option<DomForm> {
        self.by_id::<HtmlFormElement>(id).map(DomForm)
    }

    pub fn file_list(&self, id: &str) -> Option<DomFileList> {
        self.document.get_element_by_id(id).map(|container| DomFileList {
            container,
            document: self.document.clone(),
        })
    }

    pub fn text_area(&self, id: &str) -> Option<DomTextArea> {
        self.by_id::<HtmlTextAreaElement>(id).map(|area| DomTextArea {
            area,
            document: self.document.clone(),
        })
    }

    /// All elements matching `selector`, in document order
    pub fn query_all(&self, selector: &str) -> Vec<HtmlElement> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    /// Tab buttons keyed by their `data-tab` attribute
    pub fn tab_buttons(&self) -> Vec<(String, HtmlElement)> {
        self.query_all(".tab-btn")
            .into_iter()
            .filter_map(|button| match button.get_attribute("data-tab") {
                Some(id) => Some((id, button)),
                None => {
                    warn!(text = %button.inner_text(), "tab button without data-tab skipped");
                    None
                }
            })
            .collect()
    }

    /// Tab panels keyed by their element id
    pub fn tab_panels(&self) -> Vec<(String, HtmlElement)> {
        self.query_all(".tab-content")
            .into_iter()
            .map(|panel| (panel.id(), panel))
            .filter(|(id, _)| !id.is_empty())
            .collect()
    }

    /// Handles for one operation; `None` unless the zone, input and form
    /// are all present
    pub fn operation(&self, op: Operation) -> Option<OperationHandles<Browser>> {
        Some(OperationHandles {
            operation: op,
            zone: self.element(&op.upload_area_id())?,
            input: self.input(&op.input_id())?,
            list: self.file_list(&op.file_list_id()),
            form: self.form(&op.form_id())?,
        })
    }

    pub fn page_handles(&self) -> Result<PageHandles<Browser>, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let wrap = |items: Vec<(String, HtmlElement)>| {
            items
                .into_iter()
                .map(|(id, el)| (id, DomElement(el)))
                .collect::<Vec<_>>()
        };

        Ok(PageHandles {
            tab_buttons: wrap(self.tab_buttons()),
            tab_panels: wrap(self.tab_panels()),
            operations: Operation::ALL
                .into_iter()
                .filter_map(|op| self.operation(op))
                .collect(),
            loading_overlay: self.element("loadingOverlay"),
            notification: self.element("notification"),
            extracted_text: self.element("extractedText"),
            text_content: self.text_area("textContent"),
            timer: BrowserTimer::new(window.clone()),
            transport: FetchTransport::new(window),
            downloader: BlobDownloader::new(self.document.clone()),
        })
    }
}
