//! In-memory platform used by the unit tests

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use futures::channel::oneshot;

use crate::config::UiConfig;
use crate::error::{TransportError, UiError};
use crate::notify::NotificationKind;
use crate::operation::Operation;
use crate::page::{OperationHandles, Page, PageHandles};
use crate::submit::FormSubmitter;
use crate::transport::{HttpResponse, Transport};
use crate::ui::{
    Display, Downloader, FileInput, FileListView, FileSet, FormHandle, Platform, TextArea, Timer,
    UiElement,
};
use crate::upload::SelectedFileEntry;

pub struct FakePlatform;

impl Platform for FakePlatform {
    type Element = FakeElement;
    type FileInput = FakeFileInput;
    type FileList = FakeFileList;
    type Form = FakeForm;
    type TextArea = FakeTextArea;
    type Timer = FakeTimer;
    type Transport = FakeTransport;
    type Downloader = FakeDownloader;
}

// Elements

#[derive(Default)]
struct ElementState {
    id: String,
    classes: Vec<String>,
    text: String,
    text_log: Vec<String>,
    class_log: Vec<String>,
    styles: HashMap<String, String>,
    display: Option<Display>,
    display_log: Vec<Display>,
}

#[derive(Clone, Default)]
pub struct FakeElement(Rc<RefCell<ElementState>>);

impl FakeElement {
    pub fn new(id: &str) -> Self {
        Self(Rc::new(RefCell::new(ElementState {
            id: id.to_string(),
            ..Default::default()
        })))
    }

    pub fn id(&self) -> String {
        self.0.borrow().id.clone()
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn class_name(&self) -> String {
        self.0.borrow().classes.join(" ")
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn display(&self) -> Option<Display> {
        self.0.borrow().display
    }

    pub fn display_log(&self) -> Vec<Display> {
        self.0.borrow().display_log.clone()
    }
}

impl UiElement for FakeElement {
    fn add_class(&self, class: &str) {
        let mut state = self.0.borrow_mut();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn set_class_name(&self, name: &str) {
        let mut state = self.0.borrow_mut();
        state.classes = name.split_whitespace().map(str::to_string).collect();
        state.class_log.push(name.to_string());
    }

    fn set_text(&self, text: &str) {
        let mut state = self.0.borrow_mut();
        state.text = text.to_string();
        state.text_log.push(text.to_string());
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn set_display(&self, display: Display) {
        let mut state = self.0.borrow_mut();
        state.display = Some(display);
        state.display_log.push(display);
    }
}

// Files

#[derive(Debug, Clone)]
pub struct FakeFiles(pub Vec<SelectedFileEntry>);

impl FileSet for FakeFiles {
    fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Default)]
struct InputState {
    files: Vec<SelectedFileEntry>,
    picker_opened: usize,
}

#[derive(Clone, Default)]
pub struct FakeFileInput(Rc<RefCell<InputState>>);

impl FakeFileInput {
    pub fn set_files(&self, files: Vec<SelectedFileEntry>) {
        self.0.borrow_mut().files = files;
    }

    pub fn files(&self) -> Vec<SelectedFileEntry> {
        self.0.borrow().files.clone()
    }

    pub fn picker_opened(&self) -> usize {
        self.0.borrow().picker_opened
    }
}

impl FileInput for FakeFileInput {
    type Files = FakeFiles;

    fn open_picker(&self) {
        self.0.borrow_mut().picker_opened += 1;
    }

    fn assign(&self, files: FakeFiles) {
        self.set_files(files.0);
    }

    fn selected(&self) -> Vec<SelectedFileEntry> {
        self.files()
    }
}

#[derive(Clone, Default)]
pub struct FakeFileList(Rc<RefCell<Vec<String>>>);

impl FakeFileList {
    pub fn items(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl FileListView for FakeFileList {
    fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn append(&self, label: &str) {
        self.0.borrow_mut().push(label.to_string());
    }
}

// Forms

#[derive(Default)]
struct FormState {
    fields: BTreeMap<String, String>,
    busy_log: Vec<bool>,
}

#[derive(Clone)]
pub struct FakeForm {
    state: Rc<RefCell<FormState>>,
    input: FakeFileInput,
}

impl FakeForm {
    pub fn new(input: FakeFileInput) -> Self {
        Self {
            state: Rc::new(RefCell::new(FormState::default())),
            input,
        }
    }

    pub fn set_field(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .fields
            .insert(name.to_string(), value.to_string());
    }

    pub fn busy_log(&self) -> Vec<bool> {
        self.state.borrow().busy_log.clone()
    }
}

#[derive(Debug, Clone)]
pub struct FakePayload {
    pub files: Vec<String>,
}

impl FormHandle for FakeForm {
    type Payload = FakePayload;

    fn encode(&self) -> Result<FakePayload, UiError> {
        Ok(FakePayload {
            files: self.input.files().into_iter().map(|f| f.name).collect(),
        })
    }

    fn field(&self, name: &str) -> Option<String> {
        self.state.borrow().fields.get(name).cloned()
    }

    fn set_busy(&self, busy: bool) {
        self.state.borrow_mut().busy_log.push(busy);
    }
}

// Text area

#[derive(Default)]
struct TextAreaState {
    value: String,
    copies: usize,
    copy_fails: bool,
}

#[derive(Clone, Default)]
pub struct FakeTextArea(Rc<RefCell<TextAreaState>>);

impl FakeTextArea {
    pub fn copies(&self) -> usize {
        self.0.borrow().copies
    }

    pub fn set_copy_succeeds(&self, succeeds: bool) {
        self.0.borrow_mut().copy_fails = !succeeds;
    }
}

impl TextArea for FakeTextArea {
    fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = value.to_string();
    }

    fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    fn select_and_copy(&self) -> bool {
        let mut state = self.0.borrow_mut();
        state.copies += 1;
        !state.copy_fails
    }
}

// Timer

type Callback = Box<dyn FnOnce()>;

#[derive(Default)]
struct TimerState {
    now: Duration,
    next_id: u64,
    scheduled: Vec<(u64, Duration, Callback)>,
    cancelled: usize,
}

/// Manually advanced clock
#[derive(Clone, Default)]
pub struct FakeTimer(Rc<RefCell<TimerState>>);

impl FakeTimer {
    /// Move time forward, firing due callbacks in order
    pub fn advance(&self, by: Duration) {
        let target = self.0.borrow().now + by;
        loop {
            let due = {
                let mut state = self.0.borrow_mut();
                let next = state
                    .scheduled
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, at, _))| *at <= target)
                    .min_by_key(|(_, (_, at, _))| *at)
                    .map(|(i, _)| i);
                match next {
                    Some(i) => {
                        let (_, at, callback) = state.scheduled.remove(i);
                        state.now = at;
                        Some(callback)
                    }
                    None => None,
                }
            };
            match due {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.0.borrow_mut().now = target;
    }

    pub fn pending(&self) -> usize {
        self.0.borrow().scheduled.len()
    }

    pub fn cancelled(&self) -> usize {
        self.0.borrow().cancelled
    }
}

impl Timer for FakeTimer {
    type Handle = u64;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> u64 {
        let mut state = self.0.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        let at = state.now + delay;
        state.scheduled.push((id, at, callback));
        id
    }

    fn cancel(&self, handle: u64) {
        let mut state = self.0.borrow_mut();
        let before = state.scheduled.len();
        state.scheduled.retain(|(id, _, _)| *id != handle);
        if state.scheduled.len() < before {
            state.cancelled += 1;
        }
    }
}

// Transport

enum Scripted {
    Ready(Result<HttpResponse, TransportError>),
    Held(oneshot::Receiver<Result<HttpResponse, TransportError>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub url: String,
    pub files: Vec<String>,
}

#[derive(Default)]
struct TransportState {
    queue: VecDeque<Scripted>,
    requests: Vec<Recorded>,
}

/// Replays scripted responses in request order
#[derive(Clone, Default)]
pub struct FakeTransport(Rc<RefCell<TransportState>>);

impl FakeTransport {
    pub fn respond(&self, result: Result<HttpResponse, TransportError>) {
        self.0.borrow_mut().queue.push_back(Scripted::Ready(result));
    }

    /// Queue a response that stays pending until the sender fires
    pub fn hold(&self) -> oneshot::Sender<Result<HttpResponse, TransportError>> {
        let (tx, rx) = oneshot::channel();
        self.0.borrow_mut().queue.push_back(Scripted::Held(rx));
        tx
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.0.borrow().requests.clone()
    }
}

impl Transport<FakePayload> for FakeTransport {
    async fn post(
        &self,
        endpoint: &str,
        payload: FakePayload,
    ) -> Result<HttpResponse, TransportError> {
        let next = {
            let mut state = self.0.borrow_mut();
            state.requests.push(Recorded {
                url: endpoint.to_string(),
                files: payload.files,
            });
            state.queue.pop_front()
        };

        match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Held(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError("request dropped".to_string()))),
            None => Err(TransportError("no scripted response".to_string())),
        }
    }
}

// Downloads

#[derive(Default)]
struct DownloadState {
    saved: Vec<(String, Vec<u8>)>,
    fails: bool,
}

#[derive(Clone, Default)]
pub struct FakeDownloader(Rc<RefCell<DownloadState>>);

impl FakeDownloader {
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.0.borrow().saved.clone()
    }

    pub fn set_fails(&self, fails: bool) {
        self.0.borrow_mut().fails = fails;
    }
}

impl Downloader for FakeDownloader {
    fn download(&self, filename: &str, bytes: &[u8]) -> Result<(), UiError> {
        let mut state = self.0.borrow_mut();
        if state.fails {
            return Err(UiError::Dom("createObjectURL failed".to_string()));
        }
        state.saved.push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}

// Whole page

/// A fully bound page plus handles for inspecting it
pub struct Harness {
    pub page: Page<FakePlatform>,
    pub overlay: FakeElement,
    pub notification: FakeElement,
    pub extracted: FakeElement,
    pub text_area: FakeTextArea,
    pub timer: FakeTimer,
    pub transport: FakeTransport,
    pub downloader: FakeDownloader,
    inputs: HashMap<Operation, FakeFileInput>,
    forms: HashMap<Operation, FakeForm>,
    panels: HashMap<String, FakeElement>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(UiConfig::default())
    }

    pub fn with_config(config: UiConfig) -> Self {
        let overlay = FakeElement::new("loadingOverlay");
        let notification = FakeElement::new("notification");
        let extracted = FakeElement::new("extractedText");
        let text_area = FakeTextArea::default();
        let timer = FakeTimer::default();
        let transport = FakeTransport::default();
        let downloader = FakeDownloader::default();

        let mut inputs = HashMap::new();
        let mut forms = HashMap::new();
        let mut panels = HashMap::new();
        let mut tab_buttons = Vec::new();
        let mut tab_panels = Vec::new();
        let mut operations = Vec::new();

        for (i, op) in Operation::ALL.into_iter().enumerate() {
            let id = op.id_prefix().to_string();
            let button = FakeElement::new(&id);
            let panel = FakeElement::new(&id);
            if i == 0 {
                button.add_class(crate::tabs::ACTIVE_CLASS);
                panel.add_class(crate::tabs::ACTIVE_CLASS);
            }
            tab_buttons.push((id.clone(), button));
            tab_panels.push((id.clone(), panel.clone()));
            panels.insert(id, panel);

            let input = FakeFileInput::default();
            let form = FakeForm::new(input.clone());
            inputs.insert(op, input.clone());
            forms.insert(op, form.clone());
            operations.push(OperationHandles {
                operation: op,
                zone: FakeElement::new(&op.upload_area_id()),
                input,
                list: Some(FakeFileList::default()),
                form,
            });
        }

        let handles = PageHandles {
            tab_buttons,
            tab_panels,
            operations,
            loading_overlay: Some(overlay.clone()),
            notification: Some(notification.clone()),
            extracted_text: Some(extracted.clone()),
            text_content: Some(text_area.clone()),
            timer: timer.clone(),
            transport: transport.clone(),
            downloader: downloader.clone(),
        };

        let page = match Page::new(handles, config) {
            Ok(page) => page,
            Err(e) => panic!("harness page failed to bind: {}", e),
        };

        Self {
            page,
            overlay,
            notification,
            extracted,
            text_area,
            timer,
            transport,
            downloader,
            inputs,
            forms,
            panels,
        }
    }

    /// Handles for a complete page, for tests that tamper with them
    pub fn handles() -> PageHandles<FakePlatform> {
        let operations = Operation::ALL
            .into_iter()
            .map(|op| {
                let input = FakeFileInput::default();
                OperationHandles {
                    operation: op,
                    zone: FakeElement::new(&op.upload_area_id()),
                    input: input.clone(),
                    list: None,
                    form: FakeForm::new(input),
                }
            })
            .collect();

        PageHandles {
            tab_buttons: Vec::new(),
            tab_panels: Vec::new(),
            operations,
            loading_overlay: Some(FakeElement::new("loadingOverlay")),
            notification: Some(FakeElement::new("notification")),
            extracted_text: Some(FakeElement::new("extractedText")),
            text_content: Some(FakeTextArea::default()),
            timer: FakeTimer::default(),
            transport: FakeTransport::default(),
            downloader: FakeDownloader::default(),
        }
    }

    pub fn select(&self, op: Operation, files: Vec<SelectedFileEntry>) {
        self.inputs[&op].set_files(files);
    }

    pub fn form(&self, op: Operation) -> FakeForm {
        self.forms[&op].clone()
    }

    pub fn submitter(&self, op: Operation) -> Rc<FormSubmitter<FakePlatform>> {
        match self.page.submitter(op) {
            Some(submitter) => submitter,
            None => panic!("no submitter for {:?}", op),
        }
    }

    pub fn tab_panel(&self, id: &str) -> FakeElement {
        self.panels[id].clone()
    }

    /// Every notification shown so far, oldest first
    pub fn notification_log(&self) -> Vec<(NotificationKind, String)> {
        let state = self.notification.0.borrow();
        state
            .text_log
            .iter()
            .zip(state.class_log.iter())
            .map(|(text, class)| {
                let kind = if class.split_whitespace().any(|c| c == "error") {
                    NotificationKind::Error
                } else {
                    NotificationKind::Success
                };
                (kind, text.clone())
            })
            .collect()
    }
}
