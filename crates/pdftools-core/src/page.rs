//! Page assembly
//!
//! Builds every component from injected handles and owns them for the page
//! lifetime. Components are reference-counted so event callbacks can hold
//! them directly.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};

use crate::config::UiConfig;
use crate::error::UiError;
use crate::notify::NotificationCenter;
use crate::operation::Operation;
use crate::output::TextOutput;
use crate::submit::{FormSubmitter, Services};
use crate::tabs::TabController;
use crate::ui::Platform;
use crate::upload::UploadZone;

pub const COPY_SUCCESS: &str = "Text copied to clipboard!";

/// Handles for one operation's upload zone and form
pub struct OperationHandles<P: Platform> {
    pub operation: Operation,
    pub zone: P::Element,
    pub input: P::FileInput,
    pub list: Option<P::FileList>,
    pub form: P::Form,
}

/// Everything the page binds to. Shared anchors are optional here so that
/// their absence is reported as an error instead of a panic.
pub struct PageHandles<P: Platform> {
    pub tab_buttons: Vec<(String, P::Element)>,
    pub tab_panels: Vec<(String, P::Element)>,
    pub operations: Vec<OperationHandles<P>>,
    pub loading_overlay: Option<P::Element>,
    pub notification: Option<P::Element>,
    pub extracted_text: Option<P::Element>,
    pub text_content: Option<P::TextArea>,
    pub timer: P::Timer,
    pub transport: P::Transport,
    pub downloader: P::Downloader,
}

struct Bound<P: Platform> {
    zone: Rc<UploadZone<P>>,
    submitter: Rc<FormSubmitter<P>>,
}

pub struct Page<P: Platform> {
    tabs: RefCell<TabController<P::Element>>,
    bound: Vec<Bound<P>>,
    services: Rc<Services<P>>,
}

impl<P: Platform> Page<P> {
    pub fn new(handles: PageHandles<P>, config: UiConfig) -> Result<Self, UiError> {
        let overlay = required(handles.loading_overlay, "loadingOverlay")?;
        let notification = required(handles.notification, "notification")?;
        let extracted = required(handles.extracted_text, "extractedText")?;
        let text = required(handles.text_content, "textContent")?;

        let services = Rc::new(Services {
            notifications: NotificationCenter::new(
                notification,
                overlay,
                handles.timer,
                config.notification_timeout(),
            ),
            transport: handles.transport,
            downloader: handles.downloader,
            output: TextOutput::new(extracted, text),
            config,
        });

        let bound: Vec<_> = handles
            .operations
            .into_iter()
            .map(|h| Bound {
                zone: Rc::new(UploadZone::new(h.operation, h.zone, h.input.clone(), h.list)),
                submitter: Rc::new(FormSubmitter::new(
                    h.operation,
                    h.form,
                    h.input,
                    Rc::clone(&services),
                )),
            })
            .collect();

        for op in Operation::ALL {
            if !bound.iter().any(|b| b.zone.operation() == op) {
                warn!(operation = ?op, "operation not available on this page");
            }
        }

        let tabs = TabController::new(handles.tab_buttons, handles.tab_panels);
        info!(
            operations = bound.len(),
            tabs = tabs.tab_ids().count(),
            "page bound"
        );

        Ok(Self {
            tabs: RefCell::new(tabs),
            bound,
            services,
        })
    }

    pub fn activate_tab(&self, tab_id: &str) -> Result<(), UiError> {
        self.tabs.borrow_mut().activate(tab_id)
    }

    pub fn active_tab(&self) -> Option<String> {
        self.tabs.borrow().active().map(str::to_string)
    }

    pub fn zone(&self, op: Operation) -> Option<Rc<UploadZone<P>>> {
        self.bound
            .iter()
            .find(|b| b.zone.operation() == op)
            .map(|b| Rc::clone(&b.zone))
    }

    pub fn submitter(&self, op: Operation) -> Option<Rc<FormSubmitter<P>>> {
        self.bound
            .iter()
            .find(|b| b.submitter.operation() == op)
            .map(|b| Rc::clone(&b.submitter))
    }

    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.bound.iter().map(|b| b.zone.operation())
    }

    pub fn notifications(&self) -> &NotificationCenter<P::Element, P::Timer> {
        &self.services.notifications
    }

    pub fn config(&self) -> &UiConfig {
        &self.services.config
    }

    /// Copy the extracted text to the clipboard.
    ///
    /// Always reports success; whether the copy worked is only logged.
    pub fn copy_text(&self) {
        self.services.output.copy();
        self.services.notifications.success(COPY_SUCCESS);
    }
}

fn required<T>(handle: Option<T>, id: &str) -> Result<T, UiError> {
    handle.ok_or_else(|| UiError::MissingElement(id.to_string()))
}
