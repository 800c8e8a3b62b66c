//! Form submission and response handling
//!
//! One [`FormSubmitter`] per operation form. A submission runs:
//!
//! 1. double-submit guard and optional preflight
//! 2. encode the form, show the loading overlay
//! 3. POST and await the response (the only suspension point)
//! 4. download the payload or show the extracted text
//! 5. notify, then hide the loading overlay exactly once

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::UiConfig;
use crate::error::SubmitError;
use crate::notify::NotificationCenter;
use crate::operation::{Operation, ResponseMode};
use crate::output::TextOutput;
use crate::transport::{filename_from_disposition, ErrorBody, HttpResponse, TextBody, Transport};
use crate::ui::{Downloader, FileInput, FormHandle, Platform};
use crate::validation::{preflight, PreflightInput};

/// Fallback shown when the server gives no usable error message
pub const GENERIC_ERROR: &str = "An error occurred";

/// Collaborators shared by every form on the page
pub struct Services<P: Platform> {
    pub notifications: NotificationCenter<P::Element, P::Timer>,
    pub transport: P::Transport,
    pub downloader: P::Downloader,
    pub output: TextOutput<P>,
    pub config: UiConfig,
}

/// One submit-to-response cycle
pub struct PendingRequest<B> {
    pub url: String,
    pub payload: B,
    pub mode: ResponseMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Downloaded { filename: String },
    TextExtracted { chars: usize },
    Failed(SubmitError),
    /// The same form was already in flight
    Ignored,
}

pub struct FormSubmitter<P: Platform> {
    operation: Operation,
    form: P::Form,
    input: P::FileInput,
    services: Rc<Services<P>>,
    in_flight: Cell<bool>,
}

impl<P: Platform> FormSubmitter<P> {
    pub fn new(
        operation: Operation,
        form: P::Form,
        input: P::FileInput,
        services: Rc<Services<P>>,
    ) -> Self {
        Self {
            operation,
            form,
            input,
            services,
            in_flight: Cell::new(false),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn form(&self) -> &P::Form {
        &self.form
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Run one submission. The caller has already prevented the default
    /// form navigation.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.in_flight.get() {
            debug!(operation = ?self.operation, "submit ignored, request in flight");
            return SubmitOutcome::Ignored;
        }

        let notifications = &self.services.notifications;

        if let Err(err) = self.check() {
            notifications.error(&err.to_string());
            return SubmitOutcome::Failed(err);
        }

        let payload = match self.form.encode() {
            Ok(payload) => payload,
            Err(e) => {
                let err = SubmitError::Validation(format!("Could not read form: {}", e));
                notifications.error(&err.to_string());
                return SubmitOutcome::Failed(err);
            }
        };

        let request = PendingRequest {
            url: self.services.config.url_for(self.operation.endpoint()),
            payload,
            mode: self.operation.response_mode(),
        };

        self.in_flight.set(true);
        self.form.set_busy(true);
        notifications.show_loading();

        let outcome = match self.exchange(request).await {
            Ok(outcome) => {
                notifications.success(self.operation.success_message());
                outcome
            }
            Err(err) => {
                warn!(operation = ?self.operation, error = %err, "submission failed");
                notifications.error(&err.to_string());
                SubmitOutcome::Failed(err)
            }
        };

        notifications.hide_loading();
        self.form.set_busy(false);
        self.in_flight.set(false);
        outcome
    }

    fn check(&self) -> Result<(), SubmitError> {
        let config = &self.services.config;
        if !config.validate_before_submit {
            return Ok(());
        }

        let files = self.input.selected();
        let page_range = self.form.field("page_range");
        let angle = self.form.field("angle");
        let input = PreflightInput {
            files: &files,
            page_range: page_range.as_deref(),
            angle: angle.as_deref(),
        };
        preflight(self.operation, &input, config.max_upload_bytes)
    }

    async fn exchange(
        &self,
        request: PendingRequest<<P::Form as FormHandle>::Payload>,
    ) -> Result<SubmitOutcome, SubmitError> {
        info!(url = %request.url, mode = ?request.mode, "submitting form");

        let response = self
            .services
            .transport
            .post(&request.url, request.payload)
            .await?;
        debug!(status = response.status, bytes = response.body.len(), "response received");

        match request.mode {
            ResponseMode::Download => self.handle_download(response),
            ResponseMode::Text => self.handle_text(response),
        }
    }

    fn handle_download(&self, response: HttpResponse) -> Result<SubmitOutcome, SubmitError> {
        if !response.ok() {
            return Err(server_error(&response));
        }

        let filename = response
            .content_disposition
            .as_deref()
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| self.services.config.default_download_name.clone());

        self.services
            .downloader
            .download(&filename, &response.body)
            .map_err(|e| SubmitError::Download(e.to_string()))?;

        info!(%filename, bytes = response.body.len(), "download started");
        Ok(SubmitOutcome::Downloaded { filename })
    }

    fn handle_text(&self, response: HttpResponse) -> Result<SubmitOutcome, SubmitError> {
        if !response.ok() {
            return Err(server_error(&response));
        }

        let body: TextBody = serde_json::from_slice(&response.body)
            .map_err(|e| SubmitError::InvalidResponse(e.to_string()))?;
        let text = body
            .text
            .ok_or_else(|| SubmitError::InvalidResponse("missing 'text' field".to_string()))?;

        self.services.output.show(&text);
        Ok(SubmitOutcome::TextExtracted {
            chars: text.chars().count(),
        })
    }
}

/// Map a non-success response to the message the user sees
fn server_error(response: &HttpResponse) -> SubmitError {
    let message = match serde_json::from_slice::<ErrorBody>(&response.body) {
        Ok(ErrorBody {
            error: Some(message),
        }) if !message.is_empty() => message,
        Ok(_) => GENERIC_ERROR.to_string(),
        Err(_) => format!("{} (HTTP {})", GENERIC_ERROR, response.status),
    };

    SubmitError::Server {
        status: response.status,
        message,
    }
}
