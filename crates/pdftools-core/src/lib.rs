//! Interaction layer for the PDF tools page
//!
//! Tab navigation, drag-and-drop upload zones, form submission to the PDF
//! backend and result presentation (download or extracted text), with
//! loading and notification feedback.
//!
//! Nothing here touches the browser directly. Components receive UI handles
//! through the traits in [`ui`], grouped by a [`ui::Platform`]; the wasm app
//! provides the `web-sys` implementation.
//!
//! ## Flow
//!
//! ```text
//! UploadZone ──► file input ──► FormSubmitter ──► Transport (POST)
//!                                     │
//!                     ┌───────────────┴───────────────┐
//!                 Downloader                      TextOutput
//!                     └──────► NotificationCenter ◄───┘
//! ```

pub mod config;
pub mod error;
pub mod notify;
pub mod operation;
pub mod output;
pub mod page;
pub mod submit;
pub mod tabs;
pub mod transport;
pub mod ui;
pub mod upload;
pub mod validation;

#[cfg(test)]
mod testing;

pub use config::UiConfig;
pub use error::{ConfigError, SubmitError, TransportError, UiError};
pub use notify::{NotificationCenter, NotificationKind, NotificationState};
pub use operation::{Operation, OperationInfo, ResponseMode};
pub use output::TextOutput;
pub use page::{OperationHandles, Page, PageHandles};
pub use submit::{FormSubmitter, PendingRequest, Services, SubmitOutcome};
pub use tabs::TabController;
pub use transport::{filename_from_disposition, HttpResponse, Transport};
pub use upload::{format_file_size, SelectedFileEntry, UploadZone};
pub use validation::parse_page_range;
