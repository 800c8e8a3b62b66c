//! Drag-and-drop upload zones
//!
//! One zone per operation, bound to that operation's native file input.
//! The browser binding is responsible for `preventDefault()` on dragover and
//! drop; everything else happens here.

use serde::Serialize;
use tracing::debug;

use crate::operation::Operation;
use crate::ui::{FileInput, FileListView, FileSet, Platform, UiElement};

const BORDER_HIGHLIGHT: &str = "#8b5cf6";
const BORDER_IDLE: &str = "#6366f1";
const SCALE_HIGHLIGHT: &str = "scale(1.02)";
const SCALE_IDLE: &str = "scale(1)";

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// A file currently held by an input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFileEntry {
    pub name: String,
    pub size: u64,
}

impl SelectedFileEntry {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// List label, e.g. "report.pdf (1.5 KB)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, format_file_size(self.size))
    }
}

/// Format a byte count as a human-readable size.
///
/// Values are rounded to two decimals with trailing zeros dropped
/// ("1 KB", "1.5 KB", "1.25 MB"). Sizes of 1 TiB and above stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut index = 0;
    while index + 1 < SIZE_UNITS.len() && bytes >= 1u64 << (10 * (index + 1)) {
        index += 1;
    }

    let value = bytes as f64 / (1u64 << (10 * index)) as f64;
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[index])
}

/// Drop target and click-to-browse trigger for one file input
pub struct UploadZone<P: Platform> {
    operation: Operation,
    zone: P::Element,
    input: P::FileInput,
    list: Option<P::FileList>,
}

impl<P: Platform> UploadZone<P> {
    pub fn new(
        operation: Operation,
        zone: P::Element,
        input: P::FileInput,
        list: Option<P::FileList>,
    ) -> Self {
        Self {
            operation,
            zone,
            input,
            list,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn allows_multiple(&self) -> bool {
        self.operation.allows_multiple()
    }

    /// The drop target element
    pub fn zone(&self) -> &P::Element {
        &self.zone
    }

    pub fn input(&self) -> &P::FileInput {
        &self.input
    }

    pub fn click(&self) {
        self.input.open_picker();
    }

    pub fn drag_over(&self) {
        self.zone.set_style("border-color", BORDER_HIGHLIGHT);
        self.zone.set_style("transform", SCALE_HIGHLIGHT);
    }

    pub fn drag_leave(&self) {
        self.zone.set_style("border-color", BORDER_IDLE);
        self.zone.set_style("transform", SCALE_IDLE);
    }

    /// Handle a drop. Returns `true` if the files were taken.
    pub fn drop_files(&self, files: <P::FileInput as FileInput>::Files) -> bool {
        self.drag_leave();

        if files.is_empty() {
            return false;
        }

        if files.len() > 1 && !self.allows_multiple() {
            debug!(
                operation = ?self.operation,
                count = files.len(),
                "multiple files dropped on a single-file zone"
            );
        }

        self.input.assign(files);
        self.files_changed();
        true
    }

    /// Re-render the file list from the input's current selection
    pub fn files_changed(&self) {
        let Some(list) = &self.list else {
            return;
        };

        let selected = self.input.selected();
        list.clear();
        for entry in &selected {
            list.append(&entry.label());
        }
        debug!(operation = ?self.operation, count = selected.len(), "file list rendered");
    }
}
