//! The six backend operations and the page anchors each one binds to

use serde::Serialize;

/// How a successful response is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// Binary payload saved through a download link
    Download,
    /// JSON `{"text": ...}` shown in the text area
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Merge,
    Split,
    Rotate,
    ExtractText,
    Compress,
    Watermark,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Merge,
        Operation::Split,
        Operation::Rotate,
        Operation::ExtractText,
        Operation::Compress,
        Operation::Watermark,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::Merge => "/merge",
            Operation::Split => "/split",
            Operation::Rotate => "/rotate",
            Operation::ExtractText => "/extract-text",
            Operation::Compress => "/compress",
            Operation::Watermark => "/watermark",
        }
    }

    pub fn from_endpoint(endpoint: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.endpoint() == endpoint)
    }

    /// Prefix shared by this operation's element ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Operation::Merge => "merge",
            Operation::Split => "split",
            Operation::Rotate => "rotate",
            Operation::ExtractText => "extract",
            Operation::Compress => "compress",
            Operation::Watermark => "watermark",
        }
    }

    pub fn upload_area_id(&self) -> String {
        format!("{}UploadArea", self.id_prefix())
    }

    /// `mergeFiles` for the multi-file input, `<op>File` otherwise
    pub fn input_id(&self) -> String {
        if self.allows_multiple() {
            format!("{}Files", self.id_prefix())
        } else {
            format!("{}File", self.id_prefix())
        }
    }

    pub fn file_list_id(&self) -> String {
        format!("{}FileList", self.id_prefix())
    }

    pub fn form_id(&self) -> String {
        format!("{}Form", self.id_prefix())
    }

    pub fn allows_multiple(&self) -> bool {
        matches!(self, Operation::Merge)
    }

    pub fn response_mode(&self) -> ResponseMode {
        match self {
            Operation::ExtractText => ResponseMode::Text,
            _ => ResponseMode::Download,
        }
    }

    /// Multipart field name carrying the file(s)
    pub fn file_field(&self) -> &'static str {
        if self.allows_multiple() {
            "files"
        } else {
            "file"
        }
    }

    /// Name the backend gives the result; `None` for text extraction
    pub fn download_name(&self) -> Option<&'static str> {
        match self {
            Operation::Merge => Some("merged.pdf"),
            Operation::Split => Some("split.pdf"),
            Operation::Rotate => Some("rotated.pdf"),
            Operation::Compress => Some("compressed.pdf"),
            Operation::Watermark => Some("watermarked.pdf"),
            Operation::ExtractText => None,
        }
    }

    /// Message shown after a successful submission
    pub fn success_message(&self) -> &'static str {
        match self.response_mode() {
            ResponseMode::Download => "File processed successfully!",
            ResponseMode::Text => "Text extracted successfully!",
        }
    }
}

/// Catalogue entry exported to JavaScript
#[derive(Debug, Clone, Serialize)]
pub struct OperationInfo {
    pub operation: Operation,
    pub endpoint: &'static str,
    pub form_id: String,
    pub upload_area_id: String,
    pub input_id: String,
    pub file_list_id: String,
    pub file_field: &'static str,
    pub multiple: bool,
    pub response_mode: ResponseMode,
    pub download_name: Option<&'static str>,
}

impl From<Operation> for OperationInfo {
    fn from(op: Operation) -> Self {
        Self {
            operation: op,
            endpoint: op.endpoint(),
            form_id: op.form_id(),
            upload_area_id: op.upload_area_id(),
            input_id: op.input_id(),
            file_list_id: op.file_list_id(),
            file_field: op.file_field(),
            multiple: op.allows_multiple(),
            response_mode: op.response_mode(),
            download_name: op.download_name(),
        }
    }
}
