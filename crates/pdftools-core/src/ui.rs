//! UI handle traits
//!
//! Every component receives the handles it needs at construction time instead
//! of looking elements up by id. The wasm app implements these traits over
//! `web-sys`; tests implement them over plain `RefCell` state.
//!
//! Handles are cheap clones of a shared underlying element (like
//! `web_sys::Element`), so all mutators take `&self`.

use std::time::Duration;

use crate::error::UiError;
use crate::transport::Transport;
use crate::upload::SelectedFileEntry;

/// CSS `display` values the page toggles between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    Flex,
}

impl Display {
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::None => "none",
            Display::Block => "block",
            Display::Flex => "flex",
        }
    }
}

/// A generic page element: tab buttons, panels, upload zones, overlays.
pub trait UiElement: Clone + 'static {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    /// Replace the whole class attribute
    fn set_class_name(&self, name: &str);
    fn set_text(&self, text: &str);
    fn set_style(&self, property: &str, value: &str);
    fn set_display(&self, display: Display);
}

/// A set of files delivered by a drop event
pub trait FileSet {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The native file input an upload zone is bound to
pub trait FileInput: Clone + 'static {
    type Files: FileSet;

    /// Open the native file picker
    fn open_picker(&self);

    /// Replace the input's current file set
    fn assign(&self, files: Self::Files);

    /// Snapshot of the currently selected files
    fn selected(&self) -> Vec<SelectedFileEntry>;
}

/// Container that lists the selected files under an upload zone
pub trait FileListView: 'static {
    fn clear(&self);
    fn append(&self, label: &str);
}

/// A submittable operation form
pub trait FormHandle: 'static {
    /// Encoded body, e.g. `FormData` in the browser
    type Payload;

    fn encode(&self) -> Result<Self::Payload, UiError>;

    /// Current value of a named non-file field
    fn field(&self, name: &str) -> Option<String>;

    /// Disable or re-enable the form's submit control
    fn set_busy(&self, busy: bool);
}

/// The extracted-text area
pub trait TextArea: 'static {
    fn set_value(&self, value: &str);
    fn value(&self) -> String;

    /// Select the content and issue a copy command.
    /// Returns whether the platform reported success.
    fn select_and_copy(&self) -> bool;
}

/// Deferred callbacks with cancellable handles
pub trait Timer: 'static {
    type Handle;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;

    /// Cancelling an already-fired handle is a no-op
    fn cancel(&self, handle: Self::Handle);
}

/// Saves a downloaded payload through a transient link
pub trait Downloader: 'static {
    fn download(&self, filename: &str, bytes: &[u8]) -> Result<(), UiError>;
}

/// Bundles the concrete handle types of one platform
pub trait Platform: 'static {
    type Element: UiElement;
    type FileInput: FileInput;
    type FileList: FileListView;
    type Form: FormHandle;
    type TextArea: TextArea;
    type Timer: Timer;
    type Transport: Transport<<Self::Form as FormHandle>::Payload>;
    type Downloader: Downloader;
}
