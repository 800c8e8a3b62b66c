//! Extracted-text panel

use tracing::{debug, warn};

use crate::ui::{Display, Platform, TextArea, UiElement};

pub struct TextOutput<P: Platform> {
    container: P::Element,
    text: P::TextArea,
}

impl<P: Platform> TextOutput<P> {
    pub fn new(container: P::Element, text: P::TextArea) -> Self {
        Self { container, text }
    }

    /// Fill the text area and reveal the panel
    pub fn show(&self, text: &str) {
        self.text.set_value(text);
        self.container.set_display(Display::Block);
    }

    pub fn value(&self) -> String {
        self.text.value()
    }

    /// Select the text and copy it. The result is informational only.
    pub fn copy(&self) -> bool {
        let copied = self.text.select_and_copy();
        if copied {
            debug!("extracted text copied");
        } else {
            warn!("copy command was not accepted");
        }
        copied
    }
}
