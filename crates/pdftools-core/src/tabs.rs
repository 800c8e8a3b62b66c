//! Tab switching
//!
//! A tab is a button carrying a `data-tab` id and the content panel with that
//! id. The active button and panel both carry the `active` class.

use tracing::{debug, warn};

use crate::error::UiError;
use crate::ui::UiElement;

pub const ACTIVE_CLASS: &str = "active";

struct Entry<E> {
    id: String,
    element: E,
}

pub struct TabController<E: UiElement> {
    buttons: Vec<Entry<E>>,
    panels: Vec<Entry<E>>,
    active: Option<String>,
}

impl<E: UiElement> TabController<E> {
    /// Build from `(tab id, button)` and `(panel id, panel)` pairs.
    ///
    /// A button already marked active is adopted as the current tab, provided
    /// its panel exists.
    pub fn new(buttons: Vec<(String, E)>, panels: Vec<(String, E)>) -> Self {
        let buttons: Vec<_> = buttons
            .into_iter()
            .map(|(id, element)| Entry { id, element })
            .collect();
        let panels: Vec<_> = panels
            .into_iter()
            .map(|(id, element)| Entry { id, element })
            .collect();

        let active = buttons
            .iter()
            .find(|b| b.element.has_class(ACTIVE_CLASS))
            .filter(|b| panels.iter().any(|p| p.id == b.id))
            .map(|b| b.id.clone());

        Self {
            buttons,
            panels,
            active,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn tab_ids(&self) -> impl Iterator<Item = &str> {
        self.buttons.iter().map(|b| b.id.as_str())
    }

    /// Activate the tab `tab_id`.
    ///
    /// Fails without touching the page if no panel has that id.
    pub fn activate(&mut self, tab_id: &str) -> Result<(), UiError> {
        if !self.panels.iter().any(|p| p.id == tab_id) {
            warn!(tab_id, "tab has no matching panel");
            return Err(UiError::UnknownTab(tab_id.to_string()));
        }

        for entry in self.buttons.iter().chain(self.panels.iter()) {
            if entry.id == tab_id {
                entry.element.add_class(ACTIVE_CLASS);
            } else {
                entry.element.remove_class(ACTIVE_CLASS);
            }
        }

        debug!(tab_id, "tab activated");
        self.active = Some(tab_id.to_string());
        Ok(())
    }
}
