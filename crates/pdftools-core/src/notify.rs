//! Notifications and the loading overlay
//!
//! A single notification element is shared by the whole page. Each new
//! notification cancels the pending auto-hide of the previous one, so the
//! latest message is always visible for the full timeout.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::ui::{Display, Timer, UiElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

impl NotificationKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            NotificationKind::Success => "notification",
            NotificationKind::Error => "notification error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationState {
    pub message: String,
    pub kind: NotificationKind,
    pub visible: bool,
}

pub struct NotificationCenter<E: UiElement, T: Timer> {
    notification: E,
    overlay: E,
    timer: T,
    timeout: Duration,
    state: Rc<RefCell<NotificationState>>,
    pending: RefCell<Option<T::Handle>>,
    generation: Rc<Cell<u64>>,
}

impl<E: UiElement, T: Timer> NotificationCenter<E, T> {
    pub fn new(notification: E, overlay: E, timer: T, timeout: Duration) -> Self {
        Self {
            notification,
            overlay,
            timer,
            timeout,
            state: Rc::new(RefCell::new(NotificationState::default())),
            pending: RefCell::new(None),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn notify(&self, message: &str, kind: NotificationKind) {
        self.cancel_pending();

        self.notification.set_text(message);
        self.notification.set_class_name(kind.class_name());
        self.notification.set_display(Display::Block);
        *self.state.borrow_mut() = NotificationState {
            message: message.to_string(),
            kind,
            visible: true,
        };
        debug!(?kind, text = message, "notification shown");

        let generation = self.bump_generation();
        let current = Rc::clone(&self.generation);
        let element = self.notification.clone();
        let state = Rc::clone(&self.state);
        let handle = self.timer.schedule(
            self.timeout,
            Box::new(move || {
                if current.get() == generation {
                    element.set_display(Display::None);
                    state.borrow_mut().visible = false;
                }
            }),
        );
        *self.pending.borrow_mut() = Some(handle);
    }

    pub fn success(&self, message: &str) {
        self.notify(message, NotificationKind::Success);
    }

    pub fn error(&self, message: &str) {
        self.notify(message, NotificationKind::Error);
    }

    /// Hide the notification now and drop its pending auto-hide
    pub fn hide(&self) {
        self.cancel_pending();
        self.bump_generation();
        self.notification.set_display(Display::None);
        self.state.borrow_mut().visible = false;
    }

    pub fn state(&self) -> NotificationState {
        self.state.borrow().clone()
    }

    pub fn show_loading(&self) {
        self.overlay.set_display(Display::Flex);
    }

    pub fn hide_loading(&self) {
        self.overlay.set_display(Display::None);
    }

    fn cancel_pending(&self) {
        if let Some(handle) = self.pending.borrow_mut().take() {
            self.timer.cancel(handle);
        }
    }

    fn bump_generation(&self) -> u64 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }
}
