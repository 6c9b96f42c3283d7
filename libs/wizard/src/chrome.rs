use crate::controls::PageControls;
use std::cell::{Cell, RefCell};

/// The three navigation buttons at the bottom of the wizard dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    Cancel,
    Back,
    Continue,
}

impl DialogButton {
    fn default_label(self) -> &'static str {
        match self {
            DialogButton::Cancel => "Cancel",
            DialogButton::Back => "Back",
            DialogButton::Continue => "Continue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub visible: bool,
    pub enabled: bool,
    pub label: String,
    pub tool_tip: Option<String>,
}

impl ButtonState {
    fn new(button: DialogButton) -> Self {
        Self {
            visible: true,
            enabled: true,
            label: button.default_label().to_string(),
            tool_tip: None,
        }
    }
}

/// What the central area of the dialog currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisiblePage {
    Action,
    Message(String),
}

/// Headless model of the wizard dialog's chrome
///
/// Implements [`PageControls`] by recording every change, so a toolkit
/// binding renders from one state object instead of wiring each callback to
/// a widget. Pending exit requests are counted until the host consumes them.
#[derive(Debug, PartialEq, Eq)]
pub struct DialogChrome {
    title: RefCell<String>,
    cancel: RefCell<ButtonState>,
    back: RefCell<ButtonState>,
    continue_: RefCell<ButtonState>,
    hw_panel_visible: Cell<bool>,
    hw_change_enabled: Cell<bool>,
    visible_page: RefCell<VisiblePage>,
    exit_requests: Cell<u32>,
}

impl Default for DialogChrome {
    fn default() -> Self {
        Self {
            title: RefCell::new(String::new()),
            cancel: RefCell::new(ButtonState::new(DialogButton::Cancel)),
            back: RefCell::new(ButtonState::new(DialogButton::Back)),
            continue_: RefCell::new(ButtonState::new(DialogButton::Continue)),
            hw_panel_visible: Cell::new(true),
            hw_change_enabled: Cell::new(true),
            visible_page: RefCell::new(VisiblePage::Action),
            exit_requests: Cell::new(0),
        }
    }
}

impl DialogChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    pub fn button(&self, button: DialogButton) -> ButtonState {
        self.button_cell(button).borrow().clone()
    }

    pub fn hw_panel_visible(&self) -> bool {
        self.hw_panel_visible.get()
    }

    pub fn hw_change_enabled(&self) -> bool {
        self.hw_change_enabled.get()
    }

    pub fn visible_page(&self) -> VisiblePage {
        self.visible_page.borrow().clone()
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requests.get() > 0
    }

    /// Consume one pending exit request
    pub fn take_exit_request(&self) -> bool {
        let pending = self.exit_requests.get();
        if pending == 0 {
            return false;
        }
        self.exit_requests.set(pending - 1);
        true
    }

    fn button_cell(&self, button: DialogButton) -> &RefCell<ButtonState> {
        match button {
            DialogButton::Cancel => &self.cancel,
            DialogButton::Back => &self.back,
            DialogButton::Continue => &self.continue_,
        }
    }

    fn update_button(&self, button: DialogButton, update: impl FnOnce(&mut ButtonState)) {
        update(&mut *self.button_cell(button).borrow_mut());
    }

    fn set_button_text(&self, button: DialogButton, label: &str, tool_tip: Option<&str>) {
        self.update_button(button, |state| {
            state.label = label.to_string();
            state.tool_tip = tool_tip.map(str::to_string);
        });
    }
}

impl PageControls for DialogChrome {
    fn exit_page(&self) {
        self.exit_requests.set(self.exit_requests.get() + 1);
    }

    fn set_action_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }

    fn set_btn_cancel_visible(&self, visible: bool) {
        self.update_button(DialogButton::Cancel, |s| s.visible = visible);
    }

    fn set_btn_cancel_enabled(&self, enabled: bool) {
        self.update_button(DialogButton::Cancel, |s| s.enabled = enabled);
    }

    fn set_btn_cancel_text(&self, label: &str, tool_tip: Option<&str>) {
        self.set_button_text(DialogButton::Cancel, label, tool_tip);
    }

    fn set_btn_back_visible(&self, visible: bool) {
        self.update_button(DialogButton::Back, |s| s.visible = visible);
    }

    fn set_btn_back_enabled(&self, enabled: bool) {
        self.update_button(DialogButton::Back, |s| s.enabled = enabled);
    }

    fn set_btn_back_text(&self, label: &str, tool_tip: Option<&str>) {
        self.set_button_text(DialogButton::Back, label, tool_tip);
    }

    fn set_btn_continue_visible(&self, visible: bool) {
        self.update_button(DialogButton::Continue, |s| s.visible = visible);
    }

    fn set_btn_continue_enabled(&self, enabled: bool) {
        self.update_button(DialogButton::Continue, |s| s.enabled = enabled);
    }

    fn set_btn_continue_text(&self, label: &str, tool_tip: Option<&str>) {
        self.set_button_text(DialogButton::Continue, label, tool_tip);
    }

    fn set_hw_panel_visible(&self, visible: bool) {
        self.hw_panel_visible.set(visible);
    }

    fn set_hw_change_enabled(&self, enabled: bool) {
        self.hw_change_enabled.set(enabled);
    }

    fn show_message_page(&self, message: &str) {
        *self.visible_page.borrow_mut() = VisiblePage::Message(message.to_string());
    }

    fn show_action_page(&self) {
        *self.visible_page.borrow_mut() = VisiblePage::Action;
    }
}
