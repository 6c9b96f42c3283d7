//! Shared fixtures for the wizard integration tests
#![allow(dead_code)]

use hwwallet_wizard::{ActionPage, ActionPageBase, AppConfig, HwDevice, HwDevices, PageControls};
use std::cell::RefCell;
use std::rc::Rc;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One invocation of a host control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ExitPage,
    SetActionTitle(String),
    CancelVisible(bool),
    CancelEnabled(bool),
    CancelText(String, Option<String>),
    BackVisible(bool),
    BackEnabled(bool),
    BackText(String, Option<String>),
    ContinueVisible(bool),
    ContinueEnabled(bool),
    ContinueText(String, Option<String>),
    HwPanelVisible(bool),
    HwChangeEnabled(bool),
    ShowMessagePage(String),
    ShowActionPage,
}

/// Controls that remember every call, in order
#[derive(Debug, Default)]
pub struct RecordingControls {
    calls: RefCell<Vec<Call>>,
}

impl RecordingControls {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

fn owned(tool_tip: Option<&str>) -> Option<String> {
    tool_tip.map(str::to_string)
}

impl PageControls for RecordingControls {
    fn exit_page(&self) {
        self.push(Call::ExitPage);
    }

    fn set_action_title(&self, title: &str) {
        self.push(Call::SetActionTitle(title.to_string()));
    }

    fn set_btn_cancel_visible(&self, visible: bool) {
        self.push(Call::CancelVisible(visible));
    }

    fn set_btn_cancel_enabled(&self, enabled: bool) {
        self.push(Call::CancelEnabled(enabled));
    }

    fn set_btn_cancel_text(&self, label: &str, tool_tip: Option<&str>) {
        self.push(Call::CancelText(label.to_string(), owned(tool_tip)));
    }

    fn set_btn_back_visible(&self, visible: bool) {
        self.push(Call::BackVisible(visible));
    }

    fn set_btn_back_enabled(&self, enabled: bool) {
        self.push(Call::BackEnabled(enabled));
    }

    fn set_btn_back_text(&self, label: &str, tool_tip: Option<&str>) {
        self.push(Call::BackText(label.to_string(), owned(tool_tip)));
    }

    fn set_btn_continue_visible(&self, visible: bool) {
        self.push(Call::ContinueVisible(visible));
    }

    fn set_btn_continue_enabled(&self, enabled: bool) {
        self.push(Call::ContinueEnabled(enabled));
    }

    fn set_btn_continue_text(&self, label: &str, tool_tip: Option<&str>) {
        self.push(Call::ContinueText(label.to_string(), owned(tool_tip)));
    }

    fn set_hw_panel_visible(&self, visible: bool) {
        self.push(Call::HwPanelVisible(visible));
    }

    fn set_hw_change_enabled(&self, enabled: bool) {
        self.push(Call::HwChangeEnabled(enabled));
    }

    fn show_message_page(&self, message: &str) {
        self.push(Call::ShowMessagePage(message.to_string()));
    }

    fn show_action_page(&self) {
        self.push(Call::ShowActionPage);
    }
}

/// A page that keeps the default behaviour but counts what reached it
pub struct CountingPage {
    base: ActionPageBase,
    pub next_steps: u32,
    pub prev_steps: u32,
    pub closes: u32,
    pub device_events: Vec<Option<String>>,
}

impl CountingPage {
    pub fn new(hw_devices: Rc<HwDevices>) -> Self {
        Self {
            base: ActionPageBase::new(Rc::new(AppConfig::default()), hw_devices, "Counting"),
            next_steps: 0,
            prev_steps: 0,
            closes: 0,
            device_events: Vec::new(),
        }
    }
}

impl ActionPage for CountingPage {
    fn base(&self) -> &ActionPageBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionPageBase {
        &mut self.base
    }

    fn on_close(&mut self) {
        self.closes += 1;
    }

    fn on_connected_hw_device_changed(&mut self, device: Option<&HwDevice>) {
        self.device_events
            .push(device.map(|d| d.device_id.clone()));
    }

    fn go_to_next_step(&mut self) {
        self.next_steps += 1;
    }

    fn go_to_prev_step(&mut self) {
        self.prev_steps += 1;
        self.exit_page();
    }
}
