//! Capabilities a host dialog lends to the page it is currently showing.

/// Host-side affordances a page may drive.
///
/// Every method has a no-op default so a host only implements what its
/// chrome actually has. All methods take `&self`: hosts run on a single UI
/// thread and keep their widget state behind `Cell`/`RefCell`.
pub trait PageControls {
    /// Ask the host to leave the current step.
    fn exit_page(&self) {}

    /// Replace the dialog title. The page passes rich-text markup.
    fn set_action_title(&self, _title: &str) {}

    /// Show or hide the Cancel/Close button.
    fn set_btn_cancel_visible(&self, _visible: bool) {}

    /// Let the user click Cancel/Close, or grey it out.
    fn set_btn_cancel_enabled(&self, _enabled: bool) {}

    /// Relabel Cancel/Close; `None` clears any previous tooltip.
    fn set_btn_cancel_text(&self, _label: &str, _tool_tip: Option<&str>) {}

    /// Show or hide the Back button.
    fn set_btn_back_visible(&self, _visible: bool) {}

    /// Let the user click Back, or grey it out.
    fn set_btn_back_enabled(&self, _enabled: bool) {}

    /// Relabel Back; `None` clears any previous tooltip.
    fn set_btn_back_text(&self, _label: &str, _tool_tip: Option<&str>) {}

    /// Show or hide the Continue button.
    fn set_btn_continue_visible(&self, _visible: bool) {}

    /// Let the user click Continue, or grey it out.
    fn set_btn_continue_enabled(&self, _enabled: bool) {}

    /// Relabel Continue; `None` clears any previous tooltip.
    fn set_btn_continue_text(&self, _label: &str, _tool_tip: Option<&str>) {}

    /// Show or hide the panel listing connected hardware wallets.
    fn set_hw_panel_visible(&self, _visible: bool) {}

    /// Allow or forbid the user switching to another hardware wallet.
    fn set_hw_change_enabled(&self, _enabled: bool) {}

    /// Replace the action area with a plain message.
    fn show_message_page(&self, _message: &str) {}

    /// Bring back the action area after a message page.
    fn show_action_page(&self) {}
}

/// Controls bound to nothing. A page holds these until the host injects its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoControls;

impl PageControls for NoControls {}
