use crate::config::AppConfig;
use crate::controls::{NoControls, PageControls};
use crate::device::{HwDevice, HwDevices, Subscription};
use crate::error::{WizardError, WizardResult};
use std::cell::{BorrowError, BorrowMutError, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Dialog title shared by every firmware update step
pub const ACTION_TITLE: &str = "Update hardware wallet firmware";

/// Compose the bold title markup, appending ` - <subtitle>` when one is given
pub fn format_action_title(subtitle: Option<&str>) -> String {
    match subtitle {
        Some(sub) if !sub.is_empty() => format!("<b>{ACTION_TITLE} - {sub}</b>"),
        _ => format!("<b>{ACTION_TITLE}</b>"),
    }
}

/// State every wizard step carries: its title, its collaborators and the
/// controls lent by the host dialog.
pub struct ActionPageBase {
    action_title: String,
    app_config: Rc<AppConfig>,
    hw_devices: Rc<HwDevices>,
    controls: Rc<dyn PageControls>,
    controls_bound: bool,
    device_subscription: Option<Subscription>,
}

impl ActionPageBase {
    pub fn new(
        app_config: Rc<AppConfig>,
        hw_devices: Rc<HwDevices>,
        action_title: impl Into<String>,
    ) -> Self {
        Self {
            action_title: action_title.into(),
            app_config,
            hw_devices,
            controls: Rc::new(NoControls),
            controls_bound: false,
            device_subscription: None,
        }
    }

    pub fn action_title(&self) -> &str {
        &self.action_title
    }

    pub fn app_config(&self) -> &Rc<AppConfig> {
        &self.app_config
    }

    pub fn hw_devices(&self) -> &Rc<HwDevices> {
        &self.hw_devices
    }

    /// Bind the page to the host's live chrome. Stored as given.
    pub fn set_control_functions(&mut self, controls: Rc<dyn PageControls>) {
        log::debug!("Binding controls to page '{}'", self.action_title);
        self.controls = controls;
        self.controls_bound = true;
    }

    pub fn has_controls(&self) -> bool {
        self.controls_bound
    }

    /// Whether the page still listens for connected-device changes
    pub fn is_subscribed(&self) -> bool {
        self.device_subscription.is_some()
    }

    /// Stop listening for connected-device changes. Idempotent.
    pub fn release_device_subscription(&mut self) {
        if let Some(subscription) = self.device_subscription.take() {
            log::debug!(
                "Page '{}' stops listening for device changes",
                self.action_title
            );
            subscription.release();
        }
    }

    /// Push the composed title through the host's title setter
    ///
    /// This is the only place the title format lives; pages change the
    /// subtitle, never the title itself.
    pub fn update_action_subtitle(&self, subtitle: Option<&str>) {
        self.set_action_title(&format_action_title(subtitle));
    }

    pub fn exit_page(&self) {
        log::trace!("exit_page");
        self.controls.exit_page();
    }

    pub fn set_action_title(&self, title: &str) {
        log::trace!("set_action_title({title})");
        self.controls.set_action_title(title);
    }

    pub fn set_btn_cancel_visible(&self, visible: bool) {
        log::trace!("set_btn_cancel_visible({visible})");
        self.controls.set_btn_cancel_visible(visible);
    }

    pub fn set_btn_cancel_enabled(&self, enabled: bool) {
        log::trace!("set_btn_cancel_enabled({enabled})");
        self.controls.set_btn_cancel_enabled(enabled);
    }

    pub fn set_btn_cancel_text(&self, label: &str, tool_tip: Option<&str>) {
        log::trace!("set_btn_cancel_text({label}, {tool_tip:?})");
        self.controls.set_btn_cancel_text(label, tool_tip);
    }

    pub fn set_btn_back_visible(&self, visible: bool) {
        log::trace!("set_btn_back_visible({visible})");
        self.controls.set_btn_back_visible(visible);
    }

    pub fn set_btn_back_enabled(&self, enabled: bool) {
        log::trace!("set_btn_back_enabled({enabled})");
        self.controls.set_btn_back_enabled(enabled);
    }

    pub fn set_btn_back_text(&self, label: &str, tool_tip: Option<&str>) {
        log::trace!("set_btn_back_text({label}, {tool_tip:?})");
        self.controls.set_btn_back_text(label, tool_tip);
    }

    pub fn set_btn_continue_visible(&self, visible: bool) {
        log::trace!("set_btn_continue_visible({visible})");
        self.controls.set_btn_continue_visible(visible);
    }

    pub fn set_btn_continue_enabled(&self, enabled: bool) {
        log::trace!("set_btn_continue_enabled({enabled})");
        self.controls.set_btn_continue_enabled(enabled);
    }

    pub fn set_btn_continue_text(&self, label: &str, tool_tip: Option<&str>) {
        log::trace!("set_btn_continue_text({label}, {tool_tip:?})");
        self.controls.set_btn_continue_text(label, tool_tip);
    }

    pub fn set_hw_panel_visible(&self, visible: bool) {
        log::trace!("set_hw_panel_visible({visible})");
        self.controls.set_hw_panel_visible(visible);
    }

    pub fn set_hw_change_enabled(&self, enabled: bool) {
        log::trace!("set_hw_change_enabled({enabled})");
        self.controls.set_hw_change_enabled(enabled);
    }

    pub fn show_message_page(&self, message: &str) {
        log::trace!("show_message_page({message})");
        self.controls.show_message_page(message);
    }

    pub fn show_action_page(&self) {
        log::trace!("show_action_page");
        self.controls.show_action_page();
    }
}

impl fmt::Debug for ActionPageBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionPageBase")
            .field("action_title", &self.action_title)
            .field("controls_bound", &self.controls_bound)
            .field("subscribed", &self.is_subscribed())
            .finish_non_exhaustive()
    }
}

/// One step of the firmware update wizard
///
/// Concrete steps embed an [`ActionPageBase`] and override the hooks they
/// need. The host drives the page only through these methods, in this order:
/// `set_control_functions`, `initialize`, any number of clicks and device
/// events, then `on_close`.
pub trait ActionPage {
    fn base(&self) -> &ActionPageBase;

    fn base_mut(&mut self) -> &mut ActionPageBase;

    fn set_control_functions(&mut self, controls: Rc<dyn PageControls>) {
        self.base_mut().set_control_functions(controls);
    }

    /// First render of the step. Called once per activation, after the
    /// controls are bound.
    fn initialize(&mut self) {
        self.base().update_action_subtitle(None);
    }

    /// The step is being torn down. Must cope with `initialize` never having run.
    fn on_close(&mut self) {}

    /// The notifier reported a different connected device (or none)
    fn on_connected_hw_device_changed(&mut self, _device: Option<&HwDevice>) {}

    fn exit_page(&self) {
        self.base().exit_page();
    }

    fn go_to_next_step(&mut self) {}

    /// Going back leaves the step unless a page knows better
    fn go_to_prev_step(&mut self) {
        self.exit_page();
    }

    fn on_btn_continue_clicked(&mut self) {
        self.go_to_next_step();
    }

    fn on_btn_back_clicked(&mut self) {
        self.go_to_prev_step();
    }

    /// Asked right before the dialog honours Cancel/Close.
    ///
    /// Returning `false` keeps the page open. Must not block.
    fn on_before_cancel(&self) -> bool {
        true
    }
}

/// A device change that reached the page while it was busy
struct DeferredChange {
    device: Option<HwDevice>,
}

/// A mounted page, as the host holds it
///
/// Shared between the host and the page's device-change listener. Only
/// [`mount`] builds one, so every page a host can open is registered on its
/// notifier. A change reported while the page is borrowed (typically fired
/// from one of its own handlers) is kept, latest wins, until
/// [`deliver_deferred_device_change`](Self::deliver_deferred_device_change)
/// hands it over.
pub struct SharedPage<P> {
    page: Rc<RefCell<P>>,
    deferred: Rc<RefCell<Option<DeferredChange>>>,
}

impl<P> Clone for SharedPage<P> {
    fn clone(&self) -> Self {
        Self {
            page: Rc::clone(&self.page),
            deferred: Rc::clone(&self.deferred),
        }
    }
}

impl<P: ActionPage + 'static> SharedPage<P> {
    pub fn borrow(&self) -> Ref<'_, P> {
        self.page.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, P> {
        self.page.borrow_mut()
    }

    pub fn try_borrow(&self) -> Result<Ref<'_, P>, BorrowError> {
        self.page.try_borrow()
    }

    pub fn try_borrow_mut(&self) -> Result<RefMut<'_, P>, BorrowMutError> {
        self.page.try_borrow_mut()
    }

    pub fn has_deferred_device_change(&self) -> bool {
        self.deferred.borrow().is_some()
    }

    /// Hand the page the device change it missed while busy, if any
    ///
    /// Keeps going while the page's handler itself causes further changes.
    pub fn deliver_deferred_device_change(&self) -> WizardResult<()> {
        while self.has_deferred_device_change() {
            let mut page = self
                .page
                .try_borrow_mut()
                .map_err(|_| WizardError::PageBusy)?;
            let Some(change) = self.deferred.borrow_mut().take() else {
                break;
            };
            log::debug!("Delivering deferred device change");
            page.on_connected_hw_device_changed(change.device.as_ref());
        }
        Ok(())
    }

    pub(crate) fn discard_deferred_device_change(&self) {
        self.deferred.borrow_mut().take();
    }

    /// Register `page` (the borrowed content of `self`) on its notifier
    /// unless it already listens
    pub(crate) fn attach_listener(&self, page: &mut P) {
        if page.base().is_subscribed() {
            return;
        }

        let weak = Rc::downgrade(&self.page);
        let deferred = Rc::clone(&self.deferred);
        let subscription = page.base().hw_devices().subscribe(move |device| {
            let Some(page) = weak.upgrade() else {
                return;
            };
            match page.try_borrow_mut() {
                Ok(mut page) => page.on_connected_hw_device_changed(device),
                Err(_) => {
                    log::debug!("Page busy, deferring connected device change");
                    *deferred.borrow_mut() = Some(DeferredChange {
                        device: device.cloned(),
                    });
                }
            };
        });

        page.base_mut().device_subscription = Some(subscription);
    }
}

/// Hand a freshly built page to the host
///
/// Registers the page on its notifier's connected-device event and keeps the
/// subscription in the page, so it lasts until the page releases it or is
/// dropped.
pub fn mount<P>(page: P) -> SharedPage<P>
where
    P: ActionPage + 'static,
{
    let shared = SharedPage {
        page: Rc::new(RefCell::new(page)),
        deferred: Rc::new(RefCell::new(None)),
    };
    shared.attach_listener(&mut shared.page.borrow_mut());
    shared
}
