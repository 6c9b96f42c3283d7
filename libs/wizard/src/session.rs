// Host-side driver for one activation of a wizard page
//
// Keeps the page contract's call order in one place: controls are bound
// before `initialize`, clicks only reach an open page, and closing always
// runs `on_close` and then drops the page's device-change subscription.
// Device changes the page missed while busy are handed over as soon as the
// session lets go of it.

use crate::controls::PageControls;
use crate::error::{WizardError, WizardResult};
use crate::page::{ActionPage, SharedPage};
use std::rc::Rc;

pub struct WizardSession<P: ActionPage + 'static> {
    page: SharedPage<P>,
    closed: bool,
}

impl<P: ActionPage + 'static> WizardSession<P> {
    /// Activate `page`: bind `controls`, then run its first render
    ///
    /// A page reopened after an earlier session closed it is registered on
    /// its notifier again.
    pub fn open(page: SharedPage<P>, controls: Rc<dyn PageControls>) -> WizardResult<Self> {
        {
            let mut active = page.try_borrow_mut().map_err(|_| WizardError::PageBusy)?;
            page.attach_listener(&mut active);
            active.set_control_functions(controls);
            active.initialize();
            log::debug!("Opened wizard page '{}'", active.base().action_title());
        }
        page.deliver_deferred_device_change()?;

        Ok(Self {
            page,
            closed: false,
        })
    }

    pub fn page(&self) -> &SharedPage<P> {
        &self.page
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn continue_clicked(&mut self) -> WizardResult<()> {
        self.dispatch("continue", <P as ActionPage>::on_btn_continue_clicked)
    }

    pub fn back_clicked(&mut self) -> WizardResult<()> {
        self.dispatch("back", <P as ActionPage>::on_btn_back_clicked)
    }

    /// Cancel/Close was clicked. Returns whether the page let the dialog close.
    pub fn request_cancel(&mut self) -> WizardResult<bool> {
        if self.closed {
            return Ok(true);
        }

        let permitted = self
            .page
            .try_borrow()
            .map_err(|_| WizardError::PageBusy)?
            .on_before_cancel();

        if permitted {
            self.close()?;
        } else {
            log::debug!("Page vetoed cancel");
            self.page.deliver_deferred_device_change()?;
        }
        Ok(permitted)
    }

    /// Tear the step down. Safe to call more than once.
    pub fn close(&mut self) -> WizardResult<()> {
        if self.closed {
            return Ok(());
        }

        let mut page = self
            .page
            .try_borrow_mut()
            .map_err(|_| WizardError::PageBusy)?;
        page.on_close();
        page.base_mut().release_device_subscription();
        log::debug!("Closed wizard page '{}'", page.base().action_title());
        drop(page);
        self.page.discard_deferred_device_change();

        self.closed = true;
        Ok(())
    }

    fn dispatch(&mut self, button: &str, handler: fn(&mut P)) -> WizardResult<()> {
        if self.closed {
            log::debug!("Ignoring {button} click on a closed page");
            return Ok(());
        }

        let mut page = self
            .page
            .try_borrow_mut()
            .map_err(|_| WizardError::PageBusy)?;
        handler(&mut *page);
        drop(page);
        self.page.deliver_deferred_device_change()
    }
}

impl<P: ActionPage + 'static> Drop for WizardSession<P> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("Failed to close wizard page on drop: {e}");
        }
    }
}
