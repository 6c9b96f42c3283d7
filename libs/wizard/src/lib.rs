//! Page-controller contract for the hardware wallet firmware update wizard
//!
//! A wizard step ([`ActionPage`]) never touches the dialog that shows it.
//! The host lends it a [`PageControls`] implementation (title, the Cancel /
//! Back / Continue buttons, the device panel, message pages) and forwards
//! button clicks and connected-device changes into it.
//!
//! ```rust
//! use hwwallet_wizard::{
//!     ActionPage, ActionPageBase, AppConfig, DialogChrome, HwDevices, WizardSession, mount,
//! };
//! use std::rc::Rc;
//!
//! struct Intro {
//!     base: ActionPageBase,
//! }
//!
//! impl ActionPage for Intro {
//!     fn base(&self) -> &ActionPageBase {
//!         &self.base
//!     }
//!     fn base_mut(&mut self) -> &mut ActionPageBase {
//!         &mut self.base
//!     }
//! }
//!
//! let devices = Rc::new(HwDevices::new());
//! let page = mount(Intro {
//!     base: ActionPageBase::new(Rc::new(AppConfig::default()), devices, "Intro"),
//! });
//! let chrome = Rc::new(DialogChrome::new());
//! let mut session = WizardSession::open(page, chrome.clone()).unwrap();
//!
//! assert_eq!(chrome.title(), "<b>Update hardware wallet firmware</b>");
//! assert!(session.request_cancel().unwrap());
//! ```

pub mod chrome;
pub mod config;
pub mod controls;
pub mod device;
pub mod error;
pub mod page;
pub mod session;

pub use chrome::{ButtonState, DialogButton, DialogChrome, VisiblePage};
pub use config::AppConfig;
pub use controls::{NoControls, PageControls};
pub use device::{HwDevice, HwDevices, HwType, Subscription};
pub use error::{WizardError, WizardResult};
pub use page::{ACTION_TITLE, ActionPage, ActionPageBase, SharedPage, format_action_title, mount};
pub use session::WizardSession;
