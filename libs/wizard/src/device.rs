// Hardware wallet descriptors and the connected-device change notifier
//
// The notifier hands out a `Subscription` per listener. Dropping the handle
// (or calling `release`) removes the listener, so nothing stays registered
// after the page that owned it is gone.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Supported hardware wallet families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HwType {
    Trezor,
    Keepkey,
    LedgerNanoS,
    LedgerNanoX,
}

impl HwType {
    pub const ALL: [HwType; 4] = [
        HwType::Trezor,
        HwType::Keepkey,
        HwType::LedgerNanoS,
        HwType::LedgerNanoX,
    ];

    /// Vendor-facing product name
    pub fn name(self) -> &'static str {
        match self {
            HwType::Trezor => "Trezor",
            HwType::Keepkey => "KeepKey",
            HwType::LedgerNanoS => "Ledger Nano S",
            HwType::LedgerNanoX => "Ledger Nano X",
        }
    }
}

impl fmt::Display for HwType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hardware wallet as reported by the device layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HwDevice {
    pub hw_type: HwType,
    /// Transport-level identifier (USB path or serial)
    pub device_id: String,
    /// Model symbol reported by the firmware, e.g. "T" or "1"
    pub model_symbol: Option<String>,
    /// User-assigned device label
    pub label: Option<String>,
    pub firmware_version: Option<String>,
    /// Whether a seed has been set up on the device
    pub initialized: bool,
    /// Device is running its bootloader instead of the wallet firmware
    pub bootloader_mode: bool,
}

impl HwDevice {
    pub fn new(hw_type: HwType, device_id: impl Into<String>) -> Self {
        Self {
            hw_type,
            device_id: device_id.into(),
            model_symbol: None,
            label: None,
            firmware_version: None,
            initialized: false,
            bootloader_mode: false,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_firmware_version(mut self, version: impl Into<String>) -> Self {
        self.firmware_version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_model_symbol(mut self, model_symbol: impl Into<String>) -> Self {
        self.model_symbol = Some(model_symbol.into());
        self
    }

    #[must_use]
    pub fn with_initialized(mut self, initialized: bool) -> Self {
        self.initialized = initialized;
        self
    }

    #[must_use]
    pub fn with_bootloader_mode(mut self, bootloader_mode: bool) -> Self {
        self.bootloader_mode = bootloader_mode;
        self
    }

    /// Label if the user set one, otherwise the product name
    pub fn display_name(&self) -> String {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => self.hw_type.name().to_string(),
        }
    }

    /// One-line description for tooltips and status lines,
    /// e.g. "My Trezor (model T, firmware 2.6.0, bootloader)"
    pub fn summary(&self) -> String {
        let mut details = Vec::new();
        if let Some(model) = &self.model_symbol {
            details.push(format!("model {model}"));
        }
        if let Some(version) = &self.firmware_version {
            details.push(format!("firmware {version}"));
        }
        if !self.initialized {
            details.push("no seed".to_string());
        }
        if self.bootloader_mode {
            details.push("bootloader".to_string());
        }

        let name = self.display_name();
        if details.is_empty() {
            name
        } else {
            format!("{name} ({})", details.join(", "))
        }
    }

    /// Same physical device, regardless of its current state
    pub fn is_same_device(&self, other: &HwDevice) -> bool {
        self.hw_type == other.hw_type && self.device_id == other.device_id
    }
}

type Listener = Rc<dyn Fn(Option<&HwDevice>)>;

#[derive(Default)]
struct Registry {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

impl Registry {
    fn remove(&self, id: u64) -> bool {
        // The listener is dropped after the borrow ends: its captures may
        // hold subscriptions of their own.
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            listeners
                .iter()
                .position(|(listener_id, _)| *listener_id == id)
                .map(|index| listeners.remove(index))
        };
        removed.is_some()
    }
}

/// Scoped registration on [`HwDevices`]
///
/// The listener stays registered until this handle is released or dropped.
#[must_use = "dropping a Subscription unregisters the listener immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Registry>,
}

impl Subscription {
    /// Unregister the listener now
    pub fn release(self) {
        // Drop does the work
    }

    fn unregister(&self) {
        if let Some(registry) = self.registry.upgrade()
            && registry.remove(self.id)
        {
            log::debug!("Released device-change listener {}", self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unregister();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Known hardware wallets plus the one currently selected for the wizard
///
/// Emits a "connected hardware device changed" event to every subscriber
/// whenever the selected device (or its reported state) changes.
#[derive(Default)]
pub struct HwDevices {
    devices: RefCell<Vec<HwDevice>>,
    connected: RefCell<Option<HwDevice>>,
    registry: Rc<Registry>,
}

impl HwDevices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for connected-device changes
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Option<&HwDevice>) + 'static,
    {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        self.registry
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        log::debug!("Registered device-change listener {id}");

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.listeners.borrow().len()
    }

    pub fn connected_device(&self) -> Option<HwDevice> {
        self.connected.borrow().clone()
    }

    pub fn devices(&self) -> Vec<HwDevice> {
        self.devices.borrow().clone()
    }

    /// Replace the list of detected devices
    ///
    /// If the connected device is no longer present it is cleared, which
    /// notifies subscribers.
    pub fn set_devices(&self, devices: Vec<HwDevice>) {
        let still_present = self
            .connected
            .borrow()
            .as_ref()
            .is_none_or(|cur| devices.iter().any(|d| d.is_same_device(cur)));
        *self.devices.borrow_mut() = devices;

        if !still_present {
            log::debug!("Connected hardware wallet is gone");
            self.set_connected_device(None);
        }
    }

    /// Select the connected device; subscribers hear about it only if it differs
    pub fn set_connected_device(&self, device: Option<HwDevice>) {
        if *self.connected.borrow() == device {
            return;
        }

        match &device {
            Some(d) => log::debug!(
                "Connected hardware wallet: {} ({})",
                d.display_name(),
                d.device_id
            ),
            None => log::debug!("No hardware wallet connected"),
        }
        *self.connected.borrow_mut() = device.clone();
        self.notify(device.as_ref());
    }

    fn notify(&self, device: Option<&HwDevice>) {
        // Snapshot so listeners may (un)subscribe while being notified
        let listeners: Vec<Listener> = self
            .registry
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(device);
        }
    }
}

impl fmt::Debug for HwDevices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HwDevices")
            .field("devices", &self.devices.borrow())
            .field("connected", &self.connected.borrow())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
