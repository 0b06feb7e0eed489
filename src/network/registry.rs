use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    diagnostics::Diagnostics,
    network::device::{Device, DeviceConfiguration, DeviceId},
};

/// Keyed collection of devices. The only authority on whether a device exists.
///
/// Lookups never fail: a missing key yields `None` and mutations on a missing key are no-ops
/// that emit no event.
pub struct DeviceRegistry {
    devices: IndexMap<DeviceId, Device>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl DeviceRegistry {
    pub fn new(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            devices: IndexMap::new(),
            diagnostics,
        }
    }

    /// Insert or overwrite the device keyed by its id. An overwritten device keeps its original
    /// position in `devices()`. Returns the replaced device.
    pub fn add_device(&mut self, device: Device) -> Option<Device> {
        let id = device.id.clone();
        let previous = self.devices.insert(id.clone(), device);
        self.diagnostics.info(&format!("Device added: {}", id));
        previous
    }

    pub fn remove_device(&mut self, id: &str) -> Option<Device> {
        let removed = self.devices.shift_remove(id);
        if removed.is_some() {
            self.diagnostics.info(&format!("Device removed: {}", id));
        }
        removed
    }

    /// Replace the configuration of a known device, returning the one it had before.
    pub fn configure_device(
        &mut self,
        id: &str,
        config: DeviceConfiguration,
    ) -> Option<DeviceConfiguration> {
        let device = self.devices.get_mut(id)?;
        let previous = std::mem::replace(&mut device.config, config);
        self.diagnostics.info(&format!("Device {} reconfigured.", id));
        Some(previous)
    }

    /// Snapshot of every registered device in insertion order.
    pub fn devices(&self) -> Vec<Device> {
        self.devices.values().cloned().collect()
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.devices.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
