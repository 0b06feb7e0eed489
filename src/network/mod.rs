/*
 * This module defines the device model and the registry that owns it.
 * `Network` bundles the registry with the router so both share one diagnostics sink,
 * and is the surface the loaders and the binary drive.
 */

pub mod device;
pub mod edge;
pub mod registry;

use std::sync::Arc;

use crate::{
    diagnostics::{Diagnostics, TracingDiagnostics},
    network::{
        device::{Device, DeviceConfiguration},
        registry::DeviceRegistry,
    },
    topology::{
        export::TopologySnapshot,
        route::{ConnectionOutcome, NoRoute, Route},
        router::Router,
    },
};

/// What `Network::decommission_device` took out of the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decommission {
    /// The registry entry, `None` if the device had already been removed.
    pub device: Option<Device>,
    /// Number of connections detached from the topology.
    pub connections: usize,
}

impl Decommission {
    pub fn is_noop(&self) -> bool {
        self.device.is_none() && self.connections == 0
    }
}

/// A device registry and the topology over it.
///
/// Wrap the whole `Network` in one lock if it is shared between threads: an edge is only valid
/// while both of its endpoints are registered, and that spans both halves.
pub struct Network {
    registry: DeviceRegistry,
    router: Router,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new(Arc::new(TracingDiagnostics))
    }
}

impl Network {
    pub fn new(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            registry: DeviceRegistry::new(diagnostics.clone()),
            router: Router::new(diagnostics.clone()),
            diagnostics,
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    pub fn add_device(&mut self, device: Device) -> Option<Device> {
        self.registry.add_device(device)
    }

    /// Removes the device from the registry only. Its connections stay in the topology and
    /// routes through it report the id as dangling; see `decommission_device` for a full removal.
    pub fn remove_device(&mut self, id: &str) -> Option<Device> {
        self.registry.remove_device(id)
    }

    /// Removes the device together with every connection touching it.
    ///
    /// Connections are detached even when the registry entry is already gone, which clears the
    /// dangling edges a previous `remove_device` left behind.
    pub fn decommission_device(&mut self, id: &str) -> Decommission {
        let outcome = Decommission {
            device: self.registry.remove_device(id),
            connections: self.router.detach(id),
        };
        if !outcome.is_noop() {
            let message = format!(
                "Device {} decommissioned, {} connection(s) dropped.",
                id, outcome.connections
            );
            self.diagnostics.info(&message);
        }
        outcome
    }

    pub fn configure_device(
        &mut self,
        id: &str,
        config: DeviceConfiguration,
    ) -> Option<DeviceConfiguration> {
        self.registry.configure_device(id, config)
    }

    pub fn devices(&self) -> Vec<Device> {
        self.registry.devices()
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.registry.device(id)
    }

    pub fn add_connection(&mut self, a: &str, b: &str) -> ConnectionOutcome {
        self.router.add_connection(&self.registry, a, b)
    }

    pub fn remove_connection(&mut self, a: &str, b: &str) -> bool {
        self.router.remove_connection(a, b)
    }

    pub fn optimal_route(&self, source: &str, destination: &str) -> Result<Route, NoRoute> {
        self.router.optimal_route(&self.registry, source, destination)
    }

    pub fn snapshot(&self) -> TopologySnapshot {
        TopologySnapshot::capture(&self.registry, &self.router)
    }
}
