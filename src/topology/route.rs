use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

use crate::network::device::{Device, DeviceId};

/// One step of a route. `device` is `None` when the id is still present in the topology but
/// no longer resolves in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hop {
    pub id: DeviceId,
    pub device: Option<Device>,
}

/// A minimum-hop path, source first and destination last. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    hops: Vec<Hop>,
}

impl Route {
    pub(crate) fn new(hops: Vec<Hop>) -> Self {
        debug_assert!(!hops.is_empty());
        Self { hops }
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn ids(&self) -> Vec<&str> {
        self.hops.iter().map(|hop| hop.id.as_str()).collect()
    }

    /// Number of links traversed.
    pub fn hop_count(&self) -> usize {
        self.hops.len() - 1
    }

    pub fn source(&self) -> &str {
        &self.hops[0].id
    }

    pub fn destination(&self) -> &str {
        &self.hops[self.hops.len() - 1].id
    }

    /// Ids on the route with no matching device, i.e. a registry/topology inconsistency.
    pub fn dangling(&self) -> Vec<&str> {
        self.hops
            .iter()
            .filter(|hop| hop.device.is_none())
            .map(|hop| hop.id.as_str())
            .collect()
    }

    /// Every device on the route, or `None` if any hop is dangling.
    pub fn devices(&self) -> Option<Vec<&Device>> {
        self.hops.iter().map(|hop| hop.device.as_ref()).collect()
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ids().join(" -> "))
    }
}

/// Why `optimal_route` produced no route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoRoute {
    #[error("unknown source device: {0}")]
    UnknownSource(DeviceId),
    #[error("unknown destination device: {0}")]
    UnknownDestination(DeviceId),
    #[error("no route from {from} to {to}")]
    Unreachable { from: DeviceId, to: DeviceId },
}

/// Result of `add_connection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionOutcome {
    Created,
    AlreadyConnected,
    /// Nothing was recorded; lists the ids that do not resolve to a device.
    MissingEndpoint { missing: Vec<DeviceId> },
}

impl ConnectionOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionOutcome::Created | ConnectionOutcome::AlreadyConnected)
    }
}
