/*!
Read-only views of a network for output.

- `TopologySnapshot`: serializable picture of devices and their connections.
- `to_graph`: the topology as a petgraph `UnGraph`, e.g. for Graphviz rendering via `to_dot`.
*/

use std::collections::HashMap;

use ipnetwork::IpNetwork;
use petgraph::{dot::{Config, Dot}, graph::{NodeIndex, UnGraph}};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    network::{
        device::{DeviceConfiguration, DeviceId},
        registry::DeviceRegistry,
    },
    topology::router::Router,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: DeviceId,
    pub uuid: Uuid,
    pub device_type: String,
    pub config: DeviceConfiguration,
    pub network: Option<IpNetwork>,
    pub neighbors: Vec<DeviceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologySnapshot {
    pub devices: Vec<SnapshotNode>,
    pub connections: Vec<(DeviceId, DeviceId)>,
    /// Ids present in the topology that no longer resolve to a device.
    pub dangling: Vec<DeviceId>,
}

impl TopologySnapshot {
    pub fn capture(registry: &DeviceRegistry, router: &Router) -> Self {
        let devices = registry
            .iter()
            .map(|device| SnapshotNode {
                id: device.id.clone(),
                uuid: device.uuid(),
                device_type: device.device_type.clone(),
                config: device.config.clone(),
                network: device.config.network(),
                neighbors: router.neighbors(&device.id).map(str::to_string).collect(),
            })
            .collect();

        let connections = router
            .connections()
            .iter()
            .map(|key| {
                let (a, b) = key.endpoints();
                (a.to_string(), b.to_string())
            })
            .collect();

        let dangling = router
            .known_ids()
            .filter(|id| !registry.contains(id))
            .map(str::to_string)
            .collect();

        Self {
            devices,
            connections,
            dangling,
        }
    }
}

/// Builds an undirected graph with one node per registered device plus one per dangling id.
pub fn to_graph(registry: &DeviceRegistry, router: &Router) -> UnGraph<DeviceId, ()> {
    let mut graph = UnGraph::new_undirected();
    let mut index_of: HashMap<String, NodeIndex> = HashMap::new();

    let ids = registry
        .iter()
        .map(|device| device.id.as_str())
        .chain(router.known_ids());
    for id in ids {
        if !index_of.contains_key(id) {
            let index = graph.add_node(id.to_string());
            index_of.insert(id.to_string(), index);
        }
    }

    for key in router.connections() {
        let (a, b) = key.endpoints();
        if let (Some(&a), Some(&b)) = (index_of.get(a), index_of.get(b)) {
            graph.add_edge(a, b, ());
        }
    }
    graph
}

/// Graphviz DOT rendering of the topology.
pub fn to_dot(registry: &DeviceRegistry, router: &Router) -> String {
    let graph = to_graph(registry, router);
    format!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
}
