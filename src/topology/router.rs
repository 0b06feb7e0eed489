/*!
Adjacency structure and breadth-first routing.

Neighbor sets are insertion-ordered, so when several shortest paths exist the one through the
first-inserted neighbor is returned.
*/

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::Arc,
};

use indexmap::{IndexMap, IndexSet};

use crate::{
    diagnostics::Diagnostics,
    network::{device::DeviceId, edge::UndirectedEdgeKey, registry::DeviceRegistry},
    topology::route::{ConnectionOutcome, Hop, NoRoute, Route},
};

/// Undirected graph over device ids. Every mutation keeps it symmetric.
///
/// Edges are validated against the registry only when they are added; removing a device from
/// the registry afterwards leaves its edges in place.
pub struct Router {
    adjacency: IndexMap<DeviceId, IndexSet<DeviceId>>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Router {
    pub fn new(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            adjacency: IndexMap::new(),
            diagnostics,
        }
    }

    pub fn add_connection(
        &mut self,
        registry: &DeviceRegistry,
        a: &str,
        b: &str,
    ) -> ConnectionOutcome {
        let mut missing: Vec<DeviceId> = [a, b]
            .into_iter()
            .filter(|id| !registry.contains(id))
            .map(str::to_string)
            .collect();
        missing.dedup();
        if !missing.is_empty() {
            self.diagnostics.warning(&format!(
                "Cannot connect {} and {}: one or both devices not found.",
                a, b
            ));
            return ConnectionOutcome::MissingEndpoint { missing };
        }

        let already = self.are_connected(a, b);
        self.adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());

        self.diagnostics.info(&format!("Connection created: {} <-> {}", a, b));
        if already {
            ConnectionOutcome::AlreadyConnected
        } else {
            ConnectionOutcome::Created
        }
    }

    /// Removes the edge in both directions. Returns whether it existed; logs either way.
    pub fn remove_connection(&mut self, a: &str, b: &str) -> bool {
        let mut removed = false;
        if let Some(neighbors) = self.adjacency.get_mut(a) {
            removed |= neighbors.shift_remove(b);
        }
        if let Some(neighbors) = self.adjacency.get_mut(b) {
            removed |= neighbors.shift_remove(a);
        }

        self.diagnostics.info(&format!("Connection removed: {} <-> {}", a, b));
        removed
    }

    /// Drops every edge touching `id` along with its adjacency entry. Returns the number of
    /// edges removed.
    pub fn detach(&mut self, id: &str) -> usize {
        let Some(neighbors) = self.adjacency.shift_remove(id) else {
            return 0;
        };
        for neighbor in &neighbors {
            if let Some(back) = self.adjacency.get_mut(neighbor) {
                back.shift_remove(id);
            }
        }
        neighbors.len()
    }

    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.adjacency
            .get(id)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn are_connected(&self, a: &str, b: &str) -> bool {
        self.adjacency.get(a).is_some_and(|set| set.contains(b))
    }

    /// Ids that have an adjacency entry, including ones left with no neighbors.
    pub fn known_ids(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Every undirected edge once, in the order its first endpoint was seen.
    pub fn connections(&self) -> Vec<UndirectedEdgeKey> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (id, neighbors) in &self.adjacency {
            for neighbor in neighbors {
                let key = UndirectedEdgeKey::new(id.as_str(), neighbor.as_str());
                if seen.insert(key.clone()) {
                    out.push(key);
                }
            }
        }
        out
    }

    pub fn connection_count(&self) -> usize {
        self.connections().len()
    }

    /// Minimum-hop route from `source` to `destination`, both included.
    ///
    /// Both endpoints must resolve in the registry. Intermediate hops are resolved too, but a hop
    /// whose device has since been removed is kept with `device: None`.
    pub fn optimal_route(
        &self,
        registry: &DeviceRegistry,
        source: &str,
        destination: &str,
    ) -> Result<Route, NoRoute> {
        if !registry.contains(source) {
            return Err(NoRoute::UnknownSource(source.to_string()));
        }
        if !registry.contains(destination) {
            return Err(NoRoute::UnknownDestination(destination.to_string()));
        }

        let Some(path) = self.shortest_path(source, destination) else {
            self.diagnostics.info(&format!(
                "No route found from {} to {}",
                source, destination
            ));
            return Err(NoRoute::Unreachable {
                from: source.to_string(),
                to: destination.to_string(),
            });
        };

        self.diagnostics.info(&format!("Route found: [{}]", path.join(", ")));

        let hops = path
            .into_iter()
            .map(|id| {
                let device = registry.device(id).cloned();
                Hop {
                    id: id.to_string(),
                    device,
                }
            })
            .collect();
        Ok(Route::new(hops))
    }

    /// Breadth-first search returning the id sequence from `source` to `destination`.
    fn shortest_path<'a>(&'a self, source: &'a str, destination: &str) -> Option<Vec<&'a str>> {
        let mut queue: VecDeque<&str> = VecDeque::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut parent: HashMap<&str, &str> = HashMap::new();

        queue.push_back(source);
        visited.insert(source);

        let mut found = false;
        while let Some(current) = queue.pop_front() {
            if current == destination {
                found = true;
                break;
            }
            for neighbor in self.neighbors(current) {
                if visited.insert(neighbor) {
                    parent.insert(neighbor, current);
                    queue.push_back(neighbor);
                }
            }
        }
        if !found {
            return None;
        }

        // Walk predecessors back from the destination. The destination string itself may not be
        // borrowed from the graph, so start from the matching key in `visited`.
        let mut current = visited.get(destination).copied()?;
        let mut path = vec![current];
        while let Some(&previous) = parent.get(current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        diagnostics::{Level, RecordingDiagnostics},
        network::device::{Device, DeviceConfiguration},
    };

    struct Fixture {
        registry: DeviceRegistry,
        router: Router,
        sink: RecordingDiagnostics,
    }

    fn fixture(ids: &[&str]) -> Fixture {
        let sink = RecordingDiagnostics::new();
        let diagnostics: Arc<dyn Diagnostics> = Arc::new(sink.clone());
        let mut registry = DeviceRegistry::new(diagnostics.clone());
        for id in ids {
            registry.add_device(Device::new(*id, "router", DeviceConfiguration::new()));
        }
        sink.clear();
        Fixture {
            registry,
            router: Router::new(diagnostics),
            sink,
        }
    }

    impl Fixture {
        fn connect(&mut self, a: &str, b: &str) -> ConnectionOutcome {
            self.router.add_connection(&self.registry, a, b)
        }

        fn route(&self, a: &str, b: &str) -> Result<Vec<String>, NoRoute> {
            self.router
                .optimal_route(&self.registry, a, b)
                .map(|route| route.ids().into_iter().map(str::to_string).collect())
        }
    }

    #[test]
    fn test_connection_is_symmetric() {
        let mut f = fixture(&["A", "B"]);
        assert_eq!(f.connect("A", "B"), ConnectionOutcome::Created);

        assert!(f.router.are_connected("A", "B"));
        assert!(f.router.are_connected("B", "A"));
        assert_eq!(f.router.neighbors("B").collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(
            f.sink.messages_at(Level::Info),
            vec!["Connection created: A <-> B".to_string()]
        );
    }

    #[test]
    fn test_connect_unknown_device_does_not_mutate() {
        let mut f = fixture(&["A"]);
        let outcome = f.connect("A", "ghost");

        assert_eq!(
            outcome,
            ConnectionOutcome::MissingEndpoint {
                missing: vec!["ghost".to_string()]
            }
        );
        assert_eq!(f.router.known_ids().count(), 0);
        assert_eq!(
            f.sink.messages_at(Level::Warning),
            vec!["Cannot connect A and ghost: one or both devices not found.".to_string()]
        );
    }

    #[test]
    fn test_missing_endpoint_listed_once() {
        let mut f = fixture(&["A"]);
        assert_eq!(
            f.connect("ghost", "ghost"),
            ConnectionOutcome::MissingEndpoint {
                missing: vec!["ghost".to_string()]
            }
        );
        assert_eq!(
            f.connect("ghost", "phantom"),
            ConnectionOutcome::MissingEndpoint {
                missing: vec!["ghost".to_string(), "phantom".to_string()]
            }
        );
        assert_eq!(f.router.known_ids().count(), 0);
    }

    #[test]
    fn test_connect_is_idempotent() {
        let mut f = fixture(&["A", "B"]);
        f.connect("A", "B");
        let once = f.router.connections();

        assert_eq!(f.connect("A", "B"), ConnectionOutcome::AlreadyConnected);
        assert_eq!(f.router.connections(), once);
        assert_eq!(f.router.neighbors("A").count(), 1);
        assert_eq!(f.sink.messages_at(Level::Info).len(), 2);
    }

    #[test]
    fn test_route_to_self() {
        let f = fixture(&["X"]);
        assert_eq!(f.route("X", "X").unwrap(), vec!["X"]);
    }

    #[test]
    fn test_route_along_chain() {
        let mut f = fixture(&["A", "B", "C"]);
        f.connect("A", "B");
        f.connect("B", "C");

        assert_eq!(f.route("A", "C").unwrap(), vec!["A", "B", "C"]);
        assert_eq!(f.route("C", "A").unwrap(), vec!["C", "B", "A"]);
        assert!(
            f.sink
                .messages_at(Level::Info)
                .contains(&"Route found: [A, B, C]".to_string())
        );
    }

    #[test]
    fn test_isolated_device_has_no_route() {
        let mut f = fixture(&["D", "E", "F"]);
        f.connect("E", "F");

        assert_eq!(
            f.route("D", "E"),
            Err(NoRoute::Unreachable {
                from: "D".into(),
                to: "E".into()
            })
        );
        assert!(
            f.sink
                .messages_at(Level::Info)
                .contains(&"No route found from D to E".to_string())
        );
    }

    #[test]
    fn test_unknown_endpoints() {
        let f = fixture(&["A"]);
        assert_eq!(f.route("ghost", "A"), Err(NoRoute::UnknownSource("ghost".into())));
        assert_eq!(f.route("A", "ghost"), Err(NoRoute::UnknownDestination("ghost".into())));
    }

    #[test]
    fn test_removal_breaks_or_lengthens_route() {
        let mut f = fixture(&["A", "B", "C", "D"]);
        f.connect("A", "B");
        assert!(f.router.remove_connection("A", "B"));
        assert!(matches!(f.route("A", "B"), Err(NoRoute::Unreachable { .. })));
        // Emptied sets are kept
        assert_eq!(f.router.known_ids().collect::<Vec<_>>(), vec!["A", "B"]);

        f.connect("A", "B");
        f.connect("A", "C");
        f.connect("C", "D");
        f.connect("D", "B");
        f.router.remove_connection("B", "A");
        assert_eq!(f.route("A", "B").unwrap(), vec!["A", "C", "D", "B"]);
    }

    #[test]
    fn test_remove_missing_edge_still_logs() {
        let mut f = fixture(&["A", "B"]);
        assert!(!f.router.remove_connection("A", "B"));
        assert_eq!(
            f.sink.messages_at(Level::Info),
            vec!["Connection removed: A <-> B".to_string()]
        );
    }

    #[test]
    fn test_first_inserted_neighbor_wins_ties() {
        // Diamond: S-L-T and S-R-T are both two hops
        let mut f = fixture(&["S", "L", "R", "T"]);
        f.connect("S", "R");
        f.connect("S", "L");
        f.connect("L", "T");
        f.connect("R", "T");
        assert_eq!(f.route("S", "T").unwrap(), vec!["S", "R", "T"]);

        // Removing and re-adding puts R behind L
        f.router.remove_connection("S", "R");
        f.connect("S", "R");
        assert_eq!(f.route("S", "T").unwrap(), vec!["S", "L", "T"]);
    }

    #[test]
    fn test_self_loop_is_harmless() {
        let mut f = fixture(&["A", "B"]);
        f.connect("A", "A");
        f.connect("A", "B");
        assert_eq!(f.route("A", "B").unwrap(), vec!["A", "B"]);
        assert_eq!(f.router.connection_count(), 2);
    }

    #[test]
    fn test_route_hops_are_adjacent() {
        let mut f = fixture(&["A", "B", "C", "D", "E"]);
        for (a, b) in [("A", "B"), ("B", "C"), ("C", "E"), ("A", "D"), ("D", "C")] {
            f.connect(a, b);
        }
        let route = f.route("A", "E").unwrap();
        assert_eq!(route.len(), 4);
        for pair in route.windows(2) {
            assert!(f.router.are_connected(&pair[0], &pair[1]));
        }
    }

    #[test]
    fn test_removed_device_leaves_dangling_hop() {
        let mut f = fixture(&["A", "B", "C"]);
        f.connect("A", "B");
        f.connect("B", "C");
        f.registry.remove_device("B");

        let route = f.router.optimal_route(&f.registry, "A", "C").unwrap();
        assert_eq!(route.ids(), vec!["A", "B", "C"]);
        assert_eq!(route.dangling(), vec!["B"]);
        assert!(route.devices().is_none());
    }

    #[test]
    fn test_detach_removes_all_incident_edges() {
        let mut f = fixture(&["A", "B", "C"]);
        f.connect("A", "B");
        f.connect("B", "C");

        assert_eq!(f.router.detach("B"), 2);
        assert_eq!(f.router.detach("B"), 0);
        assert_eq!(f.router.neighbors("A").count(), 0);
        assert_eq!(f.router.neighbors("C").count(), 0);
        assert_eq!(f.router.connection_count(), 0);
    }
}
