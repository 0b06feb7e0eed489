use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::network::device::DeviceId;

/// Order-independent key for an undirected connection: `(a, b)` and `(b, a)` map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UndirectedEdgeKey {
    a: DeviceId,
    b: DeviceId,
}

impl UndirectedEdgeKey {
    pub fn new(a: impl Into<DeviceId>, b: impl Into<DeviceId>) -> Self {
        let (a, b) = (a.into(), b.into());
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        UndirectedEdgeKey { a, b }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.a, &self.b)
    }
}

impl Display for UndirectedEdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.a, self.b)
    }
}
