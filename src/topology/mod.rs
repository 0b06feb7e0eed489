/*!
Topology module

This module holds the adjacency structure over device ids and the queries answered on it.

Structure:
- `router`: `Router`, the undirected adjacency structure with validated mutations and
            breadth-first shortest-path search.
- `route`: result types (`Route`, `Hop`, `NoRoute`, `ConnectionOutcome`).
- `export`: serializable snapshots and petgraph/Graphviz views.
*/

pub mod export;
pub mod route;
pub mod router;

pub use route::{ConnectionOutcome, NoRoute, Route};
pub use router::Router;
