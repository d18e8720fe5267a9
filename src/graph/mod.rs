//! The static co-authorship graph: wire format, validated model and styling.

pub mod dataset;
mod loader;
mod model;
pub mod style;

pub use loader::{EMBEDDED_DATASET, load_graph};
pub use model::{DEFAULT_NODE_SIZE, Edge, EdgeId, Graph, Node, NodeId, NodeKind, NodeView};
