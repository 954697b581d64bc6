//! Knowledge-graph data model and the pure transformations over it.

pub mod error;
pub mod normalize;
pub mod reduce;
pub mod subgraph;
pub mod types;

pub use error::GraphError;
pub use normalize::{normalize, normalize_columns};
pub use types::{Category, Dataset, KnowledgeGraphPayload, Link, Node, NodeId, Point, Triple};
