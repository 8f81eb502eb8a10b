pub mod common;
pub mod centrality;
pub mod community;

pub use common::{GraphView, NodeId};
pub use centrality::{degree_centrality, top_k_by_score};
pub use community::{weakly_connected_components, WccResult};
