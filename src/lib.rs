//! iocgraph: IOC correlation graph
//!
//! Correlates indicators of compromise from threat-intelligence records with
//! threat-actor identities and the countries they target, and ranks the most
//! structurally important nodes of the resulting graph.
//!
//! # Pipeline
//!
//! - `intel`: record types, indicator normalization, actor alias resolution
//! - `correlation`: single-pass graph builder and the run pipeline
//! - `graph`: the directed correlation graph and its snapshot format
//! - `algo`: degree-centrality ranking and cluster summary
//! - `loader` / `config`: JSON inputs and outputs, run configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use iocgraph::{rank, ActorEntry, AliasResolver, CorrelationBuilder, ThreatRecord};
//!
//! let registry = vec![ActorEntry::new("APT1", ["Comment Panda"], ["US", "JP"])];
//! let resolver = AliasResolver::build(&registry);
//!
//! let records = vec![ThreatRecord {
//!     sha256_hashes: vec!["aaa".to_string()],
//!     tags: Some(vec!["Comment Panda".to_string()]),
//!     ..ThreatRecord::default()
//! }];
//!
//! let output = CorrelationBuilder::build(&records, &resolver);
//! assert!(output.graph.has_edge("aaa", "CommentPanda"));
//! assert!(output.graph.has_edge("CommentPanda", "US"));
//!
//! let top = rank(&output.graph, 1);
//! assert_eq!(top[0].node_id, "CommentPanda");
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod correlation;
pub mod graph;
pub mod intel;
pub mod loader;

// Re-export main types for convenience
pub use algo::{clusters, rank, Cluster, RankedNode};

pub use config::{AnalysisConfig, ConfigError, ConfigResult};

pub use correlation::{
    analyze, run, Analysis, AnalysisReport, BuildStats, CorrelationBuilder, CorrelationOutput,
};

pub use graph::{
    CorrelationGraph, Edge, EdgeId, EdgeLabel, GraphError, GraphResult, GraphSnapshot,
    GraphStatistics, Node, NodeId, NodeKind,
};

pub use intel::{
    assemble_registry, normalize_name, normalize_record, parse_timestamp, ActorEntry, ActorGroup,
    AliasResolver, Indicator, IndicatorBreakdown, IndicatorKind, IndicatorTable, ResolverStats,
    TargetingRow, ThreatRecord,
};

pub use loader::{LoadError, LoadResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
