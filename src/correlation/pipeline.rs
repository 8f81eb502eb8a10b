//! End-to-end analysis run
//!
//! registry -> resolver, records -> builder -> graph -> ranker (+ clusters).
//! All state is created inside the call and dropped with the result.

use super::builder::{BuildStats, CorrelationBuilder, CorrelationOutput};
use crate::algo::{self, Cluster, RankedNode};
use crate::config::AnalysisConfig;
use crate::graph::GraphStatistics;
use crate::intel::{ActorEntry, AliasResolver, IndicatorBreakdown, ResolverStats, ThreatRecord};
use crate::loader::{self, LoadResult};
use serde::Serialize;
use tracing::info;

/// Summary of one run, suitable for printing or JSON export
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub resolver: ResolverStats,
    pub build: BuildStats,
    pub graph: GraphStatistics,
    pub unique_indicators: usize,
    pub indicator_kinds: IndicatorBreakdown,
    pub top_nodes: Vec<RankedNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clusters: Option<Vec<Cluster>>,
}

/// Graph, indicator table and report from one run
#[derive(Debug)]
pub struct Analysis {
    pub output: CorrelationOutput,
    pub report: AnalysisReport,
}

/// Resolve, build and rank in one pass
pub fn analyze(
    records: &[ThreatRecord],
    registry: &[ActorEntry],
    top_k: usize,
    include_clusters: bool,
) -> Analysis {
    let resolver = AliasResolver::build(registry);
    let output = CorrelationBuilder::build(records, &resolver);

    let top_nodes = algo::rank(&output.graph, top_k);
    let clusters = include_clusters.then(|| algo::clusters(&output.graph));

    info!("Top {} nodes: {:?}", top_nodes.len(), top_nodes);

    let report = AnalysisReport {
        resolver: resolver.stats().clone(),
        build: output.stats.clone(),
        graph: output.graph.statistics(),
        unique_indicators: output.indicators.len(),
        indicator_kinds: output.indicators.breakdown(),
        top_nodes,
        clusters,
    };

    Analysis { output, report }
}

/// Load inputs named by `config`, analyze, and write the snapshot if asked
pub fn run(config: &AnalysisConfig) -> LoadResult<Analysis> {
    let registry = loader::load_registry(&config.registry_path)?;
    let records = loader::load_records(&config.records_path)?;

    let analysis = analyze(&records, &registry, config.top_k, config.include_clusters);

    if let Some(path) = &config.snapshot_path {
        loader::write_json(path, &analysis.output.graph.snapshot())?;
    }

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_report() {
        let registry = vec![ActorEntry::new("APT1", ["Comment Panda"], ["US", "JP"])];
        let records = vec![
            ThreatRecord {
                sha256_hashes: vec!["aaa".into(), "bbb".into()],
                tags: Some(vec!["Comment Panda".into()]),
                ..ThreatRecord::default()
            },
            ThreatRecord {
                tags: Some(vec!["APT1".into()]),
                ..ThreatRecord::default()
            },
        ];

        let analysis = analyze(&records, &registry, 1, true);
        let report = &analysis.report;

        assert_eq!(report.build.records_seen, 2);
        assert_eq!(report.build.records_skipped, 1);
        assert_eq!(report.unique_indicators, 2);
        assert_eq!(report.indicator_kinds.sha256_hashes, 2);
        assert_eq!(report.indicator_kinds.ip_addresses, 0);
        assert_eq!(report.graph.node_count, 5);
        assert_eq!(report.graph.labeled_edges, 2);
        // CommentPanda: one in, two out
        assert_eq!(report.top_nodes.len(), 1);
        assert_eq!(report.top_nodes[0].node_id, "CommentPanda");
        assert_eq!(report.clusters.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_clusters_omitted_from_json_when_disabled() {
        let analysis = analyze(&[], &[], 5, false);
        let json = serde_json::to_value(&analysis.report).unwrap();
        assert!(json.get("clusters").is_none());
        assert!(json["top_nodes"].as_array().unwrap().is_empty());
    }
}
