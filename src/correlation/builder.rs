//! Correlation graph builder
//!
//! Single pass over threat records, in input order. Each record contributes
//! a star around its primary (first) indicator:
//!
//! ```text
//! primary -> other indicators
//! primary -> tag
//! tag     -[targets]-> country   (when the tag resolves to an actor)
//! ```
//!
//! Co-indicators are never linked to each other and tags hang only off the
//! primary, which keeps a record with many indicators from producing a clique.

use crate::graph::{CorrelationGraph, EdgeLabel, NodeKind};
use crate::intel::normalize::normalize_nonempty;
use crate::intel::{normalize_record, AliasResolver, IndicatorTable, ThreatRecord};
use serde::Serialize;
use tracing::{debug, info};

/// Counters collected during one build
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildStats {
    pub records_seen: usize,
    /// Records with no indicators, skipped entirely
    pub records_skipped: usize,
    /// Indicator occurrences whose value was already in the table
    pub duplicate_indicators: usize,
    /// Tag occurrences that did not resolve to an actor with targeting data
    pub unresolved_tags: usize,
    /// Tag occurrences dropped because they were blank after normalization
    pub blank_tags: usize,
}

/// Everything one build produces
#[derive(Debug, Default)]
pub struct CorrelationOutput {
    pub graph: CorrelationGraph,
    pub indicators: IndicatorTable,
    pub stats: BuildStats,
}

/// Builds a correlation graph from records and a resolver.
///
/// Owns the indicator table and graph for the duration of one build; nothing
/// is shared between builds.
pub struct CorrelationBuilder<'r> {
    resolver: &'r AliasResolver,
    output: CorrelationOutput,
}

impl<'r> CorrelationBuilder<'r> {
    pub fn new(resolver: &'r AliasResolver) -> Self {
        Self {
            resolver,
            output: CorrelationOutput::default(),
        }
    }

    /// Build the graph for `records` in one call
    pub fn build<'a>(
        records: impl IntoIterator<Item = &'a ThreatRecord>,
        resolver: &'r AliasResolver,
    ) -> CorrelationOutput {
        let mut builder = Self::new(resolver);
        for record in records {
            builder.add_record(record);
        }
        builder.finish()
    }

    /// Fold one record into the graph.
    ///
    /// Records must be added in input order: the primary indicator and the
    /// first-seen metadata of each indicator depend on it.
    pub fn add_record(&mut self, record: &ThreatRecord) {
        let stats = &mut self.output.stats;
        stats.records_seen += 1;

        let indicators = normalize_record(record);
        let Some(primary) = indicators.first() else {
            stats.records_skipped += 1;
            debug!("Record {} has no indicators, skipping", stats.records_seen);
            return;
        };
        let primary_value = primary.value.clone();

        let graph = &mut self.output.graph;
        graph.ensure_node(&primary_value, NodeKind::Indicator);

        for (idx, indicator) in indicators.into_iter().enumerate() {
            if idx > 0 {
                graph.connect(
                    (&primary_value, NodeKind::Indicator),
                    (&indicator.value, NodeKind::Indicator),
                    None,
                );
            }
            if !self.output.indicators.insert(indicator) {
                stats.duplicate_indicators += 1;
            }
        }

        for raw_tag in record.tags() {
            let Some(tag) = normalize_nonempty(raw_tag) else {
                stats.blank_tags += 1;
                continue;
            };

            graph.connect(
                (&primary_value, NodeKind::Indicator),
                (&tag, NodeKind::Tag),
                None,
            );

            match self.resolver.targets_of(&tag) {
                Some(countries) => {
                    for country in countries {
                        graph.connect(
                            (&tag, NodeKind::Tag),
                            (country, NodeKind::Country),
                            Some(EdgeLabel::targets()),
                        );
                    }
                }
                None => stats.unresolved_tags += 1,
            }
        }
    }

    pub fn finish(self) -> CorrelationOutput {
        let output = self.output;
        info!(
            "Correlation graph built: {} records ({} skipped), {} unique indicators, {} nodes, {} edges",
            output.stats.records_seen,
            output.stats.records_skipped,
            output.indicators.len(),
            output.graph.node_count(),
            output.graph.edge_count()
        );
        output
    }
}
