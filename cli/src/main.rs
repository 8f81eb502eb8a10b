//! iocgraph CLI: build and rank an IOC correlation graph from JSON exports

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use iocgraph::{loader, Analysis, AnalysisConfig, NodeKind};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "iocgraph", version, about = "IOC correlation graph builder and ranker")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the correlation graph and rank its nodes
    Analyze {
        /// YAML config file; flags below override its values
        #[arg(long, env = "IOCGRAPH_CONFIG")]
        config: Option<PathBuf>,

        /// JSON array of threat records
        #[arg(long, env = "IOCGRAPH_RECORDS")]
        records: Option<PathBuf>,

        /// JSON array of actor registry entries
        #[arg(long, env = "IOCGRAPH_REGISTRY")]
        registry: Option<PathBuf>,

        /// Number of ranked nodes to report
        #[arg(long)]
        top_k: Option<usize>,

        /// Write the graph snapshot to this file
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Also report weakly connected clusters
        #[arg(long)]
        clusters: bool,
    },
    /// Assemble an actor registry from a group catalogue and targeting rows
    Registry {
        /// JSON array of {name, aliases}
        #[arg(long)]
        groups: PathBuf,

        /// JSON array of {common_name, countries}
        #[arg(long)]
        targets: PathBuf,

        /// Output registry file
        #[arg(long, default_value = "apt_targets.json")]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Analyze {
            config,
            records,
            registry,
            top_k,
            snapshot,
            clusters,
        } => resolve_config(config, records, registry, top_k, snapshot, clusters)
            .and_then(|config| run_analyze(&config, &cli.format)),
        Commands::Registry {
            groups,
            targets,
            out,
        } => run_registry(&groups, &targets, &out),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(
    path: Option<PathBuf>,
    records: Option<PathBuf>,
    registry: Option<PathBuf>,
    top_k: Option<usize>,
    snapshot: Option<PathBuf>,
    clusters: bool,
) -> anyhow::Result<AnalysisConfig> {
    let mut config = match path {
        Some(path) => AnalysisConfig::from_yaml_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(records) = records {
        config.records_path = records;
    }
    if let Some(registry) = registry {
        config.registry_path = registry;
    }
    if let Some(top_k) = top_k {
        config.top_k = top_k;
    }
    if snapshot.is_some() {
        config.snapshot_path = snapshot;
    }
    config.include_clusters |= clusters;

    config.validate()?;
    Ok(config)
}

fn run_analyze(config: &AnalysisConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let analysis = iocgraph::run(config)?;
    let report = &analysis.report;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Csv => {
            println!("node_id,kind,score");
            for node in &report.top_nodes {
                println!(
                    "{},{},{}",
                    csv_field(&node.node_id),
                    node_kinds(&analysis, &node.node_id),
                    node.score
                );
            }
        }
        OutputFormat::Table => print_tables(&analysis),
    }

    Ok(())
}

fn print_tables(analysis: &Analysis) {
    let report = &analysis.report;

    println!("Records:     {} ({} skipped)", report.build.records_seen, report.build.records_skipped);
    println!(
        "Indicators:  {} ({} sha256, {} md5, {} ip)",
        report.unique_indicators,
        report.indicator_kinds.sha256_hashes,
        report.indicator_kinds.md5_hashes,
        report.indicator_kinds.ip_addresses
    );
    println!("Nodes:       {}", report.graph.node_count);
    println!("Edges:       {}", report.graph.edge_count);
    println!(
        "Actors:      {} ({} malformed, {} alias collisions)",
        report.resolver.entries, report.resolver.malformed_entries, report.resolver.alias_collisions
    );
    println!();

    if report.top_nodes.is_empty() {
        println!("(no nodes)");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rank", "Node", "Kind", "Degree centrality"]);
    for (idx, node) in report.top_nodes.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            node.node_id.clone(),
            node_kinds(analysis, &node.node_id),
            format!("{:.4}", node.score),
        ]);
    }
    println!("{}", table);

    if let Some(clusters) = &report.clusters {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Cluster", "Size", "Indicators", "Tags", "Countries"]);
        for (idx, cluster) in clusters.iter().enumerate() {
            table.add_row(vec![
                (idx + 1).to_string(),
                cluster.members.len().to_string(),
                cluster.indicator_count.to_string(),
                cluster.tags.join(", "),
                cluster.countries.join(", "),
            ]);
        }
        println!("{}", table);
        println!("{} cluster(s)", clusters.len());
    }
}

fn node_kinds(analysis: &Analysis, node_id: &str) -> String {
    analysis
        .output
        .graph
        .node(node_id)
        .map(|n| {
            n.kinds
                .iter()
                .map(NodeKind::as_str)
                .collect::<Vec<_>>()
                .join("|")
        })
        .unwrap_or_default()
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn run_registry(groups: &Path, targets: &Path, out: &Path) -> anyhow::Result<()> {
    let groups = loader::load_groups(groups)?;
    let targets = loader::load_targeting(targets)?;

    let registry = iocgraph::assemble_registry(&groups, &targets);
    loader::write_json(out, &registry)?;

    info!("Registry with {} actors written to {}", registry.len(), out.display());
    Ok(())
}
