use iocgraph::{loader, run, AnalysisConfig, CorrelationGraph, GraphSnapshot};
use std::fs;
use tempfile::TempDir;

const RECORDS: &str = r#"[
    {
        "sha256_hashes": ["aaa"],
        "md5_hashes": [],
        "ips": ["192.0.2.10"],
        "tags": ["Comment Panda"],
        "created_time": "2023-02-01T08:30:00Z"
    },
    {
        "sha256_hashes": [],
        "tags": ["APT1"]
    },
    {
        "md5_hashes": ["bbb"],
        "created_time": "2023-03-01T00:00:00Z"
    }
]"#;

const REGISTRY: &str = r#"[
    {"apt_name": "APT1", "aliases": ["CommentPanda", "CommentCrew"], "targets": ["US", "JP"]},
    {"aliases": ["orphan"], "targets": ["FR"]}
]"#;

fn write_inputs(dir: &TempDir) -> AnalysisConfig {
    let records_path = dir.path().join("data.json");
    let registry_path = dir.path().join("apt_targets.json");
    fs::write(&records_path, RECORDS).unwrap();
    fs::write(&registry_path, REGISTRY).unwrap();

    AnalysisConfig {
        records_path,
        registry_path,
        top_k: 3,
        snapshot_path: Some(dir.path().join("out/graph.json")),
        include_clusters: true,
    }
}

#[test]
fn test_run_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = write_inputs(&dir);

    let analysis = run(&config).unwrap();
    let report = &analysis.report;

    assert_eq!(report.resolver.entries, 1);
    assert_eq!(report.resolver.malformed_entries, 1);
    assert_eq!(report.build.records_seen, 3);
    assert_eq!(report.build.records_skipped, 1);
    assert_eq!(report.unique_indicators, 3);
    assert_eq!(report.top_nodes[0].node_id, "CommentPanda");
    assert_eq!(report.clusters.as_ref().unwrap().len(), 2);

    let first_seen = analysis.output.indicators.get("192.0.2.10").unwrap().first_seen;
    assert_eq!(first_seen.unwrap().to_rfc3339(), "2023-02-01T08:30:00+00:00");
}

#[test]
fn test_snapshot_file_round_trips() {
    let dir = TempDir::new().unwrap();
    let config = write_inputs(&dir);
    let analysis = run(&config).unwrap();

    let path = config.snapshot_path.unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let snapshot: GraphSnapshot = serde_json::from_str(&text).unwrap();
    let rebuilt = CorrelationGraph::from_snapshot(&snapshot).unwrap();

    assert_eq!(rebuilt.edge_triples(), analysis.output.graph.edge_triples());
    assert_eq!(rebuilt.statistics(), analysis.output.graph.statistics());
}

#[test]
fn test_missing_registry_fails() {
    let dir = TempDir::new().unwrap();
    let mut config = write_inputs(&dir);
    config.registry_path = dir.path().join("nope.json");

    let err = run(&config).unwrap_err();
    assert!(matches!(err, iocgraph::LoadError::Io { .. }));
}

#[test]
fn test_registry_assembly_from_files() {
    let dir = TempDir::new().unwrap();
    let groups_path = dir.path().join("apt_info.json");
    let targets_path = dir.path().join("targets.json");
    fs::write(
        &groups_path,
        r#"[{"apt_name": "APT28", "aliases": ["Fancy Bear", "Sofacy"]}]"#,
    )
    .unwrap();
    fs::write(
        &targets_path,
        r#"[{"Common Name": "APT 28", "countries": ["UA", "GE"]}, {"common_name": "Quiet", "countries": []}]"#,
    )
    .unwrap();

    let groups = loader::load_groups(&groups_path).unwrap();
    let targets = loader::load_targeting(&targets_path).unwrap();
    let registry = iocgraph::assemble_registry(&groups, &targets);

    let out = dir.path().join("apt_targets.json");
    loader::write_json(&out, &registry).unwrap();
    let reloaded = loader::load_registry(&out).unwrap();

    assert_eq!(reloaded, registry);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].canonical_name.as_deref(), Some("APT28"));
    assert_eq!(reloaded[0].aliases, vec!["FancyBear", "Sofacy"]);
}

#[test]
fn test_mixed_timestamp_formats_load() {
    let dir = TempDir::new().unwrap();
    let mut config = write_inputs(&dir);
    fs::write(
        &config.records_path,
        r#"[
            {"sha256_hashes": ["aaa"], "tags": ["Comment Panda"], "created_time": "2024-01-12T10:08:55Z"},
            {"md5_hashes": ["bbb"], "created_time": "2024-01-12T10:08:55.442000"},
            {"ips": ["192.0.2.10"], "created_time": "2024-01-12 10:08:55"},
            {"ips": ["192.0.2.11"], "created_time": "yesterday"}
        ]"#,
    )
    .unwrap();
    config.snapshot_path = None;

    let analysis = run(&config).unwrap();
    let indicators = &analysis.output.indicators;

    assert_eq!(analysis.report.build.records_seen, 4);
    assert_eq!(analysis.report.unique_indicators, 4);
    assert_eq!(analysis.report.indicator_kinds.ip_addresses, 2);

    let naive = indicators.get("192.0.2.10").unwrap().first_seen.unwrap();
    assert_eq!(naive.to_rfc3339(), "2024-01-12T10:08:55+00:00");
    assert_eq!(
        indicators.get("bbb").unwrap().first_seen.unwrap().timestamp(),
        naive.timestamp()
    );
    assert!(indicators.get("192.0.2.11").unwrap().first_seen.is_none());
}
