use std::fs;

use kira_consensus::config::{BenchmarkConfig, Metric, ScoreKind, TrialSpec};
use kira_consensus::rank::ScoreConvention;
use kira_consensus::records::SchemaVariant;
use tempfile::TempDir;

const CONFIG: &str = r#"{
  "scenario": "dexamethasone",
  "positives": ["dexamethasone"],
  "background": ["counts.json"],
  "methods": [
    { "name": "pvalue_up", "schema": "directional_term", "metric": "up",
      "depths": [500, 1000], "trials": { "dir": "enrich", "filter": "_up" } },
    { "name": "mw", "schema": "generic_pvalue", "metric": "pvalue",
      "trials": { "sources": ["mw/trial1.tsv", "/abs/trial2.tsv"] },
      "convention": "inclusive", "score": "count_normalized", "direction": "up" }
  ]
}"#;

#[test]
fn loads_with_defaults_and_resolves_paths() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bench.json");
    fs::write(&path, CONFIG).unwrap();

    let config = BenchmarkConfig::load(&path).unwrap();
    assert_eq!(config.threads, 0);
    assert!(!config.count_baseline);
    assert_eq!(config.background, vec![tmp.path().join("counts.json")]);

    let up = &config.methods[0];
    assert_eq!(up.schema, SchemaVariant::DirectionalTerm);
    assert_eq!(up.metric, Metric::Up);
    assert_eq!(up.convention, ScoreConvention::Exclusive);
    assert_eq!(up.cutoff, 0.05);
    assert_eq!(up.depth_plan(), vec![Some(500), Some(1000)]);
    assert_eq!(
        up.trials,
        TrialSpec::Discover {
            dir: tmp.path().join("enrich"),
            filter: Some("_up".to_string()),
        }
    );

    let mw = &config.methods[1];
    assert_eq!(mw.depth_plan(), vec![None]);
    assert_eq!(mw.score, ScoreKind::CountNormalized);
    assert_eq!(mw.convention, ScoreConvention::Inclusive);
    match &mw.trials {
        TrialSpec::Sources { sources } => {
            assert_eq!(sources[0], tmp.path().join("mw/trial1.tsv"));
            assert_eq!(sources[1], std::path::PathBuf::from("/abs/trial2.tsv"));
        }
        other => panic!("unexpected trials {:?}", other),
    }
}

#[test]
fn rejects_incompatible_metric() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bench.json");
    fs::write(
        &path,
        CONFIG.replace(r#""metric": "pvalue""#, r#""metric": "up""#),
    )
    .unwrap();
    let err = BenchmarkConfig::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("mw"));
}

#[test]
fn rejects_duplicate_names_and_zero_depth() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bench.json");

    fs::write(&path, CONFIG.replace(r#""name": "mw""#, r#""name": "pvalue_up""#)).unwrap();
    assert!(BenchmarkConfig::load(&path).is_err());

    fs::write(&path, CONFIG.replace("[500, 1000]", "[0, 1000]")).unwrap();
    assert!(BenchmarkConfig::load(&path).is_err());
}

#[test]
fn rejects_missing_positives() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bench.json");
    fs::write(&path, CONFIG.replace(r#"["dexamethasone"]"#, "[]")).unwrap();
    assert!(BenchmarkConfig::load(&path).is_err());
}

#[test]
fn rejects_direction_gate_on_consensus_methods() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bench.json");
    fs::write(
        &path,
        CONFIG.replace(
            r#""depths": [500, 1000],"#,
            r#""depths": [500, 1000], "direction": "up","#,
        ),
    )
    .unwrap();
    let err = BenchmarkConfig::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("pvalue_up"));

    // the generic method keeps its gate
    fs::write(&path, CONFIG).unwrap();
    let config = BenchmarkConfig::load(&path).unwrap();
    let mut paired = config.methods[0].clone();
    paired.schema = SchemaVariant::PairedPvalue;
    paired.direction = Some(kira_consensus::records::Direction::Down);
    assert!(paired.validate().is_err());
    assert!(config.methods[1].validate().is_ok());
}
