use std::collections::BTreeMap;
use std::fs;

use kira_consensus::background::{
    BackgroundCounts, counts_from_gmt, load_counts_json, load_merged, write_counts_json,
};
use tempfile::TempDir;

fn counts(pairs: &[(&str, u64)]) -> BackgroundCounts {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn resolve_tries_case_variants_in_order() {
    let bg = counts(&[("TAMOXIFEN", 10), ("metformin", 4), ("Aspirin", 7)]);
    assert_eq!(bg.resolve("tamoxifen"), Some(10));
    assert_eq!(bg.resolve("METFORMIN"), Some(4));
    assert_eq!(bg.resolve("aSPIRIN"), Some(7));
    assert_eq!(bg.resolve("ibuprofen"), None);
    // exact lookup stays strict
    assert_eq!(bg.get("tamoxifen"), None);
}

#[test]
fn zero_count_is_absent() {
    let bg = counts(&[("X", 0)]);
    assert_eq!(bg.get("X"), None);
}

#[test]
fn merged_json_later_files_override() {
    let tmp = TempDir::new().unwrap();
    let a = tmp.path().join("a.json");
    let b = tmp.path().join("b.json");
    fs::write(&a, r#"{"X": 10, "Y": 4}"#).unwrap();
    fs::write(&b, r#"{"Y": 8.0, "Z": 2}"#).unwrap();

    let bg = load_merged(&[a, b]).unwrap();
    assert_eq!(bg.len(), 3);
    assert_eq!(bg.get("X"), Some(10));
    assert_eq!(bg.get("Y"), Some(8));
    assert_eq!(bg.get("Z"), Some(2));
}

#[test]
fn fractional_count_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.json");
    fs::write(&path, r#"{"X": 2.5}"#).unwrap();
    assert!(load_counts_json(&path).is_err());
}

#[test]
fn gmt_counts_entities_and_skips_brdn() {
    let tmp = TempDir::new().unwrap();
    let gmt = tmp.path().join("lib.gmt");
    fs::write(
        &gmt,
        "CPC004_A375_6H_X1_dexamethasone_10UM up\t\tGENE1\tGENE2\n\
         CPC004_PC3_6H_X2_dexamethasone_10UM down\t\tGENE3\n\
         XPR001_A549_96H_X1_NR3C1 up\t\tGENE1\n\
         CPC004_A375_6H_X1_BRDN0001_10UM up\t\tGENE9\n\
         short_term\t\tGENE1\n",
    )
    .unwrap();

    let bg = counts_from_gmt(&gmt).unwrap();
    assert_eq!(bg.len(), 2);
    assert_eq!(bg.get("dexamethasone"), Some(2));
    assert_eq!(bg.get("NR3C1"), Some(1));
    assert_eq!(bg.get("BRDN0001"), None);
}

#[test]
fn counts_json_written_and_read_back() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("counts.json");
    let bg = counts(&[("A", 3), ("B", 1)]);
    write_counts_json(&path, &bg).unwrap();

    let raw: BTreeMap<String, u64> =
        serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw.get("A"), Some(&3));
    assert_eq!(load_counts_json(&path).unwrap(), bg);
}

#[test]
fn accumulate_sums_counts() {
    let mut bg = counts(&[("A", 3)]);
    bg.accumulate(counts(&[("A", 2), ("B", 1)]));
    assert_eq!(bg.get("A"), Some(5));
    assert_eq!(bg.get("B"), Some(1));
}
