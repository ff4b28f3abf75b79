use kira_consensus::background::BackgroundCounts;
use kira_consensus::consensus::{ContingencyTable, FastFisher, PValueKernel, aggregate, evaluate};
use kira_consensus::records::{Direction, Evidence, SignatureRecord};

#[test]
fn no_evidence_gives_unit_pvalues() {
    let fisher = FastFisher::default();
    let table = ContingencyTable::derive("A", 0, 0, 200).unwrap();
    let p = evaluate(&fisher, &[table]).unwrap();
    assert_eq!(p[0].up, 1.0);
    assert_eq!(p[0].down, 1.0);
    assert_eq!(fisher.pvalue(0, 0, 0, 0), 1.0);
}

#[test]
fn known_fisher_value() {
    // [[3, 1], [1, 3]] greater: P(X >= 3) = (16 + 1) / 70
    let p = FastFisher::new(100).pvalue(3, 1, 1, 3);
    assert!((p - 17.0 / 70.0).abs() < 1e-12, "{}", p);
}

#[test]
fn down_pvalue_is_up_pvalue_of_swapped_table() {
    let fisher = FastFisher::default();
    let tables: Vec<ContingencyTable> = [(5, 1, 100), (0, 7, 30), (12, 12, 50), (3, 0, 6)]
        .iter()
        .map(|&(a, b, total)| ContingencyTable::derive("E", a, b, total).unwrap())
        .collect();
    let swapped: Vec<ContingencyTable> = tables.iter().map(|t| t.swap_rows()).collect();

    let direct = evaluate(&fisher, &tables).unwrap();
    let mirrored = evaluate(&fisher, &swapped).unwrap();
    for (d, m) in direct.iter().zip(&mirrored) {
        assert_eq!(d.down, m.up);
    }
}

#[test]
fn strong_up_evidence_ranks_below_no_evidence() {
    let background: BackgroundCounts = [("DRUGA".to_string(), 100), ("DRUGB".to_string(), 100)]
        .into_iter()
        .collect();
    let records: Vec<SignatureRecord> = (0..40)
        .map(|_| SignatureRecord {
            entity_id: "DRUGA".to_string(),
            evidence: Evidence::Directional(Direction::Up),
        })
        .chain(std::iter::once(SignatureRecord {
            entity_id: "DRUGB".to_string(),
            evidence: Evidence::Directional(Direction::Down),
        }))
        .collect();

    let agg = aggregate(&records, None, &background);
    let p = evaluate(&FastFisher::default(), &agg.tables).unwrap();
    assert_eq!(agg.tables[0].entity_id, "DRUGA");
    assert!(p[0].up < p[1].up);
    assert!(p[0].up < 1e-6);
}

#[test]
fn large_tables_fall_back_to_stirling() {
    let small = FastFisher::new(10);
    let full = FastFisher::new(2_000);
    let a = small.pvalue(300, 200, 400, 500);
    let b = full.pvalue(300, 200, 400, 500);
    assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
    assert!((0.0..=1.0).contains(&a));
}

#[test]
fn closure_is_a_kernel() {
    let constant = |_: u64, _: u64, _: u64, _: u64| 0.25;
    let table = ContingencyTable::derive("A", 2, 1, 10).unwrap();
    let p = evaluate(&constant, &[table]).unwrap();
    assert_eq!(p[0].up, 0.25);
    assert_eq!(p[0].down, 0.25);
}
