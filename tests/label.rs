use kira_consensus::label::{LabelOracle, SubstringOracle, label_entity};
use kira_consensus::records::Direction;

#[test]
fn substring_match_ignores_case() {
    let oracle = SubstringOracle::new(["Dexamethasone", " ", "NR3C1"]);
    assert!(oracle.label("dexamethasone-acetate"));
    assert!(oracle.label("NR3C1"));
    assert!(!oracle.label("prednisone"));
}

#[test]
fn required_direction_gates_the_label() {
    let oracle = SubstringOracle::new(["nr3c1"]);
    assert!(label_entity(&oracle, "NR3C1", Some(Direction::Down), None));
    assert!(label_entity(&oracle, "NR3C1", Some(Direction::Down), Some(Direction::Down)));
    assert!(!label_entity(&oracle, "NR3C1", Some(Direction::Up), Some(Direction::Down)));
    assert!(!label_entity(&oracle, "NR3C1", None, Some(Direction::Down)));
}

#[test]
fn closures_are_oracles() {
    let oracle = |id: &str| id.starts_with("brd");
    assert!(label_entity(&oracle, "BRD-K1", None, None));
    assert!(!label_entity(&oracle, "NR3C1", None, None));
}
