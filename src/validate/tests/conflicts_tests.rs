use crate::core::specifier::SpecifierSet;
use crate::validate::conflicts::{Satisfiability, analyze};

fn analyze_set(text: &str) -> Satisfiability {
    let set = SpecifierSet::try_from_str(text).expect("fixture set should parse");
    analyze(set.specifiers.iter())
}

fn expect_conflict(text: &str) -> String {
    match analyze_set(text) {
        Satisfiability::Conflict(detail) => detail,
        Satisfiability::Satisfiable => panic!("expected conflict for '{text}'"),
    }
}

#[test]
fn single_bound_is_satisfiable() {
    assert_eq!(analyze_set(">=1.0"), Satisfiability::Satisfiable);
}

#[test]
fn touching_inclusive_bounds_are_satisfiable() {
    assert_eq!(analyze_set(">=1.0,<=1.0"), Satisfiability::Satisfiable);
}

#[test]
fn disjoint_bounds_conflict() {
    let detail = expect_conflict(">=2.0,<1.0");
    assert!(detail.contains(">=2.0"));
    assert!(detail.contains("<1.0"));
}

#[test]
fn exclusive_touching_bounds_conflict() {
    assert!(analyze_set(">1.0,<=1.0").is_conflict());
    assert!(analyze_set(">=1.0,<1.0").is_conflict());
}

#[test]
fn different_pins_conflict() {
    let detail = expect_conflict("==1.0,==2.0");
    assert!(detail.contains("pin different versions"));
}

#[test]
fn equal_pins_with_different_spellings_agree() {
    assert_eq!(analyze_set("==1.0,==1.0.0"), Satisfiability::Satisfiable);
}

#[test]
fn pin_outside_lower_bound_conflicts() {
    let detail = expect_conflict("==0.9,>=1.0");
    assert!(detail.contains("'==0.9' is excluded by '>=1.0'"));
}

#[test]
fn pin_outside_upper_bound_conflicts() {
    assert!(analyze_set("==2.5,<2.0").is_conflict());
}

#[test]
fn pin_on_exclusive_bound_edge_conflicts() {
    assert!(analyze_set("==1.0,>1.0").is_conflict());
    assert_eq!(analyze_set("==1.0,>=1.0"), Satisfiability::Satisfiable);
}

#[test]
fn pin_against_exclusion_conflicts() {
    let detail = expect_conflict("==1.0,!=1.0");
    assert!(detail.contains("contradicts"));
}

#[test]
fn pin_inside_excluded_wildcard_range_conflicts() {
    assert!(analyze_set("==1.4.2,!=1.4.*").is_conflict());
    assert_eq!(analyze_set("==1.5.0,!=1.4.*"), Satisfiability::Satisfiable);
}

#[test]
fn wildcard_pin_behaves_as_interval() {
    assert_eq!(analyze_set("==1.4.*,>=1.4.2"), Satisfiability::Satisfiable);
    assert!(analyze_set("==1.4.*,>=1.5").is_conflict());
    assert!(analyze_set("==1.4.*,==1.5.2").is_conflict());
}

#[test]
fn compatible_release_narrows_to_conflict() {
    assert!(analyze_set("~=1.4.2,>=1.5").is_conflict());
    assert_eq!(analyze_set("~=1.4.2,>=1.4.5"), Satisfiability::Satisfiable);
}

#[test]
fn plain_exclusions_do_not_conflict_alone() {
    assert_eq!(analyze_set("!=1.0,!=2.0,>=0.5"), Satisfiability::Satisfiable);
}
