//! End-to-end scenarios and algebraic checks for the MDD engine.

use decision_diagrams::config::Config;
use decision_diagrams::ids::NodeId;
use decision_diagrams::mdd::MddManager;
use proptest::prelude::*;

fn three_valued_manager() -> (MddManager, decision_diagrams::ids::VariableId) {
    let mut m = MddManager::new(Config::default());
    let v = m.create_variable(3).unwrap();
    (m, v)
}

#[test]
fn every_value_literal_ored_together_is_true() {
    let (mut m, v) = three_valued_manager();
    let eq0 = m.variable_node(v, 0).unwrap();
    let eq1 = m.variable_node(v, 1).unwrap();
    let eq2 = m.variable_node(v, 2).unwrap();
    let eq0_or_eq1 = m.or(eq0, eq1);
    let any = m.or(eq0_or_eq1, eq2);
    assert_eq!(any, NodeId::TRUE);
}

#[test]
fn distinct_value_literals_are_mutually_exclusive() {
    let (mut m, v) = three_valued_manager();
    let eq0 = m.variable_node(v, 0).unwrap();
    let eq1 = m.variable_node(v, 1).unwrap();
    assert_eq!(m.and(eq0, eq1), NodeId::FALSE);
}

#[test]
fn evaluate_matches_the_chosen_value() {
    let (mut m, v) = three_valued_manager();
    let eq2 = m.variable_node(v, 2).unwrap();
    assert!(m.evaluate(eq2, &[2]));
    assert!(!m.evaluate(eq2, &[0]));
    assert!(!m.evaluate(eq2, &[1]));
}

#[test]
fn restrict_an_equality_literal_to_its_value_is_true() {
    let (mut m, v) = three_valued_manager();
    let eq1 = m.variable_node(v, 1).unwrap();
    assert_eq!(m.restrict(eq1, v, 1).unwrap(), NodeId::TRUE);
    assert_eq!(m.restrict(eq1, v, 0).unwrap(), NodeId::FALSE);
}

#[test]
fn count_satisfying_assignments_matches_the_domain_size() {
    let mut m = MddManager::new(Config::default());
    let v0 = m.create_variable(4).unwrap();
    let v1 = m.create_variable(3).unwrap();
    let eq0 = m.variable_node(v0, 0).unwrap();
    let _ = v1;
    assert_eq!(
        m.count_satisfying_assignments(eq0),
        num_bigint::BigUint::from(3u32)
    );
}

#[test]
fn create_variable_rejects_domains_below_two() {
    let mut m = MddManager::new(Config::default());
    assert!(m.create_variable(0).is_err());
    assert!(m.create_variable(1).is_err());
    assert!(m.create_variable(2).is_ok());
}

proptest! {
    #[test]
    fn not_is_involutive_for_any_value_literal(value in 0u32..5) {
        let mut m = MddManager::new(Config::default());
        let v = m.create_variable(5).unwrap();
        let literal = m.variable_node(v, value).unwrap();
        let double_negated = m.not(m.not(literal));
        prop_assert_eq!(double_negated, literal);
    }

    #[test]
    fn or_is_commutative_over_value_literals(a in 0u32..4, b in 0u32..4) {
        let mut m = MddManager::new(Config::default());
        let v = m.create_variable(4).unwrap();
        let la = m.variable_node(v, a).unwrap();
        let lb = m.variable_node(v, b).unwrap();
        prop_assert_eq!(m.or(la, lb), m.or(lb, la));
    }
}
