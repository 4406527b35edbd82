//! Property-based checks of the boolean-algebra laws the BDD engine must satisfy, plus a handful
//! of concrete end-to-end scenarios with specific values.

use decision_diagrams::bdd::BddManager;
use decision_diagrams::config::Config;
use decision_diagrams::ids::NodeId;
use proptest::prelude::*;

fn manager_with_variables(count: usize) -> (BddManager, Vec<NodeId>) {
    let mut m = BddManager::new(Config::default());
    let variables = m.create_variables(count).unwrap();
    let literals = variables.iter().map(|&v| m.variable_node(v).unwrap()).collect();
    (m, literals)
}

/// A small formula tree over up to `n` literals, used to generate arbitrary BDD nodes.
#[derive(Clone, Debug)]
enum Formula {
    Var(usize),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
}

fn arb_formula(n: usize) -> impl Strategy<Value = Formula> {
    let leaf = (0..n).prop_map(Formula::Var);
    leaf.prop_recursive(6, 32, 4, move |inner| {
        prop_oneof![
            inner.clone().prop_map(|f| Formula::Not(Box::new(f))),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Formula::And(Box::new(a), Box::new(b))),
            (inner.clone(), inner).prop_map(|(a, b)| Formula::Or(Box::new(a), Box::new(b))),
        ]
    })
}

fn build(m: &mut BddManager, literals: &[NodeId], formula: &Formula) -> NodeId {
    match formula {
        Formula::Var(i) => literals[*i],
        Formula::Not(f) => {
            let inner = build(m, literals, f);
            m.not(inner)
        }
        Formula::And(a, b) => {
            let left = build(m, literals, a);
            let right = build(m, literals, b);
            m.and(left, right)
        }
        Formula::Or(a, b) => {
            let left = build(m, literals, a);
            let right = build(m, literals, b);
            m.or(left, right)
        }
    }
}

proptest! {
    #[test]
    fn and_is_commutative(f1 in arb_formula(4), f2 in arb_formula(4)) {
        let (mut m, literals) = manager_with_variables(4);
        let a = build(&mut m, &literals, &f1);
        let b = build(&mut m, &literals, &f2);
        prop_assert_eq!(m.and(a, b), m.and(b, a));
    }

    #[test]
    fn or_is_commutative(f1 in arb_formula(4), f2 in arb_formula(4)) {
        let (mut m, literals) = manager_with_variables(4);
        let a = build(&mut m, &literals, &f1);
        let b = build(&mut m, &literals, &f2);
        prop_assert_eq!(m.or(a, b), m.or(b, a));
    }

    #[test]
    fn not_is_involutive(f in arb_formula(4)) {
        let (mut m, literals) = manager_with_variables(4);
        let a = build(&mut m, &literals, &f);
        let double_negated = m.not(m.not(a));
        prop_assert_eq!(double_negated, a);
    }

    #[test]
    fn de_morgan_and(f1 in arb_formula(4), f2 in arb_formula(4)) {
        let (mut m, literals) = manager_with_variables(4);
        let a = build(&mut m, &literals, &f1);
        let b = build(&mut m, &literals, &f2);
        let not_a = m.not(a);
        let not_b = m.not(b);
        let lhs = m.not(m.and(a, b));
        let rhs = m.or(not_a, not_b);
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn iterative_and_recursive_apply_agree(f1 in arb_formula(4), f2 in arb_formula(4)) {
        let (mut m, literals) = manager_with_variables(4);
        let a = build(&mut m, &literals, &f1);
        let b = build(&mut m, &literals, &f2);
        prop_assert_eq!(m.and(a, b), m.and_recursive(a, b));
        prop_assert_eq!(m.or(a, b), m.or_recursive(a, b));
        prop_assert_eq!(m.not(a), m.not_recursive(a));
    }

    #[test]
    fn evaluate_agrees_with_construction(f in arb_formula(3), bits in prop::array::uniform3(any::<bool>())) {
        let (mut m, literals) = manager_with_variables(3);
        let node = build(&mut m, &literals, &f);
        let expected = eval_formula(&f, &bits);
        prop_assert_eq!(m.evaluate(node, &bits), expected);
    }
}

fn eval_formula(formula: &Formula, bits: &[bool]) -> bool {
    match formula {
        Formula::Var(i) => bits[*i],
        Formula::Not(f) => !eval_formula(f, bits),
        Formula::And(a, b) => eval_formula(a, bits) && eval_formula(b, bits),
        Formula::Or(a, b) => eval_formula(a, bits) || eval_formula(b, bits),
    }
}

#[test]
fn tautology_is_true_for_every_assignment() {
    let (mut m, literals) = manager_with_variables(2);
    let a = literals[0];
    let not_a = m.not(a);
    let tautology = m.or(a, not_a);
    assert_eq!(tautology, NodeId::TRUE);
    assert!(m.evaluate(tautology, &[true, true]));
    assert!(m.evaluate(tautology, &[false, false]));
}

#[test]
fn contradiction_is_false_for_every_assignment() {
    let (mut m, literals) = manager_with_variables(1);
    let a = literals[0];
    let not_a = m.not(a);
    let contradiction = m.and(a, not_a);
    assert_eq!(contradiction, NodeId::FALSE);
}

#[test]
fn implication_matches_material_conditional_truth_table() {
    let (mut m, literals) = manager_with_variables(2);
    let a = literals[0];
    let b = literals[1];
    let implication = m.implication(a, b);
    assert!(m.evaluate(implication, &[false, false]));
    assert!(m.evaluate(implication, &[false, true]));
    assert!(!m.evaluate(implication, &[true, false]));
    assert!(m.evaluate(implication, &[true, true]));
}

#[test]
fn implies_agrees_with_implication_being_true() {
    let (mut m, literals) = manager_with_variables(2);
    let a = literals[0];
    let b = literals[1];
    let implication = m.implication(a, b);
    assert_eq!(m.implies(a, b), implication == NodeId::TRUE);
}

#[test]
fn restrict_then_evaluate_matches_direct_evaluation() {
    let (mut m, literals) = manager_with_variables(3);
    let a = literals[0];
    let b = literals[1];
    let c = literals[2];
    let va = m.variable_of(a);
    let ab = m.and(a, b);
    let formula = m.or(ab, c);

    let restricted = m.restrict(formula, va, true).unwrap();
    assert!(m.evaluate(restricted, &[true, false, false]));
    assert_eq!(m.evaluate(restricted, &[true, false, false]), m.evaluate(formula, &[true, false, false]));
}

#[test]
fn exists_over_a_variable_matches_or_of_both_cofactors() {
    let (mut m, literals) = manager_with_variables(2);
    let a = literals[0];
    let b = literals[1];
    let va = m.variable_of(a);
    let formula = m.and(a, b);
    let projected = m.restrict(formula, va, true).unwrap();
    let projected_false = m.restrict(formula, va, false).unwrap();
    let expected = m.or(projected, projected_false);
    assert_eq!(m.exists(formula, &[va]), expected);
}

#[test]
fn count_satisfying_assignments_of_a_single_literal_is_half_the_space() {
    let (mut m, literals) = manager_with_variables(3);
    let a = literals[0];
    let count = m.count_satisfying_assignments(a);
    assert_eq!(count, num_bigint::BigUint::from(4u32));
}

#[test]
fn gc_preserves_referenced_nodes_across_many_allocations() {
    let (mut m, literals) = manager_with_variables(2);
    let a = literals[0];
    let b = literals[1];
    let kept = m.and(a, b);
    m.reference(kept);

    for i in 0..2000 {
        let v = m.create_variable();
        let lit = m.variable_node(v).unwrap();
        let _garbage = m.or(lit, NodeId::FALSE);
        if i % 100 == 0 {
            m.force_gc();
        }
    }

    assert_eq!(m.and(a, b), kept);
    m.dereference(kept);
}
