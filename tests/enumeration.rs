//! End-to-end checks for path/solution enumeration and support computation.

use decision_diagrams::bdd::BddManager;
use decision_diagrams::config::Config;
use decision_diagrams::primitives::Bitset;

#[test]
fn support_of_a_formula_is_exactly_its_free_variables() {
    let mut m = BddManager::new(Config::default());
    let va = m.create_variable();
    let vb = m.create_variable();
    let vc = m.create_variable();
    let a = m.variable_node(va).unwrap();
    let b = m.variable_node(vb).unwrap();
    let _c = m.variable_node(vc).unwrap();

    let formula = m.and(a, b);
    let support = m.support(formula);
    assert!(support.get(va.as_u32() as usize));
    assert!(support.get(vb.as_u32() as usize));
    assert!(!support.get(vc.as_u32() as usize));
}

#[test]
fn solution_iterator_enumerates_every_assignment_of_a_two_variable_tautology() {
    let mut m = BddManager::new(Config::default());
    let va = m.create_variable();
    let vb = m.create_variable();
    let a = m.variable_node(va).unwrap();
    let not_a = m.not(a);
    let tautology = m.or(a, not_a);

    let mut support = Bitset::new();
    support.set(va.as_u32() as usize);
    support.set(vb.as_u32() as usize);

    let mut seen = Vec::new();
    m.for_each_solution(tautology, support, |assignment| {
        seen.push(assignment.clone());
    });
    assert_eq!(seen.len(), 4);

    let mut deduped = seen.clone();
    deduped.sort_by_key(|b| b.iter_set().collect::<Vec<_>>());
    deduped.dedup();
    assert_eq!(deduped.len(), 4);
}

#[test]
fn for_each_path_visits_one_path_per_reduced_branch() {
    let mut m = BddManager::new(Config::default());
    let va = m.create_variable();
    let vb = m.create_variable();
    let a = m.variable_node(va).unwrap();
    let b = m.variable_node(vb).unwrap();
    let formula = m.or(a, b);

    let mut path_count = 0;
    m.for_each_path(formula, |_values, _dont_care| {
        path_count += 1;
    });
    // `a OR b` reduces to two paths to TRUE: one through `a`'s high edge, one through `a`'s low
    // edge and `b`'s high edge.
    assert_eq!(path_count, 2);
}

#[test]
fn get_satisfying_assignment_round_trips_through_evaluate() {
    let mut m = BddManager::new(Config::default());
    let va = m.create_variable();
    let vb = m.create_variable();
    let a = m.variable_node(va).unwrap();
    let b = m.variable_node(vb).unwrap();
    let formula = m.and(a, b);

    let assignment = m.get_satisfying_assignment(formula).unwrap();
    let bits: Vec<bool> = (0..2).map(|i| assignment.get(i)).collect();
    assert!(m.evaluate(formula, &bits));
}

#[test]
fn get_satisfying_assignment_on_false_is_an_error() {
    let mut m = BddManager::new(Config::default());
    let _ = m.create_variable();
    assert!(m
        .get_satisfying_assignment(decision_diagrams::ids::NodeId::FALSE)
        .is_err());
}
