use std::collections::HashSet;

use cn2_rules::star::StarUniverse;
use cn2_rules::{Atom, CandidateOrder, Value};

fn rows() -> Vec<Vec<Value>> {
    vec![
        vec![Value::Int(1), Value::Int(0)],
        vec![Value::Int(0), Value::Int(1)],
    ]
}

#[test]
fn universe_skips_bodies_repeating_a_feature() {
    let universe = StarUniverse::build(&rows(), 3);
    assert_eq!(universe.atoms().len(), 4);
    // 4 single atoms, 4 cross-feature pairs, no triple avoids a repeat
    assert_eq!(universe.len(), 8);
    for i in 0..universe.len() {
        let body = universe.body(i);
        let features: HashSet<usize> = body.iter().map(|a| a.feature).collect();
        assert_eq!(features.len(), body.len());
    }
}

#[test]
fn universe_is_in_ascending_lexicographic_order() {
    let universe = StarUniverse::build(&rows(), 2);
    let bodies: Vec<Vec<Atom>> = (0..universe.len()).map(|i| universe.body(i)).collect();
    assert_eq!(bodies[0], vec![Atom::new(0, Value::Int(0))]);
    assert_eq!(bodies[3], vec![Atom::new(1, Value::Int(1))]);
    assert_eq!(
        bodies[4],
        vec![Atom::new(0, Value::Int(0)), Atom::new(1, Value::Int(0))]
    );
}

#[test]
fn star_size_caps_body_length() {
    let universe = StarUniverse::build(&rows(), 1);
    assert_eq!(universe.len(), 4);
    assert!((0..universe.len()).all(|i| universe.body_indices(i).len() == 1));
}

#[test]
fn empty_data_gives_empty_universe() {
    let universe = StarUniverse::build(&[], 3);
    assert!(universe.is_empty());
}

#[test]
fn conflicts_and_unobserved_atoms_are_not_admissible() {
    let data = rows();
    let universe = StarUniverse::build(&data, 2);

    // Only the first row is still in play, and x[1] == 0 is a conflict
    let conflicts: HashSet<Atom> = [Atom::new(1, Value::Int(0))].into_iter().collect();
    let admissible = universe.admissible_atoms(data[..1].iter().map(|r| r.as_slice()), &conflicts);
    assert_eq!(admissible, vec![false, true, false, false]);

    let candidates = universe.candidates(&admissible, CandidateOrder::Ascending);
    assert_eq!(candidates.len(), 1);
    assert_eq!(
        universe.body(candidates[0]),
        vec![Atom::new(0, Value::Int(1))]
    );
}

#[test]
fn descending_order_reverses_candidates() {
    let data = rows();
    let universe = StarUniverse::build(&data, 2);
    let admissible =
        universe.admissible_atoms(data.iter().map(|r| r.as_slice()), &HashSet::new());

    let ascending = universe.candidates(&admissible, CandidateOrder::Ascending);
    let mut descending = universe.candidates(&admissible, CandidateOrder::Descending);
    descending.reverse();
    assert_eq!(ascending, descending);
    assert_eq!(ascending.len(), universe.len());
}
