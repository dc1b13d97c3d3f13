//! Candidate ("star") generation.
//!
//! The universe of candidate bodies is enumerated once per induction run:
//! every combination of 1..=`max_star_size` distinct atoms, skipping
//! combinations that constrain one feature twice. Each covering iteration then
//! only filters that universe by which atoms are currently admissible.

use crate::conf::CandidateOrder;
use crate::value::{Atom, Value};
use itertools::Itertools;
use std::collections::{BTreeSet, HashSet};

pub struct StarUniverse {
    atoms: Vec<Atom>,
    // Indices into `atoms`, ascending within each body
    bodies: Vec<Vec<usize>>,
}

impl StarUniverse {
    pub fn build(rows: &[Vec<Value>], max_star_size: usize) -> Self {
        let atoms: Vec<Atom> = rows
            .iter()
            .flat_map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(feature, value)| Atom::new(feature, value.clone()))
            })
            .collect::<BTreeSet<Atom>>()
            .into_iter()
            .collect();

        let mut bodies = Vec::new();
        for size in 1..=max_star_size.min(atoms.len()) {
            bodies.extend(
                (0..atoms.len())
                    .combinations(size)
                    // atoms are sorted by feature, so a repeated feature shows up as a neighbour
                    .filter(|body| {
                        body.windows(2)
                            .all(|pair| atoms[pair[0]].feature != atoms[pair[1]].feature)
                    }),
            );
        }

        Self { atoms, bodies }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn body_indices(&self, body: usize) -> &[usize] {
        &self.bodies[body]
    }

    pub fn body(&self, body: usize) -> Vec<Atom> {
        self.bodies[body]
            .iter()
            .map(|&a| self.atoms[a].clone())
            .collect()
    }

    /// Flags, per atom, whether it may appear in a candidate: it must occur in
    /// at least one of `rows` and must not be a conflict.
    pub fn admissible_atoms<'a, I>(&self, rows: I, conflicts: &HashSet<Atom>) -> Vec<bool>
    where
        I: IntoIterator<Item = &'a [Value]>,
    {
        let observed: HashSet<(usize, &Value)> = rows
            .into_iter()
            .flat_map(|row| row.iter().enumerate())
            .collect();
        self.atoms
            .iter()
            .map(|atom| {
                observed.contains(&(atom.feature, &atom.value)) && !conflicts.contains(atom)
            })
            .collect()
    }

    /// Bodies made only of admissible atoms, in scoring order.
    pub fn candidates(&self, admissible: &[bool], order: CandidateOrder) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| body.iter().all(|&a| admissible[a]))
            .map(|(idx, _)| idx)
            .collect();
        if order == CandidateOrder::Descending {
            out.reverse();
        }
        out
    }
}
