//! Collision of prisms held by the same process
use super::SweptMesh;
use crate::types::{PairingStrategy, RealScalar};

/// Check if prism `master_prism` of `master` collides with prism `slave_prism` of `slave`
pub fn check_prism_collision<T: RealScalar>(
    master: &SweptMesh<T>,
    master_prism: usize,
    slave: &SweptMesh<T>,
    slave_prism: usize,
) -> bool {
    master
        .prism(master_prism)
        .collides(&slave.prism(slave_prism))
}

/// Find all colliding pairs `(master prism, slave prism)`
///
/// Pairs are returned in lexicographic order.
pub fn tabulate_local_pairs<T: RealScalar>(
    master: &SweptMesh<T>,
    slave: &SweptMesh<T>,
    strategy: PairingStrategy,
) -> Vec<(usize, usize)> {
    let mut pairs = vec![];
    for i in 0..master.prism_count() {
        for j in 0..slave.prism_count() {
            if strategy.admits(master.prism_bounding_box(i), slave.prism_bounding_box(j))
                && check_prism_collision(master, i, slave, j)
            {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
