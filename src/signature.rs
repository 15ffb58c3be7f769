//! Isomorphism invariants used to bucket graphs before consulting the oracle.
//!
//! Two isomorphic graphs always share a [`Signature`]; the converse does not
//! hold, so a shared signature only narrows down the candidates.

use crate::matrix::AdjacencyMatrix;

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Signature {
    edges: usize,
    /// Number of unordered pairs connected in both directions.
    mutual: usize,
    /// Sorted `(out_degree, in_degree)` pairs.
    degrees: Vec<(usize, usize)>,
}

impl Signature {
    pub fn of(matrix: &AdjacencyMatrix) -> Self {
        let n = matrix.nodes();
        let mut degrees: Vec<(usize, usize)> = (0..n)
            .map(|node| (matrix.out_degree(node), matrix.in_degree(node)))
            .collect();
        degrees.sort_unstable();
        let mutual = matrix
            .edges()
            .filter(|&(from, to)| from < to && matrix.has_edge(to, from))
            .count();
        Self {
            edges: matrix.edge_count(),
            mutual,
            degrees,
        }
    }

    pub fn edges(&self) -> usize {
        self.edges
    }

    pub fn mutual(&self) -> usize {
        self.mutual
    }

    pub fn degrees(&self) -> &[(usize, usize)] {
        &self.degrees
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use test_log::test;

    use super::*;
    use crate::enumerate::enumerate;
    use crate::types::{IndexRange, NodeCount};

    #[test]
    fn test_signature_values() {
        let n = NodeCount::new(3).unwrap();
        let m = AdjacencyMatrix::from_edges(n, [(0, 1), (1, 0), (1, 2)]).unwrap();
        let s = Signature::of(&m);
        assert_eq!(s.edges(), 3);
        assert_eq!(s.mutual(), 1);
        assert_eq!(s.degrees(), &[(0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_invariant_under_relabeling() {
        let n = NodeCount::new(4).unwrap();
        for (_, m) in enumerate(n, IndexRange::Exclusive).step_by(37) {
            let s = Signature::of(&m);
            for perm in (0..4).permutations(4) {
                assert_eq!(Signature::of(&m.permuted(&perm)), s);
            }
        }
    }

    #[test]
    fn test_separates_stars() {
        let n = NodeCount::new(3).unwrap();
        let out_star = AdjacencyMatrix::from_edges(n, [(0, 1), (0, 2)]).unwrap();
        let in_star = AdjacencyMatrix::from_edges(n, [(1, 0), (2, 0)]).unwrap();
        assert_ne!(Signature::of(&out_star), Signature::of(&in_star));
    }
}
