//! Isomorphism oracles.
//!
//! The partitioner never decides isomorphism itself; it asks an
//! [`IsomorphismOracle`]. Two adapters are provided:
//!
//! | Oracle | Backend | Use Case |
//! |--------|---------|----------|
//! | [`Vf2Oracle`] | `petgraph`'s VF2 matcher | Default |
//! | [`PermutationOracle`] | Tries every relabeling | Reference check, tiny graphs |
//!
//! Any `Fn(&Graph, &Graph) -> Result<bool, OracleError> + Sync` closure is an
//! oracle as well, which is handy for stubs.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

use crate::error::Error;
use crate::graph::Graph;

/// Reason an oracle could not answer.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("{0}")]
pub struct OracleError(pub String);

/// Decides whether two directed graphs of equal order are isomorphic.
///
/// Implementations must be pure and deterministic. `Sync` is required so that
/// representatives can be matched in parallel.
pub trait IsomorphismOracle: Sync {
    fn is_isomorphic(&self, a: &Graph, b: &Graph) -> Result<bool, OracleError>;
}

impl<F> IsomorphismOracle for F
where
    F: Fn(&Graph, &Graph) -> Result<bool, OracleError> + Sync,
{
    fn is_isomorphic(&self, a: &Graph, b: &Graph) -> Result<bool, OracleError> {
        self(a, b)
    }
}

fn check_orders(a: &Graph, b: &Graph) -> Result<(), OracleError> {
    if a.order() != b.order() {
        return Err(OracleError(format!(
            "graphs of different order ({} vs {})",
            a.order(),
            b.order()
        )));
    }
    Ok(())
}

/// Oracle backed by [`petgraph::algo::is_isomorphic`].
#[derive(Debug, Default, Copy, Clone)]
pub struct Vf2Oracle;

impl IsomorphismOracle for Vf2Oracle {
    fn is_isomorphic(&self, a: &Graph, b: &Graph) -> Result<bool, OracleError> {
        check_orders(a, b)?;
        if a.matrix().edge_count() != b.matrix().edge_count() {
            return Ok(false);
        }
        Ok(petgraph::algo::is_isomorphic(&a.to_petgraph(), &b.to_petgraph()))
    }
}

/// Oracle that searches all `n!` relabelings.
///
/// Refuses graphs with more than [`PermutationOracle::max_order`] nodes.
#[derive(Debug, Copy, Clone)]
pub struct PermutationOracle {
    pub max_order: usize,
}

impl Default for PermutationOracle {
    fn default() -> Self {
        Self { max_order: 8 }
    }
}

impl IsomorphismOracle for PermutationOracle {
    fn is_isomorphic(&self, a: &Graph, b: &Graph) -> Result<bool, OracleError> {
        check_orders(a, b)?;
        let n = a.order();
        if n > self.max_order {
            return Err(OracleError(format!(
                "{} nodes exceed the permutation oracle limit of {}",
                n, self.max_order
            )));
        }

        let (ma, mb) = (a.matrix(), b.matrix());
        if ma.edge_count() != mb.edge_count() {
            return Ok(false);
        }

        let found = (0..n)
            .permutations(n)
            .any(|perm| ma.edges().all(|(from, to)| mb.has_edge(perm[from], perm[to])));
        Ok(found)
    }
}

/// Oracle selection by name, for the command line.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum OracleKind {
    #[default]
    Vf2,
    Permutation,
}

impl FromStr for OracleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "vf2" => Ok(OracleKind::Vf2),
            "permutation" => Ok(OracleKind::Permutation),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown oracle '{}', expected 'vf2' or 'permutation'",
                other
            ))),
        }
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleKind::Vf2 => write!(f, "vf2"),
            OracleKind::Permutation => write!(f, "permutation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::enumerate::enumerate;
    use crate::matrix::AdjacencyMatrix;
    use crate::types::{IndexRange, NodeCount};

    fn graph(nodes: usize, edges: &[(usize, usize)]) -> Graph {
        let n = NodeCount::new(nodes).unwrap();
        Graph::from(AdjacencyMatrix::from_edges(n, edges.iter().copied()).unwrap())
    }

    #[test]
    fn test_single_edges_are_isomorphic() {
        let a = graph(2, &[(0, 1)]);
        let b = graph(2, &[(1, 0)]);
        let c = graph(2, &[(0, 1), (1, 0)]);

        assert_eq!(Vf2Oracle.is_isomorphic(&a, &b), Ok(true));
        assert_eq!(Vf2Oracle.is_isomorphic(&a, &c), Ok(false));
        assert_eq!(PermutationOracle::default().is_isomorphic(&a, &b), Ok(true));
        assert_eq!(PermutationOracle::default().is_isomorphic(&a, &c), Ok(false));
    }

    #[test]
    fn test_direction_matters() {
        // Out-star vs in-star on three nodes: same edge count, not isomorphic.
        let out_star = graph(3, &[(0, 1), (0, 2)]);
        let in_star = graph(3, &[(1, 0), (2, 0)]);
        let path = graph(3, &[(0, 1), (1, 2)]);

        for (a, b) in [(&out_star, &in_star), (&out_star, &path), (&in_star, &path)] {
            assert_eq!(Vf2Oracle.is_isomorphic(a, b), Ok(false));
            assert_eq!(PermutationOracle::default().is_isomorphic(a, b), Ok(false));
        }
    }

    #[test]
    fn test_oracles_agree_on_three_nodes() {
        let n = NodeCount::new(3).unwrap();
        let graphs: Vec<Graph> = enumerate(n, IndexRange::Exclusive).map(|(_, m)| Graph::from(m)).collect();
        let reference = PermutationOracle::default();
        for a in &graphs {
            for b in &graphs {
                assert_eq!(
                    Vf2Oracle.is_isomorphic(a, b),
                    reference.is_isomorphic(a, b),
                    "disagreement on\n{}\nvs\n{}",
                    a.matrix(),
                    b.matrix()
                );
            }
        }
    }

    #[test]
    fn test_order_mismatch() {
        let a = graph(2, &[]);
        let b = graph(3, &[]);
        assert!(Vf2Oracle.is_isomorphic(&a, &b).is_err());
        assert!(PermutationOracle::default().is_isomorphic(&a, &b).is_err());
    }

    #[test]
    fn test_permutation_limit() {
        let oracle = PermutationOracle { max_order: 2 };
        let a = graph(3, &[]);
        let err = oracle.is_isomorphic(&a, &a).unwrap_err();
        assert!(err.0.contains("limit"));
    }

    #[test]
    fn test_closure_oracle() {
        let same_edge_count = |a: &Graph, b: &Graph| -> Result<bool, OracleError> {
            Ok(a.matrix().edge_count() == b.matrix().edge_count())
        };
        let a = graph(3, &[(0, 1), (0, 2)]);
        let b = graph(3, &[(1, 0), (2, 0)]);
        assert_eq!(same_edge_count.is_isomorphic(&a, &b), Ok(true));
    }

    #[test]
    fn test_oracle_kind_parse() {
        assert_eq!("vf2".parse::<OracleKind>().unwrap(), OracleKind::Vf2);
        assert_eq!("permutation".parse::<OracleKind>().unwrap(), OracleKind::Permutation);
        assert!("nauty".parse::<OracleKind>().is_err());
        assert_eq!(OracleKind::Permutation.to_string(), "permutation");
    }
}
