//! Adjacency matrices of loop-free directed graphs.
//!
//! Row `i` of an [`AdjacencyMatrix`] lists the outgoing edges of node `i`:
//! cell `(from, to)` is 1 iff the edge `from -> to` exists. The diagonal is
//! always 0.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::error::{Error, Result};
use crate::types::NodeCount;

/// An `n×n` 0/1 matrix with a zero diagonal, stored row-major.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct AdjacencyMatrix {
    nodes: usize,
    cells: Vec<u8>,
}

impl AdjacencyMatrix {
    /// Creates the matrix of the edgeless graph.
    pub fn empty(nodes: NodeCount) -> Self {
        let n = nodes.get();
        Self {
            nodes: n,
            cells: vec![0; n * n],
        }
    }

    /// Builds a matrix from explicit rows, validating shape, cell values and diagonal.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::InvalidConfiguration("adjacency matrix has no rows".to_string()));
        }
        let mut cells = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(Error::InvalidConfiguration(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            for (j, &cell) in row.iter().enumerate() {
                if cell > 1 {
                    return Err(Error::InvalidConfiguration(format!(
                        "cell ({}, {}) holds {}, expected 0 or 1",
                        i, j, cell
                    )));
                }
                if i == j && cell != 0 {
                    return Err(Error::InvalidConfiguration(format!("self-loop at node {}", i)));
                }
            }
            cells.extend(row);
        }
        Ok(Self { nodes: n, cells })
    }

    /// Builds a matrix from an edge list.
    pub fn from_edges(nodes: NodeCount, edges: impl IntoIterator<Item = (usize, usize)>) -> Result<Self> {
        let mut matrix = Self::empty(nodes);
        for (from, to) in edges {
            if from >= matrix.nodes || to >= matrix.nodes {
                return Err(Error::InvalidConfiguration(format!(
                    "edge {} -> {} out of bounds for {} nodes",
                    from, to, matrix.nodes
                )));
            }
            if from == to {
                return Err(Error::InvalidConfiguration(format!("self-loop at node {}", from)));
            }
            matrix.set_edge(from, to);
        }
        Ok(matrix)
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    #[inline]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.cells[from * self.nodes + to] != 0
    }

    #[inline]
    pub(crate) fn set_edge(&mut self, from: usize, to: usize) {
        debug_assert_ne!(from, to);
        self.cells[from * self.nodes + to] = 1;
    }

    /// Iterates over all edges `(from, to)` in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.nodes;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell != 0)
            .map(move |(pos, _)| (pos / n, pos % n))
    }

    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    /// Destinations of the edges leaving `node`, in increasing order.
    pub fn out_neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(node)
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell != 0)
            .map(|(to, _)| to)
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.row(node).iter().filter(|&&cell| cell != 0).count()
    }

    pub fn in_degree(&self, node: usize) -> usize {
        (0..self.nodes).filter(|&from| self.has_edge(from, node)).count()
    }

    pub fn row(&self, node: usize) -> &[u8] {
        &self.cells[node * self.nodes..(node + 1) * self.nodes]
    }

    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.nodes).map(|row| row.to_vec()).collect()
    }

    /// Returns the transposed matrix (every edge reversed).
    pub fn transpose(&self) -> Self {
        let n = self.nodes;
        let mut cells = vec![0; n * n];
        for i in 0..n {
            for j in 0..n {
                cells[j * n + i] = self.cells[i * n + j];
            }
        }
        Self { nodes: n, cells }
    }

    /// Relabels the nodes: node `i` becomes node `perm[i]`.
    ///
    /// # Panics
    ///
    /// Panics if `perm` is not a permutation of `0..n`.
    pub fn permuted(&self, perm: &[usize]) -> Self {
        assert_eq!(perm.len(), self.nodes, "Permutation length must match node count");
        let n = self.nodes;
        let mut cells = vec![0; n * n];
        for (from, to) in self.edges() {
            cells[perm[from] * n + perm[to]] = 1;
        }
        Self { nodes: n, cells }
    }
}

impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.nodes).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

impl Serialize for AdjacencyMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.nodes))?;
        for row in self.cells.chunks(self.nodes) {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for AdjacencyMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let rows = Vec::<Vec<u8>>::deserialize(deserializer)?;
        AdjacencyMatrix::from_rows(rows).map_err(de::Error::custom)
    }
}
