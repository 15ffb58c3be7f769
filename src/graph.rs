//! Directed graphs as handed to the isomorphism oracle.

use petgraph::graph::DiGraph;

use crate::matrix::AdjacencyMatrix;

/// An adjacency matrix together with its per-node out-neighbour lists.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Graph {
    matrix: AdjacencyMatrix,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    pub fn from_matrix(matrix: AdjacencyMatrix) -> Self {
        let adjacency = (0..matrix.nodes())
            .map(|node| matrix.out_neighbors(node).collect())
            .collect();
        Self { matrix, adjacency }
    }

    /// Number of vertices.
    pub fn order(&self) -> usize {
        self.matrix.nodes()
    }

    pub fn matrix(&self) -> &AdjacencyMatrix {
        &self.matrix
    }

    pub fn out_neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    /// Converts into a `petgraph` digraph with nodes `0..order`.
    pub fn to_petgraph(&self) -> DiGraph<(), ()> {
        let mut g = DiGraph::with_capacity(self.order(), self.matrix.edge_count());
        let nodes: Vec<_> = (0..self.order()).map(|_| g.add_node(())).collect();
        for (from, targets) in self.adjacency.iter().enumerate() {
            for &to in targets {
                g.add_edge(nodes[from], nodes[to], ());
            }
        }
        g
    }

    pub fn into_matrix(self) -> AdjacencyMatrix {
        self.matrix
    }
}

impl From<AdjacencyMatrix> for Graph {
    fn from(matrix: AdjacencyMatrix) -> Self {
        Graph::from_matrix(matrix)
    }
}
