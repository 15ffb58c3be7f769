//! Lazy enumeration of all labeled digraphs on `n` nodes.
//!
//! # Example
//!
//! ```
//! use digraph_census::enumerate::enumerate;
//! use digraph_census::types::{IndexRange, NodeCount};
//!
//! let n = NodeCount::new(2).unwrap();
//! let all: Vec<_> = enumerate(n, IndexRange::Exclusive).collect();
//! assert_eq!(all.len(), 4);
//! ```
//!
//! Note: the number of items is `2^(n²-n)`, so anything beyond `n = 6` is
//! out of reach in practice.

use num_bigint::BigUint;

use crate::encode::encode_unchecked;
use crate::matrix::AdjacencyMatrix;
use crate::types::{ConfigIndex, IndexRange, NodeCount};

/// Iterator over `(index, matrix)` pairs in strictly increasing index order.
///
/// The iterator holds no shared state; cloning it (or calling [`enumerate`]
/// again) restarts the walk independently.
#[derive(Debug, Clone)]
pub struct Enumerator {
    nodes: NodeCount,
    range: IndexRange,
    next: ConfigIndex,
    /// Inclusive upper bound.
    last: ConfigIndex,
    exhausted: bool,
}

impl Enumerator {
    /// Creates an enumerator over the full index range.
    pub fn new(nodes: NodeCount, range: IndexRange) -> Self {
        Self {
            nodes,
            range,
            next: BigUint::ZERO,
            last: range.max_index(nodes),
            exhausted: false,
        }
    }

    pub fn nodes(&self) -> NodeCount {
        self.nodes
    }

    pub fn range(&self) -> IndexRange {
        self.range
    }

    /// Total number of items of a full walk, independent of progress.
    pub fn total(&self) -> BigUint {
        self.range.len(self.nodes)
    }

    /// Number of items not yet yielded.
    pub fn remaining(&self) -> BigUint {
        if self.exhausted {
            BigUint::ZERO
        } else {
            &self.last - &self.next + 1u32
        }
    }
}

impl Iterator for Enumerator {
    type Item = (ConfigIndex, AdjacencyMatrix);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let index = self.next.clone();
        let matrix = encode_unchecked(&index, self.nodes);
        if index == self.last {
            self.exhausted = true;
        } else {
            self.next += 1u32;
        }
        Some((index, matrix))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(&self.remaining()) {
            Ok(len) => (len, Some(len)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Enumerates every labeled digraph on `nodes` nodes.
pub fn enumerate(nodes: NodeCount, range: IndexRange) -> Enumerator {
    Enumerator::new(nodes, range)
}
