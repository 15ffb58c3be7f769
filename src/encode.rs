//! Bijection between configuration indices and adjacency matrices.
//!
//! An index is read as an `n²-n` bit number, least significant bit first.
//! The bits are laid, in order, into the off-diagonal cells of an `n×n`
//! layout walked in row-major order (the diagonal is skipped and stays 0).
//! Equivalently, the layout is filled in `n-1` blocks of `n` consecutive
//! bits, block `x` starting right after diagonal cell `(x-1, x-1)`.
//! The public matrix is the *transpose* of that layout, so row `i` lists the
//! outgoing edges of node `i`.
//!
//! ```text
//! n = 3, layout bit positions:      public matrix:
//!   .  0  1                           .  2  4
//!   2  .  3                           0  .  5
//!   4  5  .                           1  3  .
//! ```
//!
//! # Example
//!
//! ```
//! use digraph_census::encode::{decode, encode};
//! use digraph_census::types::{IndexRange, NodeCount};
//! use num_bigint::BigUint;
//!
//! let n = NodeCount::new(2).unwrap();
//! let m = encode(&BigUint::from(3u32), n, IndexRange::Exclusive).unwrap();
//! assert_eq!(m.rows(), vec![vec![0, 1], vec![1, 0]]);
//! assert_eq!(decode(&m), BigUint::from(3u32));
//! ```

use num_bigint::BigUint;

use crate::error::{Error, Result};
use crate::matrix::AdjacencyMatrix;
use crate::types::{ConfigIndex, IndexRange, NodeCount};

/// Layout cell `(row, col)` that receives bit `bit`.
#[inline]
fn layout_cell(bit: usize, n: usize) -> (usize, usize) {
    let row = bit / (n - 1);
    let col = bit % (n - 1);
    if col >= row {
        (row, col + 1)
    } else {
        (row, col)
    }
}

/// Bit position stored in layout cell `(row, col)`, `row != col`.
#[inline]
fn layout_bit(row: usize, col: usize, n: usize) -> usize {
    debug_assert_ne!(row, col);
    row * (n - 1) + if col > row { col - 1 } else { col }
}

/// Decodes `index` into the adjacency matrix it labels.
///
/// Fails with [`Error::IndexOutOfRange`] if `index` exceeds the upper bound
/// of `range`.
pub fn encode(index: &ConfigIndex, nodes: NodeCount, range: IndexRange) -> Result<AdjacencyMatrix> {
    if !range.contains(nodes, index) {
        return Err(Error::IndexOutOfRange {
            index: index.clone(),
            max: range.max_index(nodes),
            nodes: nodes.get(),
        });
    }
    Ok(encode_unchecked(index, nodes))
}

/// Same as [`encode`] without the range check. Bits at position `n²-n` and
/// above have no cell and are ignored.
pub(crate) fn encode_unchecked(index: &ConfigIndex, nodes: NodeCount) -> AdjacencyMatrix {
    let n = nodes.get();
    let mut matrix = AdjacencyMatrix::empty(nodes);
    let width = nodes.bit_width().min(index.bits() as usize);
    for bit in 0..width {
        if index.bit(bit as u64) {
            let (row, col) = layout_cell(bit, n);
            // Transposed on the fly: layout (row, col) is the edge col -> row.
            matrix.set_edge(col, row);
        }
    }
    matrix
}

/// Returns the unique index in `0 .. 2^(n²-n)` that encodes to `matrix`.
pub fn decode(matrix: &AdjacencyMatrix) -> ConfigIndex {
    let n = matrix.nodes();
    let mut index = BigUint::ZERO;
    for (from, to) in matrix.edges() {
        index.set_bit(layout_bit(to, from, n) as u64, true);
    }
    index
}
