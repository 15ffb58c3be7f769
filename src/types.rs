//! Type-safe wrappers for node counts and configuration indices.
//!
//! The enumeration space has `2^(n²-n)` elements, which overflows `u64`
//! already for `n = 9`, so configuration indices are arbitrary-precision
//! [`BigUint`]s.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;

use crate::error::{Error, Result};

/// Integer label of one labeled adjacency matrix within the enumeration.
pub type ConfigIndex = BigUint;

/// Number of labeled vertices in every enumerated graph.
///
/// # Invariants
///
/// - The node count is always >= 1.
/// - `n * (n - 1)` fits in a `usize`, so [`NodeCount::bit_width`] cannot overflow.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeCount(usize);

impl NodeCount {
    /// Creates a node count, rejecting zero and counts whose index width overflows `usize`.
    pub fn new(nodes: usize) -> Result<Self> {
        if nodes == 0 {
            return Err(Error::InvalidNodeCount { nodes: 0 });
        }
        if nodes.checked_mul(nodes - 1).is_none() {
            return Err(Error::InvalidConfiguration(format!(
                "{} nodes need more than {} index bits",
                nodes,
                usize::MAX
            )));
        }
        Ok(NodeCount(nodes))
    }

    /// Returns the raw node count.
    pub fn get(self) -> usize {
        self.0
    }

    /// Number of off-diagonal cells, i.e. the number of bits in an index.
    pub fn bit_width(self) -> usize {
        self.0 * (self.0 - 1)
    }

    /// Number of distinct labeled digraphs, `2^(n²-n)`.
    pub fn configurations(self) -> BigUint {
        BigUint::from(1u32) << self.bit_width()
    }
}

impl TryFrom<i64> for NodeCount {
    type Error = Error;

    fn try_from(nodes: i64) -> Result<Self> {
        if nodes <= 0 {
            return Err(Error::InvalidNodeCount { nodes });
        }
        let nodes = usize::try_from(nodes).map_err(|_| Error::InvalidNodeCount { nodes })?;
        NodeCount::new(nodes)
    }
}

impl fmt::Display for NodeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which upper bound the enumeration uses.
///
/// With [`IndexRange::Exclusive`] the valid indices are `0 ..= 2^(n²-n) - 1`
/// and the encoding is a bijection. [`IndexRange::Inclusive`] additionally
/// admits `2^(n²-n)`, whose only set bit has no cell to land in, so it
/// decodes to the empty graph (a duplicate of index 0).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum IndexRange {
    #[default]
    Exclusive,
    Inclusive,
}

impl IndexRange {
    /// Largest valid index for the given node count.
    pub fn max_index(self, nodes: NodeCount) -> ConfigIndex {
        let span = nodes.configurations();
        match self {
            IndexRange::Exclusive => span - 1u32,
            IndexRange::Inclusive => span,
        }
    }

    /// Number of indices visited by a full enumeration.
    pub fn len(self, nodes: NodeCount) -> BigUint {
        self.max_index(nodes) + 1u32
    }

    /// Returns `true` if `index` is encodable under this range.
    pub fn contains(self, nodes: NodeCount, index: &ConfigIndex) -> bool {
        *index <= self.max_index(nodes)
    }
}

impl FromStr for IndexRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "exclusive" => Ok(IndexRange::Exclusive),
            "inclusive" => Ok(IndexRange::Inclusive),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown index range '{}', expected 'exclusive' or 'inclusive'",
                other
            ))),
        }
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexRange::Exclusive => write!(f, "exclusive"),
            IndexRange::Inclusive => write!(f, "inclusive"),
        }
    }
}
