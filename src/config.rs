//! Run configuration.
//!
//! # Example
//!
//! ```
//! use digraph_census::config::RunConfig;
//! use digraph_census::partition::Strategy;
//! use digraph_census::types::NodeCount;
//!
//! let config = RunConfig::new(NodeCount::new(3).unwrap())
//!     .with_strategy(Strategy::Bucketed)
//!     .with_budget(Some(1 << 20));
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use num_bigint::BigUint;

use crate::error::{Error, Result};
use crate::partition::Strategy;
use crate::types::{IndexRange, NodeCount};

/// Parameters of one enumeration run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of nodes of every enumerated graph.
    pub nodes: NodeCount,
    /// Upper bound convention of the index range (default: exclusive).
    pub range: IndexRange,
    /// Candidate selection for the partitioner (default: linear).
    pub strategy: Strategy,
    /// Match representatives in parallel (default: false).
    pub parallel: bool,
    /// Maximum number of configurations the run may enumerate (default: unlimited).
    pub budget: Option<u64>,
    /// Directory receiving the artifacts (default: current directory).
    pub output_dir: PathBuf,
    /// Stream the full index log to disk instead of buffering it (default: false).
    pub stream_log: bool,
}

impl RunConfig {
    pub fn new(nodes: NodeCount) -> Self {
        Self {
            nodes,
            range: IndexRange::default(),
            strategy: Strategy::default(),
            parallel: false,
            budget: None,
            output_dir: PathBuf::from("."),
            stream_log: false,
        }
    }

    pub fn with_range(mut self, range: IndexRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_budget(mut self, budget: Option<u64>) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_stream_log(mut self, stream: bool) -> Self {
        self.stream_log = stream;
        self
    }

    /// Number of configurations a run with this configuration enumerates.
    pub fn configurations(&self) -> BigUint {
        self.range.len(self.nodes)
    }

    /// Checks the configuration before any work starts.
    ///
    /// The configuration count is only materialized once its bit width is
    /// known to be comparable with the budget.
    pub fn validate(&self) -> Result<()> {
        if let Some(budget) = self.budget {
            let bit_width = self.nodes.bit_width();
            // 2^k > budget as soon as k reaches the bit length of the budget.
            let budget_bits = (u64::BITS - budget.leading_zeros()) as usize;
            if bit_width >= budget_bits || self.configurations() > BigUint::from(budget) {
                return Err(Error::ResourceExhaustion {
                    nodes: self.nodes.get(),
                    bit_width,
                    budget,
                });
            }
        }
        Ok(())
    }
}
