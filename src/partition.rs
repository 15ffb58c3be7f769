//! Greedy partitioning of enumerated graphs into isomorphism classes.
//!
//! The [`Partitioner`] keeps the representatives discovered so far, in
//! discovery order. Each incoming graph is compared against them with the
//! oracle; the first match wins, otherwise the graph founds a new class.
//! Because the input arrives in increasing index order, every representative
//! is the smallest index of its class.
//!
//! Representatives are pairwise non-isomorphic, so at most one of them can
//! match and stopping at the first `true` is exact.
//!
//! # Strategies
//!
//! - [`Strategy::Linear`] scans every representative: `O(classes)` oracle
//!   calls per graph.
//! - [`Strategy::Bucketed`] only scans representatives sharing the graph's
//!   [`Signature`]. The resulting partition is identical, with far fewer
//!   oracle calls.
//!
//! # Example
//!
//! ```
//! use digraph_census::enumerate::enumerate;
//! use digraph_census::oracle::Vf2Oracle;
//! use digraph_census::partition::{Partitioner, Strategy};
//! use digraph_census::types::{IndexRange, NodeCount};
//!
//! let n = NodeCount::new(2).unwrap();
//! let mut partitioner = Partitioner::new(&Vf2Oracle, Strategy::Linear);
//! partitioner.extend(enumerate(n, IndexRange::Exclusive)).unwrap();
//! let partition = partitioner.finish();
//! assert_eq!(partition.classes().len(), 3);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, trace};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::matrix::AdjacencyMatrix;
use crate::oracle::{IsomorphismOracle, OracleError};
use crate::signature::Signature;
use crate::types::ConfigIndex;

/// How candidate representatives are selected for a new graph.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Strategy {
    #[default]
    Linear,
    Bucketed,
}

impl Strategy {
    fn bucket_key(self, matrix: &AdjacencyMatrix) -> Option<Signature> {
        match self {
            Strategy::Linear => None,
            Strategy::Bucketed => Some(Signature::of(matrix)),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(Strategy::Linear),
            "bucketed" => Ok(Strategy::Bucketed),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown strategy '{}', expected 'linear' or 'bucketed'",
                other
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Linear => write!(f, "linear"),
            Strategy::Bucketed => write!(f, "bucketed"),
        }
    }
}

/// A representative graph together with every index isomorphic to it.
#[derive(Debug, Clone)]
pub struct EquivalenceClass {
    representative: Graph,
    /// Member indices in enumeration order; the first is the representative's.
    members: Vec<ConfigIndex>,
}

impl EquivalenceClass {
    fn new(index: ConfigIndex, representative: Graph) -> Self {
        Self {
            representative,
            members: vec![index],
        }
    }

    pub fn representative_index(&self) -> &ConfigIndex {
        &self.members[0]
    }

    pub fn representative(&self) -> &Graph {
        &self.representative
    }

    pub fn members(&self) -> &[ConfigIndex] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Incremental partitioner. See the [module documentation](self).
pub struct Partitioner<'a, O: IsomorphismOracle + ?Sized> {
    oracle: &'a O,
    strategy: Strategy,
    parallel: bool,
    classes: Vec<EquivalenceClass>,
    buckets: HashMap<Option<Signature>, Vec<usize>>,
    class_of: HashMap<ConfigIndex, usize>,
    oracle_calls: u64,
}

impl<'a, O: IsomorphismOracle + ?Sized> Partitioner<'a, O> {
    pub fn new(oracle: &'a O, strategy: Strategy) -> Self {
        Self {
            oracle,
            strategy,
            parallel: false,
            classes: Vec::new(),
            buckets: HashMap::new(),
            class_of: HashMap::new(),
            oracle_calls: 0,
        }
    }

    /// Enables matching a graph against candidate representatives on the
    /// rayon thread pool. The outcome is the same as sequential matching.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn classes(&self) -> &[EquivalenceClass] {
        &self.classes
    }

    pub fn oracle_calls(&self) -> u64 {
        self.oracle_calls
    }

    /// Assigns `index` to a class and returns the class id.
    ///
    /// Fails with [`Error::OracleFailure`] if the oracle cannot decide a
    /// comparison, and with [`Error::InvalidConfiguration`] if `index` was
    /// already inserted.
    pub fn insert(&mut self, index: ConfigIndex, matrix: AdjacencyMatrix) -> Result<usize> {
        if self.class_of.contains_key(&index) {
            return Err(Error::InvalidConfiguration(format!("index {} enumerated twice", index)));
        }

        let key = self.strategy.bucket_key(&matrix);
        let graph = Graph::from_matrix(matrix);
        let candidates = self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[]);

        let outcome = if self.parallel {
            find_match_parallel(self.oracle, &self.classes, candidates, &graph, &mut self.oracle_calls)
        } else {
            find_match(self.oracle, &self.classes, candidates, &graph, &mut self.oracle_calls)
        };
        let found = outcome.map_err(|e| Error::OracleFailure {
            index: index.clone(),
            reason: e.to_string(),
        })?;

        let id = match found {
            Some(id) => {
                trace!("index {} joins class {}", index, id);
                self.classes[id].members.push(index.clone());
                id
            }
            None => {
                let id = self.classes.len();
                debug!("index {} founds class {}", index, id);
                self.classes.push(EquivalenceClass::new(index.clone(), graph));
                self.buckets.entry(key).or_default().push(id);
                id
            }
        };
        self.class_of.insert(index, id);
        Ok(id)
    }

    /// Inserts every item of `items` in order, stopping at the first error.
    pub fn extend(&mut self, items: impl IntoIterator<Item = (ConfigIndex, AdjacencyMatrix)>) -> Result<()> {
        for (index, matrix) in items {
            self.insert(index, matrix)?;
        }
        Ok(())
    }

    pub fn finish(self) -> Partition {
        info!(
            "partitioned {} graphs into {} classes using {} oracle calls",
            self.class_of.len(),
            self.classes.len(),
            self.oracle_calls
        );
        Partition {
            classes: self.classes,
            class_of: self.class_of,
            oracle_calls: self.oracle_calls,
        }
    }
}

fn find_match<O: IsomorphismOracle + ?Sized>(
    oracle: &O,
    classes: &[EquivalenceClass],
    candidates: &[usize],
    graph: &Graph,
    calls: &mut u64,
) -> std::result::Result<Option<usize>, OracleError> {
    for &id in candidates {
        *calls += 1;
        if oracle.is_isomorphic(&classes[id].representative, graph)? {
            return Ok(Some(id));
        }
    }
    Ok(None)
}

fn find_match_parallel<O: IsomorphismOracle + ?Sized>(
    oracle: &O,
    classes: &[EquivalenceClass],
    candidates: &[usize],
    graph: &Graph,
    calls: &mut u64,
) -> std::result::Result<Option<usize>, OracleError> {
    let counter = AtomicU64::new(0);
    // `find_first` keeps discovery order: the earliest match (or error) wins.
    let outcome = candidates
        .par_iter()
        .map(|&id| {
            counter.fetch_add(1, Ordering::Relaxed);
            oracle
                .is_isomorphic(&classes[id].representative, graph)
                .map(|matched| matched.then_some(id))
        })
        .find_first(|r| !matches!(r, Ok(None)));
    *calls += counter.into_inner();
    outcome.unwrap_or(Ok(None))
}

/// Final state of a partitioning run.
#[derive(Debug, Clone)]
pub struct Partition {
    classes: Vec<EquivalenceClass>,
    class_of: HashMap<ConfigIndex, usize>,
    oracle_calls: u64,
}

impl Partition {
    /// Classes in discovery order.
    pub fn classes(&self) -> &[EquivalenceClass] {
        &self.classes
    }

    /// Id of the class containing `index`, if it was partitioned.
    pub fn class_of(&self, index: &ConfigIndex) -> Option<usize> {
        self.class_of.get(index).copied()
    }

    /// Representative index of the class containing `index`.
    pub fn representative_of(&self, index: &ConfigIndex) -> Option<&ConfigIndex> {
        self.class_of(index).map(|id| self.classes[id].representative_index())
    }

    /// Number of partitioned indices.
    pub fn len(&self) -> usize {
        self.class_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.class_of.is_empty()
    }

    pub fn oracle_calls(&self) -> u64 {
        self.oracle_calls
    }
}
