//! # digraph-census: every directed graph on `n` nodes, up to isomorphism
//!
//! **`digraph-census`** enumerates all `2^(n²-n)` labeled directed graphs without self-loops
//! on a fixed number of nodes and partitions them into isomorphism classes. The output is one
//! representative per class plus, for every labeled configuration, the class it belongs to.
//!
//! ## Pipeline
//!
//! Data flows strictly in one direction:
//!
//! ```text
//! encode -> enumerate -> partition (asks the oracle) -> artifact
//! ```
//!
//! - **[`encode`]**: the bijection between an integer [`ConfigIndex`][crate::types::ConfigIndex]
//!   and an [`AdjacencyMatrix`][crate::matrix::AdjacencyMatrix]. Indices are arbitrary-precision.
//! - **[`enumerate`]**: a lazy iterator over the whole index range, in increasing order.
//! - **[`partition`]**: greedy first-match clustering against the representatives found so far.
//! - **[`oracle`]**: the isomorphism test itself is an injected [`IsomorphismOracle`][crate::oracle::IsomorphismOracle].
//! - **[`artifact`]**: the JSON documents a run leaves behind.
//! - **[`census`]**: glue running the whole pipeline from a [`RunConfig`][crate::config::RunConfig].
//!
//! ## Basic Usage
//!
//! ```rust
//! use digraph_census::census;
//! use digraph_census::config::RunConfig;
//! use digraph_census::oracle::Vf2Oracle;
//! use digraph_census::types::NodeCount;
//!
//! let config = RunConfig::new(NodeCount::new(2).unwrap());
//! let result = census::run(&config, &Vf2Oracle).unwrap();
//!
//! // Empty graph, a single edge, and the 2-cycle.
//! assert_eq!(result.partition().classes().len(), 3);
//! ```
//!
//! ## Cost
//!
//! The partitioner makes `O(classes)` oracle calls per graph in the worst case. With
//! `2^(n²-n)` graphs this limits practical runs to `n <= 5` (or 6 with
//! [`Strategy::Bucketed`][crate::partition::Strategy::Bucketed]).

pub mod artifact;
pub mod census;
pub mod config;
pub mod encode;
pub mod enumerate;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod oracle;
pub mod partition;
pub mod signature;
pub mod types;

pub use error::{Error, ErrorKind, Result};
