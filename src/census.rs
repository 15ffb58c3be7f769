//! End-to-end driver: enumerate, partition, aggregate.
//!
//! ```
//! use digraph_census::census;
//! use digraph_census::config::RunConfig;
//! use digraph_census::oracle::Vf2Oracle;
//! use digraph_census::types::NodeCount;
//!
//! let config = RunConfig::new(NodeCount::new(3).unwrap());
//! let result = census::run(&config, &Vf2Oracle).unwrap();
//! assert_eq!(result.partition().classes().len(), 16);
//! assert_eq!(result.log().len(), 64);
//! ```

use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::info;

use crate::artifact::{isomorphic_file_name, non_isomorphic_file_name, representative_records, ArtifactWriter, Record};
use crate::config::RunConfig;
use crate::enumerate::enumerate;
use crate::error::Result;
use crate::oracle::IsomorphismOracle;
use crate::partition::{Partition, Partitioner};
use crate::types::NodeCount;

/// Emit a progress line every this many graphs.
const PROGRESS_INTERVAL: u64 = 1 << 16;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Summary {
    pub nodes: NodeCount,
    /// Number of enumerated indices.
    pub total: u64,
    /// Number of equivalence classes.
    pub classes: u64,
    pub oracle_calls: u64,
}

impl Summary {
    fn of(nodes: NodeCount, partition: &Partition) -> Self {
        Self {
            nodes,
            total: partition.len() as u64,
            classes: partition.classes().len() as u64,
            oracle_calls: partition.oracle_calls(),
        }
    }

    /// Number of indices that are not a class representative.
    pub fn isomorphic(&self) -> u64 {
        self.total - self.classes
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of network nodes: {}", self.nodes)?;
        writeln!(f, "    non-isomorphic: {}", self.classes)?;
        writeln!(f, "    isomorphic:     {}", self.isomorphic())?;
        writeln!(f, "    total:          {}", self.total)?;
        write!(f, "    oracle calls:   {}", self.oracle_calls)
    }
}

/// Result of a buffered run: the partition plus the full index log.
#[derive(Debug, Clone)]
pub struct Census {
    nodes: NodeCount,
    partition: Partition,
    log: Vec<Record>,
}

impl Census {
    pub fn nodes(&self) -> NodeCount {
        self.nodes
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Every enumerated index with its matrix, in enumeration order.
    pub fn log(&self) -> &[Record] {
        &self.log
    }

    /// One record per class, in discovery order.
    pub fn representatives(&self) -> Vec<Record> {
        representative_records(&self.partition)
    }

    pub fn summary(&self) -> Summary {
        Summary::of(self.nodes, &self.partition)
    }

    /// Writes both artifacts into `dir`, returning `(non_isomorphic, isomorphic)` paths.
    pub fn write_artifacts(&self, dir: impl Into<PathBuf>) -> Result<(PathBuf, PathBuf)> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let mut reps = ArtifactWriter::create(dir.join(non_isomorphic_file_name(self.nodes)))?;
        for record in self.representatives() {
            reps.push(&record)?;
        }
        let mut log = ArtifactWriter::create(dir.join(isomorphic_file_name(self.nodes)))?;
        for record in &self.log {
            log.push(record)?;
        }
        finish_artifacts(reps, log)
    }
}

/// Moves both artifacts into place, or neither.
fn finish_artifacts(reps: ArtifactWriter, log: ArtifactWriter) -> Result<(PathBuf, PathBuf)> {
    let reps = reps.finish()?;
    match log.finish() {
        Ok(log) => Ok((reps, log)),
        Err(e) => {
            let _ = fs::remove_file(&reps);
            Err(e)
        }
    }
}

fn report_progress(done: u64, config: &RunConfig) {
    if done % PROGRESS_INTERVAL == 0 {
        info!("processed {} of {} configurations", done, config.configurations());
    }
}

/// Runs the whole pipeline in memory.
pub fn run<O: IsomorphismOracle + ?Sized>(config: &RunConfig, oracle: &O) -> Result<Census> {
    config.validate()?;
    info!(
        "enumerating {} configurations of {} nodes (range: {}, strategy: {})",
        config.configurations(),
        config.nodes,
        config.range,
        config.strategy
    );

    let mut partitioner = Partitioner::new(oracle, config.strategy).parallel(config.parallel);
    let mut log = Vec::new();
    for (index, matrix) in enumerate(config.nodes, config.range) {
        partitioner.insert(index.clone(), matrix.clone())?;
        log.push(Record::new(index, matrix));
        report_progress(log.len() as u64, config);
    }

    Ok(Census {
        nodes: config.nodes,
        partition: partitioner.finish(),
        log,
    })
}

/// Runs the pipeline, streaming the index log straight into its artifact.
///
/// Both artifacts are written to `config.output_dir`. On failure neither
/// artifact exists afterwards.
pub fn run_streaming<O: IsomorphismOracle + ?Sized>(config: &RunConfig, oracle: &O) -> Result<Summary> {
    config.validate()?;
    info!(
        "enumerating {} configurations of {} nodes, streaming to {}",
        config.configurations(),
        config.nodes,
        config.output_dir.display()
    );

    fs::create_dir_all(&config.output_dir)?;
    let mut log = ArtifactWriter::create(config.output_dir.join(isomorphic_file_name(config.nodes)))?;

    let mut partitioner = Partitioner::new(oracle, config.strategy).parallel(config.parallel);
    for (index, matrix) in enumerate(config.nodes, config.range) {
        log.push(&Record::new(index.clone(), matrix.clone()))?;
        partitioner.insert(index, matrix)?;
        report_progress(log.written(), config);
    }
    let partition = partitioner.finish();

    let mut reps = ArtifactWriter::create(config.output_dir.join(non_isomorphic_file_name(config.nodes)))?;
    for record in representative_records(&partition) {
        reps.push(&record)?;
    }
    finish_artifacts(reps, log)?;

    Ok(Summary::of(config.nodes, &partition))
}

/// Runs according to `config.stream_log` and writes both artifacts.
pub fn execute<O: IsomorphismOracle + ?Sized>(config: &RunConfig, oracle: &O) -> Result<Summary> {
    if config.stream_log {
        return run_streaming(config, oracle);
    }
    let census = run(config, oracle)?;
    let (reps, log) = census.write_artifacts(&config.output_dir)?;
    info!("wrote {} and {}", reps.display(), log.display());
    Ok(census.summary())
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use test_log::test;

    use super::*;
    use crate::oracle::Vf2Oracle;

    #[test]
    fn test_run_two_nodes() {
        let config = RunConfig::new(NodeCount::new(2).unwrap());
        let census = run(&config, &Vf2Oracle).unwrap();

        let reps: Vec<_> = census.representatives().into_iter().map(|r| r.index).collect();
        assert_eq!(reps, vec![BigUint::from(0u32), BigUint::from(1u32), BigUint::from(3u32)]);

        let log: Vec<_> = census.log().iter().map(|r| r.index.clone()).collect();
        assert_eq!(log, (0..4u32).map(BigUint::from).collect::<Vec<_>>());
        assert_eq!(census.log()[3].config.rows(), vec![vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn test_summary() {
        let config = RunConfig::new(NodeCount::new(3).unwrap());
        let summary = run(&config, &Vf2Oracle).unwrap().summary();
        assert_eq!(summary.total, 64);
        assert_eq!(summary.classes, 16);
        assert_eq!(summary.isomorphic(), 48);

        let text = summary.to_string();
        assert!(text.starts_with("Number of network nodes: 3\n"));
        assert!(text.contains("non-isomorphic: 16"));
        assert!(text.contains("total:          64"));
    }

    #[test]
    fn test_blocked_log_path_leaves_no_artifacts() {
        let nodes = NodeCount::new(2).unwrap();
        let dir = std::env::temp_dir().join(format!("digraph-census-blocked-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join(isomorphic_file_name(nodes)).join("occupied")).unwrap();

        let census = run(&RunConfig::new(nodes), &Vf2Oracle).unwrap();
        let err = census.write_artifacts(&dir).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);

        let mut left: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        left.sort();
        assert_eq!(left, vec![isomorphic_file_name(nodes)]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_budget_stops_before_work() {
        let calls = std::sync::atomic::AtomicU64::new(0);
        let oracle = |a: &crate::graph::Graph, b: &crate::graph::Graph| {
            calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            Vf2Oracle.is_isomorphic(a, b)
        };
        let config = RunConfig::new(NodeCount::new(4).unwrap()).with_budget(Some(100));
        assert!(run(&config, &oracle).is_err());
        assert_eq!(calls.load(std::sync::atomic::Ordering::Relaxed), 0);
    }
}
