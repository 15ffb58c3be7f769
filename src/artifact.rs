//! Output artifacts.
//!
//! A run produces two JSON documents, both arrays of single-key objects
//! mapping a decimal index to its adjacency matrix:
//!
//! ```text
//! [
//!     {"0":[[0,0],[0,0]]},
//!     {"1":[[0,0],[1,0]]}
//! ]
//! ```
//!
//! - `non-isomorphic-Confs-{n}-nodes.json`: one record per class, in discovery order.
//! - `isomorphic-Confs-{n}-nodes.json`: one record per enumerated index, in enumeration order.
//!
//! Records are streamed by [`ArtifactWriter`] into a `.partial` file that is
//! renamed into place only by [`ArtifactWriter::finish`]; a writer dropped
//! before that removes its partial file, so failed runs leave nothing behind.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use num_bigint::BigUint;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Result;
use crate::matrix::AdjacencyMatrix;
use crate::partition::Partition;
use crate::types::{ConfigIndex, NodeCount};

/// One artifact entry: an index and the matrix it encodes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Record {
    pub index: ConfigIndex,
    pub config: AdjacencyMatrix,
}

impl Record {
    pub fn new(index: ConfigIndex, config: AdjacencyMatrix) -> Self {
        Self { index, config }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.index.to_string(), &self.config)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let map = BTreeMap::<String, AdjacencyMatrix>::deserialize(deserializer)?;
        if map.len() != 1 {
            return Err(de::Error::invalid_length(map.len(), &"exactly one index"));
        }
        let (key, config) = map.into_iter().next().ok_or_else(|| de::Error::custom("empty record"))?;
        let index = key
            .parse::<BigUint>()
            .map_err(|e| de::Error::custom(format!("bad index '{}': {}", key, e)))?;
        Ok(Record { index, config })
    }
}

pub fn non_isomorphic_file_name(nodes: NodeCount) -> String {
    format!("non-isomorphic-Confs-{}-nodes.json", nodes)
}

pub fn isomorphic_file_name(nodes: NodeCount) -> String {
    format!("isomorphic-Confs-{}-nodes.json", nodes)
}

/// Records for the class representatives, in discovery order.
pub fn representative_records(partition: &Partition) -> Vec<Record> {
    partition
        .classes()
        .iter()
        .map(|class| Record::new(class.representative_index().clone(), class.representative().matrix().clone()))
        .collect()
}

/// Removes its file on drop unless disarmed.
struct PartialFile {
    path: PathBuf,
    armed: bool,
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.armed {
            debug!("removing incomplete artifact {}", self.path.display());
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Incremental writer for one artifact file.
pub struct ArtifactWriter {
    out: BufWriter<File>,
    partial: PartialFile,
    path: PathBuf,
    written: u64,
}

impl ArtifactWriter {
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut partial_name = path.clone().into_os_string();
        partial_name.push(".partial");
        let partial = PartialFile {
            path: PathBuf::from(partial_name),
            armed: true,
        };
        let mut out = BufWriter::new(File::create(&partial.path)?);
        out.write_all(b"[")?;
        Ok(Self {
            out,
            partial,
            path,
            written: 0,
        })
    }

    pub fn push(&mut self, record: &Record) -> Result<()> {
        let sep: &[u8] = if self.written == 0 { b"\n    " } else { b",\n    " };
        self.out.write_all(sep)?;
        serde_json::to_writer(&mut self.out, record)?;
        self.written += 1;
        Ok(())
    }

    /// Number of records pushed so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Closes the document and moves it to its final path.
    pub fn finish(self) -> Result<PathBuf> {
        let ArtifactWriter {
            mut out,
            mut partial,
            path,
            written,
        } = self;
        out.write_all(b"\n]\n")?;
        out.flush()?;
        drop(out);
        fs::rename(&partial.path, &path)?;
        partial.armed = false;
        debug!("wrote {} records to {}", written, path.display());
        Ok(path)
    }
}

/// Writes `records` as a complete artifact at `path`.
pub fn write_records<'a>(path: impl Into<PathBuf>, records: impl IntoIterator<Item = &'a Record>) -> Result<PathBuf> {
    let mut writer = ArtifactWriter::create(path)?;
    for record in records {
        writer.push(record)?;
    }
    writer.finish()
}

/// Loads an artifact written by [`ArtifactWriter`] (or any JSON array of records).
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::error::ErrorKind;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("digraph-census-artifact-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn record(index: u32, edges: &[(usize, usize)]) -> Record {
        let n = NodeCount::new(2).unwrap();
        Record::new(
            BigUint::from(index),
            AdjacencyMatrix::from_edges(n, edges.iter().copied()).unwrap(),
        )
    }

    #[test]
    fn test_record_json_shape() {
        let r = record(3, &[(0, 1), (1, 0)]);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"3":[[0,1],[1,0]]}"#);
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_record_rejects_bad_input() {
        assert!(serde_json::from_str::<Record>(r#"{}"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"{"1":[[0,0],[0,0]],"2":[[0,0],[0,0]]}"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"{"x":[[0,0],[0,0]]}"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"{"1":[[1,0],[0,0]]}"#).is_err());
    }

    #[test]
    fn test_wide_index_key() {
        let n = NodeCount::new(9).unwrap();
        let index = n.configurations() - 1u32;
        let r = Record::new(index.clone(), AdjacencyMatrix::empty(n));
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.starts_with("{\"4722366482869645213695\":"));
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back.index, index);
    }

    #[test]
    fn test_file_names() {
        let n = NodeCount::new(4).unwrap();
        assert_eq!(non_isomorphic_file_name(n), "non-isomorphic-Confs-4-nodes.json");
        assert_eq!(isomorphic_file_name(n), "isomorphic-Confs-4-nodes.json");
    }

    #[test]
    fn test_write_and_read() {
        let dir = scratch_dir("roundtrip");
        let records = vec![record(0, &[]), record(1, &[(1, 0)]), record(3, &[(0, 1), (1, 0)])];
        let path = write_records(dir.join("out.json"), &records).unwrap();
        assert!(path.exists());
        assert!(!dir.join("out.json.partial").exists());

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n    {\"0\":"));
        assert!(text.ends_with("\n]\n"));

        assert_eq!(read_records(&path).unwrap(), records);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_artifact() {
        let dir = scratch_dir("empty");
        let path = write_records(dir.join("empty.json"), std::iter::empty::<&Record>()).unwrap();
        assert!(read_records(&path).unwrap().is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_dropped_writer_leaves_nothing() {
        let dir = scratch_dir("dropped");
        let path = dir.join("out.json");
        {
            let mut writer = ArtifactWriter::create(&path).unwrap();
            writer.push(&record(0, &[])).unwrap();
            assert_eq!(writer.written(), 1);
            assert!(dir.join("out.json.partial").exists());
        }
        assert!(!path.exists());
        assert!(!dir.join("out.json.partial").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_read_missing() {
        let err = read_records("/nonexistent/digraph-census/none.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
