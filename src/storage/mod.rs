//! Dataset storage operations
//!
//! This module handles all data I/O including:
//! - CSV parsing and CSV / JSON rendering of tables
//! - Local directory reads and writes
//! - Object store bucket reads and writes
//! - Built-in sample data
//! - Ordered source and sink fallback chains

mod bucket;
mod chain;
mod codec;
mod dataset;
mod local;
mod sample;

pub use bucket::{BucketReader, BucketWriter};
pub use chain::{ArtifactSink, SinkChain, SourceChain, TableSource};
pub use codec::{parse_csv, to_csv, to_records_json};
pub use dataset::{DatasetSpec, TableSet};
pub use local::{LocalFileReader, LocalFileWriter};
pub use sample::SampleReader;
