//! Table ETL
//!
//! Two small table pipelines: an employee/department join and a financial
//! summary. Inputs come from an object store, local CSV files or built-in
//! sample data; results go back to the object store or to local files.

pub mod cli;
pub mod client;
pub mod config;
pub mod etl;
pub mod frame;
pub mod jobs;
pub mod model;
pub mod storage;

// Re-exports for convenience
pub use client::{Auth, AwsCredentials, ObjectStoreClient};
pub use config::{Overrides, PipelineConfig};
pub use etl::{Extractor, Loader, Pipeline, Transformer};
pub use frame::{GroupBy, GroupOrder, JoinKind};
pub use jobs::{AggregateOutcome, AggregateTransformer, JoinOutcome, JoinTransformer};
pub use storage::{SinkChain, SourceChain, TableSet};
