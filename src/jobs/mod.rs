//! The two table jobs, each a [`Transformer`](crate::etl::Transformer) with
//! an output that encodes into artifacts
//!
//! - [`joiner`]: employees joined with departments (inner, left, right)
//! - [`aggregator`]: financial records summarised by region and by year

pub mod aggregator;
pub mod joiner;

pub use aggregator::{AggregateOutcome, AggregateTransformer};
pub use joiner::{JOIN_KEY, JoinOutcome, JoinOutputKeys, JoinTransformer};
