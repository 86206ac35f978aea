//! Ordered fallback chains of sources and sinks
//!
//! Each provider either fully succeeds or returns an error. A chain tries its
//! providers in order and stops at the first success.

use super::{BucketReader, BucketWriter, LocalFileReader, LocalFileWriter, SampleReader, TableSet};
use crate::etl::{Artifact, Extractor, Loader};
use eyre::{Result, eyre};
use owo_colors::OwoColorize;
use std::fmt;

/// A named provider of datasets
pub enum TableSource {
    Bucket(BucketReader),
    LocalFile(LocalFileReader),
    Sample(SampleReader),
}

impl TableSource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bucket(_) => "object-store",
            Self::LocalFile(_) => "local-file",
            Self::Sample(_) => "sample",
        }
    }

    async fn read(&self) -> Result<TableSet> {
        match self {
            Self::Bucket(reader) => reader.extract().await,
            Self::LocalFile(reader) => reader.extract().await,
            Self::Sample(reader) => reader.extract().await,
        }
    }
}

impl From<BucketReader> for TableSource {
    fn from(reader: BucketReader) -> Self {
        Self::Bucket(reader)
    }
}

impl From<LocalFileReader> for TableSource {
    fn from(reader: LocalFileReader) -> Self {
        Self::LocalFile(reader)
    }
}

impl From<SampleReader> for TableSource {
    fn from(reader: SampleReader) -> Self {
        Self::Sample(reader)
    }
}

/// Sources tried in order until one returns every dataset
pub struct SourceChain {
    sources: Vec<TableSource>,
}

impl SourceChain {
    pub fn new(sources: Vec<TableSource>) -> Self {
        Self { sources }
    }

    /// Names of the sources, in the order they are tried
    pub fn names(&self) -> Vec<&'static str> {
        self.sources.iter().map(TableSource::name).collect()
    }
}

impl Extractor for SourceChain {
    type Output = TableSet;

    async fn extract(&self) -> Result<Self::Output> {
        let mut last_error = None;

        for source in &self.sources {
            if let TableSource::Sample(_) = source {
                log::warn!("Input data unavailable, creating sample data");
            }
            match source.read().await {
                Ok(tables) => {
                    log::info!(
                        "Loaded {} dataset(s) from {}",
                        tables.len().cyan(),
                        source.name().cyan()
                    );
                    return Ok(tables);
                }
                Err(e) => {
                    log::warn!("Could not load from {}: {:#}", source.name(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| eyre!("No data sources configured"))
            .wrap_err("Every data source failed"))
    }
}

/// A named destination for artifacts
pub enum ArtifactSink {
    Bucket(BucketWriter),
    LocalFile(LocalFileWriter),
}

impl ArtifactSink {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bucket(_) => "object-store",
            Self::LocalFile(_) => "local-file",
        }
    }

    async fn write(&self, items: &[Artifact]) -> Result<usize> {
        match self {
            Self::Bucket(writer) => writer.write_all(items).await,
            Self::LocalFile(writer) => writer.write_all(items),
        }
    }
}

impl fmt::Display for ArtifactSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bucket(writer) => write!(f, "object store {}", writer.client()),
            Self::LocalFile(writer) => write!(f, "local files in {}", writer.path().display()),
        }
    }
}

impl From<BucketWriter> for ArtifactSink {
    fn from(writer: BucketWriter) -> Self {
        Self::Bucket(writer)
    }
}

impl From<LocalFileWriter> for ArtifactSink {
    fn from(writer: LocalFileWriter) -> Self {
        Self::LocalFile(writer)
    }
}

/// Sinks tried in order until one stores every artifact
///
/// A failure of the last sink is returned to the caller.
pub struct SinkChain {
    sinks: Vec<ArtifactSink>,
}

impl SinkChain {
    pub fn new(sinks: Vec<ArtifactSink>) -> Self {
        Self { sinks }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(ArtifactSink::name).collect()
    }
}

impl Loader for SinkChain {
    type Item = Artifact;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        let last = self.sinks.len().saturating_sub(1);

        for (i, sink) in self.sinks.iter().enumerate() {
            match sink.write(&items).await {
                Ok(count) => {
                    log::info!("Saved {} result(s) to {}", count.cyan(), sink);
                    return Ok(count);
                }
                Err(e) if i < last => {
                    log::warn!("Could not save to {}: {:#}", sink.name(), e);
                }
                Err(e) => {
                    return Err(e.wrap_err(format!("Failed to save results to {}", sink)));
                }
            }
        }

        eyre::bail!("No output sinks configured")
    }
}
