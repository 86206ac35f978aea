//! Local directory storage for CSV inputs and pipeline artifacts

use super::{DatasetSpec, TableSet, parse_csv};
use crate::etl::{Artifact, Extractor, Loader};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// Read CSV datasets from files in a directory
pub struct LocalFileReader {
    path: PathBuf,
    datasets: Vec<DatasetSpec>,
}

impl LocalFileReader {
    pub fn new(path: impl AsRef<Path>, datasets: Vec<DatasetSpec>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            datasets,
        }
    }

    /// Read every dataset; fails on the first missing or malformed file
    pub fn read_all(&self) -> Result<TableSet> {
        let mut tables = TableSet::new();

        for dataset in &self.datasets {
            let path = self.path.join(&dataset.key);
            if !path.exists() {
                eyre::bail!("CSV file not found: {}", path.display());
            }

            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let frame = parse_csv(&content)
                .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;

            log::debug!(
                "Read {} row(s) from {}",
                frame.height(),
                path.display().bright_black()
            );
            tables.insert(dataset.name.clone(), frame);
        }

        Ok(tables)
    }
}

// Implement Extractor trait for reading from directories
impl Extractor for LocalFileReader {
    type Output = TableSet;

    async fn extract(&self) -> Result<Self::Output> {
        self.read_all()
    }
}

/// Write artifacts as files in a directory
pub struct LocalFileWriter {
    path: PathBuf,
}

impl LocalFileWriter {
    /// The directory is created on first write, not here
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write each artifact to `{dir}/{key}`
    pub fn write_all(&self, items: &[Artifact]) -> Result<usize> {
        std::fs::create_dir_all(&self.path)
            .with_context(|| format!("Failed to create directory: {}", self.path.display()))?;

        for item in items {
            let path = self.path.join(&item.key);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &item.body)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            log::debug!("Wrote {}", path.display().bright_black());
        }

        Ok(items.len())
    }
}

// Implement Loader trait for writing to directories
impl Loader for LocalFileWriter {
    type Item = Artifact;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        self.write_all(&items)
    }
}
