//! Object store bucket storage for CSV inputs and pipeline artifacts

use super::{DatasetSpec, TableSet, parse_csv};
use crate::client::ObjectStoreClient;
use crate::etl::{Artifact, Extractor, Loader};
use eyre::{Context, Result};
use owo_colors::OwoColorize;

/// Read CSV datasets from objects in a bucket
pub struct BucketReader {
    client: ObjectStoreClient,
    datasets: Vec<DatasetSpec>,
}

impl BucketReader {
    pub fn new(client: ObjectStoreClient, datasets: Vec<DatasetSpec>) -> Self {
        Self { client, datasets }
    }

    /// Download and parse every dataset; fails on the first unreadable object
    pub async fn read_all(&self) -> Result<TableSet> {
        let mut tables = TableSet::new();

        for dataset in &self.datasets {
            let content = self.client.get_object(&dataset.key).await?;
            let frame = parse_csv(&content)
                .with_context(|| format!("Failed to parse CSV object: {}", dataset.key))?;

            log::debug!(
                "Read {} row(s) from object {}/{}",
                frame.height(),
                self.client.bucket(),
                dataset.key.bright_black()
            );
            tables.insert(dataset.name.clone(), frame);
        }

        Ok(tables)
    }
}

impl Extractor for BucketReader {
    type Output = TableSet;

    async fn extract(&self) -> Result<Self::Output> {
        self.read_all().await
    }
}

/// Upload artifacts as objects in a bucket
pub struct BucketWriter {
    client: ObjectStoreClient,
}

impl BucketWriter {
    pub fn new(client: ObjectStoreClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ObjectStoreClient {
        &self.client
    }

    /// Upload each artifact under its key
    pub async fn write_all(&self, items: &[Artifact]) -> Result<usize> {
        for item in items {
            self.client
                .put_object(&item.key, item.body.clone(), item.content_type)
                .await?;
            log::debug!(
                "Uploaded object {}/{}",
                self.client.bucket(),
                item.key.bright_black()
            );
        }
        Ok(items.len())
    }
}

impl Loader for BucketWriter {
    type Item = Artifact;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        self.write_all(&items).await
    }
}
