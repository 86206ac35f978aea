//! Built-in sample datasets, the source of last resort

use super::{DatasetSpec, TableSet};
use crate::etl::Extractor;
use crate::model::sample_table;
use eyre::Result;

/// Serve the fixed sample rows for each requested dataset
pub struct SampleReader {
    datasets: Vec<DatasetSpec>,
}

impl SampleReader {
    pub fn new(datasets: Vec<DatasetSpec>) -> Self {
        Self { datasets }
    }

    pub fn read_all(&self) -> Result<TableSet> {
        let mut tables = TableSet::new();
        for dataset in &self.datasets {
            tables.insert(dataset.name.clone(), sample_table(&dataset.name)?);
        }
        Ok(tables)
    }
}

impl Extractor for SampleReader {
    type Output = TableSet;

    async fn extract(&self) -> Result<Self::Output> {
        self.read_all()
    }
}
