//! Named datasets requested from a source and the tables loaded for them

use eyre::{Result, eyre};
use polars::prelude::DataFrame;
use std::fmt;

/// A logical dataset and the storage key it lives under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpec {
    /// Logical name, e.g. `employees`
    pub name: String,
    /// Object key or file name, e.g. `use_case2_employees.csv`
    pub key: String,
}

impl DatasetSpec {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

/// Tables loaded for a list of [`DatasetSpec`]s, in request order
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    tables: Vec<(String, DataFrame)>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, table: DataFrame) {
        self.tables.push((name.into(), table));
    }

    pub fn get(&self, name: &str) -> Option<&DataFrame> {
        self.tables.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    /// Remove a table by name, or fail naming the missing dataset
    pub fn take(&mut self, name: &str) -> Result<DataFrame> {
        let position = self
            .tables
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| eyre!("Dataset '{}' was not loaded", name))?;
        Ok(self.tables.remove(position).1)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(n, _)| n.as_str())
    }
}

impl fmt::Display for TableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, table)) in self.tables.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            writeln!(f, "{} Data:", title_case(name))?;
            write!(f, "{}", table)?;
        }
        Ok(())
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
