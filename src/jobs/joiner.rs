//! Employee / department join job
//!
//! Pipeline: SourceChain → JoinTransformer → SinkChain (three CSV artifacts)

use crate::etl::{Artifact, IntoArtifacts, Transformer};
use crate::frame::{JoinKind, join};
use crate::model::dataset;
use crate::storage::{TableSet, to_csv};
use eyre::{Context, Result};
use polars::prelude::DataFrame;
use std::fmt;

/// Column both tables are joined on
pub const JOIN_KEY: &str = "department_id";

/// Storage keys of the three join results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutputKeys {
    pub inner: String,
    pub left: String,
    pub right: String,
}

impl Default for JoinOutputKeys {
    fn default() -> Self {
        Self {
            inner: "inner_join_result.csv".to_string(),
            left: "left_join_result.csv".to_string(),
            right: "right_join_result.csv".to_string(),
        }
    }
}

/// Joins the `employees` dataset (left) with `departments` (right)
#[derive(Debug, Clone, Default)]
pub struct JoinTransformer {
    outputs: JoinOutputKeys,
}

impl JoinTransformer {
    pub fn new(outputs: JoinOutputKeys) -> Self {
        Self { outputs }
    }

    /// Run all three joins over already-loaded tables
    pub fn join_tables(&self, employees: &DataFrame, departments: &DataFrame) -> Result<JoinOutcome> {
        let run = |kind| {
            join(employees, departments, JOIN_KEY, kind)
                .with_context(|| format!("Failed to compute {} join", kind))
        };

        Ok(JoinOutcome {
            inner: run(JoinKind::Inner)?,
            left: run(JoinKind::Left)?,
            right: run(JoinKind::Right)?,
            outputs: self.outputs.clone(),
        })
    }
}

impl Transformer for JoinTransformer {
    type Input = TableSet;
    type Output = JoinOutcome;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let employees = input.take(dataset::EMPLOYEES)?;
        let departments = input.take(dataset::DEPARTMENTS)?;
        self.join_tables(&employees, &departments)
    }
}

/// Results of the inner, left and right joins
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub inner: DataFrame,
    pub left: DataFrame,
    pub right: DataFrame,
    outputs: JoinOutputKeys,
}

impl IntoArtifacts for JoinOutcome {
    fn to_artifacts(&self) -> Result<Vec<Artifact>> {
        Ok(vec![
            Artifact::csv(&self.outputs.inner, to_csv(&self.inner)?),
            Artifact::csv(&self.outputs.left, to_csv(&self.left)?),
            Artifact::csv(&self.outputs.right, to_csv(&self.right)?),
        ])
    }
}

impl fmt::Display for JoinOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inner Join Result:")?;
        writeln!(f, "{}", self.inner)?;
        writeln!(f)?;
        writeln!(f, "Left Join Result:")?;
        writeln!(f, "{}", self.left)?;
        writeln!(f)?;
        writeln!(f, "Right Join Result:")?;
        write!(f, "{}", self.right)
    }
}
