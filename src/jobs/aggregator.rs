//! Financial summary job
//!
//! Pipeline: SourceChain → AggregateTransformer → SinkChain (one JSON artifact)

use crate::etl::{Artifact, IntoArtifacts, Transformer};
use crate::frame::{GroupBy, GroupOrder, describe, info};
use crate::model::dataset;
use crate::storage::{TableSet, to_records_json};
use eyre::{Context, Result};
use polars::prelude::DataFrame;
use std::fmt;

/// Storage key of the processed dataset
pub const DEFAULT_OUTPUT_KEY: &str = "processed_financial_data.json";

const HEAD_ROWS: usize = 5;

/// Summaries `TotalPremium` (sum), `TotalClaims` (sum) and `ClaimRatio` (mean)
/// of the `financial` dataset, grouped by `Region` and by `Year`
#[derive(Debug, Clone)]
pub struct AggregateTransformer {
    order: GroupOrder,
    output_key: String,
}

impl Default for AggregateTransformer {
    fn default() -> Self {
        Self::new(GroupOrder::default(), DEFAULT_OUTPUT_KEY)
    }
}

impl AggregateTransformer {
    pub fn new(order: GroupOrder, output_key: impl Into<String>) -> Self {
        Self {
            order,
            output_key: output_key.into(),
        }
    }

    fn summary(&self, key: &str) -> GroupBy {
        GroupBy::new(key)
            .sum("TotalPremium")
            .sum("TotalClaims")
            .mean("ClaimRatio")
            .order(self.order)
    }

    /// Summarise an already-loaded financial table
    pub fn aggregate(&self, dataset: DataFrame) -> Result<AggregateOutcome> {
        let by_region = self
            .summary("Region")
            .apply(&dataset)
            .wrap_err("Failed to summarise by region")?;
        let by_year = self
            .summary("Year")
            .apply(&dataset)
            .wrap_err("Failed to summarise by year")?;

        let overview = Overview {
            head: dataset.head(Some(HEAD_ROWS)),
            info: info(&dataset)?,
            statistics: describe(&dataset)?,
        };

        Ok(AggregateOutcome {
            dataset,
            by_region,
            by_year,
            overview,
            output_key: self.output_key.clone(),
        })
    }
}

impl Transformer for AggregateTransformer {
    type Input = TableSet;
    type Output = AggregateOutcome;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let dataset = input.take(dataset::FINANCIAL)?;
        self.aggregate(dataset)
    }
}

#[derive(Debug, Clone)]
struct Overview {
    head: DataFrame,
    info: DataFrame,
    statistics: DataFrame,
}

/// The unmodified dataset plus its summaries
#[derive(Debug, Clone)]
pub struct AggregateOutcome {
    pub dataset: DataFrame,
    pub by_region: DataFrame,
    pub by_year: DataFrame,
    overview: Overview,
    output_key: String,
}

impl AggregateOutcome {
    /// `describe()` of the dataset
    pub fn statistics(&self) -> &DataFrame {
        &self.overview.statistics
    }
}

impl IntoArtifacts for AggregateOutcome {
    fn to_artifacts(&self) -> Result<Vec<Artifact>> {
        Ok(vec![Artifact::json(
            &self.output_key,
            to_records_json(&self.dataset)?,
        )])
    }
}

impl fmt::Display for AggregateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Financial Data Overview:")?;
        writeln!(f, "{}", self.overview.head)?;
        writeln!(f)?;
        writeln!(f, "Data Info:")?;
        writeln!(f, "{}", self.overview.info)?;
        writeln!(f)?;
        writeln!(f, "Summary Statistics:")?;
        writeln!(f, "{}", self.overview.statistics)?;
        writeln!(f)?;
        writeln!(f, "Regional Summary:")?;
        writeln!(f, "{}", self.by_region)?;
        writeln!(f)?;
        writeln!(f, "Yearly Summary:")?;
        write!(f, "{}", self.by_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::testing::{floats, ints, strings};
    use crate::model::sample_table;
    use polars::prelude::*;

    fn sample_input() -> TableSet {
        let mut input = TableSet::new();
        input.insert(dataset::FINANCIAL, sample_table(dataset::FINANCIAL).unwrap());
        input
    }

    fn column_sum(frame: &DataFrame, column: &str) -> f64 {
        floats(frame, column).into_iter().flatten().sum()
    }

    fn names(values: Vec<Option<String>>) -> Vec<String> {
        values.into_iter().flatten().collect()
    }

    #[test]
    fn test_regional_summary() {
        let outcome = AggregateTransformer::default()
            .transform(sample_input())
            .unwrap();
        let regions = &outcome.by_region;

        let columns: Vec<&str> = regions
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(columns, vec!["Region", "TotalPremium", "TotalClaims", "ClaimRatio"]);
        assert_eq!(regions.height(), 4);
        assert_eq!(
            names(strings(regions, "Region")),
            vec!["East", "North", "South", "West"]
        );

        assert_eq!(ints(regions, "TotalPremium")[1], Some(1_020_000));
        assert_eq!(ints(regions, "TotalClaims")[1], Some(612_000));
        let ratio = floats(regions, "ClaimRatio")[1].unwrap();
        assert!((ratio - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_yearly_summary() {
        let outcome = AggregateTransformer::default()
            .transform(sample_input())
            .unwrap();
        let years = &outcome.by_year;

        assert_eq!(years.height(), 2);
        assert_eq!(ints(years, "Year"), vec![Some(2020), Some(2021)]);
        assert_eq!(
            ints(years, "TotalPremium"),
            vec![Some(1_900_000), Some(1_990_000)]
        );
    }

    #[test]
    fn test_totals_preserved() {
        let outcome = AggregateTransformer::default()
            .transform(sample_input())
            .unwrap();

        for column in ["TotalPremium", "TotalClaims"] {
            let total = column_sum(&outcome.dataset, column);
            assert_eq!(column_sum(&outcome.by_region, column), total);
            assert_eq!(column_sum(&outcome.by_year, column), total);
        }
    }

    #[test]
    fn test_first_seen_order() {
        let outcome = AggregateTransformer::new(GroupOrder::FirstSeen, DEFAULT_OUTPUT_KEY)
            .transform(sample_input())
            .unwrap();
        assert_eq!(
            names(strings(&outcome.by_region, "Region")),
            vec!["North", "South", "East", "West"]
        );
    }

    #[test]
    fn test_idempotent() {
        let transformer = AggregateTransformer::default();
        let first = transformer.transform(sample_input()).unwrap();
        let second = transformer.transform(sample_input()).unwrap();
        assert!(first.by_region.equals_missing(&second.by_region));
        assert!(first.by_year.equals_missing(&second.by_year));
        assert_eq!(
            first.to_artifacts().unwrap()[0].body,
            second.to_artifacts().unwrap()[0].body
        );
    }

    #[test]
    fn test_empty_dataset() {
        // What a header-only CSV file parses to
        let empty: Vec<&str> = Vec::new();
        let frame = df!(
            "Year" => empty.clone(),
            "Region" => empty.clone(),
            "TotalPremium" => empty.clone(),
            "TotalClaims" => empty.clone(),
            "ClaimRatio" => empty,
        )
        .unwrap();
        let outcome = AggregateTransformer::default().aggregate(frame).unwrap();

        assert_eq!(outcome.by_region.height(), 0);
        assert_eq!(outcome.by_year.height(), 0);
        assert_eq!(outcome.by_year.get_column_names()[0].as_str(), "Year");

        let artifacts = outcome.to_artifacts().unwrap();
        let records: Vec<serde_json::Value> = serde_json::from_str(&artifacts[0].body).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let frame = df!(
            "Year" => [2020i64],
            "Region" => ["North"],
            "TotalPremium" => [1i64],
        )
        .unwrap();
        let err = AggregateTransformer::default().aggregate(frame).unwrap_err();
        assert!(format!("{:#}", err).contains("TotalClaims"));
    }

    #[test]
    fn test_json_artifact() {
        let outcome = AggregateTransformer::default()
            .transform(sample_input())
            .unwrap();
        let artifacts = outcome.to_artifacts().unwrap();

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].key, DEFAULT_OUTPUT_KEY);
        assert_eq!(artifacts[0].content_type, "application/json");

        let records: Vec<serde_json::Value> = serde_json::from_str(&artifacts[0].body).unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(records[0]["Region"], "North");
        assert_eq!(records[0]["TotalPremium"], 500_000);
    }

    #[test]
    fn test_display_sections() {
        let outcome = AggregateTransformer::default()
            .transform(sample_input())
            .unwrap();
        let text = outcome.to_string();
        for heading in [
            "Financial Data Overview:",
            "Data Info:",
            "Summary Statistics:",
            "Regional Summary:",
            "Yearly Summary:",
        ] {
            assert!(text.contains(heading), "missing {}", heading);
        }
        assert_eq!(outcome.statistics().height(), 8);
    }
}
