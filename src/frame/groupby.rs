//! Grouped aggregation over a key column

use super::is_numeric;
use clap::ValueEnum;
use eyre::{Context, Result};
use polars::prelude::*;

/// Aggregate function applied to one column of each group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFn {
    Sum,
    Mean,
}

/// Order of the groups in an aggregation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GroupOrder {
    /// Ascending key order
    #[default]
    Sorted,
    /// Order in which each key first appears in the input
    FirstSeen,
}

/// Grouped aggregation specification
///
/// # Example
/// ```
/// use polars::prelude::*;
/// use table_etl::frame::GroupBy;
///
/// let frame = df!(
///     "Region" => ["North", "North"],
///     "TotalPremium" => [500000i64, 520000],
/// ).unwrap();
///
/// let summary = GroupBy::new("Region").sum("TotalPremium").apply(&frame).unwrap();
/// assert_eq!(
///     summary.column("TotalPremium").unwrap().get(0).unwrap(),
///     AnyValue::Int64(1020000)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct GroupBy {
    key: String,
    aggs: Vec<(String, AggFn)>,
    order: GroupOrder,
}

impl GroupBy {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            aggs: Vec::new(),
            order: GroupOrder::default(),
        }
    }

    pub fn sum(mut self, column: impl Into<String>) -> Self {
        self.aggs.push((column.into(), AggFn::Sum));
        self
    }

    pub fn mean(mut self, column: impl Into<String>) -> Self {
        self.aggs.push((column.into(), AggFn::Mean));
        self
    }

    pub fn order(mut self, order: GroupOrder) -> Self {
        self.order = order;
        self
    }

    /// Aggregate `frame`
    ///
    /// Rows with a null key are dropped. The result has one row per distinct key
    /// and the columns `[key, aggregated columns...]`. Sums skip nulls and keep
    /// the column's type; means are `null` for a group without values.
    ///
    /// # Errors
    /// Returns an error if a column is missing or an aggregated column is not numeric
    pub fn apply(&self, frame: &DataFrame) -> Result<DataFrame> {
        frame.column(&self.key).wrap_err("Group key missing")?;

        let mut lazy = frame.clone().lazy();
        for (name, _) in &self.aggs {
            let values = frame.column(name).wrap_err("Aggregated column missing")?;
            if is_numeric(values.dtype()) {
                continue;
            }
            // An empty or all-blank CSV column is read as text
            if values.null_count() == values.len() {
                lazy = lazy.with_column(col(name.as_str()).cast(DataType::Float64));
            } else {
                eyre::bail!(
                    "Cannot aggregate column '{}': {} is not numeric",
                    name,
                    values.dtype()
                );
            }
        }

        let aggs: Vec<Expr> = self
            .aggs
            .iter()
            .map(|(name, agg)| match agg {
                AggFn::Sum => col(name.as_str()).sum(),
                AggFn::Mean => col(name.as_str()).mean(),
            })
            .collect();

        let key = col(self.key.as_str());
        let present = lazy.filter(key.clone().is_not_null());
        let grouped = match self.order {
            GroupOrder::Sorted => present
                .group_by([key.clone()])
                .agg(aggs)
                .sort_by_exprs([key], SortMultipleOptions::default()),
            GroupOrder::FirstSeen => present.group_by_stable([key]).agg(aggs),
        };

        let result = grouped
            .collect()
            .wrap_err_with(|| format!("Failed to group by '{}'", self.key))?;

        log::debug!(
            "Grouped {} row(s) by '{}' into {} group(s)",
            frame.height(),
            self.key,
            result.height()
        );

        Ok(result)
    }
}
