//! Relational operations over polars [`DataFrame`]s
//!
//! - [`join`]: inner, left and right joins on a key column
//! - [`GroupBy`]: grouped sums and means
//! - [`describe`] / [`info`]: descriptive overviews

mod describe;
mod groupby;
mod join;

pub use describe::{describe, info};
pub use groupby::{AggFn, GroupBy, GroupOrder};
pub use join::{JoinKind, join};

use polars::prelude::{DataFrame, DataType};

fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float()
}

/// Names of the numeric columns, in column order
pub fn numeric_columns(frame: &DataFrame) -> Vec<String> {
    frame
        .get_columns()
        .iter()
        .filter(|column| is_numeric(column.dtype()))
        .map(|column| column.name().to_string())
        .collect()
}
