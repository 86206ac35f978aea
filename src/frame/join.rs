//! Relational joins between two frames on a shared key column

use eyre::{Context, Result};
use polars::prelude::*;

const LEFT_ROW: &str = "__left_row";
const RIGHT_ROW: &str = "__right_row";
/// Polars' suffix for right columns whose name is taken on the left
const SUFFIX: &str = "_right";

/// Which unmatched rows a join keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Only rows with a match on both sides
    Inner,
    /// Every left row, matched or not
    Left,
    /// Every right row, matched or not
    Right,
}

impl JoinKind {
    fn join_type(self) -> JoinType {
        match self {
            JoinKind::Inner => JoinType::Inner,
            JoinKind::Left => JoinType::Left,
            JoinKind::Right => JoinType::Right,
        }
    }
}

impl std::fmt::Display for JoinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinKind::Inner => write!(f, "inner"),
            JoinKind::Left => write!(f, "left"),
            JoinKind::Right => write!(f, "right"),
        }
    }
}

/// Join `left` and `right` on the column `on`
///
/// Output columns are every left column followed by the right columns except
/// the key. A right column whose name is already taken gets a `_right` suffix.
///
/// Inner and left joins follow the left frame's row order; a right join follows
/// the right frame's. Multiple matches fan out in the other side's order. Null
/// keys never match.
///
/// # Example
/// ```
/// use polars::prelude::*;
/// use table_etl::frame::{JoinKind, join};
///
/// let employees = df!("emp_id" => [101i64, 102], "department_id" => [1i64, 9]).unwrap();
/// let departments = df!("department_id" => [1i64], "department_name" => ["Engineering"]).unwrap();
///
/// let inner = join(&employees, &departments, "department_id", JoinKind::Inner).unwrap();
/// assert_eq!(inner.height(), 1);
///
/// let left = join(&employees, &departments, "department_id", JoinKind::Left).unwrap();
/// assert_eq!(left.column("department_name").unwrap().null_count(), 1);
/// ```
///
/// # Errors
/// Returns an error if either frame lacks the key column or the key types differ
pub fn join(left: &DataFrame, right: &DataFrame, on: &str, kind: JoinKind) -> Result<DataFrame> {
    let left_type = left
        .column(on)
        .wrap_err("Join key missing from left table")?
        .dtype()
        .clone();
    let right_type = right
        .column(on)
        .wrap_err("Join key missing from right table")?
        .dtype()
        .clone();

    let mut left_lazy = left.clone().lazy();
    let mut right_lazy = right.clone().lazy();

    // Header-only CSV files come back with string keys
    if left_type != right_type {
        if left.height() == 0 {
            left_lazy = left_lazy.with_column(col(on).cast(right_type));
        } else if right.height() == 0 {
            right_lazy = right_lazy.with_column(col(on).cast(left_type));
        } else {
            eyre::bail!(
                "Join key '{}' is {} in the left table but {} in the right table",
                on,
                left_type,
                right_type
            );
        }
    }

    let order = match kind {
        JoinKind::Inner | JoinKind::Left => [col(LEFT_ROW), col(RIGHT_ROW)],
        JoinKind::Right => [col(RIGHT_ROW), col(LEFT_ROW)],
    };
    let columns: Vec<Expr> = output_columns(left, right, on)
        .iter()
        .map(|name| col(name.as_str()))
        .collect();

    let joined = left_lazy
        .with_row_index(LEFT_ROW, None)
        .join(
            right_lazy.with_row_index(RIGHT_ROW, None),
            [col(on)],
            [col(on)],
            JoinArgs::new(kind.join_type()),
        )
        .sort_by_exprs(order, SortMultipleOptions::default().with_nulls_last(true))
        .select(columns)
        .collect()
        .wrap_err_with(|| format!("Failed to compute {} join on '{}'", kind, on))?;

    log::debug!(
        "{} join on '{}': {} x {} row(s) -> {} row(s)",
        kind,
        on,
        left.height(),
        right.height(),
        joined.height()
    );

    Ok(joined)
}

fn output_columns(left: &DataFrame, right: &DataFrame, on: &str) -> Vec<String> {
    let left_names: Vec<String> = left
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let right_names = right
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .filter(|name| name != on)
        .map(|name| {
            if left_names.contains(&name) {
                format!("{}{}", name, SUFFIX)
            } else {
                name
            }
        });

    left_names.iter().cloned().chain(right_names).collect()
}
