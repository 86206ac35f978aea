//! Descriptive overviews of a frame: column info and summary statistics

use super::numeric_columns;
use eyre::{Context, Result};
use polars::prelude::*;

const STATISTICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Summary statistics of every numeric column
///
/// The first column, `statistic`, names the row: non-null count, mean, sample
/// standard deviation, min, quartiles (linear interpolation) and max.
pub fn describe(frame: &DataFrame) -> Result<DataFrame> {
    let numeric = numeric_columns(frame);

    let exprs: Vec<Expr> = numeric
        .iter()
        .flat_map(|name| STATISTICS.iter().map(move |stat| statistic(name, stat)))
        .collect();
    let values = match exprs.is_empty() {
        true => DataFrame::empty(),
        false => frame
            .clone()
            .lazy()
            .select(exprs)
            .collect()
            .wrap_err("Failed to compute summary statistics")?,
    };

    let mut columns = vec![Column::new("statistic".into(), STATISTICS)];
    for name in &numeric {
        let stats = STATISTICS
            .iter()
            .map(|stat| {
                let series = values
                    .column(&alias(name, stat))?
                    .as_materialized_series()
                    .cast(&DataType::Float64)?;
                Ok(series.f64()?.get(0))
            })
            .collect::<Result<Vec<Option<f64>>>>()?;
        columns.push(Column::new(name.as_str().into(), stats));
    }

    Ok(DataFrame::new(columns)?)
}

fn alias(column: &str, stat: &str) -> String {
    format!("{}:{}", column, stat)
}

fn statistic(column: &str, stat: &str) -> Expr {
    let values = col(column).cast(DataType::Float64);
    let expr = match stat {
        "count" => values.count().cast(DataType::Float64),
        "mean" => values.mean(),
        "std" => values.std(1),
        "min" => values.min(),
        "25%" => values.quantile(lit(0.25), QuantileMethod::Linear),
        "50%" => values.median(),
        "75%" => values.quantile(lit(0.75), QuantileMethod::Linear),
        _ => values.max(),
    };
    expr.alias(alias(column, stat))
}

/// One row per column: name, non-null count and dtype
pub fn info(frame: &DataFrame) -> Result<DataFrame> {
    let columns = frame.get_columns();
    let names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
    let counts: Vec<i64> = columns
        .iter()
        .map(|c| (c.len() - c.null_count()) as i64)
        .collect();
    let dtypes: Vec<String> = columns.iter().map(|c| c.dtype().to_string()).collect();

    df!(
        "Column" => names,
        "Non-Null Count" => counts,
        "Dtype" => dtypes,
    )
    .context("Failed to build column info")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::testing::{floats, ints, strings};

    fn premiums() -> DataFrame {
        df!(
            "Region" => ["North", "South", "East", "West"],
            "TotalPremium" => [1i64, 2, 3, 4],
            "ClaimRatio" => [Some(0.5), None, Some(0.5), Some(0.5)],
        )
        .unwrap()
    }

    #[test]
    fn test_describe_numeric_columns_only() {
        let stats = describe(&premiums()).unwrap();

        let names: Vec<&str> = stats
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, vec!["statistic", "TotalPremium", "ClaimRatio"]);
        assert_eq!(stats.height(), 8);

        let premium = floats(&stats, "TotalPremium");
        assert_eq!(premium[..2], [Some(4.0), Some(2.5)]);
        assert_eq!(
            premium[3..],
            [Some(1.0), Some(1.75), Some(2.5), Some(3.25), Some(4.0)]
        );
        let ratio = floats(&stats, "ClaimRatio");
        assert_eq!(ratio[0], Some(3.0));
        assert_eq!(ratio[2], Some(0.0));
    }

    #[test]
    fn test_sample_standard_deviation() {
        let stats = describe(&premiums()).unwrap();
        let deviation = floats(&stats, "TotalPremium")[2].unwrap();
        // sqrt(((1.5^2 + 0.5^2) * 2) / 3)
        assert!((deviation - 1.2909944487358056).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_has_no_std() {
        let frame = df!("v" => [7i64]).unwrap();
        let stats = describe(&frame).unwrap();
        let values = floats(&stats, "v");
        assert_eq!(values[2], None);
        assert_eq!(values[5], Some(7.0));
    }

    #[test]
    fn test_no_numeric_columns() {
        let frame = df!("Region" => ["North"]).unwrap();
        let stats = describe(&frame).unwrap();
        assert_eq!(stats.width(), 1);
        assert_eq!(strings(&stats, "statistic")[7], Some("max".to_string()));
    }

    #[test]
    fn test_info() {
        let summary = info(&premiums()).unwrap();
        assert_eq!(summary.height(), 3);
        assert_eq!(ints(&summary, "Non-Null Count"), vec![Some(4), Some(4), Some(3)]);
        assert_eq!(
            strings(&summary, "Dtype"),
            vec![
                Some("str".to_string()),
                Some("i64".to_string()),
                Some("f64".to_string()),
            ]
        );
    }
}
