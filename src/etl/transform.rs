//! Transformer trait for data transformation

use eyre::Result;

/// Transformer trait for transforming extracted data
///
/// Implementors define how a loaded dataset becomes pipeline output:
/// - Relational joins
/// - Grouped aggregations
/// - Format conversion
///
/// # Example
/// ```
/// use polars::prelude::*;
/// use table_etl::etl::Transformer;
///
/// struct RowCounter;
///
/// impl Transformer for RowCounter {
///     type Input = DataFrame;
///     type Output = usize;
///
///     fn transform(&self, input: Self::Input) -> eyre::Result<Self::Output> {
///         Ok(input.height())
///     }
/// }
///
/// let frame = df!("a" => [1i64, 2]).unwrap();
/// assert_eq!(RowCounter.transform(frame).unwrap(), 2);
/// ```
pub trait Transformer: Send + Sync {
    /// Input type
    type Input: Send;

    /// Output type after transformation
    type Output: Send;

    /// Transform the input
    ///
    /// # Errors
    /// Returns an error if transformation fails (missing columns, bad values, etc.)
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;
}
