//! Extractor trait for data extraction from various sources

use eyre::Result;

/// Extractor trait for extracting data from a source
///
/// Implementors define how to pull a dataset out of sources like:
/// - Object storage buckets
/// - Local CSV files
/// - Built-in sample data
///
/// # Example
/// ```no_run
/// use table_etl::etl::Extractor;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct LineCounter {
///     path: PathBuf,
/// }
///
/// impl Extractor for LineCounter {
///     type Output = usize;
///
///     async fn extract(&self) -> Result<Self::Output> {
///         Ok(std::fs::read_to_string(&self.path)?.lines().count())
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of data extracted
    type Output: Send;

    /// Extract data from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, I/O, parsing, etc.)
    fn extract(&self) -> impl std::future::Future<Output = Result<Self::Output>> + Send;
}
