//! Loader trait for loading data to destinations

use eyre::Result;

/// A serialized output ready to be written under a storage key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Object key or file name
    pub key: String,
    /// MIME type sent along with object store uploads
    pub content_type: &'static str,
    pub body: String,
}

impl Artifact {
    pub fn csv(key: impl Into<String>, body: String) -> Self {
        Self {
            key: key.into(),
            content_type: "text/csv",
            body,
        }
    }

    pub fn json(key: impl Into<String>, body: String) -> Self {
        Self {
            key: key.into(),
            content_type: "application/json",
            body,
        }
    }
}

/// Conversion of a transform output into the artifacts a sink persists
pub trait IntoArtifacts {
    /// # Errors
    /// Returns an error if serialization fails
    fn to_artifacts(&self) -> Result<Vec<Artifact>>;
}

/// Loader trait for loading data to a destination
///
/// Implementors define how to load items to destinations:
/// - Object storage buckets
/// - Local file systems
///
/// # Example
/// ```no_run
/// use table_etl::etl::{Artifact, Loader};
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct FileLoader {
///     output_dir: PathBuf,
/// }
///
/// impl Loader for FileLoader {
///     type Item = Artifact;
///
///     async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
///         for item in &items {
///             std::fs::write(self.output_dir.join(&item.key), &item.body)?;
///         }
///         Ok(items.len())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// The type of items to load
    type Item: Send;

    /// Load items to the destination
    ///
    /// Returns the number of items successfully loaded
    ///
    /// # Errors
    /// Returns an error if loading fails (network, I/O, etc.)
    fn load(
        &self,
        items: Vec<Self::Item>,
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}
