//! Pipeline orchestration for ETL operations

use super::{Artifact, Extractor, IntoArtifacts, Loader, Transformer};
use eyre::Result;
use std::fmt::Display;

/// ETL Pipeline that orchestrates Extract, Transform, and Load operations
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Output)
/// - `L`: Loader type (must load the artifacts of T::Output)
///
/// Inputs and outputs are echoed to stdout as they pass through, unless the
/// pipeline is made [`quiet`](Pipeline::quiet).
///
/// # Example
/// ```no_run
/// use table_etl::etl::Pipeline;
/// # use table_etl::etl::{Artifact, Extractor, IntoArtifacts, Loader, Transformer};
/// # use eyre::Result;
/// # struct Greeting;
/// # impl std::fmt::Display for Greeting {
/// #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "hi") }
/// # }
/// # impl IntoArtifacts for Greeting {
/// #     fn to_artifacts(&self) -> Result<Vec<Artifact>> { Ok(vec![]) }
/// # }
/// # struct MyExtractor;
/// # impl Extractor for MyExtractor {
/// #     type Output = Greeting;
/// #     async fn extract(&self) -> Result<Self::Output> { Ok(Greeting) }
/// # }
/// # struct MyTransformer;
/// # impl Transformer for MyTransformer {
/// #     type Input = Greeting;
/// #     type Output = Greeting;
/// #     fn transform(&self, input: Greeting) -> Result<Greeting> { Ok(input) }
/// # }
/// # struct MyLoader;
/// # impl Loader for MyLoader {
/// #     type Item = Artifact;
/// #     async fn load(&self, items: Vec<Self::Item>) -> Result<usize> { Ok(items.len()) }
/// # }
///
/// # async fn example() -> Result<()> {
/// let pipeline = Pipeline::new(
///     MyExtractor,
///     MyTransformer,
///     MyLoader,
/// );
///
/// let output = pipeline.run().await?;
/// println!("{}", output);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
    echo: bool,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    E::Output: Display,
    T: Transformer<Input = E::Output>,
    T::Output: Display + IntoArtifacts,
    L: Loader<Item = Artifact>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
            echo: true,
        }
    }

    /// Stop echoing inputs and outputs to stdout
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract the input from the source
    /// 2. Transform it
    /// 3. Serialize the output into artifacts
    /// 4. Load the artifacts to the destination
    ///
    /// Returns the transform output
    ///
    /// # Errors
    /// Returns an error if any stage fails
    pub async fn run(&self) -> Result<T::Output> {
        log::info!("Starting ETL pipeline");

        // Extract
        log::debug!("Extracting from source...");
        let input = self.extractor.extract().await?;
        if self.echo {
            println!("{}", input);
        }

        // Transform
        log::debug!("Transforming input...");
        let output = self.transformer.transform(input)?;
        if self.echo {
            println!("{}", output);
        }

        // Load
        log::debug!("Loading to destination...");
        let artifacts = output.to_artifacts()?;
        let count = self.loader.load(artifacts).await?;
        log::info!("Loaded {} artifact(s)", count);

        Ok(output)
    }
}
