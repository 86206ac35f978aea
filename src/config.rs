//! Runtime configuration from environment variables and CLI overrides
//!
//! Environment:
//! - `OBJECT_STORE_URL`: base URL of the object store; unset disables it
//!   unless AWS credentials are set
//! - `OBJECT_STORE_BUCKET`: required when the store is enabled
//! - `AWS_ACCESS_KEY_ID` + `AWS_SECRET_ACCESS_KEY` (optional
//!   `AWS_SESSION_TOKEN`, `AWS_REGION` default `us-east-1`): SigV4 signing;
//!   without `OBJECT_STORE_URL` the store is `https://s3.{region}.amazonaws.com`
//! - `OBJECT_STORE_TOKEN`, or `OBJECT_STORE_USERNAME` + `OBJECT_STORE_PASSWORD`
//! - `OBJECT_STORE_TIMEOUT_SECS`: request timeout, default 30
//! - `DEPT_KEY`, `EMP_KEY`, `FINANCIAL_KEY`: input keys
//! - `DATA_DIR`: local input/output directory, default `.`

use crate::client::{Auth, AwsCredentials, ObjectStoreClient};
use crate::frame::GroupOrder;
use crate::jobs::JoinOutputKeys;
use crate::jobs::aggregator::DEFAULT_OUTPUT_KEY;
use crate::model::dataset;
use crate::storage::{
    ArtifactSink, BucketReader, BucketWriter, DatasetSpec, LocalFileReader, LocalFileWriter,
    SampleReader, SinkChain, SourceChain, TableSource,
};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_DEPARTMENTS_KEY: &str = "use_case2_departments.csv";
pub const DEFAULT_EMPLOYEES_KEY: &str = "use_case2_employees.csv";
pub const DEFAULT_FINANCIAL_KEY: &str = "financial_data.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Values given on the command line; each one wins over the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bucket: Option<String>,
    pub data_dir: Option<PathBuf>,
    /// Skip the object store even when it is configured
    pub offline: bool,
    pub group_order: Option<GroupOrder>,
}

/// Connection settings for the object store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub url: Url,
    pub bucket: String,
    pub auth: Auth,
    pub timeout: Duration,
}

impl StoreConfig {
    /// Read the store settings, `None` when neither `OBJECT_STORE_URL` nor
    /// AWS credentials are set
    ///
    /// # Errors
    /// Returns an error if the URL is invalid, the bucket is missing or the
    /// timeout is not a number of seconds
    pub fn from_env(bucket: Option<String>) -> Result<Option<Self>> {
        let aws = aws_from_env();
        let url_str = match (std::env::var("OBJECT_STORE_URL"), &aws) {
            (Ok(url), _) => url,
            (Err(_), Some(credentials)) => {
                format!("https://s3.{}.amazonaws.com", credentials.region)
            }
            (Err(_), None) => return Ok(None),
        };
        let url = Url::parse(&url_str)
            .with_context(|| format!("Invalid OBJECT_STORE_URL: {}", url_str))?;

        let bucket = match bucket {
            Some(bucket) => bucket,
            None => std::env::var("OBJECT_STORE_BUCKET")
                .context("OBJECT_STORE_BUCKET environment variable not set")?,
        };

        let auth = match aws {
            Some(credentials) => Auth::Aws(credentials),
            None => Auth::new(
                std::env::var("OBJECT_STORE_TOKEN").ok(),
                std::env::var("OBJECT_STORE_USERNAME").ok(),
                std::env::var("OBJECT_STORE_PASSWORD").ok(),
            ),
        };

        let timeout = match std::env::var("OBJECT_STORE_TIMEOUT_SECS") {
            Ok(secs) => secs.parse::<u64>().with_context(|| {
                format!("Invalid OBJECT_STORE_TIMEOUT_SECS: {}", secs)
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Some(Self {
            url,
            bucket,
            auth,
            timeout: Duration::from_secs(timeout),
        }))
    }

    pub fn client(&self) -> Result<ObjectStoreClient> {
        ObjectStoreClient::try_new(
            self.url.clone(),
            &self.bucket,
            self.auth.clone(),
            self.timeout,
        )
        .context("Failed to create object store client")
    }
}

fn aws_from_env() -> Option<AwsCredentials> {
    let access_key_id = std::env::var("AWS_ACCESS_KEY_ID").ok()?;
    let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY").ok()?;
    Some(AwsCredentials {
        access_key_id,
        secret_access_key,
        session_token: std::env::var("AWS_SESSION_TOKEN").ok(),
        region: env_or("AWS_REGION", DEFAULT_AWS_REGION),
    })
}

/// Everything both jobs need to build their sources and sinks
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub store: Option<StoreConfig>,
    pub data_dir: PathBuf,
    pub departments_key: String,
    pub employees_key: String,
    pub financial_key: String,
    pub join_outputs: JoinOutputKeys,
    pub aggregate_output: String,
    pub group_order: GroupOrder,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            store: None,
            data_dir: PathBuf::from("."),
            departments_key: DEFAULT_DEPARTMENTS_KEY.to_string(),
            employees_key: DEFAULT_EMPLOYEES_KEY.to_string(),
            financial_key: DEFAULT_FINANCIAL_KEY.to_string(),
            join_outputs: JoinOutputKeys::default(),
            aggregate_output: DEFAULT_OUTPUT_KEY.to_string(),
            group_order: GroupOrder::default(),
        }
    }
}

impl PipelineConfig {
    /// Build the configuration from the environment, then apply `overrides`
    pub fn load(overrides: Overrides) -> Result<Self> {
        let store = match overrides.offline {
            true => None,
            false => StoreConfig::from_env(overrides.bucket)?,
        };

        let data_dir = overrides
            .data_dir
            .or_else(|| std::env::var("DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let config = Self {
            store,
            data_dir,
            departments_key: env_or("DEPT_KEY", DEFAULT_DEPARTMENTS_KEY),
            employees_key: env_or("EMP_KEY", DEFAULT_EMPLOYEES_KEY),
            financial_key: env_or("FINANCIAL_KEY", DEFAULT_FINANCIAL_KEY),
            group_order: overrides.group_order.unwrap_or_default(),
            ..Self::default()
        };

        match &config.store {
            Some(store) => log::debug!(
                "Object store: {} (bucket {}, auth {})",
                store.url.as_str().bright_black(),
                store.bucket.cyan(),
                store.auth
            ),
            None => log::debug!("Object store disabled"),
        }
        log::debug!("Data directory: {}", config.data_dir.display().bright_black());

        Ok(config)
    }

    /// Inputs of the join job
    pub fn join_datasets(&self) -> Vec<DatasetSpec> {
        vec![
            DatasetSpec::new(dataset::DEPARTMENTS, &self.departments_key),
            DatasetSpec::new(dataset::EMPLOYEES, &self.employees_key),
        ]
    }

    /// Inputs of the aggregate job
    pub fn aggregate_datasets(&self) -> Vec<DatasetSpec> {
        vec![DatasetSpec::new(dataset::FINANCIAL, &self.financial_key)]
    }

    /// Object store (when usable), then local files, then sample data
    pub fn source_chain(&self, datasets: Vec<DatasetSpec>) -> SourceChain {
        let mut sources: Vec<TableSource> = Vec::new();
        if let Some(client) = self.store_client() {
            sources.push(BucketReader::new(client, datasets.clone()).into());
        }
        sources.push(LocalFileReader::new(&self.data_dir, datasets.clone()).into());
        sources.push(SampleReader::new(datasets).into());
        SourceChain::new(sources)
    }

    /// Object store (when usable), then local files
    pub fn sink_chain(&self) -> SinkChain {
        let mut sinks: Vec<ArtifactSink> = Vec::new();
        if let Some(client) = self.store_client() {
            sinks.push(BucketWriter::new(client).into());
        }
        sinks.push(LocalFileWriter::new(&self.data_dir).into());
        SinkChain::new(sinks)
    }

    /// A client for the configured store; a store that cannot be reached with
    /// these settings is left out of the chains
    fn store_client(&self) -> Option<ObjectStoreClient> {
        let store = self.store.as_ref()?;
        match store.client() {
            Ok(client) => Some(client),
            Err(e) => {
                log::warn!("Object store unavailable, skipping: {:#}", e);
                None
            }
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
