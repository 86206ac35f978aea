//! Object store client module
//!
//! Provides `ObjectStoreClient` for reading and writing objects in a bucket
//! addressed path-style (`{url}/{bucket}/{key}`).

use super::{Auth, AwsCredentials};
use base64::Engine;
use chrono::Utc;
use eyre::{Context, Result, eyre};
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use url::Url;

/// Client for a single bucket of an object store.
///
/// Bearer and Basic credentials go into a default `Authorization` header;
/// AWS credentials sign every request individually.
///
/// # Example
/// ```no_run
/// use table_etl::client::{Auth, ObjectStoreClient};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("http://localhost:9000")?;
/// let client = ObjectStoreClient::try_new(url, "reports", Auth::None, Duration::from_secs(30))?;
///
/// let csv = client.get_object("financial_data.csv").await?;
/// client.put_object("copy.csv", csv, "text/csv").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ObjectStoreClient {
    client: Client,
    url: Url,
    bucket: String,
    signer: Option<AwsCredentials>,
}

impl ObjectStoreClient {
    /// Create a new client for `bucket` at the store's base URL.
    ///
    /// # Arguments
    /// * `url` - Base object store URL
    /// * `bucket` - Bucket every key is resolved against
    /// * `auth` - Authentication method
    /// * `timeout` - Per-request timeout
    ///
    /// # Errors
    /// Returns an error if:
    /// - The bucket name is empty
    /// - The credentials don't form a valid header
    /// - The HTTP client cannot be built
    pub fn try_new(url: Url, bucket: &str, auth: Auth, timeout: Duration) -> Result<Self> {
        if bucket.trim().is_empty() {
            eyre::bail!("Bucket name must not be empty");
        }

        let mut headers = reqwest::header::HeaderMap::new();
        let mut signer = None;
        match auth {
            Auth::Basic(username, password) => {
                let credentials = base64::engine::general_purpose::STANDARD
                    .encode(format!("{}:{}", username, password));
                headers.append(
                    reqwest::header::AUTHORIZATION,
                    format!("Basic {}", credentials).parse()?,
                );
            }
            Auth::Bearer(token) => {
                headers.append(
                    reqwest::header::AUTHORIZATION,
                    format!("Bearer {}", token).parse()?,
                );
            }
            Auth::Aws(credentials) => {
                if url.host_str().is_none() {
                    eyre::bail!("Object store URL has no host: {}", url);
                }
                signer = Some(credentials);
            }
            Auth::None => {}
        }
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url,
            bucket: bucket.to_string(),
            signer,
        })
    }

    /// Get the bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Full URL of an object in this client's bucket.
    pub fn object_url(&self, key: &str) -> Result<Url> {
        let key = key.strip_prefix('/').unwrap_or(key);
        let mut base = self.url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(&format!("{}/{}", self.bucket, key))
            .with_context(|| format!("Invalid object key: {}", key))
    }

    /// Download an object as UTF-8 text.
    ///
    /// # Errors
    /// Returns an error if the request fails, the object does not exist, the
    /// store answers with a non-success status, or the body is not valid text
    pub async fn get_object(&self, key: &str) -> Result<String> {
        let response = self.request(Method::GET, key, None, None).await?;

        match response.status() {
            status if status.is_success() => response
                .text()
                .await
                .with_context(|| format!("Failed to read body of object '{}'", key)),
            StatusCode::NOT_FOUND => Err(eyre!(
                "Object '{}' not found in bucket '{}'",
                key,
                self.bucket
            )),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(eyre!("Failed to get object '{}' ({}): {}", key, status, body))
            }
        }
    }

    /// Upload an object, replacing any previous version.
    ///
    /// # Errors
    /// Returns an error if the request fails or the store answers with a
    /// non-success status
    pub async fn put_object(&self, key: &str, body: String, content_type: &str) -> Result<()> {
        let response = self
            .request(Method::PUT, key, Some(content_type), Some(body))
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            eyre::bail!("Failed to put object '{}' ({}): {}", key, status, body);
        }
        Ok(())
    }

    async fn request(
        &self,
        method: Method,
        key: &str,
        content_type: Option<&str>,
        body: Option<String>,
    ) -> Result<reqwest::Response> {
        let url = self.object_url(key)?;
        log::debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        if let Some(credentials) = &self.signer {
            let payload = body.as_deref().unwrap_or("").as_bytes();
            for (name, value) in credentials.sign(method.as_str(), &url, payload, Utc::now())? {
                request = request.header(name, value);
            }
        }
        if let Some(body) = body {
            request = request.body(body);
        }
        request
            .send()
            .await
            .map_err(|e| eyre!("Failed to send request: {}", e))
    }
}

impl std::fmt::Display for ObjectStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (bucket: {})", self.url, self.bucket)
    }
}
