//! Both jobs against an in-process object store

mod common;

use common::MockStore;
use std::time::Duration;
use polars::prelude::AnyValue;
use table_etl::client::{Auth, AwsCredentials, ObjectStoreClient};
use table_etl::cli::{run_aggregate, run_join};
use table_etl::config::{PipelineConfig, StoreConfig};
use tempfile::TempDir;
use url::Url;

const DEPARTMENTS: &str = "department_id,department_name\n1,Engineering\n2,Marketing\n";
const EMPLOYEES: &str = "emp_id,name,department_id\n101,Alice Smith,1\n102,Bob Johnson,2\n";

fn store_config(url: &str, temp: &TempDir, auth: Auth) -> PipelineConfig {
    PipelineConfig {
        store: Some(StoreConfig {
            url: Url::parse(url).unwrap(),
            bucket: "data".to_string(),
            auth,
            timeout: Duration::from_secs(5),
        }),
        data_dir: temp.path().to_path_buf(),
        ..PipelineConfig::default()
    }
}

fn seeded_store() -> MockStore {
    MockStore::new()
        .with_object("data/use_case2_departments.csv", DEPARTMENTS)
        .with_object("data/use_case2_employees.csv", EMPLOYEES)
}

#[tokio::test]
async fn test_client_get_and_put() {
    let store = MockStore::new().with_object("data/hello.csv", "a\n1\n");
    let url = Url::parse(&store.serve().await).unwrap();
    let client = ObjectStoreClient::try_new(url, "data", Auth::None, Duration::from_secs(5)).unwrap();

    assert_eq!(client.get_object("hello.csv").await.unwrap(), "a\n1\n");

    client
        .put_object("nested/out.json", "[]".to_string(), "application/json")
        .await
        .unwrap();
    assert_eq!(store.object("data/nested/out.json").as_deref(), Some("[]"));

    let err = client.get_object("missing.csv").await.unwrap_err();
    assert!(err.to_string().contains("Object 'missing.csv' not found in bucket 'data'"));
}

#[tokio::test]
async fn test_join_reads_and_writes_bucket() {
    let temp = TempDir::new().unwrap();
    let store = seeded_store();
    let url = store.serve().await;

    let config = store_config(&url, &temp, Auth::Bearer("secret".to_string()));
    let outcome = run_join(&config).await.unwrap();
    assert_eq!(outcome.inner.height(), 2);

    assert_eq!(
        store.object("data/inner_join_result.csv").as_deref(),
        Some(
            "emp_id,name,department_id,department_name\n\
             101,Alice Smith,1,Engineering\n\
             102,Bob Johnson,2,Marketing\n"
        )
    );
    assert!(store.object("data/left_join_result.csv").is_some());
    assert!(store.object("data/right_join_result.csv").is_some());

    // Saved to the bucket, so nothing was written locally
    assert!(!temp.path().join("inner_join_result.csv").exists());
    assert!(
        store
            .authorizations()
            .iter()
            .all(|header| header == "Bearer secret")
    );
}

#[tokio::test]
async fn test_missing_object_falls_back_to_local_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("financial_data.csv"),
        "Year,Region,TotalPremium,TotalClaims,ClaimRatio\n2024,North,10,5,0.5\n",
    )
    .unwrap();
    let store = MockStore::new();
    let url = store.serve().await;

    let outcome = run_aggregate(&store_config(&url, &temp, Auth::None))
        .await
        .unwrap();
    assert_eq!(
        outcome.by_year.column("Year").unwrap().get(0).unwrap(),
        AnyValue::Int64(2024)
    );
    assert!(store.object("data/processed_financial_data.json").is_some());
}

#[tokio::test]
async fn test_rejected_upload_falls_back_to_local_files() {
    let temp = TempDir::new().unwrap();
    let store = seeded_store().rejecting_puts();
    let url = store.serve().await;

    let config = store_config(
        &url,
        &temp,
        Auth::Basic("user".to_string(), "pass".to_string()),
    );
    run_join(&config).await.unwrap();

    assert!(store.object("data/inner_join_result.csv").is_none());
    assert!(temp.path().join("inner_join_result.csv").exists());
    assert!(temp.path().join("right_join_result.csv").exists());
    // "user:pass" in base64
    assert!(store.authorizations().contains(&"Basic dXNlcjpwYXNz".to_string()));
}

#[tokio::test]
async fn test_aws_credentials_sign_every_request() {
    let temp = TempDir::new().unwrap();
    let store = seeded_store();
    let url = store.serve().await;

    let auth = Auth::Aws(AwsCredentials {
        access_key_id: "AKIDEXAMPLE".to_string(),
        secret_access_key: "secret".to_string(),
        session_token: None,
        region: "us-east-1".to_string(),
    });
    let outcome = run_join(&store_config(&url, &temp, auth)).await.unwrap();
    assert_eq!(outcome.inner.height(), 2);
    assert!(store.object("data/inner_join_result.csv").is_some());

    // Two GETs and three PUTs
    let authorizations = store.authorizations();
    assert_eq!(authorizations.len(), 5);
    for header in authorizations {
        assert!(header.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
        assert!(header.contains("/us-east-1/s3/aws4_request"));
        assert!(header.contains("SignedHeaders=host;x-amz-content-sha256;x-amz-date,"));
    }
}

#[tokio::test]
async fn test_unusable_store_settings_fall_back_to_local_files() {
    let temp = TempDir::new().unwrap();
    let store = seeded_store();
    let url = store.serve().await;

    // A token with a newline cannot become a header value
    let config = store_config(&url, &temp, Auth::Bearer("abc\ndef".to_string()));
    let outcome = run_join(&config).await.unwrap();

    // The store was skipped entirely: sample inputs, local outputs
    assert_eq!(outcome.inner.height(), 4);
    assert!(store.authorizations().is_empty());
    assert!(store.object("data/inner_join_result.csv").is_none());
    assert!(temp.path().join("inner_join_result.csv").exists());
}
