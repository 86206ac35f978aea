//! Object store HTTP client and authentication.
//!
//! This module provides the [`ObjectStoreClient`] for reading and writing
//! objects in a bucket, along with the [`Auth`] modes it supports. With
//! [`Auth::Aws`] the client speaks to Amazon S3 or any SigV4-compatible store.

mod auth;
mod object_store;
mod sigv4;

pub use auth::Auth;
pub use object_store::ObjectStoreClient;
pub use sigv4::AwsCredentials;
