//! Parcel: signed GET/PUT access to a single S3-compatible bucket
//!
//! ```no_run
//! use parcel_client::{ClientConfig, PutObjectOptions, S3Client};
//!
//! # async fn run() -> parcel_client::Result<()> {
//! let client = S3Client::new(ClientConfig::from_env()?)?;
//!
//! let put = client
//!     .put_object("reports/2024.csv", "a,b\n1,2\n", Some(PutObjectOptions::new().with_acl("private")))
//!     .await?;
//! println!("stored with etag {}", put.etag);
//!
//! if let Some(bytes) = client.get_object("reports/2024.csv", None).await? {
//!     println!("{} bytes", bytes.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::S3Client;
pub use parcel_core::types::{CannedAcl, GetObjectOptions, PutObjectOptions, PutObjectOutput};
pub use parcel_core::{ClientConfig, Error, Result};
