//! # Repository service client
//!
//! An async Rust client for the Repository REST service: typed objects,
//! raw-text SeedData blobs, annotations, timelines, and token-based
//! authentication.
//!
//! The [`Repository`] client owns the session. It authenticates once,
//! holds the resulting token, and attaches it to every call made through
//! its resource accessors:
//! - [`Repository::objects`]: typed objects with JSON property bags
//! - [`Repository::seed_data`]: raw text blobs, buffered or streamed
//! - [`Repository::annotations`] / [`Repository::timelines`]: versioned
//!   record APIs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repository_client::{Query, Repository};
//!
//! #[tokio::main]
//! async fn main() -> repository_client::Result<()> {
//!     let repo = Repository::new(
//!         "http://localhost:8080/concerto/services/rest/RepositoryService/v1",
//!     )?;
//!     repo.connect(Some("tenant1"), "admin", "secret").await?;
//!
//!     let id = repo
//!         .objects()
//!         .create(&serde_json::json!({ "type": "widget", "name": "example" }))
//!         .await?;
//!     let found = repo
//!         .objects()
//!         .query("widget", &Query::params([("name", "example")]))
//!         .await?;
//!     println!("created {id}, query returned {found:?}");
//!
//!     repo.disconnect().await
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// Re-export commonly used types
pub use client::{Repository, RepositoryBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ApiError, Error, Result};
pub use http::{Response, StreamingResponse};
pub use query::Query;

// Module declarations
pub mod adapter;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod resources;

// Re-export key dependencies for convenience
pub use serde::{Deserialize, Serialize};
pub use serde_json::Value as JsonValue;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use repository_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ApiError, ClientConfig, Error, Query, Repository, Result,
        resources::{Annotations, Objects, SeedData, Timelines, Tokens},
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Conventional base path of the Repository service, relative to the host
pub const DEFAULT_SERVICE_PATH: &str = "/concerto/services/rest/RepositoryService/v1";
