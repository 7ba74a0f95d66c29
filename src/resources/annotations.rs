//! Annotation records
//!
//! Annotations live under their own versioned API root and use the
//! conventional REST verb mapping (create `POST`, update `PUT`), unlike the
//! older Objects endpoints.

use http::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::Created;
use crate::{Repository, error::Result, query::Query};

const API_ROOT: &str = "/mpulse/api/annotations/v1";

/// Annotations API resource.
#[derive(Clone)]
pub struct Annotations {
    client: Repository,
}

impl Annotations {
    pub(crate) fn new(client: Repository) -> Self {
        Self { client }
    }

    fn record_path(id: u64) -> String {
        format!("{API_ROOT}/{id}")
    }

    /// Create a new annotation, returning the id the repository assigned.
    pub async fn create<T: Serialize + ?Sized>(&self, props: &T) -> Result<u64> {
        debug!("create annotation");

        let created: Created = self
            .client
            .request(Method::POST, API_ROOT)?
            .json(props)?
            .send()
            .await?
            .parse()?;

        Ok(created.id)
    }

    /// Retrieve an annotation by id.
    pub async fn get(&self, id: u64) -> Result<Option<Value>> {
        debug!(id, "get annotation");

        self.client
            .request(Method::GET, &Self::record_path(id))?
            .send()
            .await?
            .json_value()
    }

    /// Check whether an annotation exists, without fetching it.
    pub async fn exists(&self, id: u64) -> Result<bool> {
        debug!(id, "annotation exists");

        let resp = self
            .client
            .request(Method::HEAD, &Self::record_path(id))?
            .send()
            .await?;

        if resp.is_success() {
            Ok(true)
        } else if resp.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(resp.into_error())
        }
    }

    /// List annotations matching `query`.
    ///
    /// Pass `include_details = Some(false)` to ask the server for the
    /// abbreviated form; any other value leaves the server default.
    pub async fn list(
        &self,
        query: &Query,
        include_details: Option<bool>,
    ) -> Result<Option<Value>> {
        debug!(?query, ?include_details, "list annotations");

        self.client
            .request(Method::GET, API_ROOT)?
            .query(&with_details_flag(query, include_details))
            .send()
            .await?
            .json_value()
    }

    /// Update an annotation's properties.
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: u64,
        props: &T,
    ) -> Result<Option<Value>> {
        debug!(id, "update annotation");

        self.client
            .request(Method::PUT, &Self::record_path(id))?
            .json(props)?
            .send()
            .await?
            .json_value()
    }

    /// Remove an annotation from the repository.
    pub async fn delete(&self, id: u64) -> Result<()> {
        debug!(id, "delete annotation");

        self.client
            .request(Method::DELETE, &Self::record_path(id))?
            .send()
            .await?
            .json_value()?;

        Ok(())
    }
}

/// Fold the `includeDetails=false` flag into the caller's query.
pub(crate) fn with_details_flag(query: &Query, include_details: Option<bool>) -> Query {
    if include_details != Some(false) {
        return query.clone();
    }

    const FLAG: &str = "includeDetails=false";
    match query.to_query_string() {
        Some(qs) => Query::Raw(format!("{qs}&{FLAG}")),
        None => Query::Raw(FLAG.to_string()),
    }
}
