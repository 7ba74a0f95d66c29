//! Timeline records
//!
//! Same surface as [`Annotations`](super::Annotations), under the timeline
//! API root.

use http::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::Created;
use super::annotations::with_details_flag;
use crate::{Repository, error::Result, query::Query};

const API_ROOT: &str = "/mpulse/api/timeline/v1";

/// Timelines API resource.
#[derive(Clone)]
pub struct Timelines {
    client: Repository,
}

impl Timelines {
    pub(crate) fn new(client: Repository) -> Self {
        Self { client }
    }

    fn record_path(id: u64) -> String {
        format!("{API_ROOT}/{id}")
    }

    /// Create a new timeline, returning the id the repository assigned.
    pub async fn create<T: Serialize + ?Sized>(&self, props: &T) -> Result<u64> {
        debug!("create timeline");

        let created: Created = self
            .client
            .request(Method::POST, API_ROOT)?
            .json(props)?
            .send()
            .await?
            .parse()?;

        Ok(created.id)
    }

    /// Retrieve a timeline by id.
    pub async fn get(&self, id: u64) -> Result<Option<Value>> {
        debug!(id, "get timeline");

        self.client
            .request(Method::GET, &Self::record_path(id))?
            .send()
            .await?
            .json_value()
    }

    /// Check whether a timeline exists, without fetching it.
    pub async fn exists(&self, id: u64) -> Result<bool> {
        debug!(id, "timeline exists");

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

    /// List timelines matching `query`.
    pub async fn list(
        &self,
        query: &Query,
        include_details: Option<bool>,
    ) -> Result<Option<Value>> {
        debug!(?query, ?include_details, "list timelines");

        self.client
            .request(Method::GET, API_ROOT)?
            .query(&with_details_flag(query, include_details))
            .send()
            .await?
            .json_value()
    }

    /// Update a timeline's properties.
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: u64,
        props: &T,
    ) -> Result<Option<Value>> {
        debug!(id, "update timeline");

        self.client
            .request(Method::PUT, &Self::record_path(id))?
            .json(props)?
            .send()
            .await?
            .json_value()
    }

    /// Remove a timeline from the repository.
    pub async fn delete(&self, id: u64) -> Result<()> {
        debug!(id, "delete timeline");

        self.client
            .request(Method::DELETE, &Self::record_path(id))?
            .send()
            .await?
            .json_value()?;

        Ok(())
    }
}
