//! Generic typed repository objects
//!
//! Objects are elements in the repository identified by a type name and a
//! numeric id, with an opaque JSON property bag. Note the service's verb
//! mapping: create is `PUT` on the collection, update is `POST` on the
//! instance.

use http::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::Created;
use crate::{Repository, error::Result, query::Query};

/// Objects API resource.
#[derive(Clone)]
pub struct Objects {
    client: Repository,
}

impl Objects {
    pub(crate) fn new(client: Repository) -> Self {
        Self { client }
    }

    fn object_path(object_type: &str, id: u64) -> String {
        format!("/Objects/{object_type}/{id}")
    }

    /// Create a new object, returning the id the repository assigned.
    pub async fn create<T: Serialize + ?Sized>(&self, props: &T) -> Result<u64> {
        debug!("create object");

        let created: Created = self
            .client
            .request(Method::PUT, "/Objects")?
            .json(props)?
            .send()
            .await?
            .parse()?;

        Ok(created.id)
    }

    /// Retrieve an object by type and id.
    pub async fn get(&self, object_type: &str, id: u64) -> Result<Option<Value>> {
        debug!(object_type, id, "get object");

        self.client
            .request(Method::GET, &Self::object_path(object_type, id))?
            .send()
            .await?
            .json_value()
    }

    /// Check whether an object exists, without fetching it.
    pub async fn exists(&self, object_type: &str, id: u64) -> Result<bool> {
        debug!(object_type, id, "object exists");

        let resp = self
            .client
            .request(Method::HEAD, &Self::object_path(object_type, id))?
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

    /// Find all objects of `object_type` matching `query`.
    pub async fn query(&self, object_type: &str, query: &Query) -> Result<Option<Value>> {
        debug!(object_type, ?query, "query objects");

        self.client
            .request(Method::GET, &format!("/Objects/{object_type}/"))?
            .query(query)
            .send()
            .await?
            .json_value()
    }

    /// Replace an object's properties, returning the updated object if the
    /// server sends one back.
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        object_type: &str,
        id: u64,
        props: &T,
    ) -> Result<Option<Value>> {
        debug!(object_type, id, "update object");

        self.client
            .request(Method::POST, &Self::object_path(object_type, id))?
            .json(props)?
            .send()
            .await?
            .json_value()
    }

    /// Remove an object from the repository.
    pub async fn delete(&self, object_type: &str, id: u64) -> Result<()> {
        debug!(object_type, id, "delete object");

        self.client
            .request(Method::DELETE, &Self::object_path(object_type, id))?
            .send()
            .await?
            .json_value()?;

        Ok(())
    }
}
