//! Admin API Bindings
//!
//! Request wrappers for the per-entity REST endpoints, organized behind the
//! [`RemoteSource`] trait so table controllers never see the transport.

mod query;
mod rest;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::{ListPage, Record, RecordId};

pub use query::{QueryParams, SortOrder};
pub use rest::RestSource;

/// Common result type for remote calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything that can go wrong talking to the admin API
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("rejected by server: {0}")]
    Rejected(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Where an entity's endpoints live: `/api/<module>/<entity>/<action>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityPath {
    pub module: &'static str,
    pub entity: &'static str,
}

impl EntityPath {
    pub const fn new(module: &'static str, entity: &'static str) -> Self {
        Self { module, entity }
    }

    pub fn action(&self, base: &str, action: &str) -> String {
        format!(
            "{}/api/{}/{}/{}",
            base.trim_end_matches('/'),
            self.module,
            self.entity,
            action
        )
    }
}

/// Body shape of a single-row delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOneStyle {
    /// `{ "id": 1 }`
    Id,
    /// `{ "ids": [1] }`
    IdList,
}

/// Field carrying the id list of a batch delete.
///
/// Entities disagree (`ids` vs `key`); each screen names its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKey {
    Ids,
    Key,
}

impl BatchKey {
    pub fn field(self) -> &'static str {
        match self {
            BatchKey::Ids => "ids",
            BatchKey::Key => "key",
        }
    }
}

/// Data source behind one entity table
///
/// Futures are not `Send`: in the browser they run on the single UI thread.
#[async_trait(?Send)]
pub trait RemoteSource: Send + Sync {
    /// Fetch one page of rows
    async fn list(&self, params: &QueryParams) -> ApiResult<ListPage>;

    /// Create a row (payload carries no id)
    async fn add(&self, record: &Record) -> ApiResult<()>;

    /// Update a row (payload carries its id)
    async fn update(&self, record: &Record) -> ApiResult<()>;

    /// Delete a single row
    async fn delete_one(&self, id: RecordId) -> ApiResult<()>;

    /// Delete several rows at once
    async fn delete_many(&self, ids: &[RecordId]) -> ApiResult<()>;

    /// Entity-specific action outside plain CRUD
    async fn call(&self, action: &str, body: Value) -> ApiResult<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_path_action_url() {
        let path = EntityPath::new("sys", "menu");

        assert_eq!(path.action("http://localhost:8080/", "list"), "http://localhost:8080/api/sys/menu/list");
        assert_eq!(path.action("", "delete"), "/api/sys/menu/delete");
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(ApiError::Status(502).to_string(), "unexpected status 502");
        assert_eq!(ApiError::Rejected("名称重复".into()).to_string(), "rejected by server: 名称重复");
    }
}
