//! REST API access: wire models, the `TodoApi` seam, and the request manager.

pub mod http;
pub mod manager;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque collection identifier.
///
/// The server hands out string ids, but integer ids are accepted as well and
/// kept in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ListId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ListId(s),
            Raw::Number(n) => ListId(n.to_string()),
        })
    }
}

/// Lightweight row shown in the collection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub checked: bool,
}

/// A full collection with its items, as shown in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<TodoItem>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewList<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewItem<'a> {
    pub label: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CheckedStateUpdate<'a> {
    pub item_id: &'a str,
    pub checked_state: bool,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API url: {0}")]
    InvalidUrl(String),

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}")]
    Status {
        method: reqwest::Method,
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("unexpected response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The remote to-do service.
///
/// Every call is independent; mutations report only whether they succeeded.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list_summaries(&self) -> Result<Vec<ListSummary>, ApiError>;

    async fn create_list(&self, name: &str) -> Result<(), ApiError>;

    async fn delete_list(&self, id: &ListId) -> Result<(), ApiError>;

    async fn get_list(&self, id: &ListId) -> Result<TodoList, ApiError>;

    async fn create_item(&self, list_id: &ListId, label: &str) -> Result<(), ApiError>;

    async fn set_checked(
        &self,
        list_id: &ListId,
        item_id: &str,
        checked: bool,
    ) -> Result<(), ApiError>;

    async fn delete_item(&self, list_id: &ListId, item_id: &str) -> Result<(), ApiError>;
}
