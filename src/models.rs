//! Frontend Models
//!
//! Row data as the admin endpoints return it. Rows stay opaque maps so one
//! table implementation serves every entity screen.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Primary key type shared by all entities
pub type RecordId = i64;

/// One table row: field name -> JSON value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for payloads and tests
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn id(&self) -> Option<RecordId> {
        self.int_field("id")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Read a field as an integer.
    ///
    /// Accepts integral JSON numbers and numeric strings, since values
    /// coming back from form inputs are text.
    pub fn int_field(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Plain text for a field, `None` when missing or null
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Copy of this record restricted to `keys`
    pub fn project(&self, keys: &[&str]) -> Record {
        let map = keys
            .iter()
            .filter_map(|k| self.0.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect();
        Record(map)
    }

    /// Overwrite this record's fields with the other's
    pub fn merge(&mut self, other: Record) {
        for (k, v) in other.0 {
            self.0.insert(k, v);
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A record plus its nested children, as built by [`crate::tree::build_tree`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    #[serde(flatten)]
    pub record: Record,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn id(&self) -> Option<RecordId> {
        self.record.id()
    }

    /// Number of levels in this subtree, a leaf is 1
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }
}

/// Paging information returned alongside a list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub total: Option<u64>,
    pub page_size: Option<u32>,
    pub current: Option<u32>,
}

/// One page of rows from a `list` endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    #[serde(default)]
    pub list: Vec<Record>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl ListPage {
    /// Total row count, falling back to the page length
    pub fn total(&self) -> u64 {
        self.pagination.total.unwrap_or(self.list.len() as u64)
    }
}
