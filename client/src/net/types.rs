//! Shared wire types for the identity provider, the record store, and the
//! runtime client config served by the SSR host.
//!
//! DESIGN
//! ======
//! Record payloads stay as loose JSON maps. The hosted record store owns the
//! table schema; the client only knows field names per table.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single row as returned by the record store.
pub type Record = Map<String, Value>;

/// Numeric primary key of a record-store row.
pub type RecordId = i64;

// =============================================================================
// CLIENT CONFIG
// =============================================================================

/// Public configuration the browser needs before identity setup.
///
/// Served by `GET /api/config`. Contains no secrets beyond the public key
/// the hosted service expects browsers to present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub project_id: String,
    pub public_key: String,
    pub auth_url: String,
    pub api_url: String,
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Opaque user record handed back by the identity provider.
///
/// Only a handful of fields are read by the storefront; everything else is
/// carried along untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(Value);

impl Identity {
    #[must_use]
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.0
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn email_address(&self) -> Option<&str> {
        self.text("emailAddress")
    }

    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.text("firstName")
    }

    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.text("lastName")
    }

    #[must_use]
    pub fn profile_picture(&self) -> Option<&str> {
        self.text("profilePicture")
    }

    /// `"{first} {last}"` trimmed, or `None` when both names are missing.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let name = format!("{} {}", self.first_name().unwrap_or(""), self.last_name().unwrap_or(""));
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_owned())
    }
}

// =============================================================================
// RECORD STORE QUERIES
// =============================================================================

/// Sort direction accepted by the record store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortType {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "SortType")]
    pub sort_type: SortType,
}

impl OrderBy {
    #[must_use]
    pub fn new(field_name: &str, sort_type: SortType) -> Self {
        Self { field_name: field_name.to_owned(), sort_type }
    }
}

/// Filter operators used by the storefront.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    ExactMatch,
    Contains,
    GreaterThanOrEqualTo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

impl WhereClause {
    #[must_use]
    pub fn new(field_name: &str, operator: Operator, value: impl Into<Value>) -> Self {
        Self { field_name: field_name.to_owned(), operator, values: vec![value.into()] }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub limit: u32,
    pub offset: u32,
}

/// Body of a `fetchRecords` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchParams {
    pub fields: Vec<String>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<WhereClause>,
    #[serde(rename = "orderBy", default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(rename = "pagingInfo", default, skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<PagingInfo>,
}

/// Body of a `createRecord` / `updateRecord` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WriteParams {
    pub records: Vec<Record>,
}

/// Body of a `deleteRecord` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteParams {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<RecordId>,
}

// =============================================================================
// RECORD STORE RESPONSES
// =============================================================================

/// Per-record outcome of a write.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Record>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope returned by every record-store call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub results: Option<Vec<RecordResult>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RecordsResponse {
    /// Rows from a list fetch. Anything but a JSON array of objects is empty.
    #[must_use]
    pub fn rows(self) -> Vec<Record> {
        match self.data {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Single row from a by-id fetch.
    #[must_use]
    pub fn row(self) -> Option<Record> {
        match self.data {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// First per-record result of a write, if any.
    #[must_use]
    pub fn first_result(&self) -> Option<&RecordResult> {
        self.results.as_ref().and_then(|r| r.first())
    }
}
