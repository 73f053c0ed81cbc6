//! Record-store transport.
//!
//! Client-side (hydrate): [`HostedRecordStore`] posts JSON bodies to the
//! hosted table API with `gloo-net`. Server-side (SSR): every call fails
//! with [`RecordStoreError::Unavailable`] and the services degrade to empty
//! results.
//!
//! ERROR HANDLING
//! ==============
//! Transport code returns `Result`; the notification + empty-value policy
//! lives one layer up in `services::record`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use super::types::{ClientConfig, DeleteParams, FetchParams, RecordId, RecordsResponse, WriteParams};

/// Errors produced by record-store calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordStoreError {
    /// The HTTP request never produced a response.
    #[error("record store request failed: {0}")]
    Request(String),

    /// The record store returned a non-success HTTP status.
    #[error("record store returned status {status}")]
    Status { status: u16 },

    /// The response body could not be decoded.
    #[error("record store response invalid: {0}")]
    Decode(String),

    /// No browser environment to issue requests from.
    #[error("record store unavailable outside the browser")]
    Unavailable,
}

/// Operations the hosted record store exposes per table.
#[async_trait::async_trait(?Send)]
pub trait RecordTransport {
    /// List rows matching `params`.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordStoreError`] when the call fails.
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> Result<RecordsResponse, RecordStoreError>;

    /// Read one row.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordStoreError`] when the call fails.
    async fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
        params: &FetchParams,
    ) -> Result<RecordsResponse, RecordStoreError>;

    /// Insert rows.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordStoreError`] when the call fails.
    async fn create_record(&self, table: &str, params: &WriteParams) -> Result<RecordsResponse, RecordStoreError>;

    /// Update rows; each record carries its own `Id`.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordStoreError`] when the call fails.
    async fn update_record(&self, table: &str, params: &WriteParams) -> Result<RecordsResponse, RecordStoreError>;

    /// Delete rows by id.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordStoreError`] when the call fails.
    async fn delete_record(&self, table: &str, params: &DeleteParams) -> Result<RecordsResponse, RecordStoreError>;
}

fn table_endpoint(api_url: &str, table: &str, action: &str) -> String {
    format!("{api_url}/tables/{table}/{action}")
}

fn record_endpoint(api_url: &str, table: &str, id: RecordId) -> String {
    format!("{api_url}/tables/{table}/records/{id}")
}

/// Record transport backed by the hosted table API.
#[derive(Clone, Debug)]
pub struct HostedRecordStore {
    config: ClientConfig,
}

impl HostedRecordStore {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    #[cfg(feature = "hydrate")]
    async fn post<B: serde::Serialize>(&self, url: &str, body: &B) -> Result<RecordsResponse, RecordStoreError> {
        let resp = gloo_net::http::Request::post(url)
            .header("X-Project-Id", &self.config.project_id)
            .header("X-Public-Key", &self.config.public_key)
            .json(body)
            .map_err(|e| RecordStoreError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| RecordStoreError::Request(e.to_string()))?;
        if !resp.ok() {
            return Err(RecordStoreError::Status { status: resp.status() });
        }
        resp.json::<RecordsResponse>()
            .await
            .map_err(|e| RecordStoreError::Decode(e.to_string()))
    }

    #[cfg(not(feature = "hydrate"))]
    async fn post<B: serde::Serialize>(&self, url: &str, body: &B) -> Result<RecordsResponse, RecordStoreError> {
        let _ = (url, body);
        Err(RecordStoreError::Unavailable)
    }

    fn endpoint(&self, table: &str, action: &str) -> String {
        table_endpoint(&self.config.api_url, table, action)
    }
}

#[async_trait::async_trait(?Send)]
impl RecordTransport for HostedRecordStore {
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> Result<RecordsResponse, RecordStoreError> {
        self.post(&self.endpoint(table, "fetch"), params).await
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
        params: &FetchParams,
    ) -> Result<RecordsResponse, RecordStoreError> {
        self.post(&record_endpoint(&self.config.api_url, table, id), params)
            .await
    }

    async fn create_record(&self, table: &str, params: &WriteParams) -> Result<RecordsResponse, RecordStoreError> {
        self.post(&self.endpoint(table, "create"), params).await
    }

    async fn update_record(&self, table: &str, params: &WriteParams) -> Result<RecordsResponse, RecordStoreError> {
        self.post(&self.endpoint(table, "update"), params).await
    }

    async fn delete_record(&self, table: &str, params: &DeleteParams) -> Result<RecordsResponse, RecordStoreError> {
        self.post(&self.endpoint(table, "delete"), params).await
    }
}
