//! Generic CRUD adapter over one record-store table.
//!
//! ARCHITECTURE
//! ============
//! Every storefront table is the same shape: a field list to read, a subset
//! of writable fields, a few coercions, and user-facing messages. A
//! [`TableSpec`] captures that and [`RecordService`] does the rest.
//!
//! ERROR HANDLING
//! ==============
//! Failures never propagate past this layer. They are logged, shown as an
//! error toast, and turned into an empty value (`Vec::new()`, `None`,
//! `false`).

#[cfg(test)]
#[path = "record_test.rs"]
pub(crate) mod record_test;

use std::rc::Rc;

use serde_json::Value;

use super::coerce::{Coercion, is_truthy};
use crate::net::records::{RecordStoreError, RecordTransport};
use crate::net::types::{
    DeleteParams, FetchParams, OrderBy, PagingInfo, Record, RecordId, RecordsResponse, SortType, WhereClause,
    WriteParams,
};
use crate::state::notifications::Notifier;

/// Columns every table carries in addition to its own.
pub const SYSTEM_FIELDS: [&str; 7] = ["Name", "Tags", "Owner", "CreatedOn", "CreatedBy", "ModifiedOn", "ModifiedBy"];

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE: PagingInfo = PagingInfo { limit: 20, offset: 0 };

/// User-facing messages for one table. `None` means stay quiet on success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Messages {
    pub load_list: &'static str,
    pub load_one: &'static str,
    pub created: Option<&'static str>,
    pub create_failed: &'static str,
    pub updated: Option<&'static str>,
    pub update_failed: &'static str,
    pub deleted: Option<&'static str>,
    pub delete_failed: &'static str,
}

/// Static description of a record-store table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableSpec {
    pub table: &'static str,
    /// Table-specific columns, read after [`SYSTEM_FIELDS`].
    pub fields: &'static [&'static str],
    /// Columns accepted on create/update.
    pub writable: &'static [&'static str],
    pub coercions: &'static [(&'static str, Coercion)],
    /// Values filled in on create when the input leaves them falsy.
    pub create_defaults: &'static [(&'static str, &'static str)],
    pub order: (&'static str, SortType),
    pub messages: Messages,
}

impl TableSpec {
    /// All readable columns, system columns first.
    #[must_use]
    pub fn all_fields(&self) -> Vec<String> {
        SYSTEM_FIELDS
            .iter()
            .chain(self.fields.iter())
            .map(|f| (*f).to_owned())
            .collect()
    }

    fn coercion_for(&self, field: &str) -> Option<Coercion> {
        self.coercions
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, c)| *c)
    }

    /// Keep only writable fields present in `input`, coerced per column.
    #[must_use]
    pub fn writable_payload(&self, input: &Record) -> Record {
        let mut out = Record::new();
        for field in self.writable {
            let Some(value) = input.get(*field) else {
                continue;
            };
            let value = match self.coercion_for(field) {
                Some(coercion) => coercion.apply(value),
                None => value.clone(),
            };
            out.insert((*field).to_owned(), value);
        }
        out
    }
}

/// Primary key of a row, when present and numeric.
#[must_use]
pub fn record_id(record: &Record) -> Option<RecordId> {
    record.get("Id").and_then(Value::as_i64)
}

/// Optional overrides for a list fetch. Unset parts use the table defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pub fields: Option<Vec<String>>,
    pub filters: Option<Vec<WhereClause>>,
    pub order_by: Option<Vec<OrderBy>>,
    pub paging: Option<PagingInfo>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter(mut self, clause: WhereClause) -> Self {
        self.filters.get_or_insert_with(Vec::new).push(clause);
        self
    }

    #[must_use]
    pub fn order(mut self, field: &str, sort: SortType) -> Self {
        self.order_by.get_or_insert_with(Vec::new).push(OrderBy::new(field, sort));
        self
    }

    #[must_use]
    pub fn page(mut self, limit: u32, offset: u32) -> Self {
        self.paging = Some(PagingInfo { limit, offset });
        self
    }
}

/// CRUD operations on one table with notification-based error handling.
#[derive(Clone)]
pub struct RecordService {
    spec: &'static TableSpec,
    transport: Rc<dyn RecordTransport>,
    notifier: Rc<dyn Notifier>,
}

impl RecordService {
    #[must_use]
    pub fn new(spec: &'static TableSpec, transport: Rc<dyn RecordTransport>, notifier: Rc<dyn Notifier>) -> Self {
        Self { spec, transport, notifier }
    }

    #[must_use]
    pub fn spec(&self) -> &'static TableSpec {
        self.spec
    }

    /// Merge caller overrides onto the table's default fetch parameters.
    #[must_use]
    pub fn fetch_params(&self, query: Query) -> FetchParams {
        let (order_field, order_sort) = self.spec.order;
        FetchParams {
            fields: query.fields.unwrap_or_else(|| self.spec.all_fields()),
            filters: query.filters.unwrap_or_default(),
            order_by: query.order_by.unwrap_or_else(|| vec![OrderBy::new(order_field, order_sort)]),
            paging_info: Some(query.paging.unwrap_or(DEFAULT_PAGE)),
        }
    }

    fn fail(&self, context: &str, message: &str, error: &RecordStoreError) {
        log::error!("{} {context}: {error}", self.spec.table);
        self.notifier.error(message);
    }

    /// List rows. Failures notify and yield an empty list.
    pub async fn fetch(&self, query: Query) -> Vec<Record> {
        let params = self.fetch_params(query);
        match self.transport.fetch_records(self.spec.table, &params).await {
            Ok(resp) => resp.rows(),
            Err(e) => {
                self.fail("fetch", self.spec.messages.load_list, &e);
                Vec::new()
            }
        }
    }

    /// First row matching `query`, if any.
    pub async fn fetch_first(&self, query: Query) -> Option<Record> {
        self.fetch(query).await.into_iter().next()
    }

    /// Read one row. Failures notify and yield `None`.
    pub async fn get_by_id(&self, id: RecordId) -> Option<Record> {
        let params = FetchParams { fields: self.spec.all_fields(), ..FetchParams::default() };
        match self.transport.get_record_by_id(self.spec.table, id, &params).await {
            Ok(resp) => resp.row(),
            Err(e) => {
                self.fail(&format!("get {id}"), self.spec.messages.load_one, &e);
                None
            }
        }
    }

    /// Insert one row built from the writable subset of `input`.
    pub async fn create(&self, input: &Record) -> Option<Record> {
        let mut record = self.spec.writable_payload(input);
        for (field, default) in self.spec.create_defaults {
            if !record.get(*field).is_some_and(is_truthy) {
                record.insert((*field).to_owned(), Value::from(*default));
            }
        }
        let params = WriteParams { records: vec![record] };
        let messages = self.spec.messages;
        match self.transport.create_record(self.spec.table, &params).await {
            Ok(resp) => self.write_outcome(resp, messages.created, messages.create_failed),
            Err(e) => {
                self.fail("create", messages.create_failed, &e);
                None
            }
        }
    }

    /// Update one row; only writable fields present in `input` are sent.
    pub async fn update(&self, id: RecordId, input: &Record) -> Option<Record> {
        let mut record = Record::new();
        record.insert("Id".to_owned(), Value::from(id));
        record.extend(self.spec.writable_payload(input));
        let params = WriteParams { records: vec![record] };
        let messages = self.spec.messages;
        match self.transport.update_record(self.spec.table, &params).await {
            Ok(resp) => self.write_outcome(resp, messages.updated, messages.update_failed),
            Err(e) => {
                self.fail(&format!("update {id}"), messages.update_failed, &e);
                None
            }
        }
    }

    /// Delete one row. Returns whether the store accepted it.
    pub async fn delete(&self, id: RecordId) -> bool {
        let params = DeleteParams { record_ids: vec![id] };
        let messages = self.spec.messages;
        match self.transport.delete_record(self.spec.table, &params).await {
            Ok(resp) if resp.success => {
                if let Some(message) = messages.deleted {
                    self.notifier.success(message);
                }
                true
            }
            Ok(_) => {
                self.notifier.error(messages.delete_failed);
                false
            }
            Err(e) => {
                self.fail(&format!("delete {id}"), messages.delete_failed, &e);
                false
            }
        }
    }

    fn write_outcome(&self, resp: RecordsResponse, ok: Option<&str>, failed: &str) -> Option<Record> {
        match resp.first_result() {
            Some(first) if resp.success && first.success => {
                if let Some(message) = ok {
                    self.notifier.success(message);
                }
                first.data.clone()
            }
            first => {
                let message = first
                    .and_then(|r| r.message.as_deref())
                    .filter(|m| !m.is_empty())
                    .unwrap_or(failed);
                self.notifier.error(message);
                None
            }
        }
    }
}
