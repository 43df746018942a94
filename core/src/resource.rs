//! Generic resource handles: fetch, create, edit and delete.
//!
//! # Design
//! Every resource type goes through the same `Handle<T>`, so edit and delete
//! semantics are identical across the API:
//!
//! - `edit` takes a partial-update struct (one `Option` per writable field).
//!   The PUT body carries, field by field, the supplied value or the current
//!   one. Only when the server answers `"success": true` are the supplied
//!   fields written back locally. `None` means "not supplied"; `Some(0)`,
//!   `Some(false)` and `Some(String::new())` are real values.
//! - `delete` tombstones the handle on `"success": true`: the data and the
//!   owner context are dropped together and every further call is rejected
//!   locally.
//! - A parsed `"success": false` is returned as data and changes nothing.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::context::{validate_id, validate_str_id, Context};
use crate::endpoints::Endpoint;
use crate::error::{Error, Result};
use crate::http::HttpMethod;

/// Identifier used as a path segment.
pub trait ResourceId: fmt::Display + Clone {
    fn validate(&self, kind: &str) -> Result<()>;
}

impl ResourceId for u32 {
    fn validate(&self, kind: &str) -> Result<()> {
        validate_id(kind, *self).map(|_| ())
    }
}

impl ResourceId for String {
    fn validate(&self, kind: &str) -> Result<()> {
        validate_str_id(kind, self).map(|_| ())
    }
}

/// A record addressable at `ITEM` and listed at `COLLECTION`.
pub trait Resource: Serialize + DeserializeOwned + Clone + fmt::Debug {
    type Context: Context;
    type Id: ResourceId;

    /// Human-readable kind used in messages.
    const KIND: &'static str;
    const COLLECTION: Endpoint;
    const ITEM: Endpoint;

    fn id(&self) -> Self::Id;
}

/// A resource that accepts partial updates.
pub trait Editable: Resource {
    type Update: Serialize + fmt::Debug;

    /// Fields sent in the PUT body. Supplied update fields are always sent.
    const EDITABLE: &'static [&'static str];

    /// Local checks run before any request.
    fn validate_update(&self, _update: &Self::Update) -> Result<()> {
        Ok(())
    }
}

/// A resource that can be created by POSTing to its collection.
pub trait Creatable: Resource {
    type New: Serialize + fmt::Debug;

    fn validate_new(_new: &Self::New) -> Result<()> {
        Ok(())
    }
}

/// Whether a parsed response reports `"success": true`.
pub fn succeeded(response: &Value) -> bool {
    response.get("success").and_then(Value::as_bool) == Some(true)
}

/// List every record of the collection.
pub fn list<T: Resource>(context: &T::Context) -> Result<Vec<Handle<T>>> {
    let url = context.url(T::COLLECTION)?;
    let records: Vec<T> = context.session().get_as(&url)?;
    Ok(records
        .into_iter()
        .map(|data| Handle::new(context.clone(), data))
        .collect())
}

/// Fetch one record by id.
pub fn fetch<T: Resource>(context: &T::Context, id: T::Id) -> Result<Handle<T>> {
    id.validate(T::KIND)?;
    let url = T::ITEM.url(&context.params().id(id))?;
    let data: T = context.session().get_as(&url)?;
    Ok(Handle::new(context.clone(), data))
}

/// Create a record and return a handle to what the server stored.
pub fn create<T: Creatable>(context: &T::Context, new: &T::New) -> Result<Handle<T>> {
    T::validate_new(new)?;
    let body = serde_json::to_value(new).map_err(|e| Error::Serialization(e.to_string()))?;
    let url = context.url(T::COLLECTION)?;
    let payload = context.session().send(HttpMethod::Post, &url, Some(&body))?;
    let data: T =
        serde_json::from_value(payload).map_err(|e| Error::Deserialization(e.to_string()))?;
    debug!(kind = T::KIND, id = %data.id(), "created");
    Ok(Handle::new(context.clone(), data))
}

#[derive(Debug, Clone)]
struct Live<T: Resource> {
    context: T::Context,
    data: T,
}

/// A live resource, or the tombstone left behind by a successful delete.
#[derive(Debug, Clone)]
pub struct Handle<T: Resource> {
    state: Option<Live<T>>,
}

impl<T: Resource> Handle<T> {
    pub fn new(context: T::Context, data: T) -> Self {
        Self {
            state: Some(Live { context, data }),
        }
    }

    /// The record, or `None` once deleted.
    pub fn data(&self) -> Option<&T> {
        self.state.as_ref().map(|live| &live.data)
    }

    /// The owner context, or `None` once deleted.
    pub fn context(&self) -> Option<&T::Context> {
        self.state.as_ref().map(|live| &live.context)
    }

    pub(crate) fn data_mut(&mut self) -> Option<&mut T> {
        self.state.as_mut().map(|live| &mut live.data)
    }

    pub fn into_data(self) -> Option<T> {
        self.state.map(|live| live.data)
    }

    pub fn is_deleted(&self) -> bool {
        self.state.is_none()
    }

    fn live(&self) -> Result<&Live<T>> {
        self.state
            .as_ref()
            .ok_or_else(|| Error::client(format!("{} has been deleted", T::KIND)))
    }

    /// URL of this record.
    pub fn url(&self) -> Result<String> {
        self.url_for(T::ITEM)
    }

    /// URL of an endpoint addressed by this record's id.
    pub(crate) fn url_for(&self, endpoint: Endpoint) -> Result<String> {
        let live = self.live()?;
        endpoint.url(&live.context.params().id(live.data.id()))
    }

    /// Send a request to an endpoint addressed by this record's id.
    pub(crate) fn send_to(
        &self,
        endpoint: Endpoint,
        method: HttpMethod,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.url_for(endpoint)?;
        self.live()?.context.session().send(method, &url, body)
    }

    /// Replace local data with the server's current copy.
    pub fn refresh(&mut self) -> Result<()> {
        let url = self.url()?;
        let live = self.live()?;
        let fresh: T = live.context.session().get_as(&url)?;
        if let Some(live) = self.state.as_mut() {
            live.data = fresh;
        }
        Ok(())
    }

    /// Delete the record; tombstones the handle on success.
    pub fn delete(&mut self) -> Result<Value> {
        let response = self.send_to(T::ITEM, HttpMethod::Delete, None)?;
        if succeeded(&response) {
            debug!(kind = T::KIND, "deleted; handle tombstoned");
            self.state = None;
        }
        Ok(response)
    }
}

impl<T: Editable> Handle<T> {
    /// Apply a partial update. See the module docs for the exact semantics.
    pub fn edit(&mut self, update: T::Update) -> Result<Value> {
        let live = self.live()?;
        live.data.validate_update(&update)?;

        let changes = to_object(&update)?;
        let mut merged = to_object(&live.data)?;
        for (key, value) in &changes {
            merged.insert(key.clone(), value.clone());
        }
        let body: Map<String, Value> = merged
            .iter()
            .filter(|(key, _)| {
                T::EDITABLE.contains(&key.as_str()) || changes.contains_key(key.as_str())
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let response = self.send_to(T::ITEM, HttpMethod::Put, Some(&Value::Object(body)))?;

        if succeeded(&response) {
            let updated: T = serde_json::from_value(Value::Object(merged))
                .map_err(|e| Error::Deserialization(e.to_string()))?;
            if let Some(live) = self.state.as_mut() {
                live.data = updated;
            }
            debug!(kind = T::KIND, fields = changes.len(), "edit applied");
        }
        Ok(response)
    }
}

fn to_object<S: Serialize>(value: &S) -> Result<Map<String, Value>> {
    match serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(Error::Serialization(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}
