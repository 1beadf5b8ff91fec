//! Mock NetBoxClient for unit testing
//!
//! This module provides a mock implementation of NetBoxClientTrait that can be used
//! in unit tests without requiring a running NetBox instance.
//!
//! Objects are stored as JSON per endpoint and shaped the way NetBox returns
//! them:
//! - `helpers.rs` - brief nested objects, choice values and the foreign key table
//! - `filters.rs` - query parameter matching for list calls

mod filters;
mod helpers;

use crate::endpoint::Endpoint;
use crate::error::NetBoxError;
use crate::netbox_trait::NetBoxClientTrait;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Store = HashMap<&'static str, BTreeMap<u64, Value>>;

/// Mock NetBoxClient for testing
///
/// This mock stores resources in memory. Integer foreign keys in request
/// bodies are expanded into brief nested objects, choice fields into
/// `{value, label}` pairs, and duplicate slugs are rejected with the same
/// HTTP 400 body NetBox sends.
#[derive(Debug, Clone)]
pub struct MockNetBoxClient {
    pub(crate) base_url: String,
    // In-memory storage keyed by endpoint path, then object id
    pub(crate) objects: Arc<Mutex<Store>>,
    // Counter for generating IDs
    pub(crate) next_id: Arc<Mutex<u64>>,
}

impl MockNetBoxClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generate next ID
    pub(crate) fn next_id(&self) -> u64 {
        let mut id = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
        let current = *id;
        *id += 1;
        current
    }

    /// Add an object to the mock store (for test setup)
    ///
    /// Goes through the same path as `create`, so the body uses integer ids
    /// for foreign keys.
    pub fn insert(&self, endpoint: &Endpoint, body: Value) -> Result<Value, NetBoxError> {
        self.write(endpoint, None, &body, false)
    }

    /// Snapshot of a stored object
    pub fn get_object(&self, endpoint: &Endpoint, id: u64) -> Option<Value> {
        self.store()
            .get(endpoint.path)
            .and_then(|objects| objects.get(&id))
            .cloned()
    }

    /// Remove an object behind the provider's back (drift simulation)
    pub fn remove(&self, endpoint: &Endpoint, id: u64) -> bool {
        self.store()
            .get_mut(endpoint.path)
            .is_some_and(|objects| objects.remove(&id).is_some())
    }

    /// Number of stored objects for an endpoint
    pub fn count(&self, endpoint: &Endpoint) -> usize {
        self.store().get(endpoint.path).map_or(0, BTreeMap::len)
    }

    /// Create (`id == None`) or replace/merge an object
    fn write(
        &self,
        endpoint: &Endpoint,
        id: Option<u64>,
        body: &Value,
        merge: bool,
    ) -> Result<Value, NetBoxError> {
        let fields = body.as_object().ok_or_else(|| NetBoxError::BadRequest {
            path: endpoint.collection_path(),
            body: r#"{"non_field_errors":["Invalid data. Expected a dictionary."]}"#.to_string(),
        })?;

        let mut store = self.store();
        let existing = match id {
            Some(id) => Some(
                store
                    .get(endpoint.path)
                    .and_then(|objects| objects.get(&id))
                    .cloned()
                    .ok_or_else(|| not_found(endpoint, id))?,
            ),
            None => None,
        };
        let id = match id {
            Some(id) => id,
            None => self.next_id(),
        };

        helpers::check_unique(&store, endpoint, id, fields)?;

        let now = chrono::Utc::now().to_rfc3339();
        let mut object = match (&existing, merge) {
            (Some(Value::Object(current)), true) => current.clone(),
            _ => Map::new(),
        };
        for (key, value) in fields {
            let value = helpers::expand_field(&store, &self.base_url, endpoint, key, value)?;
            object.insert(key.clone(), value);
        }

        object.insert("id".to_string(), json!(id));
        object.insert(
            "url".to_string(),
            json!(format!("{}{}", self.base_url, endpoint.object_path(id))),
        );
        object.insert("display".to_string(), json!(helpers::display_of(&object, id)));
        object.entry("tags").or_insert_with(|| json!([]));
        object.entry("custom_fields").or_insert_with(|| json!({}));
        let created = existing
            .as_ref()
            .and_then(|current| current.get("created"))
            .cloned()
            .unwrap_or_else(|| json!(now));
        object.insert("created".to_string(), created);
        object.insert("last_updated".to_string(), json!(now));

        let object = Value::Object(object);
        store
            .entry(endpoint.path)
            .or_default()
            .insert(id, object.clone());
        Ok(object)
    }
}

fn not_found(endpoint: &Endpoint, id: u64) -> NetBoxError {
    NetBoxError::NotFound(format!(
        "Resource not found: {} - {{\"detail\":\"No {} matches the given query.\"}}",
        endpoint.object_path(id),
        endpoint.title()
    ))
}

#[async_trait::async_trait]
impl NetBoxClientTrait for MockNetBoxClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        Ok(())
    }

    async fn retrieve(&self, endpoint: &Endpoint, id: u64) -> Result<Value, NetBoxError> {
        self.get_object(endpoint, id)
            .ok_or_else(|| not_found(endpoint, id))
    }

    async fn list(
        &self,
        endpoint: &Endpoint,
        filters: &[(&str, &str)],
        _fetch_all: bool,
    ) -> Result<Vec<Value>, NetBoxError> {
        let store = self.store();
        Ok(store
            .get(endpoint.path)
            .map(|objects| {
                objects
                    .values()
                    .filter(|object| filters::matches(object, filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create(&self, endpoint: &Endpoint, body: &Value) -> Result<Value, NetBoxError> {
        self.write(endpoint, None, body, false)
    }

    async fn update(&self, endpoint: &Endpoint, id: u64, body: &Value) -> Result<Value, NetBoxError> {
        self.write(endpoint, Some(id), body, false)
    }

    async fn patch(&self, endpoint: &Endpoint, id: u64, body: &Value) -> Result<Value, NetBoxError> {
        self.write(endpoint, Some(id), body, true)
    }

    async fn destroy(&self, endpoint: &Endpoint, id: u64) -> Result<(), NetBoxError> {
        if self.remove(endpoint, id) {
            Ok(())
        } else {
            Err(not_found(endpoint, id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{DEVICE_TYPES, MANUFACTURERS, SITES, SITE_GROUPS};

    fn mock() -> MockNetBoxClient {
        MockNetBoxClient::new("https://netbox.test")
    }

    #[tokio::test]
    async fn create_assigns_id_url_and_display() {
        let client = mock();
        let group = client
            .create(&SITE_GROUPS, &json!({"name": "Europe", "slug": "europe"}))
            .await
            .unwrap();
        assert_eq!(group["id"], 1);
        assert_eq!(group["url"], "https://netbox.test/api/dcim/site-groups/1/");
        assert_eq!(group["display"], "Europe");
        assert_eq!(group["tags"], json!([]));
    }

    #[tokio::test]
    async fn foreign_keys_expand_to_brief_objects() {
        let client = mock();
        client
            .insert(&SITE_GROUPS, json!({"name": "Europe", "slug": "europe"}))
            .unwrap();
        let site = client
            .create(
                &SITES,
                &json!({"name": "Paris", "slug": "paris", "group": 1, "status": "active"}),
            )
            .await
            .unwrap();
        assert_eq!(site["group"]["slug"], "europe");
        assert_eq!(site["group"]["id"], 1);
        assert_eq!(site["status"]["value"], "active");
        assert_eq!(site["status"]["label"], "Active");
    }

    #[tokio::test]
    async fn unknown_foreign_key_is_rejected() {
        let client = mock();
        let err = client
            .create(&SITES, &json!({"name": "Paris", "slug": "paris", "group": 42}))
            .await
            .unwrap_err();
        assert!(matches!(err, NetBoxError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn duplicate_slug_returns_bad_request_body() {
        let client = mock();
        client
            .insert(&MANUFACTURERS, json!({"name": "Arista", "slug": "arista"}))
            .unwrap();
        let err = client
            .create(&MANUFACTURERS, &json!({"name": "Arista 2", "slug": "arista"}))
            .await
            .unwrap_err();
        let body: Value = serde_json::from_str(err.response_body().unwrap()).unwrap();
        assert_eq!(body["slug"][0], "manufacturer with this slug already exists.");
    }

    #[tokio::test]
    async fn list_filters_by_nested_id_and_field() {
        let client = mock();
        client
            .insert(&MANUFACTURERS, json!({"name": "Arista", "slug": "arista"}))
            .unwrap();
        client
            .insert(&MANUFACTURERS, json!({"name": "Juniper", "slug": "juniper"}))
            .unwrap();
        client
            .insert(&DEVICE_TYPES, json!({"model": "7050", "slug": "7050", "manufacturer": 1}))
            .unwrap();
        client
            .insert(&DEVICE_TYPES, json!({"model": "MX204", "slug": "mx204", "manufacturer": 2}))
            .unwrap();

        let arista = client
            .list(&DEVICE_TYPES, &[("manufacturer_id", "1")], false)
            .await
            .unwrap();
        assert_eq!(arista.len(), 1);
        assert_eq!(arista[0]["display"], "7050");

        let by_slug = client.list(&DEVICE_TYPES, &[("slug", "mx204")], false).await.unwrap();
        assert_eq!(by_slug.len(), 1);
    }

    #[tokio::test]
    async fn put_replaces_and_patch_merges() {
        let client = mock();
        client
            .insert(
                &SITE_GROUPS,
                json!({"name": "Europe", "slug": "europe", "description": "EU"}),
            )
            .unwrap();

        let patched = client
            .patch(&SITE_GROUPS, 1, &json!({"name": "EMEA"}))
            .await
            .unwrap();
        assert_eq!(patched["description"], "EU");

        let replaced = client
            .update(&SITE_GROUPS, 1, &json!({"name": "EMEA", "slug": "emea"}))
            .await
            .unwrap();
        assert!(replaced.get("description").is_none());
        assert_eq!(replaced["slug"], "emea");
    }

    #[tokio::test]
    async fn missing_objects_are_not_found() {
        let client = mock();
        assert!(client.retrieve(&SITES, 7).await.unwrap_err().is_not_found());
        assert!(client.destroy(&SITES, 7).await.unwrap_err().is_not_found());
        assert!(client.update(&SITES, 7, &json!({})).await.unwrap_err().is_not_found());
    }
}
