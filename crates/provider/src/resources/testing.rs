//! Shared checks for resource unit tests

use super::engine::{NetBoxResource, ObjectResource};
use crate::framework::{
    CreateRequest, DeleteRequest, ImportRequest, ReadRequest, Resource, ResourceResponse,
    UpdateRequest,
};
use netbox_client::{MockNetBoxClient, NetBoxClientTrait};
use serde_json::Value;
use std::sync::Arc;

/// Type name, schema flags and configure behavior every resource shares
pub(crate) fn assert_contract<R: ObjectResource>(
    type_name: &str,
    required: &[&str],
    optional: &[&str],
    computed: &[&str],
) {
    let mut resource = NetBoxResource::<R>::new();
    assert_eq!(resource.type_name("netbox"), type_name);

    let schema = resource.schema();
    for name in required {
        let attribute = schema.get(name).unwrap_or_else(|| panic!("missing {}", name));
        assert!(attribute.required, "{} should be required", name);
    }
    for name in optional {
        let attribute = schema.get(name).unwrap_or_else(|| panic!("missing {}", name));
        assert!(attribute.optional, "{} should be optional", name);
    }
    for name in computed {
        let attribute = schema.get(name).unwrap_or_else(|| panic!("missing {}", name));
        assert!(attribute.computed, "{} should be computed", name);
    }

    assert!(resource.configure(None).is_empty());

    let wrong: Box<crate::framework::ProviderData> = Box::new("not a client".to_string());
    let diags = resource.configure(Some(wrong.as_ref()));
    assert_eq!(
        diags.iter().next().map(|d| d.summary.as_str()),
        Some("Unexpected Resource Configure Type")
    );

    let client: Arc<dyn NetBoxClientTrait> = Arc::new(MockNetBoxClient::new("https://netbox.test"));
    let data: Box<crate::framework::ProviderData> = Box::new(client);
    assert!(resource.configure(Some(data.as_ref())).is_empty());
}

/// Resource bound to a mock client
pub(crate) fn resource<R: ObjectResource>(client: &MockNetBoxClient) -> NetBoxResource<R> {
    NetBoxResource::with_client(Arc::new(client.clone()))
}

/// Panic with the diagnostics if the response carries an error
pub(crate) fn assert_ok(response: &ResourceResponse) {
    assert!(
        !response.diagnostics.has_error(),
        "unexpected diagnostics: {:?}",
        response.diagnostics
    );
}

/// Create and return the new state
pub(crate) async fn create<R: ObjectResource>(resource: &NetBoxResource<R>, plan: Value) -> Value {
    let response = resource.create(CreateRequest { plan }).await;
    assert_ok(&response);
    response.state.unwrap_or_default()
}

/// Refresh
pub(crate) async fn read<R: ObjectResource>(resource: &NetBoxResource<R>, state: Value) -> ResourceResponse {
    resource.read(ReadRequest { state, identity: None }).await
}

/// Update and return the new state
pub(crate) async fn update<R: ObjectResource>(
    resource: &NetBoxResource<R>,
    plan: Value,
    state: Value,
) -> Value {
    let response = resource.update(UpdateRequest { plan, state }).await;
    assert_ok(&response);
    response.state.unwrap_or_default()
}

/// Delete
pub(crate) async fn delete<R: ObjectResource>(resource: &NetBoxResource<R>, state: Value) -> ResourceResponse {
    resource.delete(DeleteRequest { state }).await
}

/// Import by id or identity
pub(crate) async fn import<R: ObjectResource>(
    resource: &NetBoxResource<R>,
    id: &str,
    identity: Option<Value>,
) -> ResourceResponse {
    resource
        .import_state(ImportRequest {
            id: id.to_string(),
            identity,
        })
        .await
}
