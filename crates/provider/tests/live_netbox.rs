//! End-to-end tests against a live NetBox.
//!
//! Set NETBOX_SERVER_URL and NETBOX_API_TOKEN to run.

use netbox_provider::framework::{CreateRequest, DeleteRequest, ReadRequest};
use netbox_provider::NetboxProvider;
use serde_json::json;

fn provider() -> NetboxProvider {
    let mut provider = NetboxProvider::new("integration");
    let diags = provider.configure(&json!({}));
    assert!(diags.is_empty(), "configure failed: {:?}", diags);
    provider
}

#[tokio::test]
#[ignore] // Requires running NetBox instance
async fn test_site_group_lifecycle() {
    let provider = provider();
    let groups = provider.resource("netbox_site_group").unwrap();

    let created = groups
        .create(CreateRequest {
            plan: json!({"name": "Provider Integration", "slug": "provider-integration"}),
        })
        .await;
    assert!(!created.diagnostics.has_error(), "{:?}", created.diagnostics);
    let state = created.state.unwrap();

    let read = groups
        .read(ReadRequest {
            state: state.clone(),
            identity: None,
        })
        .await;
    assert_eq!(read.state.unwrap()["slug"], "provider-integration");

    let deleted = groups.delete(DeleteRequest { state: state.clone() }).await;
    assert!(!deleted.diagnostics.has_error(), "{:?}", deleted.diagnostics);

    // gone after delete
    let read = groups.read(ReadRequest { state, identity: None }).await;
    assert!(read.state.is_none());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_slug_hint() {
    let provider = provider();
    let tags = provider.resource("netbox_tag").unwrap();
    let plan = json!({"name": "Provider Dup", "slug": "provider-dup"});

    let first = tags.create(CreateRequest { plan: plan.clone() }).await;
    assert!(!first.diagnostics.has_error(), "{:?}", first.diagnostics);

    let second = tags.create(CreateRequest { plan }).await;
    let diag = second.diagnostics.iter().next().unwrap();
    assert_eq!(diag.summary, "Duplicate netbox_tag");
    assert!(diag.detail.contains("terraform import netbox_tag.provider-dup"));

    let cleanup = tags
        .delete(DeleteRequest {
            state: first.state.unwrap(),
        })
        .await;
    assert!(!cleanup.diagnostics.has_error());
}
