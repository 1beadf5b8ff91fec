//! Tags
//!
//! State holds a set of tag slugs. NetBox wants `{name, slug}` pairs, so each
//! slug is resolved against the tag endpoint before it is sent. Tags are never
//! merged with the prior state: the plan always wins.

use crate::framework::{Attr, Diagnostics};
use netbox_client::{api, endpoint, NestedTag, NestedTagRequest, NetBoxClientTrait, Tag};
use tracing::debug;

/// Resolve planned tag slugs to nested tag requests
pub async fn build_tags_request(
    client: &dyn NetBoxClientTrait,
    tags: &Attr<Vec<String>>,
) -> Result<Vec<NestedTagRequest>, Diagnostics> {
    let Some(slugs) = tags.value() else {
        return Ok(Vec::new());
    };

    let mut diags = Diagnostics::new();
    let mut out = Vec::with_capacity(slugs.len());
    for slug in slugs {
        match api::list::<Tag>(client, &endpoint::TAGS, &[("slug", slug.as_str())]).await {
            Ok(found) => match found.into_iter().next() {
                Some(tag) => out.push(NestedTagRequest {
                    name: tag.name,
                    slug: tag.slug,
                }),
                None => diags.add_attribute_error(
                    "tags",
                    "Tag not found",
                    format!("No tag found with slug '{}'. Create it first with netbox_tag.", slug),
                ),
            },
            Err(e) => diags.add_attribute_error(
                "tags",
                "Tag lookup failed",
                format!("Could not look up tag '{}': {}", slug, e),
            ),
        }
    }

    if diags.has_error() {
        return Err(diags);
    }
    debug!("Resolved {} tag(s)", out.len());
    Ok(out)
}

/// Tag slugs from the API, sorted. No tags map to null unless the plan had
/// an explicit empty set.
pub fn tags_from_api(api: &[NestedTag], current: &Attr<Vec<String>>) -> Attr<Vec<String>> {
    if api.is_empty() {
        return match current {
            Attr::Value(_) => Attr::Value(Vec::new()),
            _ => Attr::Null,
        };
    }
    let mut slugs: Vec<String> = api.iter().map(|tag| tag.slug.clone()).collect();
    slugs.sort();
    slugs.dedup();
    Attr::Value(slugs)
}
