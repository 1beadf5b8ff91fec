//! Resolving references
//!
//! Users refer to related objects by id, slug or name. [`resolve`] turns
//! any of those into the [`BriefRef`] of exactly one object, or an error
//! explaining why it could not.

use crate::error::LookupError;
use crate::framework::{Attr, Diagnostics};
use netbox_client::{BriefRef, Endpoint, NetBoxClientTrait};
use serde_json::Value;
use tracing::debug;

/// How to find objects of one type
#[derive(Debug, Clone, Copy)]
pub struct LookupConfig {
    /// Collection to search
    pub endpoint: Endpoint,
    /// Filter for the human name (`name`, or `model` for device types)
    pub name_field: &'static str,
    /// The type has a slug
    pub has_slug: bool,
}

impl LookupConfig {
    /// Type with `name` and `slug`
    pub const fn named(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            name_field: "name",
            has_slug: true,
        }
    }

    /// Type with `name` only
    pub const fn name_only(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            name_field: "name",
            has_slug: false,
        }
    }

    /// Label used in messages
    pub fn label(&self) -> &'static str {
        self.endpoint.label
    }
}

/// Lookup configuration for each referenced type
pub mod targets {
    use super::LookupConfig;
    use netbox_client::endpoint;

    pub const REGION: LookupConfig = LookupConfig::named(endpoint::REGIONS);
    pub const SITE_GROUP: LookupConfig = LookupConfig::named(endpoint::SITE_GROUPS);
    pub const SITE: LookupConfig = LookupConfig::named(endpoint::SITES);
    pub const LOCATION: LookupConfig = LookupConfig::named(endpoint::LOCATIONS);
    pub const MANUFACTURER: LookupConfig = LookupConfig::named(endpoint::MANUFACTURERS);
    pub const PLATFORM: LookupConfig = LookupConfig::named(endpoint::PLATFORMS);
    pub const DEVICE_ROLE: LookupConfig = LookupConfig::named(endpoint::DEVICE_ROLES);
    pub const CONFIG_TEMPLATE: LookupConfig = LookupConfig::name_only(endpoint::CONFIG_TEMPLATES);
    pub const DEVICE_TYPE: LookupConfig = LookupConfig {
        endpoint: endpoint::DEVICE_TYPES,
        name_field: "model",
        has_slug: true,
    };
    pub const DEVICE: LookupConfig = LookupConfig::name_only(endpoint::DEVICES);
    pub const INTERFACE: LookupConfig = LookupConfig::name_only(endpoint::INTERFACES);
    pub const TENANT_GROUP: LookupConfig = LookupConfig::named(endpoint::TENANT_GROUPS);
    pub const TENANT: LookupConfig = LookupConfig::named(endpoint::TENANTS);
    pub const CONTACT_GROUP: LookupConfig = LookupConfig::named(endpoint::CONTACT_GROUPS);
    pub const RIR: LookupConfig = LookupConfig::named(endpoint::RIRS);
    pub const VRF: LookupConfig = LookupConfig::name_only(endpoint::VRFS);
    pub const IPAM_ROLE: LookupConfig = LookupConfig::named(endpoint::IPAM_ROLES);
    pub const VLAN_GROUP: LookupConfig = LookupConfig::named(endpoint::VLAN_GROUPS);
    pub const VLAN: LookupConfig = LookupConfig::name_only(endpoint::VLANS);
    pub const CIRCUIT_PROVIDER: LookupConfig = LookupConfig::named(endpoint::CIRCUIT_PROVIDERS);
    pub const CIRCUIT_TYPE: LookupConfig = LookupConfig::named(endpoint::CIRCUIT_TYPES);
    pub const TUNNEL_GROUP: LookupConfig = LookupConfig::named(endpoint::TUNNEL_GROUPS);
    pub const IPSEC_PROFILE: LookupConfig = LookupConfig::name_only(endpoint::IPSEC_PROFILES);
    pub const L2VPN: LookupConfig = LookupConfig::named(endpoint::L2VPNS);
}

/// Resolve an id, slug or name to one object
pub async fn resolve(
    client: &dyn NetBoxClientTrait,
    config: &LookupConfig,
    value: &str,
) -> Result<BriefRef, LookupError> {
    resolve_scoped(client, config, value, &[]).await
}

/// Like [`resolve`], with extra filters applied to slug and name searches
/// (e.g. `device_id` when looking up an interface by name)
pub async fn resolve_scoped(
    client: &dyn NetBoxClientTrait,
    config: &LookupConfig,
    value: &str,
    scope: &[(&str, &str)],
) -> Result<BriefRef, LookupError> {
    let label = config.label();

    if let Ok(id) = value.parse::<u64>() {
        let object = client
            .retrieve(&config.endpoint, id)
            .await
            .map_err(|source| LookupError::ById { label, id, source })?;
        return Ok(serde_json::from_value(object).map_err(netbox_client::NetBoxError::from)?);
    }

    let mut fields = Vec::with_capacity(2);
    if config.has_slug {
        fields.push("slug");
    }
    fields.push(config.name_field);

    for field in fields {
        let mut filters: Vec<(&str, &str)> = scope.to_vec();
        filters.push((field, value));
        let found: Vec<Value> = client.list(&config.endpoint, &filters, false).await?;
        debug!("Lookup {} by {}='{}': {} match(es)", label, field, value, found.len());
        match found.len() {
            0 => continue,
            1 => {
                let object = found.into_iter().next().unwrap_or_default();
                return Ok(serde_json::from_value(object).map_err(netbox_client::NetBoxError::from)?);
            }
            count => {
                return Err(LookupError::Ambiguous {
                    label,
                    value: value.to_string(),
                    count,
                });
            }
        }
    }

    Err(LookupError::NotFound {
        label,
        value: value.to_string(),
    })
}

fn lookup_failed(config: &LookupConfig, attribute: &str, err: &LookupError, diags: &mut Diagnostics) {
    diags.add_attribute_error(
        attribute,
        format!("{} lookup failed", config.endpoint.title()),
        err.to_string(),
    );
}

/// Resolve an optional reference attribute to an id.
///
/// Null and unknown resolve to `None`; failures are added to `diags`.
pub async fn resolve_optional(
    client: &dyn NetBoxClientTrait,
    config: &LookupConfig,
    value: &Attr<String>,
    attribute: &str,
    diags: &mut Diagnostics,
) -> Option<u64> {
    resolve_optional_scoped(client, config, value, &[], attribute, diags).await
}

/// [`resolve_optional`] with extra filters
pub async fn resolve_optional_scoped(
    client: &dyn NetBoxClientTrait,
    config: &LookupConfig,
    value: &Attr<String>,
    scope: &[(&str, &str)],
    attribute: &str,
    diags: &mut Diagnostics,
) -> Option<u64> {
    let raw = value.as_str().filter(|s| !s.is_empty())?;
    match resolve_scoped(client, config, raw, scope).await {
        Ok(brief) => Some(brief.id),
        Err(e) => {
            lookup_failed(config, attribute, &e, diags);
            None
        }
    }
}

/// Resolve a required reference attribute to an id.
///
/// A missing value is reported as well as a failed lookup; the returned
/// `0` is never sent because the caller checks `diags` first.
pub async fn resolve_required(
    client: &dyn NetBoxClientTrait,
    config: &LookupConfig,
    value: &Attr<String>,
    attribute: &str,
    diags: &mut Diagnostics,
) -> u64 {
    if value.as_str().is_none_or(str::is_empty) {
        diags.add_attribute_error(
            attribute,
            format!("Missing {}", config.endpoint.title()),
            format!("The {} reference \"{}\" must be set.", config.label(), attribute),
        );
        return 0;
    }
    resolve_optional(client, config, value, attribute, diags)
        .await
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use netbox_client::{endpoint, MockNetBoxClient};
    use serde_json::json;

    fn client() -> MockNetBoxClient {
        let client = MockNetBoxClient::new("https://netbox.test");
        client
            .insert(&endpoint::SITES, json!({"name": "Paris DC1", "slug": "paris-dc1", "status": "active"}))
            .unwrap();
        client
            .insert(&endpoint::SITES, json!({"name": "Lyon", "slug": "lyon", "status": "active"}))
            .unwrap();
        client
    }

    #[tokio::test]
    async fn resolves_by_id_slug_and_name() {
        let client = client();
        assert_eq!(resolve(&client, &targets::SITE, "1").await.unwrap().slug, "paris-dc1");
        assert_eq!(resolve(&client, &targets::SITE, "lyon").await.unwrap().id, 2);
        assert_eq!(resolve(&client, &targets::SITE, "Paris DC1").await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn zero_matches_is_not_found() {
        let err = resolve(&client(), &targets::SITE, "berlin").await.unwrap_err();
        assert_eq!(err.to_string(), "No site found with slug or name 'berlin'");

        let err = resolve(&client(), &targets::SITE, "99").await.unwrap_err();
        assert!(matches!(err, LookupError::ById { id: 99, .. }));
    }

    #[tokio::test]
    async fn multiple_matches_is_ambiguous() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client.insert(&endpoint::VRFS, json!({"name": "mgmt", "rd": "65000:1"})).unwrap();
        client.insert(&endpoint::VRFS, json!({"name": "mgmt", "rd": "65000:2"})).unwrap();

        let err = resolve(&client, &targets::VRF, "mgmt").await.unwrap_err();
        assert!(matches!(err, LookupError::Ambiguous { count: 2, .. }));
        assert!(err.to_string().contains("use the ID"));
    }

    #[tokio::test]
    async fn scope_narrows_the_search() {
        let client = client();
        client
            .insert(&endpoint::DEVICE_ROLES, json!({"name": "Leaf", "slug": "leaf", "color": "00ff00"}))
            .unwrap();
        client
            .insert(&endpoint::MANUFACTURERS, json!({"name": "Arista", "slug": "arista"}))
            .unwrap();
        client
            .insert(&endpoint::DEVICE_TYPES, json!({"manufacturer": 4, "model": "7050", "slug": "7050"}))
            .unwrap();
        for name in ["leaf1", "leaf2"] {
            client
                .insert(
                    &endpoint::DEVICES,
                    json!({"name": name, "device_type": 5, "role": 3, "site": 1, "status": "active"}),
                )
                .unwrap();
        }
        for device in [6, 7] {
            client
                .insert(&endpoint::INTERFACES, json!({"device": device, "name": "eth0", "type": "1000base-t"}))
                .unwrap();
        }

        assert!(resolve(&client, &targets::INTERFACE, "eth0").await.is_err());
        let eth0 = resolve_scoped(&client, &targets::INTERFACE, "eth0", &[("device_id", "7")])
            .await
            .unwrap();
        assert_eq!(eth0.id, 9);
    }

    #[tokio::test]
    async fn optional_references() {
        let client = client();
        let mut diags = Diagnostics::new();
        assert_eq!(resolve_optional(&client, &targets::SITE, &Attr::Null, "site", &mut diags).await, None);
        assert_eq!(resolve_optional(&client, &targets::SITE, &Attr::Unknown, "site", &mut diags).await, None);
        assert_eq!(
            resolve_optional(&client, &targets::SITE, &Attr::Value("lyon".to_string()), "site", &mut diags).await,
            Some(2)
        );
        assert!(diags.is_empty());

        resolve_optional(&client, &targets::SITE, &Attr::Value("nope".to_string()), "site", &mut diags).await;
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Site lookup failed");
        assert_eq!(diag.attribute.as_deref(), Some("site"));
    }

    #[tokio::test]
    async fn required_reference_must_be_set() {
        let mut diags = Diagnostics::new();
        resolve_required(&client(), &targets::SITE, &Attr::Null, "site", &mut diags).await;
        assert!(diags.has_error());
    }
}
