//! Typed helpers over [`NetBoxClientTrait`]
//!
//! The trait speaks JSON so that one mock covers every endpoint. These
//! helpers deserialize responses into the models.

use crate::endpoint::Endpoint;
use crate::error::NetBoxError;
use crate::netbox_trait::NetBoxClientTrait;
use serde::de::DeserializeOwned;

/// Fetch one object by id
pub async fn get<T: DeserializeOwned>(
    client: &dyn NetBoxClientTrait,
    endpoint: &Endpoint,
    id: u64,
) -> Result<T, NetBoxError> {
    let value = client.retrieve(endpoint, id).await?;
    Ok(serde_json::from_value(value)?)
}

/// List objects matching `filters` (first page only)
pub async fn list<T: DeserializeOwned>(
    client: &dyn NetBoxClientTrait,
    endpoint: &Endpoint,
    filters: &[(&str, &str)],
) -> Result<Vec<T>, NetBoxError> {
    client
        .list(endpoint, filters, false)
        .await?
        .into_iter()
        .map(|value| serde_json::from_value(value).map_err(NetBoxError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{endpoint, MockNetBoxClient, Site};
    use serde_json::json;

    #[tokio::test]
    async fn typed_get_and_list() {
        let client = MockNetBoxClient::new("https://netbox.test");
        client.insert(&endpoint::SITES, json!({"name": "Paris", "slug": "paris"})).unwrap();
        client.insert(&endpoint::SITES, json!({"name": "Lyon", "slug": "lyon"})).unwrap();

        let sites: Vec<Site> = list(&client, &endpoint::SITES, &[("slug", "lyon")]).await.unwrap();
        assert_eq!(sites.len(), 1);
        let site: Site = get(&client, &endpoint::SITES, sites[0].id).await.unwrap();
        assert_eq!(site.name, "Lyon");

        let missing = get::<Site>(&client, &endpoint::SITES, 99).await.unwrap_err();
        assert!(missing.is_not_found());
    }
}
