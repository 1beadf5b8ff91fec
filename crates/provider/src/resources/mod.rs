//! Managed resources and their data sources, grouped by NetBox app

pub mod circuits;
pub mod data_source;
pub mod dcim;
pub mod engine;
pub mod extras;
pub mod ipam;
pub mod organizational;
pub mod tenancy;
pub mod vpn;

#[cfg(test)]
pub(crate) mod testing;

use crate::framework::{DataSource, Resource};
use data_source::NetBoxDataSource;
use engine::{NetBoxResource, ObjectResource};
use organizational::OrganizationResource;

/// Constructor of one resource type
pub type ResourceFactory = fn() -> Box<dyn Resource>;

/// Constructor of one data source type
pub type DataSourceFactory = fn() -> Box<dyn DataSource>;

fn resource<R: ObjectResource>() -> Box<dyn Resource> {
    Box::new(NetBoxResource::<R>::new())
}

fn data_source<R: ObjectResource>() -> Box<dyn DataSource> {
    Box::new(NetBoxDataSource::<R>::new())
}

/// One factory per object type, grouped by NetBox app
macro_rules! object_types {
    ($factory:ident) => {
        vec![
            // dcim
            $factory::<OrganizationResource<organizational::Region>>,
            $factory::<OrganizationResource<organizational::SiteGroup>>,
            $factory::<dcim::site::SiteSpec>,
            $factory::<dcim::location::LocationSpec>,
            $factory::<OrganizationResource<organizational::Manufacturer>>,
            $factory::<dcim::platform::PlatformSpec>,
            $factory::<dcim::device_role::DeviceRoleSpec>,
            $factory::<dcim::device_type::DeviceTypeSpec>,
            $factory::<dcim::device::DeviceSpec>,
            $factory::<dcim::interface::InterfaceSpec>,
            // tenancy
            $factory::<OrganizationResource<organizational::TenantGroup>>,
            $factory::<tenancy::tenant::TenantSpec>,
            $factory::<OrganizationResource<organizational::ContactGroup>>,
            $factory::<OrganizationResource<organizational::ContactRole>>,
            $factory::<tenancy::contact::ContactSpec>,
            // ipam
            $factory::<ipam::rir::RirSpec>,
            $factory::<ipam::aggregate::AggregateSpec>,
            $factory::<ipam::vrf::VrfSpec>,
            $factory::<ipam::vlan_group::VlanGroupSpec>,
            $factory::<ipam::vlan::VlanSpec>,
            $factory::<ipam::prefix::PrefixSpec>,
            $factory::<ipam::ip_address::IpAddressSpec>,
            // circuits
            $factory::<circuits::provider::CircuitProviderSpec>,
            $factory::<circuits::circuit_type::CircuitTypeSpec>,
            $factory::<circuits::circuit::CircuitSpec>,
            // extras
            $factory::<extras::tag::TagSpec>,
            // vpn
            $factory::<OrganizationResource<organizational::TunnelGroup>>,
            $factory::<vpn::tunnel::TunnelSpec>,
            $factory::<vpn::l2vpn::L2vpnSpec>,
            $factory::<vpn::l2vpn_termination::L2vpnTerminationSpec>,
        ]
    };
}

/// Every resource type the provider serves, unconfigured
pub fn registry() -> Vec<ResourceFactory> {
    object_types!(resource)
}

/// Every data source type, one per resource type
pub fn data_source_registry() -> Vec<DataSourceFactory> {
    object_types!(data_source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn type_names_are_unique() {
        let names: Vec<String> = registry().iter().map(|new| new().type_name("netbox")).collect();
        let unique: BTreeSet<&String> = names.iter().collect();
        assert_eq!(names.len(), 30);
        assert_eq!(unique.len(), names.len());
        assert!(names.iter().all(|name| name.starts_with("netbox_")));
    }

    #[test]
    fn identity_import_resources() {
        let with_identity: BTreeSet<String> = registry()
            .iter()
            .map(|new| new())
            .filter(|resource| resource.identity_schema().is_some())
            .map(|resource| resource.type_name("netbox"))
            .collect();
        let expected: BTreeSet<String> = [
            "netbox_circuit",
            "netbox_device",
            "netbox_interface",
            "netbox_l2vpn",
            "netbox_l2vpn_termination",
            "netbox_site",
            "netbox_tenant",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();
        assert_eq!(with_identity, expected);
    }

    #[test]
    fn every_resource_has_a_data_source() {
        let resources: BTreeSet<String> = registry().iter().map(|new| new().type_name("netbox")).collect();
        let sources: BTreeSet<String> = data_source_registry()
            .iter()
            .map(|new| new().type_name("netbox"))
            .collect();
        assert_eq!(resources, sources);
        for new in data_source_registry() {
            let source = new();
            let id = source.schema().get("id").cloned();
            let name = source.type_name("netbox");
            assert!(id.is_some_and(|id| id.optional && id.computed), "{} id should be a lookup key", name);
        }
    }

    #[test]
    fn every_schema_has_a_computed_id() {
        for new in registry() {
            let resource = new();
            let id = resource.schema().get("id").cloned();
            let name = resource.type_name("netbox");
            assert!(id.is_some_and(|id| id.computed), "{} id should be computed", name);
        }
    }
}
