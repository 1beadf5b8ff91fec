//! IPAM resources: RIRs, aggregates, VRFs, VLAN groups, VLANs, prefixes
//! and IP addresses.

pub mod aggregate;
pub mod ip_address;
pub mod prefix;
pub mod rir;
pub mod vlan;
pub mod vlan_group;
pub mod vrf;

pub use aggregate::AggregateResource;
pub use ip_address::IpAddressResource;
pub use prefix::PrefixResource;
pub use rir::RirResource;
pub use vlan::VlanResource;
pub use vlan_group::VlanGroupResource;
pub use vrf::VrfResource;
