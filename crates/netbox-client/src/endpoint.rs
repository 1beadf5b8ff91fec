//! NetBox API endpoints
//!
//! Every object type the provider manages lives under `/api/<app>/<object>/`.
//! An [`Endpoint`] pairs that path with the human-readable label used in
//! log lines and error messages.

/// A NetBox REST collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Path below `/api/`, without slashes at either end (e.g. `dcim/sites`)
    pub path: &'static str,
    /// Singular lowercase label (e.g. `site group`)
    pub label: &'static str,
}

impl Endpoint {
    /// Create an endpoint
    pub const fn new(path: &'static str, label: &'static str) -> Self {
        Self { path, label }
    }

    /// Collection path, e.g. `/api/dcim/sites/`
    pub fn collection_path(&self) -> String {
        format!("/api/{}/", self.path)
    }

    /// Object path, e.g. `/api/dcim/sites/7/`
    pub fn object_path(&self, id: u64) -> String {
        format!("/api/{}/{}/", self.path, id)
    }

    /// Label with each word capitalised, e.g. `Site Group`
    pub fn title(&self) -> String {
        self.label
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// DCIM
/// `/api/dcim/regions/`
pub const REGIONS: Endpoint = Endpoint::new("dcim/regions", "region");
/// `/api/dcim/site-groups/`
pub const SITE_GROUPS: Endpoint = Endpoint::new("dcim/site-groups", "site group");
/// `/api/dcim/sites/`
pub const SITES: Endpoint = Endpoint::new("dcim/sites", "site");
/// `/api/dcim/locations/`
pub const LOCATIONS: Endpoint = Endpoint::new("dcim/locations", "location");
/// `/api/dcim/manufacturers/`
pub const MANUFACTURERS: Endpoint = Endpoint::new("dcim/manufacturers", "manufacturer");
/// `/api/dcim/platforms/`
pub const PLATFORMS: Endpoint = Endpoint::new("dcim/platforms", "platform");
/// `/api/dcim/device-roles/`
pub const DEVICE_ROLES: Endpoint = Endpoint::new("dcim/device-roles", "device role");
/// `/api/dcim/device-types/`
pub const DEVICE_TYPES: Endpoint = Endpoint::new("dcim/device-types", "device type");
/// `/api/dcim/devices/`
pub const DEVICES: Endpoint = Endpoint::new("dcim/devices", "device");
/// `/api/dcim/interfaces/`
pub const INTERFACES: Endpoint = Endpoint::new("dcim/interfaces", "interface");

// Tenancy
/// `/api/tenancy/tenant-groups/`
pub const TENANT_GROUPS: Endpoint = Endpoint::new("tenancy/tenant-groups", "tenant group");
/// `/api/tenancy/tenants/`
pub const TENANTS: Endpoint = Endpoint::new("tenancy/tenants", "tenant");
/// `/api/tenancy/contact-groups/`
pub const CONTACT_GROUPS: Endpoint = Endpoint::new("tenancy/contact-groups", "contact group");
/// `/api/tenancy/contact-roles/`
pub const CONTACT_ROLES: Endpoint = Endpoint::new("tenancy/contact-roles", "contact role");
/// `/api/tenancy/contacts/`
pub const CONTACTS: Endpoint = Endpoint::new("tenancy/contacts", "contact");

// IPAM
/// `/api/ipam/rirs/`
pub const RIRS: Endpoint = Endpoint::new("ipam/rirs", "RIR");
/// `/api/ipam/aggregates/`
pub const AGGREGATES: Endpoint = Endpoint::new("ipam/aggregates", "aggregate");
/// `/api/ipam/vrfs/`
pub const VRFS: Endpoint = Endpoint::new("ipam/vrfs", "VRF");
/// `/api/ipam/roles/`
pub const IPAM_ROLES: Endpoint = Endpoint::new("ipam/roles", "IPAM role");
/// `/api/ipam/vlan-groups/`
pub const VLAN_GROUPS: Endpoint = Endpoint::new("ipam/vlan-groups", "VLAN group");
/// `/api/ipam/vlans/`
pub const VLANS: Endpoint = Endpoint::new("ipam/vlans", "VLAN");
/// `/api/ipam/prefixes/`
pub const PREFIXES: Endpoint = Endpoint::new("ipam/prefixes", "prefix");
/// `/api/ipam/ip-addresses/`
pub const IP_ADDRESSES: Endpoint = Endpoint::new("ipam/ip-addresses", "IP address");
/// `/api/ipam/route-targets/`
pub const ROUTE_TARGETS: Endpoint = Endpoint::new("ipam/route-targets", "route target");

// Circuits
/// `/api/circuits/providers/`
pub const CIRCUIT_PROVIDERS: Endpoint = Endpoint::new("circuits/providers", "circuit provider");
/// `/api/circuits/circuit-types/`
pub const CIRCUIT_TYPES: Endpoint = Endpoint::new("circuits/circuit-types", "circuit type");
/// `/api/circuits/circuits/`
pub const CIRCUITS: Endpoint = Endpoint::new("circuits/circuits", "circuit");

// Extras
/// `/api/extras/tags/`
pub const TAGS: Endpoint = Endpoint::new("extras/tags", "tag");
/// `/api/extras/config-templates/`
pub const CONFIG_TEMPLATES: Endpoint = Endpoint::new("extras/config-templates", "config template");

// VPN
/// `/api/vpn/tunnel-groups/`
pub const TUNNEL_GROUPS: Endpoint = Endpoint::new("vpn/tunnel-groups", "tunnel group");
/// `/api/vpn/tunnels/`
pub const TUNNELS: Endpoint = Endpoint::new("vpn/tunnels", "tunnel");
/// `/api/vpn/ipsec-profiles/`
pub const IPSEC_PROFILES: Endpoint = Endpoint::new("vpn/ipsec-profiles", "IPSec profile");
/// `/api/vpn/l2vpns/`
pub const L2VPNS: Endpoint = Endpoint::new("vpn/l2vpns", "L2VPN");
/// `/api/vpn/l2vpn-terminations/`
pub const L2VPN_TERMINATIONS: Endpoint =
    Endpoint::new("vpn/l2vpn-terminations", "L2VPN termination");
