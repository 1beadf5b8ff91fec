//! DCIM resources: sites, locations, platforms, device roles, device types,
//! devices and interfaces.
//!
//! Regions, site groups and manufacturers live in
//! [`super::organizational`].

pub mod device;
pub mod device_role;
pub mod device_type;
pub mod interface;
pub mod location;
pub mod platform;
pub mod site;

pub use device::DeviceResource;
pub use device_role::DeviceRoleResource;
pub use device_type::DeviceTypeResource;
pub use interface::InterfaceResource;
pub use location::LocationResource;
pub use platform::PlatformResource;
pub use site::SiteResource;
