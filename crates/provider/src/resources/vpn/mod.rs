//! VPN resources: tunnels, L2VPNs and L2VPN terminations.
//!
//! Tunnel groups live in [`super::organizational`].

pub mod l2vpn;
pub mod l2vpn_termination;
pub mod tunnel;

pub use l2vpn::L2vpnResource;
pub use l2vpn_termination::L2vpnTerminationResource;
pub use tunnel::TunnelResource;
