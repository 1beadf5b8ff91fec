//! Circuit resources: providers, circuit types and circuits

pub mod circuit;
pub mod circuit_type;
pub mod provider;

pub use circuit::CircuitResource;
pub use circuit_type::CircuitTypeResource;
pub use provider::CircuitProviderResource;
