//! Implementation of the did:quick DID method. A did:quick identifier wraps a root did:key
//! identifier; mutations are published as signed update credentials to a relay and the current
//! DID document is reconstructed by replaying the update log on every resolution.

pub mod provider;
pub mod relay;
pub mod resolver;

pub use provider::QuickProvider;
pub use relay::RelayClient;
pub use resolver::QuickResolver;
