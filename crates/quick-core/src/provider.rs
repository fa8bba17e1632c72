//! Root-identifier provider capability. The root provider owns the conventional single-document
//! identifier that the did:quick method wraps; this crate never mutates the root identifier.

use serde::{Deserialize, Serialize};

use crate::keys::KeyDescriptor;
use crate::Result;

/// A root identifier as created and held by the root-provider subsystem.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RootIdentifier {
    /// The root DID.
    pub did: String,
    /// Keys held for the root identifier.
    pub keys: Vec<KeyDescriptor>,
}

/// External root-identifier provider. Consumed, not implemented, by the did:quick crates.
#[allow(async_fn_in_trait)]
pub trait RootProvider {
    /// Create a new root identifier, generating one key in the named key-management backend.
    ///
    /// # Arguments
    ///
    /// * `kms` - The key-management backend to generate the identifier's key in.
    async fn create(&self, kms: &str) -> Result<RootIdentifier>;

    /// Look up a previously created root identifier.
    ///
    /// # Errors
    ///
    /// * `Err::NotFound` - No identifier record exists for the DID.
    async fn get(&self, did: &str) -> Result<RootIdentifier>;
}

#[allow(async_fn_in_trait)]
impl<T: RootProvider> RootProvider for &T {
    async fn create(&self, kms: &str) -> Result<RootIdentifier> {
        (**self).create(kms).await
    }

    async fn get(&self, did: &str) -> Result<RootIdentifier> {
        (**self).get(did).await
    }
}
