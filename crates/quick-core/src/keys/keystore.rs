//! Key-management capability. The key store holds private keys on behalf of identifiers and is
//! never exposed to this crate beyond the operations below.

use crate::Result;

/// External key-management subsystem. The `self` reference allows for configuration information
/// such as key store location and credentials.
#[allow(async_fn_in_trait)]
pub trait KeyStore {
    /// Delete the key pair with the given key store identifier.
    ///
    /// # Errors
    ///
    /// An error if the key does not exist or could not be removed. Callers treating deletion as
    /// best-effort may continue past individual failures.
    async fn delete_key(&self, kid: &str) -> Result<()>;
}
