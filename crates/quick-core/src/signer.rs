//! Credential-signing capability. The credential subsystem produces and verifies signed
//! envelopes given a payload and a proof format; this crate calls it but does not implement it.

use crate::record::{SignedEnvelope, UpdateCredential};
use crate::Result;

/// External credential-signing subsystem.
#[allow(async_fn_in_trait)]
pub trait CredentialSigner {
    /// The proof formats the signer can produce for the given issuer DID, in preference order.
    /// The first entry is used as the default when a caller does not request a format.
    async fn usable_proof_formats(&self, did: &str) -> Result<Vec<String>>;

    /// Sign an update credential as a verifiable credential in the requested proof format.
    ///
    /// # Errors
    ///
    /// * `Err::SigningError` - The signer could not produce a proof for the credential.
    async fn sign(&self, credential: &UpdateCredential, proof_format: &str)
        -> Result<SignedEnvelope>;
}
