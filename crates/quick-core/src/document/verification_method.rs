//! Verification methods express the means for verifying proofs made by or on behalf of a DID
//! subject, such as a public key bound to the identifier.

use serde::{Deserialize, Serialize};

/// Verification-method type written by the did:quick method. Keys added through the update log
/// are always published in multikey form.
pub const MULTIKEY: &str = "Multikey";

/// A verification method within a DID document.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerificationMethod {
    /// Identifier for the verification method: "{did}#{key id}".
    pub id: String,
    /// The format of the public key, such as "Multikey".
    #[serde(rename = "type")]
    pub type_: String,
    /// The DID that controls the key.
    pub controller: String,
    /// Multibase-encoded, multicodec-tagged public key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_multibase: Option<String>,
    /// Public key in JWK format. Never written by this method but tolerated on root documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<serde_json::Value>,
}
