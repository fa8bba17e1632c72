//! Cryptographic key descriptors and their canonical multikey encoding.

use serde::{Deserialize, Serialize};

pub mod keystore;
pub mod multikey;

/// Types of cryptographic key recognized by the did:quick method. The key type determines which
/// verification relationships a key is eligible for when the update log is replayed.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum KeyType {
    /// Ed25519 signature key. Eligible for authentication, assertion and key agreement.
    Ed25519,
    /// ECDSA key on the secp256k1 curve. Eligible for authentication and assertion only.
    Secp256k1,
    /// ECDSA key on the secp256r1 (P-256) curve.
    Secp256r1,
    /// X25519 key-agreement key.
    X25519,
    /// BLS12-381 key in the G1 group.
    Bls12381G1,
    /// BLS12-381 key in the G2 group.
    Bls12381G2,
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyType::Ed25519 => write!(f, "Ed25519"),
            KeyType::Secp256k1 => write!(f, "Secp256k1"),
            KeyType::Secp256r1 => write!(f, "Secp256r1"),
            KeyType::X25519 => write!(f, "X25519"),
            KeyType::Bls12381G1 => write!(f, "Bls12381G1"),
            KeyType::Bls12381G2 => write!(f, "Bls12381G2"),
        }
    }
}

/// A public key held by the key-management subsystem on behalf of an identifier. The private key
/// never leaves the key store.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyDescriptor {
    /// Key store identifier for the key pair.
    pub kid: String,
    /// The cryptographic key type.
    #[serde(rename = "type")]
    pub type_: KeyType,
    /// Hex-encoded public key bytes.
    pub public_key_hex: String,
}

impl Default for KeyType {
    fn default() -> Self {
        KeyType::Ed25519
    }
}
