//! Derived identifier record for the did:quick method.

use serde::{Deserialize, Serialize};

use crate::document::service::Service;
use crate::keys::KeyDescriptor;

/// DID scheme prefix for derived identifiers.
pub const QUICK_PREFIX: &str = "did:quick:";

/// DID scheme prefix required of root identifiers.
pub const ROOT_PREFIX: &str = "did:key:";

/// A derived identifier wrapping a root identifier. Created once at identifier-creation time and
/// conceptually immutable thereafter: all further mutation happens by appending update records to
/// the relay log, never by editing this record in place.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickIdentifier {
    /// The derived DID: "did:quick:" + root DID.
    pub did: String,
    /// Key store id of the key controlling the identifier.
    pub controller_key_id: String,
    /// Keys held for the identifier, copied verbatim from the root identifier at creation.
    pub keys: Vec<KeyDescriptor>,
    /// Services advertised by the identifier. Always empty at creation.
    pub services: Vec<Service>,
}

impl QuickIdentifier {
    /// The root DID this identifier wraps, if the derived DID is well-formed.
    #[must_use]
    pub fn root_did(&self) -> Option<&str> {
        self.did.strip_prefix(QUICK_PREFIX)
    }
}
