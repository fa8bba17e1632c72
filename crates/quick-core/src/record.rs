//! Update record model: identifier mutations encoded as verifiable-credential-shaped records and
//! wrapped in a signed envelope for publication to the relay.

use serde::{Deserialize, Serialize};

use crate::document::service::Service;
use crate::document::verification_method::VerificationMethod;

/// JSON-LD context for update credentials.
pub const CREDENTIALS_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Credential type carried by every verifiable credential.
pub const VERIFIABLE_CREDENTIAL: &str = "VerifiableCredential";

/// Credential type carried by every did:quick update.
pub const QUICK_UPDATE: &str = "DIDQuickUpdate";

/// Media type for signed update envelopes.
pub const MEDIA_TYPE: &str = "credential+ld+json";

/// Relay wire type for update publication requests.
pub const RELAY_REQUEST_TYPE: &str = "did-quick-update";

/// The kind of identifier mutation carried by an update record. Handling is exhaustive: kinds
/// without replay or publication semantics produce typed `NotSupported` errors rather than being
/// silently skipped.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum UpdateKind {
    /// Add a verification method to the document.
    AddKey,
    /// Add a service endpoint to the document.
    AddService,
    /// Remove a verification method from the document.
    RemoveKey,
    /// Remove a service endpoint from the document.
    RemoveService,
}

impl UpdateKind {
    /// The credential type tag identifying this mutation kind on the wire.
    #[must_use]
    pub const fn credential_type(&self) -> &'static str {
        match self {
            UpdateKind::AddKey => "DIDQuickAddKey",
            UpdateKind::AddService => "DIDQuickAddService",
            UpdateKind::RemoveKey => "DIDQuickRemoveKey",
            UpdateKind::RemoveService => "DIDQuickRemoveService",
        }
    }
}

/// The payload a mutation applies to the document: a verification method for key mutations, a
/// service description for service mutations.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Subject {
    /// Service payload for AddService / RemoveService. Tried first: a service requires its
    /// `serviceEndpoint` field, while verification methods default missing fields.
    Service(Service),
    /// Verification method payload for AddKey / RemoveKey.
    VerificationMethod(VerificationMethod),
}

/// An identifier-mutation record, shaped as a W3C verifiable credential. The issuer is the root
/// DID the mutation targets; issuer equality with the resolved root DID is the sole authorization
/// check applied during replay.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredential {
    /// JSON-LD context.
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// Credential types, including the mutation kind tag.
    #[serde(rename = "type")]
    pub type_: Vec<String>,
    /// The root DID issuing (and targeted by) this update.
    pub issuer: String,
    /// RFC3339 timestamp the update was issued at.
    pub issuance_date: String,
    /// The mutation payload.
    pub credential_subject: Subject,
}

impl UpdateCredential {
    /// Build an unsigned update credential for the given mutation, issued by (and targeting) the
    /// root DID, timestamped now.
    #[must_use]
    pub fn new(kind: UpdateKind, issuer: &str, subject: Subject) -> Self {
        Self {
            context: vec![CREDENTIALS_CONTEXT.to_string()],
            type_: vec![
                VERIFIABLE_CREDENTIAL.to_string(),
                QUICK_UPDATE.to_string(),
                kind.credential_type().to_string(),
            ],
            issuer: issuer.to_string(),
            issuance_date: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            credential_subject: subject,
        }
    }

    /// Recover the mutation kind from the credential's type tags. Returns `None` for credentials
    /// that are not recognizable did:quick updates; a resolver ignores those.
    #[must_use]
    pub fn kind(&self) -> Option<UpdateKind> {
        for kind in [
            UpdateKind::AddKey,
            UpdateKind::AddService,
            UpdateKind::RemoveKey,
            UpdateKind::RemoveService,
        ] {
            if self.type_.iter().any(|t| t == kind.credential_type()) {
                return Some(kind);
            }
        }
        None
    }
}

/// A signed update record: the credential plus an opaque proof produced by the external
/// credential-signing subsystem. This crate never inspects the proof.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedEnvelope {
    /// Media type of the enclosed credential.
    pub media_type: String,
    /// The update credential.
    pub credential: UpdateCredential,
    /// Opaque signature blob.
    pub proof: serde_json::Value,
}

/// Body of a relay publish request.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RelayRequest {
    /// Relay record type, always [`RELAY_REQUEST_TYPE`].
    #[serde(rename = "type")]
    pub type_: String,
    /// Media type of the enclosed data.
    pub media_type: String,
    /// The signed update envelope.
    pub data: SignedEnvelope,
}

impl RelayRequest {
    /// Wrap a signed envelope for publication.
    #[must_use]
    pub fn new(envelope: SignedEnvelope) -> Self {
        Self {
            type_: RELAY_REQUEST_TYPE.to_string(),
            media_type: envelope.media_type.clone(),
            data: envelope,
        }
    }
}
