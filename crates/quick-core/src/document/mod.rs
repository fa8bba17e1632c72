//! DID Document and its component data structures.

use serde::{Deserialize, Serialize};

use crate::document::service::Service;
use crate::document::verification_method::VerificationMethod;

pub mod service;
pub mod verification_method;

/// JSON-LD context for DID documents.
pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// A DID is associated with a DID document that can be serialized into a representation of the
/// DID. https://www.w3.org/TR/did-core/
///
/// For did:quick the document is a projection: it is recomputed on every resolution from the root
/// document plus the accumulated update log, never persisted. Optional fields are omitted when
/// absent so an unmodified root document round-trips byte-identical apart from its `id`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DidDocument {
    /// The DID document's unique identifier: "did:{method}:{uri}".
    pub id: String,
    /// The JSON-LD context. A string or a list of strings and/or ordered maps, carried opaquely
    /// so root documents pass through unmodified.
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    /// Entity (or entities) authorized to make changes to the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<serde_json::Value>,
    /// A set of parameters that can be used together with a process to independently verify a
    /// proof. For example, a cryptographic public key used to verify a digital signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<Vec<VerificationMethod>>,
    /// Verification methods (by id) the DID subject can use to authenticate, such as logging into
    /// a website or engaging in challenge-response interactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Vec<String>>,
    /// Verification methods (by id) the DID subject can use to express claims, such as issuing
    /// verifiable credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_method: Option<Vec<String>>,
    /// Verification methods (by id) another entity can use to generate encryption material for
    /// confidential messages to the DID subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_agreement: Option<Vec<String>>,
    /// Verification methods (by id) the DID subject can use to invoke a cryptographic capability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability_invocation: Option<Vec<String>>,
    /// Verification methods (by id) the DID subject can use to delegate a cryptographic
    /// capability to another party.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability_delegation: Option<Vec<String>>,
    /// Ways of communicating with the DID subject or associated entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Vec<Service>>,
}

#[cfg(test)]
mod tests {
    use olpc_cjson::CanonicalFormatter;
    use serde::Serialize;

    use super::*;

    #[test]
    fn optional_fields_omitted() {
        let doc = DidDocument {
            id: "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK".to_string(),
            ..Default::default()
        };
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter::new());
        doc.serialize(&mut ser).expect("failed to serialize");
        let json = String::from_utf8(buf).expect("failed to convert bytes to string");
        assert_eq!(
            json,
            r#"{"id":"did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK"}"#
        );
    }

    #[test]
    fn root_document_round_trip() {
        let input = r#"{
            "@context": ["https://www.w3.org/ns/did/v1"],
            "id": "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK",
            "verificationMethod": [
                {
                    "id": "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK#key-1",
                    "type": "Multikey",
                    "controller": "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK",
                    "publicKeyMultibase": "z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK"
                }
            ],
            "authentication": ["did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK#key-1"]
        }"#;
        let doc: DidDocument = serde_json::from_str(input).expect("failed to deserialize");
        assert!(doc.verification_method.as_ref().is_some_and(|vm| vm.len() == 1));
        assert!(doc.authentication.as_ref().is_some_and(|a| a.len() == 1));
        assert!(doc.key_agreement.is_none());
        assert!(doc.service.is_none());
    }
}
