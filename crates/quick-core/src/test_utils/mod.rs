//! Deterministic capability doubles for use in tests. No networking, no real cryptography:
//! proofs are opaque to the did:quick crates so the doubles fabricate them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::document::verification_method::{VerificationMethod, MULTIKEY};
use crate::document::{DidDocument, DID_CONTEXT};
use crate::error::Err;
use crate::identifier::ROOT_PREFIX;
use crate::keys::keystore::KeyStore;
use crate::keys::{multikey, KeyDescriptor, KeyType};
use crate::provider::{RootIdentifier, RootProvider};
use crate::record::{SignedEnvelope, UpdateCredential, MEDIA_TYPE};
use crate::relay::Relay;
use crate::resolution::{Resolution, Resolver};
use crate::signer::CredentialSigner;
use crate::{tracerr, Result};

/// Hex encoding of a 32-byte Ed25519 public key.
pub const ED25519_HEX: &str =
    "4ff08f6c58cef2ae32d8a9c8b06a812e23bdbd22ba4a4fcf0e2cd9e0d7f2e315";

/// Hex encoding of a 33-byte compressed secp256k1 public key.
pub const SECP256K1_HEX: &str =
    "02b97c30de767f084ce3080168ee293053ba33b235d7116a3263d29f1450936b71";

/// In-memory root-identifier provider. Creates deterministic did:key identifiers, each holding
/// exactly one Ed25519 key, and resolves them to minimal root documents.
#[derive(Default)]
pub struct TestRootProvider {
    identifiers: Mutex<HashMap<String, RootIdentifier>>,
    counter: AtomicUsize,
}

impl TestRootProvider {
    fn root_key(&self, n: usize) -> Result<KeyDescriptor> {
        // Vary the last byte so each created identifier gets a distinct key.
        let mut raw = hex::decode(ED25519_HEX)?;
        if let Some(last) = raw.last_mut() {
            *last = u8::try_from(n % 256).unwrap_or_default();
        }
        Ok(KeyDescriptor {
            kid: format!("key-{n}"),
            type_: KeyType::Ed25519,
            public_key_hex: hex::encode(raw),
        })
    }
}

#[allow(async_fn_in_trait)]
impl RootProvider for TestRootProvider {
    async fn create(&self, _kms: &str) -> Result<RootIdentifier> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let key = self.root_key(n)?;
        let did = format!("{ROOT_PREFIX}{}", multikey::encode(&key)?);
        let identifier = RootIdentifier {
            did: did.clone(),
            keys: vec![key],
        };
        self.identifiers
            .lock()
            .expect("lock poisoned")
            .insert(did, identifier.clone());
        Ok(identifier)
    }

    async fn get(&self, did: &str) -> Result<RootIdentifier> {
        match self.identifiers.lock().expect("lock poisoned").get(did) {
            Some(identifier) => Ok(identifier.clone()),
            None => tracerr!(Err::NotFound, "no identifier record for {}", did),
        }
    }
}

/// Resolves previously created root identifiers to a document carrying the root key in every
/// verification relationship.
#[allow(async_fn_in_trait)]
impl Resolver for TestRootProvider {
    async fn resolve(&self, did: &str) -> Result<Resolution> {
        let identifier = self.get(did).await?;
        let Some(key) = identifier.keys.first() else {
            tracerr!(Err::KeyNotFound, "identifier {} has no keys", did);
        };
        let vm_id = format!("{did}#{}", key.kid);
        let doc = DidDocument {
            id: did.to_string(),
            context: Some(serde_json::json!([DID_CONTEXT])),
            verification_method: Some(vec![VerificationMethod {
                id: vm_id.clone(),
                type_: MULTIKEY.to_string(),
                controller: did.to_string(),
                public_key_multibase: Some(multikey::encode(key)?),
                public_key_jwk: None,
            }]),
            authentication: Some(vec![vm_id.clone()]),
            assertion_method: Some(vec![vm_id.clone()]),
            key_agreement: Some(vec![vm_id]),
            ..Default::default()
        };
        Ok(Resolution {
            did_document: Some(doc),
            did_document_metadata: Some(Default::default()),
            did_resolution_metadata: Some(Default::default()),
        })
    }
}

/// Credential signer double. Attaches a fabricated proof without touching key material.
#[derive(Default)]
pub struct TestSigner {}

#[allow(async_fn_in_trait)]
impl CredentialSigner for TestSigner {
    async fn usable_proof_formats(&self, _did: &str) -> Result<Vec<String>> {
        Ok(vec!["EthereumEip712Signature2021".to_string()])
    }

    async fn sign(
        &self,
        credential: &UpdateCredential,
        proof_format: &str,
    ) -> Result<SignedEnvelope> {
        Ok(SignedEnvelope {
            media_type: MEDIA_TYPE.to_string(),
            credential: credential.clone(),
            proof: serde_json::json!({
                "type": proof_format,
                "proofValue": "z3FabricatedProofValueForTestsOnly",
            }),
        })
    }
}

/// In-memory relay double: a per-root-DID append log. Preserves duplicates and publication
/// order, exactly like the real relay contract.
#[derive(Default)]
pub struct TestRelay {
    log: Mutex<HashMap<String, Vec<SignedEnvelope>>>,
    fail_publish: bool,
}

impl TestRelay {
    /// A relay that rejects every publish request, leaving the log untouched.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            log: Mutex::new(HashMap::new()),
            fail_publish: true,
        }
    }

    /// Number of envelopes published for the root DID.
    #[must_use]
    pub fn published(&self, root_did: &str) -> usize {
        self.log.lock().expect("lock poisoned").get(root_did).map_or(0, Vec::len)
    }

    /// Append an envelope directly, bypassing the publish path. Used to simulate relay
    /// duplication or records injected by another writer.
    pub fn append(&self, envelope: SignedEnvelope) {
        let issuer = envelope.credential.issuer.clone();
        self.append_for(&issuer, envelope);
    }

    /// Append an envelope to an arbitrary root DID's log, regardless of the envelope's embedded
    /// issuer. Used to simulate a misbehaving relay serving records the identifier never issued.
    pub fn append_for(&self, root_did: &str, envelope: SignedEnvelope) {
        self.log
            .lock()
            .expect("lock poisoned")
            .entry(root_did.to_string())
            .or_default()
            .push(envelope);
    }
}

#[allow(async_fn_in_trait)]
impl Relay for TestRelay {
    async fn publish(&self, envelope: &SignedEnvelope) -> Result<()> {
        if self.fail_publish {
            tracerr!(
                Err::PublishFailed,
                "relay rejected record for {}",
                envelope.credential.issuer
            );
        }
        self.append(envelope.clone());
        Ok(())
    }

    async fn fetch_all(&self, root_did: &str) -> Result<Vec<SignedEnvelope>> {
        Ok(self.log.lock().expect("lock poisoned").get(root_did).cloned().unwrap_or_default())
    }
}

/// Key store double recording deletions, with scriptable per-key failures for partial-completion
/// coverage.
#[derive(Default)]
pub struct TestKeyStore {
    deleted: Mutex<Vec<String>>,
    fail_kids: Vec<String>,
}

impl TestKeyStore {
    /// A key store that fails deletion for the given kids.
    #[must_use]
    pub fn failing_for(fail_kids: Vec<String>) -> Self {
        Self {
            deleted: Mutex::new(Vec::new()),
            fail_kids,
        }
    }

    /// The kids deleted so far, in deletion order.
    #[must_use]
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().expect("lock poisoned").clone()
    }
}

#[allow(async_fn_in_trait)]
impl KeyStore for TestKeyStore {
    async fn delete_key(&self, kid: &str) -> Result<()> {
        if self.fail_kids.iter().any(|k| k == kid) {
            tracerr!(Err::KeyNotFound, "key {} is not deletable", kid);
        }
        self.deleted.lock().expect("lock poisoned").push(kid.to_string());
        Ok(())
    }
}
