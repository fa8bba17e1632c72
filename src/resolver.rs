//! Resolver for the did:quick method. Resolves the wrapped root document, fetches the update log
//! from the relay, validates and replays it, and projects the result into a single DID document.

use std::collections::HashSet;

use quick_core::error::Err;
use quick_core::{
    multikey, tracerr, DidDocument, KeyType, Relay, Resolution, Resolver, Result, Subject,
    UpdateKind, QUICK_PREFIX,
};

/// Resolver for did:quick identifiers. The root resolver and the relay are injected as narrow
/// capabilities.
pub struct QuickResolver<D, R>
where
    D: Resolver,
    R: Relay,
{
    /// Resolver for the wrapped root DID.
    root: D,
    /// Update-record relay.
    relay: R,
}

impl<D, R> QuickResolver<D, R>
where
    D: Resolver,
    R: Relay,
{
    /// Constructor.
    pub const fn new(root: D, relay: R) -> Self {
        Self { root, relay }
    }

    /// Resolve a did:quick DID by replaying its update log over the root document.
    ///
    /// The projection is purely additive for AddKey records, so replay order does not affect the
    /// final content. Duplicate log entries collapse onto the first occurrence of a
    /// verification-method id. Envelopes whose embedded issuer does not match the root DID, and
    /// malformed AddKey records, are skipped with a warning rather than failing the resolution:
    /// one bad log entry must never brick the DID. Cryptographic proof verification remains the
    /// credential subsystem's responsibility.
    ///
    /// # Errors
    ///
    /// * [`Err::InvalidScheme`] - the DID does not carry the did:quick prefix. Checked before
    /// any network call.
    /// * [`Err::ResolutionFailed`] - the root resolver errored or returned no document.
    /// * Relay fetch errors surface unchanged; no partial document is ever returned.
    pub async fn resolve_did(&self, did: &str) -> Result<Resolution> {
        let Some(root_did) = did.strip_prefix(QUICK_PREFIX) else {
            tracerr!(Err::InvalidScheme, "DID not of type did:quick: {}", did);
        };

        let resolution = match self.root.resolve(root_did).await {
            Ok(res) => res,
            Err(e) => tracerr!(Err::ResolutionFailed, "failed to resolve root DID: {}", e),
        };
        let Some(mut doc) = resolution.did_document else {
            tracerr!(Err::ResolutionFailed, "root resolver returned no document for {}", root_did);
        };

        let log = self.relay.fetch_all(root_did).await?;

        let had_methods = doc.verification_method.is_some();
        let had_authentication = doc.authentication.is_some();
        let had_assertion = doc.assertion_method.is_some();
        let had_agreement = doc.key_agreement.is_some();

        let mut methods = doc.verification_method.take().unwrap_or_default();
        let mut authentication = doc.authentication.take().unwrap_or_default();
        let mut assertion = doc.assertion_method.take().unwrap_or_default();
        let mut agreement = doc.key_agreement.take().unwrap_or_default();

        let mut seen: HashSet<String> = methods.iter().map(|vm| vm.id.clone()).collect();

        for envelope in &log {
            if envelope.credential.issuer != root_did {
                tracing::warn!(
                    "rejecting update record issued by {} for {}",
                    envelope.credential.issuer,
                    root_did
                );
                continue;
            }
            let Some(kind) = envelope.credential.kind() else {
                continue;
            };
            match kind {
                UpdateKind::AddKey => {
                    let Subject::VerificationMethod(vm) = &envelope.credential.credential_subject
                    else {
                        tracing::warn!(
                            "skipping add-key record for {}: subject is not a verification method",
                            root_did
                        );
                        continue;
                    };
                    let Some(encoded) = &vm.public_key_multibase else {
                        tracing::warn!("skipping verification method {}: no multikey", vm.id);
                        continue;
                    };
                    let key_type = match multikey::decode(encoded) {
                        Ok((_, key_type)) => key_type,
                        Err(e) => {
                            tracing::warn!("skipping verification method {}: {}", vm.id, e);
                            continue;
                        }
                    };
                    // The relay log may contain duplicates; collapse on verification-method id.
                    if !seen.insert(vm.id.clone()) {
                        continue;
                    }
                    methods.push(vm.clone());
                    if matches!(key_type, KeyType::Ed25519 | KeyType::Secp256k1) {
                        authentication.push(vm.id.clone());
                        assertion.push(vm.id.clone());
                    }
                    // Fixed policy: only Ed25519 additions are key-agreement-capable.
                    if key_type == KeyType::Ed25519 {
                        agreement.push(vm.id.clone());
                    }
                }
                UpdateKind::AddService | UpdateKind::RemoveKey | UpdateKind::RemoveService => {
                    // No replay semantics defined yet for these kinds.
                }
            }
        }

        doc.id = did.to_string();
        doc.verification_method = restore(had_methods, methods);
        doc.authentication = restore(had_authentication, authentication);
        doc.assertion_method = restore(had_assertion, assertion);
        doc.key_agreement = restore(had_agreement, agreement);

        Ok(Resolution {
            did_document: Some(doc),
            did_document_metadata: Some(Default::default()),
            did_resolution_metadata: Some(Default::default()),
        })
    }
}

// Keep absent lists absent and present lists present, even when empty, so an unmodified root
// document round-trips unchanged.
fn restore<T>(was_present: bool, v: Vec<T>) -> Option<Vec<T>> {
    if v.is_empty() && !was_present {
        None
    } else {
        Some(v)
    }
}

impl<D, R> Resolver for QuickResolver<D, R>
where
    D: Resolver,
    R: Relay,
{
    async fn resolve(&self, did: &str) -> Result<Resolution> {
        self.resolve_did(did).await
    }
}
