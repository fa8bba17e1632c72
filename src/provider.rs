//! Identifier provider for the did:quick method. Creates derived identifiers wrapping a root
//! did:key identifier and turns client-requested mutations into signed update records published
//! to the relay.

use quick_core::error::Err;
use quick_core::{
    multikey, tracerr, CredentialSigner, KeyDescriptor, KeyStore, QuickIdentifier, Relay, Result,
    RootProvider, Service, Subject, UpdateCredential, UpdateKind, VerificationMethod, MULTIKEY,
    QUICK_PREFIX, ROOT_PREFIX,
};

/// Identifier provider for did:quick identifiers. External collaborators are injected as narrow
/// capabilities so each can be substituted independently.
pub struct QuickProvider<P, S, K, R>
where
    P: RootProvider,
    S: CredentialSigner,
    K: KeyStore,
    R: Relay,
{
    /// Key-management backend used for root-identifier creation.
    default_kms: String,
    /// Root-identifier provider.
    root: P,
    /// Credential-signing subsystem.
    signer: S,
    /// Key-management subsystem.
    pub(crate) keystore: K,
    /// Update-record relay.
    pub(crate) relay: R,
}

impl<P, S, K, R> QuickProvider<P, S, K, R>
where
    P: RootProvider,
    S: CredentialSigner,
    K: KeyStore,
    R: Relay,
{
    /// Constructor.
    pub fn new(default_kms: &str, root: P, signer: S, keystore: K, relay: R) -> Self {
        Self {
            default_kms: default_kms.to_string(),
            root,
            signer,
            keystore,
            relay,
        }
    }

    /// Create a derived identifier by wrapping a freshly created root identifier. The root
    /// provider generates one key in the configured key-management backend; no other side
    /// effects occur.
    ///
    /// # Errors
    ///
    /// * [`Err::KeyNotFound`] - the root provider returned an identifier with no keys.
    pub async fn create_identifier(&self) -> Result<QuickIdentifier> {
        let root = self.root.create(&self.default_kms).await?;
        let Some(controller) = root.keys.first() else {
            tracerr!(Err::KeyNotFound, "root provider created {} with no keys", root.did);
        };
        Ok(QuickIdentifier {
            did: format!("{QUICK_PREFIX}{}", root.did),
            controller_key_id: controller.kid.clone(),
            keys: root.keys.clone(),
            services: Vec::new(),
        })
    }

    /// Add a key to the identifier by publishing a signed AddKey update record. The resolved
    /// document reflects the addition once the record is replayed.
    ///
    /// # Arguments
    ///
    /// * `identifier` - The derived identifier to add the key to.
    /// * `key` - The key to add. Must be Ed25519 or secp256k1.
    /// * `proof_format` - Proof format for the update credential. Defaults to the signer's first
    /// usable format.
    ///
    /// # Errors
    ///
    /// * [`Err::InvalidScheme`] - the identifier's DID is not a did:quick DID.
    /// * [`Err::InvalidRootDid`] - the wrapped root DID is not a did:key DID.
    /// * [`Err::NotFound`] - the root identifier record does not exist.
    /// * [`Err::UnsupportedKeyType`] - the key type has no verification-method mapping. Nothing
    /// is published.
    /// * [`Err::PublishFailed`] - the relay rejected the record.
    pub async fn add_key(
        &self,
        identifier: &QuickIdentifier,
        key: &KeyDescriptor,
        proof_format: Option<&str>,
    ) -> Result<()> {
        let Some(root_did) = identifier.did.strip_prefix(QUICK_PREFIX) else {
            tracerr!(Err::InvalidScheme, "DID not of type did:quick: {}", identifier.did);
        };
        if !root_did.starts_with(ROOT_PREFIX) {
            tracerr!(Err::InvalidRootDid, "root DID not of type did:key: {}", root_did);
        }
        let _root = self.root.get(root_did).await?;

        // Encode before signing so an unsupported key type can never publish a record.
        let vm = VerificationMethod {
            id: format!("{}#{}", identifier.did, key.kid),
            type_: MULTIKEY.to_string(),
            controller: identifier.did.clone(),
            public_key_multibase: Some(multikey::encode(key)?),
            public_key_jwk: None,
        };

        let format = match proof_format {
            Some(f) => f.to_string(),
            None => {
                let formats = self.signer.usable_proof_formats(root_did).await?;
                let Some(first) = formats.first() else {
                    tracerr!(Err::SigningError, "no usable proof format for {}", root_did);
                };
                first.clone()
            }
        };

        let credential =
            UpdateCredential::new(UpdateKind::AddKey, root_did, Subject::VerificationMethod(vm));
        let envelope = self.signer.sign(&credential, &format).await?;
        self.relay.publish(&envelope).await
    }

    /// Add a service to the identifier. No publication semantics are defined for service
    /// mutations yet.
    ///
    /// # Errors
    ///
    /// * [`Err::NotSupported`] - always.
    pub async fn add_service(
        &self,
        identifier: &QuickIdentifier,
        _service: &Service,
    ) -> Result<()> {
        tracerr!(Err::NotSupported, "add_service not supported for {}", identifier.did);
    }

    /// Remove a key from the identifier. No removal semantics are defined yet: the update log
    /// has no ordering guarantee, so removal would be ill-defined.
    ///
    /// # Errors
    ///
    /// * [`Err::NotSupported`] - always.
    pub async fn remove_key(&self, identifier: &QuickIdentifier, _kid: &str) -> Result<()> {
        tracerr!(Err::NotSupported, "remove_key not supported for {}", identifier.did);
    }

    /// Remove a service from the identifier.
    ///
    /// # Errors
    ///
    /// * [`Err::NotSupported`] - always.
    pub async fn remove_service(&self, identifier: &QuickIdentifier, _id: &str) -> Result<()> {
        tracerr!(Err::NotSupported, "remove_service not supported for {}", identifier.did);
    }

    /// Update the identifier record itself.
    ///
    /// # Errors
    ///
    /// * [`Err::NotSupported`] - always. The identifier record is immutable; all mutation
    /// happens through the update log.
    pub async fn update_identifier(&self, identifier: &QuickIdentifier) -> Result<()> {
        tracerr!(Err::NotSupported, "update_identifier not supported for {}", identifier.did);
    }

    /// Delete each key owned by the identifier from the key-management subsystem. Deletion is
    /// best-effort per key: a failed deletion is logged and skipped, and the returned list holds
    /// the kids actually removed so callers can detect partial completion.
    pub async fn delete_identifier(&self, identifier: &QuickIdentifier) -> Result<Vec<String>> {
        let mut removed = Vec::new();
        for key in &identifier.keys {
            match self.keystore.delete_key(&key.kid).await {
                Ok(()) => removed.push(key.kid.clone()),
                Err(e) => {
                    tracing::warn!("failed to delete key {}: {}", key.kid, e);
                }
            }
        }
        Ok(removed)
    }
}
