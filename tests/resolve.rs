//! End-to-end flow over the capability doubles: create an identifier, publish AddKey updates
//! through the provider, then reconstruct the document through the resolver. Provider and
//! resolver meet only through the shared relay log.

use did_quick::{QuickProvider, QuickResolver};
use quick_core::error::Err;
use quick_core::test_utils::{
    TestKeyStore, TestRelay, TestRootProvider, TestSigner, ED25519_HEX, SECP256K1_HEX,
};
use quick_core::{
    CredentialSigner, DidDocument, KeyDescriptor, KeyType, QuickIdentifier, Relay, Service,
    Subject, UpdateCredential, UpdateKind, VerificationMethod, MULTIKEY,
};

fn ed25519_key(kid: &str) -> KeyDescriptor {
    KeyDescriptor {
        kid: kid.to_string(),
        type_: KeyType::Ed25519,
        public_key_hex: ED25519_HEX.to_string(),
    }
}

fn secp256k1_key(kid: &str) -> KeyDescriptor {
    KeyDescriptor {
        kid: kid.to_string(),
        type_: KeyType::Secp256k1,
        public_key_hex: SECP256K1_HEX.to_string(),
    }
}

async fn create_identifier<'a>(
    root: &'a TestRootProvider,
    relay: &'a TestRelay,
) -> (
    QuickProvider<&'a TestRootProvider, TestSigner, TestKeyStore, &'a TestRelay>,
    QuickIdentifier,
) {
    let provider =
        QuickProvider::new("local", root, TestSigner::default(), TestKeyStore::default(), relay);
    let identifier = provider.create_identifier().await.expect("failed to create identifier");
    (provider, identifier)
}

fn document(resolution: &quick_core::Resolution) -> &DidDocument {
    resolution.did_document.as_ref().expect("resolution has no document")
}

#[tokio::test]
async fn empty_log_resolves_to_root_document() {
    let root = TestRootProvider::default();
    let relay = TestRelay::default();
    let (_, identifier) = create_identifier(&root, &relay).await;

    let resolver = QuickResolver::new(&root, &relay);
    let resolution = resolver.resolve_did(&identifier.did).await.expect("failed to resolve");

    let doc = document(&resolution);
    assert_eq!(doc.id, identifier.did);
    assert!(doc.verification_method.as_ref().is_some_and(|vm| vm.len() == 1));
    assert!(doc.authentication.as_ref().is_some_and(|a| a.len() == 1));
    assert!(doc.assertion_method.as_ref().is_some_and(|a| a.len() == 1));
    assert!(doc.key_agreement.as_ref().is_some_and(|k| k.len() == 1));
    assert!(doc.service.is_none());
}

#[tokio::test]
async fn added_keys_project_into_document() {
    let root = TestRootProvider::default();
    let relay = TestRelay::default();
    let (provider, identifier) = create_identifier(&root, &relay).await;

    provider
        .add_key(&identifier, &ed25519_key("extra-ed"), None)
        .await
        .expect("failed to add Ed25519 key");
    provider
        .add_key(&identifier, &secp256k1_key("extra-k1"), None)
        .await
        .expect("failed to add secp256k1 key");

    let resolver = QuickResolver::new(&root, &relay);
    let resolution = resolver.resolve_did(&identifier.did).await.expect("failed to resolve");

    // 1 root key + 2 additions; the secp256k1 addition never reaches keyAgreement.
    let doc = document(&resolution);
    assert!(doc.verification_method.as_ref().is_some_and(|vm| vm.len() == 3));
    assert!(doc.authentication.as_ref().is_some_and(|a| a.len() == 3));
    assert!(doc.assertion_method.as_ref().is_some_and(|a| a.len() == 3));
    assert!(doc.key_agreement.as_ref().is_some_and(|k| k.len() == 2));

    let agreement = doc.key_agreement.as_ref().expect("missing keyAgreement");
    let k1_id = format!("{}#extra-k1", identifier.did);
    assert!(!agreement.contains(&k1_id));
    let ed_id = format!("{}#extra-ed", identifier.did);
    assert!(agreement.contains(&ed_id));
}

#[tokio::test]
async fn duplicated_envelope_collapses_on_replay() {
    let root = TestRootProvider::default();
    let relay = TestRelay::default();
    let (provider, identifier) = create_identifier(&root, &relay).await;
    let root_did = identifier.root_did().expect("missing root DID").to_string();

    provider
        .add_key(&identifier, &ed25519_key("extra-ed"), None)
        .await
        .expect("failed to add key");

    // Simulate a retried publish after a transient transport failure.
    let log = relay.fetch_all(&root_did).await.expect("failed to fetch log");
    relay.append(log[0].clone());
    assert_eq!(relay.published(&root_did), 2);

    let resolver = QuickResolver::new(&root, &relay);
    let resolution = resolver.resolve_did(&identifier.did).await.expect("failed to resolve");

    let doc = document(&resolution);
    assert!(doc.verification_method.as_ref().is_some_and(|vm| vm.len() == 2));
    assert!(doc.authentication.as_ref().is_some_and(|a| a.len() == 2));
}

#[tokio::test]
async fn malformed_records_are_skipped() {
    let root = TestRootProvider::default();
    let relay = TestRelay::default();
    let (provider, identifier) = create_identifier(&root, &relay).await;
    let root_did = identifier.root_did().expect("missing root DID").to_string();
    let signer = TestSigner::default();

    // An add-key record carrying a service subject.
    let credential = UpdateCredential::new(
        UpdateKind::AddKey,
        &root_did,
        Subject::Service(Service {
            id: format!("{}#svc-1", identifier.did),
            type_: "LinkedDomains".to_string(),
            service_endpoint: "https://example.com/".to_string(),
        }),
    );
    let envelope = signer
        .sign(&credential, "EthereumEip712Signature2021")
        .await
        .expect("failed to sign");
    relay.append(envelope);

    // An add-key record whose verification method carries no multikey.
    let credential = UpdateCredential::new(
        UpdateKind::AddKey,
        &root_did,
        Subject::VerificationMethod(VerificationMethod {
            id: format!("{}#no-multikey", identifier.did),
            type_: MULTIKEY.to_string(),
            controller: identifier.did.clone(),
            public_key_multibase: None,
            public_key_jwk: None,
        }),
    );
    let envelope = signer
        .sign(&credential, "EthereumEip712Signature2021")
        .await
        .expect("failed to sign");
    relay.append(envelope);

    provider
        .add_key(&identifier, &ed25519_key("extra-ed"), None)
        .await
        .expect("failed to add key");

    // The malformed records are skipped; the well-formed addition still projects.
    let resolver = QuickResolver::new(&root, &relay);
    let resolution = resolver.resolve_did(&identifier.did).await.expect("failed to resolve");
    let doc = document(&resolution);
    assert!(doc.verification_method.as_ref().is_some_and(|vm| vm.len() == 2));
    let ed_id = format!("{}#extra-ed", identifier.did);
    assert!(doc.authentication.as_ref().is_some_and(|a| a.contains(&ed_id)));
}

#[tokio::test]
async fn mismatched_issuer_is_rejected() {
    let root = TestRootProvider::default();
    let relay = TestRelay::default();
    let (provider, identifier) = create_identifier(&root, &relay).await;
    let (_, other) = create_identifier(&root, &relay).await;
    let root_did = identifier.root_did().expect("missing root DID").to_string();

    provider
        .add_key(&other, &ed25519_key("intruder"), None)
        .await
        .expect("failed to add key");

    // Replant the other identifier's record into this identifier's log, as a misbehaving relay
    // could. The embedded issuer no longer matches the resolved root DID.
    let other_root = other.root_did().expect("missing root DID");
    let log = relay.fetch_all(other_root).await.expect("failed to fetch log");
    relay.append_for(&root_did, log[0].clone());
    assert_eq!(relay.published(&root_did), 1);

    let resolver = QuickResolver::new(&root, &relay);
    let resolution = resolver.resolve_did(&identifier.did).await.expect("failed to resolve");
    let doc = document(&resolution);
    assert!(doc.verification_method.as_ref().is_some_and(|vm| vm.len() == 1));
}

#[tokio::test]
async fn wrong_scheme_fails_before_resolution() {
    let root = TestRootProvider::default();
    let relay = TestRelay::default();
    let resolver = QuickResolver::new(&root, &relay);

    let err = resolver
        .resolve_did("did:web:example.com")
        .await
        .expect_err("expected error");
    assert!(err.is(Err::InvalidScheme));
}
