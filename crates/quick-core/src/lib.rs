//! # Quick Core
//! Types, capability traits and encoding functions shared by the did:quick DID method crates.
//!
//! The did:quick method wraps a conventional root identifier and mutates it by appending signed
//! update credentials to an external relay log. Everything the method consumes from the outside
//! world is expressed here as a narrow trait: root-identifier provisioning, root resolution,
//! credential signing, key management and relay I/O. Each can be substituted with the doubles in
//! [`test_utils`].

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub(crate) mod document;
pub mod error;
pub(crate) mod identifier;
pub(crate) mod keys;
pub(crate) mod provider;
pub(crate) mod record;
pub(crate) mod relay;
pub(crate) mod resolution;
pub(crate) mod signer;
pub mod test_utils;

pub use document::service::Service;
pub use document::verification_method::{VerificationMethod, MULTIKEY};
pub use document::{DidDocument, DID_CONTEXT};
pub use identifier::{QuickIdentifier, QUICK_PREFIX, ROOT_PREFIX};
pub use keys::keystore::KeyStore;
pub use keys::{multikey, KeyDescriptor, KeyType};
pub use provider::{RootIdentifier, RootProvider};
pub use record::{
    RelayRequest, SignedEnvelope, Subject, UpdateCredential, UpdateKind, CREDENTIALS_CONTEXT,
    MEDIA_TYPE, QUICK_UPDATE, RELAY_REQUEST_TYPE, VERIFIABLE_CREDENTIAL,
};
pub use relay::Relay;
pub use resolution::{DocumentMetadata, Resolution, ResolutionMetadata, Resolver};
pub use signer::CredentialSigner;

/// Result type for the did:quick crates.
pub type Result<T, E = error::Error> = core::result::Result<T, E>;
