//! Definition for a DID document resolver and its response types.

use serde::{Deserialize, Serialize};

use crate::document::DidDocument;

/// Metadata associated with a DID resolution response.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionMetadata {
    /// The content type of the response. e.g. "application/did+ld+json".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// An error code if the resolution failed. See
    /// https://www.w3.org/TR/did-spec-registries/#error for a list of valid strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Metadata associated with a DID document.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// The time the document was created, as an XML datetime normalized to UTC without
    /// sub-second precision. For example: 2020-12-20T19:17:47Z.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// The time the document was last updated. Same formatting rules as `created`. Omitted if
    /// the document has never been updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// Whether the DID has been deactivated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deactivated: Option<bool>,
}

/// Return type from a DID document resolution.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// The DID document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_document: Option<DidDocument>,
    /// Metadata associated with the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_document_metadata: Option<DocumentMetadata>,
    /// Metadata associated with the response to the resolution request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_resolution_metadata: Option<ResolutionMetadata>,
}

/// A Resolver is responsible for resolving a DID to a DID document representation. The did:quick
/// resolver consumes an implementation of this trait for root DIDs and provides one for derived
/// DIDs.
#[allow(async_fn_in_trait)]
pub trait Resolver {
    /// Resolve a DID to a DID document.
    ///
    /// # Arguments
    ///
    /// * `did` - The DID to resolve.
    ///
    /// # Returns
    ///
    /// The DID document and associated metadata. If the resolution fails, it should return an
    /// `Err::ResolutionFailed` or `Err::NotFound`.
    async fn resolve(&self, did: &str) -> crate::Result<Resolution>;
}

#[allow(async_fn_in_trait)]
impl<T: Resolver> Resolver for &T {
    async fn resolve(&self, did: &str) -> crate::Result<Resolution> {
        (**self).resolve(did).await
    }
}
