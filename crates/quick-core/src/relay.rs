//! Relay capability. The relay is an external append-only store that durably holds published
//! update envelopes, queryable by root identifier. This crate only appends and reads, never
//! deletes or reorders.

use crate::record::SignedEnvelope;
use crate::Result;

/// Durable, per-root-DID append log of signed update envelopes.
#[allow(async_fn_in_trait)]
pub trait Relay {
    /// Push a signed envelope to the log keyed by the envelope's embedded issuer DID. Safe to
    /// call concurrently; concurrent publishes for the same identifier may interleave in log
    /// order but each record is preserved.
    ///
    /// # Errors
    ///
    /// * `Err::PublishFailed` - The relay rejected the record.
    /// * `Err::RequestError` / `Err::Timeout` - The transport failed. A retried publish after a
    /// transient failure risks a duplicate entry; resolvers are duplicate-tolerant.
    async fn publish(&self, envelope: &SignedEnvelope) -> Result<()>;

    /// Fetch every envelope ever published for the root DID, in publication order. Duplicate
    /// entries are returned as-is: deduplication is the resolver's job, which keeps the relay a
    /// pure append log.
    async fn fetch_all(&self, root_did: &str) -> Result<Vec<SignedEnvelope>>;
}

/// A shared reference to a relay is itself a relay, so a provider and a resolver can publish to
/// and read from the same log.
#[allow(async_fn_in_trait)]
impl<T: Relay> Relay for &T {
    async fn publish(&self, envelope: &SignedEnvelope) -> Result<()> {
        (**self).publish(envelope).await
    }

    async fn fetch_all(&self, root_did: &str) -> Result<Vec<SignedEnvelope>> {
        (**self).fetch_all(root_did).await
    }
}
