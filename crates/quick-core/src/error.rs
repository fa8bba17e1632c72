//! # Errors
//!
//! Error types shared by the did:quick crates, including the traits implemented by external
//! capability providers.

use std::fmt::Display;

use thiserror::Error;

/// Simplify creation of errors with tracing.
///
/// # Example
/// ```
/// use quick_core::error::Err;
/// use quick_core::{tracerr, Result};
///
/// fn with_msg() -> Result<()> {
///     tracerr!(Err::InvalidFormat, "message: {}", "some message")
/// }
///
/// fn no_msg() -> Result<()> {
///     tracerr!(Err::InvalidFormat)
/// }
/// ```
#[macro_export]
macro_rules! tracerr {
    // with context
    ($code:expr, $($msg:tt)*) => {
        {
        use $crate::error::Context as _;
        tracing::error!($($msg)*);
        return Err($code).context(format!($($msg)*));
        }
    };
    // no context
    ($code:expr) => {
        {
        tracing::error!("{}", $code);
        return Err($code.into());
        }
    }
}

/// Public error type for the did:quick crates.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct Error(#[from] anyhow::Error);

impl Error {
    /// Serialize the error to a JSON object with a stable error code and a human-readable
    /// description.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.0.root_cause().to_string(),
            "error_description": self.to_string(),
        })
    }

    /// Returns true if `E` is the type held by this error object.
    #[must_use]
    pub fn is(&self, err: Err) -> bool {
        self.0.downcast_ref::<Err>().map_or(false, |e| e == &err)
    }
}

/// Typed errors for the did:quick crates.
#[derive(Clone, Copy, Error, Debug, PartialEq, Eq)]
pub enum Err {
    /// The supplied DID does not carry the did:quick scheme prefix. User input error, not
    /// retried.
    #[error("invalid_scheme")]
    InvalidScheme,

    /// The root DID wrapped by a did:quick identifier is not of the expected root method.
    #[error("invalid_root_did")]
    InvalidRootDid,

    /// No identifier record was found for the requested DID.
    #[error("not_found")]
    NotFound,

    /// The root resolver errored or returned no document for the root DID.
    #[error("resolution_failed")]
    ResolutionFailed,

    /// The key type has no verification-method mapping. Always fatal to the operation, never
    /// silently dropped.
    #[error("unsupported_key_type")]
    UnsupportedKeyType,

    /// Malformed multibase or unrecognized multicodec input.
    #[error("decode_error")]
    DecodeError,

    /// The relay rejected a publish request. Safe to retry at the caller's discretion.
    #[error("publish_failed")]
    PublishFailed,

    /// A request to a downstream API failed to connect or get a response.
    #[error("request_error")]
    RequestError,

    /// A downstream call exceeded its bounded timeout.
    #[error("timeout")]
    Timeout,

    /// The requested mutation kind is explicitly unimplemented.
    #[error("not_supported")]
    NotSupported,

    /// No key was found for the requested identifier or operation.
    #[error("key_not_found")]
    KeyNotFound,

    /// The credential subsystem failed to produce a signed envelope.
    #[error("signing_error")]
    SigningError,

    /// Invalid format. (See context for details)
    #[error("invalid_format")]
    InvalidFormat,

    /// An error occurred trying to deserialize data.
    #[error("deserialization_error")]
    DeserializationError,

    /// An unspecified error occurred (see context for information)
    #[error("unknown")]
    Unknown,
}

/// Context is used to decorate errors with useful context information.
pub trait Context<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// Adds context to the error.
    ///
    /// # Errors
    ///
    /// * Original error with context appended.
    fn context<C>(self, context: C) -> Result<T, Error>
    where
        C: Display + Send + Sync + 'static;
}

impl<T, E> Context<T, E> for core::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
    {
        match self {
            Ok(ok) => Ok(ok),
            Err(e) => Err(Error(anyhow::Error::from(e).context(context))),
        }
    }
}

impl From<Err> for Error {
    fn from(error: Err) -> Self {
        Error(error.into())
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Error {
        Error(err.into())
    }
}

impl From<multibase::Error> for Error {
    fn from(err: multibase::Error) -> Error {
        Error(err.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error(err.into())
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use super::*;
    use crate::Result;

    #[test]
    fn base_err() {
        let err: Error = Err::InvalidScheme.into();

        assert_eq!(
            err.to_json(),
            json!({"error":"invalid_scheme","error_description":"invalid_scheme"})
        );
    }

    #[test]
    fn context_err() {
        let res: Result<()> = Err(Err::UnsupportedKeyType).context("no mapping for X25519");
        let err = res.expect_err("expected error");

        assert!(err.is(Err::UnsupportedKeyType));
        assert_eq!(
            err.to_json(),
            json!({"error":"unsupported_key_type","error_description":"no mapping for X25519"})
        );
    }

    #[test]
    fn test_macro() {
        let subscriber = FmtSubscriber::builder().with_max_level(Level::ERROR).finish();
        tracing::subscriber::set_global_default(subscriber).expect("setting subscriber failed");

        let Err(e) = run_macro() else {
            panic!("expected error");
        };

        assert_eq!(e.to_string(), "test me");
    }

    fn run_macro() -> Result<()> {
        tracerr!(Err::InvalidFormat, "test {}", "me")
    }
}
