//! The types of errors that might occur while signing or verifying.

use thiserror::Error;

/// Signing an intent failed. No partial artifact is produced.
#[derive(Debug, Error)]
pub enum SignError {
    /// The encoded intent does not occur exactly once in the carrier, so the
    /// carrier cannot be split into a unique prefix and postfix.
    #[error("encoded intent occurs {occurrences} times in the carrier, expected exactly once")]
    AmbiguousEncoding {
        /// The number of times the encoded intent occurs.
        occurrences: usize,
    },
    /// No signers were given.
    #[error("at least one signer is required")]
    NoSigners,
    /// A signer failed or was abandoned before producing a signature.
    #[error("signing aborted: {0}")]
    SigningAborted(String),
}

/// A signed intention failed verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The number of signatures does not match the number of keys.
    #[error("expected {expected} signatures, found {found}")]
    SignatureCount {
        /// The number of keys given.
        expected: usize,
        /// The number of signatures carried.
        found: usize,
    },
    /// A signature does not verify under its key.
    #[error("signature {index} is invalid: {source}")]
    InvalidSignature {
        /// Position of the signature and its key.
        index: usize,
        /// The underlying verification failure.
        source: ed25519_dalek::SignatureError,
    },
}
