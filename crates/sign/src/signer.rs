//! The signing capability.

use bullet_types::Signature;
use core::{convert::Infallible, fmt, future::Future};
use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey};
use std::future::{ready, Ready};

/// Access to a key that signs messages on behalf of an address.
///
/// The signer may be a wallet behind an asynchronous round trip. Dropping the
/// returned future abandons the request.
pub trait Signer {
    /// An error type describing why a signature could not be produced.
    type Error: fmt::Debug + fmt::Display;
    /// The future type returned from the `sign` method.
    ///
    /// ## Unpin
    ///
    /// This `Future` must be `Unpin` so that a batch of signing requests can
    /// be polled without pinning each one. In-memory implementations may use
    /// `std::future::Ready`, while implementations that call `async`
    /// functions may need to `Box` the anonymous future.
    type Future: Future<Output = Result<Signature, Self::Error>> + Unpin;

    /// Sign `message` with the key controlling `address`.
    fn sign(&self, address: &[u8], message: Vec<u8>) -> Self::Future;
}

/// A [`Signer`] backed by an in-memory Ed25519 key.
#[derive(Clone, Debug)]
pub struct KeySigner(SigningKey);

impl KeySigner {
    /// Wrap the given key.
    pub fn new(key: SigningKey) -> Self {
        Self(key)
    }

    /// Construct from the 32 byte secret key.
    pub fn from_bytes(secret: &[u8; 32]) -> Self {
        Self(SigningKey::from_bytes(secret))
    }

    /// The public half of the key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.0.verifying_key()
    }
}

impl From<SigningKey> for KeySigner {
    fn from(key: SigningKey) -> Self {
        Self(key)
    }
}

impl Signer for KeySigner {
    type Error = Infallible;
    type Future = Ready<Result<Signature, Self::Error>>;

    fn sign(&self, _address: &[u8], message: Vec<u8>) -> Self::Future {
        ready(Ok(Signature(self.0.sign(&message).to_bytes())))
    }
}

impl<S: Signer + ?Sized> Signer for &S {
    type Error = S::Error;
    type Future = S::Future;

    fn sign(&self, address: &[u8], message: Vec<u8>) -> Self::Future {
        (**self).sign(address, message)
    }
}
