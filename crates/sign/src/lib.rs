//! Detached signing and verification of Bullet intents.
//!
//! An intent is signed by embedding its canonical encoding in a carrier
//! transaction (see [`carrier`]) and signing the carrier through a COSE
//! `Sig_structure` (see [`cose`]). The carrier is then split around the
//! encoded intent so that only the `prefix` and `postfix` need to travel with
//! the [`SignedIntention`]. A consumer re-encodes the intent, reassembles the
//! carrier and checks the signatures against it.
//!
//! Includes [`prepare`], [`sign_intent`], [`reconstruct`], [`signing_message`]
//! and [`verify`].

#![deny(missing_docs)]
#![deny(unsafe_code)]

use bullet_types::{
    config::BulletConfig, intent::encode_intent, Address, Credential, Hash28, Intent, Network,
    SignedIntention,
};
use ed25519_dalek::{Verifier, VerifyingKey};

pub mod carrier;
pub mod cose;
mod error;
mod signer;

#[doc(inline)]
pub use error::{SignError, VerifyError};
#[doc(inline)]
pub use signer::{KeySigner, Signer};

#[doc(no_inline)]
pub use bullet_types;
#[doc(no_inline)]
pub use ed25519_dalek;

/// Who signs and on which network.
///
/// The signer is named by its payment credential alone. The carrier pays to,
/// and the COSE header names, the enterprise address of that credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SigningContext {
    /// The network the signer's address belongs to.
    pub network: Network,
    /// The signer's payment credential.
    pub credential: Credential,
}

/// An intent whose carrier has been built and split, ready to be signed.
#[derive(Clone, Debug)]
pub struct PreparedIntention {
    user_stake: Hash28,
    intent: Intent,
    address: Vec<u8>,
    prefix: Vec<u8>,
    postfix: Vec<u8>,
    message: Vec<u8>,
}

impl SigningContext {
    /// A context for the given network and signer credential.
    pub fn new(network: Network, credential: Credential) -> Self {
        Self {
            network,
            credential,
        }
    }

    /// A context for a signer on the configured network.
    pub fn from_config(config: &BulletConfig, credential: Credential) -> Self {
        Self::new(config.network, credential)
    }

    /// The signer's enterprise address.
    pub fn address(&self) -> Address {
        Address::enterprise(self.credential)
    }

    /// The bytes of [`SigningContext::address`] on the context's network.
    pub fn carrier_address(&self) -> Vec<u8> {
        self.address().to_bytes(self.network)
    }
}

impl PreparedIntention {
    /// The bytes every signer is asked to sign.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// The address bytes passed to every signer.
    pub fn address(&self) -> &[u8] {
        &self.address
    }

    /// Carrier bytes before the encoded intent.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Carrier bytes after the encoded intent.
    pub fn postfix(&self) -> &[u8] {
        &self.postfix
    }

    /// Request one signature from each signer, in order.
    ///
    /// Fails with [`SignError::SigningAborted`] as soon as a signer fails, in
    /// which case no signed intention is produced.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(signers = signers.len())))]
    pub async fn sign<S: Signer>(self, signers: &[S]) -> Result<SignedIntention, SignError> {
        if signers.is_empty() {
            return Err(SignError::NoSigners);
        }
        let mut signatures = Vec::with_capacity(signers.len());
        for signer in signers {
            let signature = signer
                .sign(&self.address, self.message.clone())
                .await
                .map_err(|err| SignError::SigningAborted(err.to_string()))?;
            signatures.push(signature);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("collected {} signatures", signatures.len());

        Ok(SignedIntention {
            user_stake: self.user_stake,
            intent: self.intent,
            prefix: self.prefix,
            postfix: self.postfix,
            signatures,
        })
    }
}

/// Build the carrier for `intent`, split it around the encoded intent and
/// compute the message to sign.
///
/// No signer is involved, so a failure here never reaches a wallet.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
pub fn prepare(
    user_stake: Hash28,
    intent: Intent,
    ctx: &SigningContext,
) -> Result<PreparedIntention, SignError> {
    let payload = encode_intent(&intent);
    let address = ctx.carrier_address();
    let carrier = carrier::encode(&address, &payload);
    let carrier::Split { prefix, postfix } = carrier::split(&carrier, &payload)?;
    let message = cose::signing_message(&address, &carrier);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        payload = payload.len(),
        prefix = prefix.len(),
        postfix = postfix.len(),
        "prepared carrier"
    );

    Ok(PreparedIntention {
        user_stake,
        intent,
        address,
        prefix,
        postfix,
        message,
    })
}

/// Prepare and sign an intent with a single signer.
pub async fn sign_intent<S: Signer>(
    user_stake: Hash28,
    intent: Intent,
    ctx: &SigningContext,
    signer: &S,
) -> Result<SignedIntention, SignError> {
    prepare(user_stake, intent, ctx)?
        .sign(std::slice::from_ref(signer))
        .await
}

/// The carrier encoding a signed intention was signed over:
/// `prefix ++ encode_intent(intent) ++ postfix`.
pub fn reconstruct(signed: &SignedIntention) -> Vec<u8> {
    signed.carrier()
}

/// The message the signatures of `signed` must verify against.
pub fn signing_message(ctx: &SigningContext, signed: &SignedIntention) -> Vec<u8> {
    cose::signing_message(&ctx.carrier_address(), &reconstruct(signed))
}

/// Verify every signature of `signed` against the key at the same position.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
pub fn verify(
    signed: &SignedIntention,
    ctx: &SigningContext,
    keys: &[VerifyingKey],
) -> Result<(), VerifyError> {
    if signed.signatures.len() != keys.len() {
        return Err(VerifyError::SignatureCount {
            expected: keys.len(),
            found: signed.signatures.len(),
        });
    }
    let message = signing_message(ctx, signed);
    for (index, (signature, key)) in signed.signatures.iter().zip(keys).enumerate() {
        let signature = ed25519_dalek::Signature::from_bytes(&signature.0);
        key.verify(&message, &signature)
            .map_err(|source| VerifyError::InvalidSignature { index, source })?;
    }
    Ok(())
}
