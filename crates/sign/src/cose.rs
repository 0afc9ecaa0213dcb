//! # COSE signing message
//! The `Sig_structure` of a COSE_Sign1 message with detached content, which
//! is what an Ed25519 wallet signs for data signing.
//!
//! ```text
//! Sig_structure = ["Signature1", bstr(protected), h'', bstr(content)]
//! protected     = { 1: -8, "address": bstr(address) }
//! ```

use minicbor::{encode::Write, Encoder};


/// Header label of the signing algorithm.
const ALG: u8 = 1;

/// COSE algorithm id for EdDSA.
const EDDSA: i8 = -8;

/// Context string of a single-signer signature.
const SIGNATURE1: &str = "Signature1";

/// Encode the protected header map for the given signer address.
pub fn protected_header(address: &[u8]) -> Vec<u8> {
    let mut e = Encoder::new(Vec::new());
    write_protected_header(&mut e, address)
        .expect("writing CBOR into a `Vec<u8>` should never fail");
    e.into_writer()
}

fn write_protected_header<W: Write>(
    e: &mut Encoder<W>,
    address: &[u8],
) -> Result<(), minicbor::encode::Error<W::Error>> {
    e.map(2)?;
    e.u8(ALG)?.i8(EDDSA)?;
    e.str("address")?.bytes(address)?;
    Ok(())
}

/// Encode the `Sig_structure` over `content` for the given signer address.
pub fn signing_message(address: &[u8], content: &[u8]) -> Vec<u8> {
    let protected = protected_header(address);
    let mut e = Encoder::new(Vec::new());
    e.array(4)
        .and_then(|e| e.str(SIGNATURE1))
        .and_then(|e| e.bytes(&protected))
        .and_then(|e| e.bytes(&[]))
        .and_then(|e| e.bytes(content))
        .expect("writing CBOR into a `Vec<u8>` should never fail");
    e.into_writer()
}
