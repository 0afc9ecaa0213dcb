//! # Carrier transaction
//! A minimal transaction that embeds an encoded intent as the inline datum of
//! its only output. Wallets that only sign transactions or COSE messages can
//! sign the carrier, and the intent bytes stay recoverable from it.
//!
//! ```text
//! [ { 0: [], 1: [output], 2: 0 }, {}, true, null ]
//! output = { 0: address, 1: 0, 2: [1, #6.24(intent)] }
//! ```
//!
//! The output carries no value and the transaction spends nothing, so it can
//! never be submitted.

use crate::error::SignError;
use minicbor::{data::Tag, encode::Write, Encoder};


/// CBOR tag for embedded CBOR data items.
const ENCODED_CBOR: u64 = 24;

/// Inline datum discriminant of a post-Alonzo datum option.
const INLINE_DATUM: u8 = 1;

/// The carrier split around its embedded intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split {
    /// Bytes before the encoded intent.
    pub prefix: Vec<u8>,
    /// Bytes after the encoded intent.
    pub postfix: Vec<u8>,
}

/// Encode the carrier transaction for the given address and encoded intent.
pub fn encode(address: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut e = Encoder::new(Vec::new());
    write(&mut e, address, payload).expect("writing CBOR into a `Vec<u8>` should never fail");
    e.into_writer()
}

fn write<W: Write>(
    e: &mut Encoder<W>,
    address: &[u8],
    payload: &[u8],
) -> Result<(), minicbor::encode::Error<W::Error>> {
    // Body.
    e.array(4)?.map(3)?;
    e.u8(0)?.array(0)?;
    e.u8(1)?.array(1)?;
    write_output(e, address, payload)?;
    e.u8(2)?.u8(0)?;
    // Witnesses, validity, auxiliary data.
    e.map(0)?.bool(true)?.null()?;
    Ok(())
}

fn write_output<W: Write>(
    e: &mut Encoder<W>,
    address: &[u8],
    payload: &[u8],
) -> Result<(), minicbor::encode::Error<W::Error>> {
    e.map(3)?;
    e.u8(0)?.bytes(address)?;
    e.u8(1)?.u8(0)?;
    e.u8(2)?
        .array(2)?
        .u8(INLINE_DATUM)?
        .tag(Tag::new(ENCODED_CBOR))?
        .bytes(payload)?;
    Ok(())
}

/// Split the carrier around the single occurrence of `payload`.
///
/// Fails with [`SignError::AmbiguousEncoding`] unless `payload` occurs exactly
/// once, counting overlapping occurrences.
pub fn split(carrier: &[u8], payload: &[u8]) -> Result<Split, SignError> {
    let mut found = occurrences(carrier, payload);
    let start = match (found.next(), found.next()) {
        (Some(start), None) => start,
        (None, _) => return Err(SignError::AmbiguousEncoding { occurrences: 0 }),
        (Some(_), Some(_)) => {
            return Err(SignError::AmbiguousEncoding {
                occurrences: 2 + found.count(),
            })
        }
    };
    Ok(Split {
        prefix: carrier[..start].to_vec(),
        postfix: carrier[start + payload.len()..].to_vec(),
    })
}

/// Start offsets of every, possibly overlapping, occurrence of `needle`.
fn occurrences<'a>(haystack: &'a [u8], needle: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
    let windows = if needle.is_empty() {
        None
    } else {
        Some(haystack.windows(needle.len()))
    };
    windows
        .into_iter()
        .flatten()
        .enumerate()
        .filter(move |(_, window)| *window == needle)
        .map(|(start, _)| start)
}
