//! # Encoding
//! Canonical CBOR encoding of [`PlutusData`].
//!
//! The layout is the one the ledger's `serialiseData` builtin produces, so a
//! validator re-serialising a decoded value arrives at the same bytes.
//!
//! | Value | Encoding |
//! | --- | --- |
//! | constructor `0..=6` | tag `121 + i`, then the fields as a list |
//! | constructor `7..=127` | tag `1280 + (i - 7)`, then the fields as a list |
//! | other constructors | tag `102`, then the array `[i, fields]` |
//! | empty list | `0x80` |
//! | non-empty list | indefinite-length array `0x9f .. 0xff` |
//! | map | definite-length map, entries in order |
//! | integer in `[-2^64, 2^64)` | shortest-form CBOR integer |
//! | other integers | tag `2` / `3` bignum over the big-endian magnitude |
//! | bytes, at most 64 | definite byte string |
//! | bytes, longer | indefinite byte string of 64 byte chunks |

use super::PlutusData;
use minicbor::{
    data::{Int, Tag},
    encode::{Error, Write},
    Encoder,
};


/// Maximum length of a single byte string chunk.
pub const BYTES_CHUNK_LEN: usize = 64;

const CONSTR_SMALL_BASE: u64 = 121;
const CONSTR_LARGE_BASE: u64 = 1280;
const CONSTR_GENERAL: u64 = 102;
const BIGNUM_POS: u64 = 2;
const BIGNUM_NEG: u64 = 3;

/// Encode Plutus data into its canonical bytes.
pub fn encode(data: &PlutusData) -> Vec<u8> {
    let mut e = Encoder::new(Vec::new());
    write(&mut e, data).expect("writing CBOR into a `Vec<u8>` should never fail");
    e.into_writer()
}

/// Write Plutus data to the given encoder.
pub fn write<W: Write>(e: &mut Encoder<W>, data: &PlutusData) -> Result<(), Error<W::Error>> {
    match data {
        PlutusData::Constr { tag, fields } => write_constr(e, *tag, fields),
        PlutusData::Map(entries) => {
            e.map(entries.len() as u64)?;
            for (key, value) in entries {
                write(e, key)?;
                write(e, value)?;
            }
            Ok(())
        }
        PlutusData::List(items) => write_list(e, items),
        PlutusData::Integer(n) => write_integer(e, *n),
        PlutusData::Bytes(bytes) => write_bytes(e, bytes),
    }
}

fn write_constr<W: Write>(
    e: &mut Encoder<W>,
    tag: u64,
    fields: &[PlutusData],
) -> Result<(), Error<W::Error>> {
    match tag {
        0..=6 => {
            e.tag(Tag::new(CONSTR_SMALL_BASE + tag))?;
        }
        7..=127 => {
            e.tag(Tag::new(CONSTR_LARGE_BASE + tag - 7))?;
        }
        _ => {
            e.tag(Tag::new(CONSTR_GENERAL))?.array(2)?.u64(tag)?;
        }
    }
    write_list(e, fields)
}

fn write_list<W: Write>(e: &mut Encoder<W>, items: &[PlutusData]) -> Result<(), Error<W::Error>> {
    if items.is_empty() {
        e.array(0)?;
        return Ok(());
    }
    e.begin_array()?;
    for item in items {
        write(e, item)?;
    }
    e.end()?;
    Ok(())
}

fn write_integer<W: Write>(e: &mut Encoder<W>, n: i128) -> Result<(), Error<W::Error>> {
    if let Ok(int) = Int::try_from(n) {
        e.int(int)?;
        return Ok(());
    }
    // `-1 - n` cannot overflow for negative `n`.
    let (tag, magnitude) = if n >= 0 {
        (BIGNUM_POS, n as u128)
    } else {
        (BIGNUM_NEG, (-1 - n) as u128)
    };
    let be = magnitude.to_be_bytes();
    let start = be.iter().position(|b| *b != 0).unwrap_or(be.len() - 1);
    e.tag(Tag::new(tag))?;
    write_bytes(e, &be[start..])
}

fn write_bytes<W: Write>(e: &mut Encoder<W>, bytes: &[u8]) -> Result<(), Error<W::Error>> {
    if bytes.len() <= BYTES_CHUNK_LEN {
        e.bytes(bytes)?;
        return Ok(());
    }
    e.begin_bytes()?;
    for chunk in bytes.chunks(BYTES_CHUNK_LEN) {
        e.bytes(chunk)?;
    }
    e.end()?;
    Ok(())
}
