//! # Decoding
//! Decoding of [`PlutusData`] from CBOR.
//!
//! Both definite and indefinite framings of lists, maps and byte strings are
//! accepted. Schema decoders that need the canonical form check it by
//! re-encoding.

use super::PlutusData;
use minicbor::{data::Type, Decoder};
use thiserror::Error;


/// Maximum nesting depth of decoded Plutus data.
pub const MAX_DEPTH: usize = 128;

/// Errors that can occur when decoding Plutus data.
#[derive(Debug, Error)]
pub enum CborError {
    /// The CBOR itself is malformed or truncated.
    #[error("malformed CBOR: {0}")]
    Malformed(#[from] minicbor::decode::Error),
    /// Bytes remain after a complete value.
    #[error("{0} trailing bytes after Plutus data")]
    TrailingBytes(usize),
    /// A CBOR item with no Plutus data meaning.
    #[error("unsupported CBOR item `{0}` in Plutus data")]
    UnsupportedType(String),
    /// A tag with no Plutus data meaning.
    #[error("unsupported CBOR tag {0} in Plutus data")]
    UnsupportedTag(u64),
    /// A bignum that does not fit in 128 bits.
    #[error("bignum of {0} bytes does not fit in 128 bits")]
    BignumTooLarge(usize),
    /// A tag 102 constructor that is not a two element array.
    #[error("general constructor form must be a two element array")]
    InvalidGeneralConstr,
    /// Nesting beyond [`MAX_DEPTH`].
    #[error("Plutus data nested deeper than {MAX_DEPTH} levels")]
    TooDeep,
}

/// Decode Plutus data from bytes, requiring the value to span all of them.
pub fn decode(bytes: &[u8]) -> Result<PlutusData, CborError> {
    let mut d = Decoder::new(bytes);
    let data = read(&mut d, 0)?;
    let consumed = d.position();
    if consumed != bytes.len() {
        return Err(CborError::TrailingBytes(bytes.len() - consumed));
    }
    Ok(data)
}

/// Read one Plutus data value from the decoder.
pub fn read(d: &mut Decoder<'_>, depth: usize) -> Result<PlutusData, CborError> {
    if depth > MAX_DEPTH {
        return Err(CborError::TooDeep);
    }
    let data = match d.datatype()? {
        Type::Tag => read_tagged(d, depth)?,
        Type::Map | Type::MapIndef => PlutusData::Map(read_map(d, depth)?),
        Type::Array | Type::ArrayIndef => PlutusData::List(read_list(d, depth)?),
        Type::Bytes | Type::BytesIndef => PlutusData::Bytes(read_bytes(d)?),
        Type::U8
        | Type::U16
        | Type::U32
        | Type::U64
        | Type::I8
        | Type::I16
        | Type::I32
        | Type::I64
        | Type::Int => PlutusData::Integer(i128::from(d.int()?)),
        other => return Err(CborError::UnsupportedType(format!("{other:?}"))),
    };
    Ok(data)
}

fn read_tagged(d: &mut Decoder<'_>, depth: usize) -> Result<PlutusData, CborError> {
    let tag = d.tag()?.as_u64();
    let data = match tag {
        121..=127 => PlutusData::constr(tag - 121, read_list(d, depth)?),
        1280..=1400 => PlutusData::constr(tag - 1280 + 7, read_list(d, depth)?),
        102 => {
            if d.array()? != Some(2) {
                return Err(CborError::InvalidGeneralConstr);
            }
            let index = d.u64()?;
            PlutusData::constr(index, read_list(d, depth)?)
        }
        2 | 3 => {
            let bytes = read_bytes(d)?;
            if bytes.len() > 16 {
                return Err(CborError::BignumTooLarge(bytes.len()));
            }
            let mut be = [0u8; 16];
            be[16 - bytes.len()..].copy_from_slice(&bytes);
            let magnitude = u128::from_be_bytes(be);
            let value = if tag == 2 {
                i128::try_from(magnitude).map_err(|_| CborError::BignumTooLarge(bytes.len()))?
            } else {
                let m = i128::try_from(magnitude)
                    .map_err(|_| CborError::BignumTooLarge(bytes.len()))?;
                -1 - m
            };
            PlutusData::Integer(value)
        }
        other => return Err(CborError::UnsupportedTag(other)),
    };
    Ok(data)
}

fn read_list(d: &mut Decoder<'_>, depth: usize) -> Result<Vec<PlutusData>, CborError> {
    match d.array()? {
        Some(len) => (0..len).map(|_| read(d, depth + 1)).collect(),
        None => {
            let mut items = Vec::new();
            while d.datatype()? != Type::Break {
                items.push(read(d, depth + 1)?);
            }
            skip_break(d);
            Ok(items)
        }
    }
}

fn read_map(
    d: &mut Decoder<'_>,
    depth: usize,
) -> Result<Vec<(PlutusData, PlutusData)>, CborError> {
    let entry = |d: &mut Decoder<'_>| -> Result<_, CborError> {
        let key = read(d, depth + 1)?;
        let value = read(d, depth + 1)?;
        Ok((key, value))
    };
    match d.map()? {
        Some(len) => (0..len).map(|_| entry(d)).collect(),
        None => {
            let mut entries = Vec::new();
            while d.datatype()? != Type::Break {
                entries.push(entry(d)?);
            }
            skip_break(d);
            Ok(entries)
        }
    }
}

fn read_bytes(d: &mut Decoder<'_>) -> Result<Vec<u8>, CborError> {
    match d.datatype()? {
        Type::BytesIndef => {
            let mut bytes = Vec::new();
            for chunk in d.bytes_iter()? {
                bytes.extend_from_slice(chunk?);
            }
            Ok(bytes)
        }
        _ => Ok(d.bytes()?.to_vec()),
    }
}

/// Step over the `0xff` break that ends an indefinite-length item.
fn skip_break(d: &mut Decoder<'_>) {
    d.set_position(d.position() + 1);
}
