//! # Plutus data
//! The ledger's datum type and the traits that map schema types onto it.
//!
//! Schema types are encoded as constructors (`Constr`) whose index is the
//! variant's position and whose fields are the variant's fields in declaration
//! order. Tuples are lists.
//!
//! See [`encode`] and [`decode`] for the byte-level format.
//!
//! ## Integer range
//!
//! Integers are held as `i128`. The ledger allows arbitrarily wide integers,
//! but every integer an intent schema field holds fits in 64 bits. Arbitrary
//! data (`DatumMatch::Data`, expected redeemer values) is limited to
//! `[-2^127, 2^127)`, and wider bignums fail to decode with
//! [`CborError::BignumTooLarge`].

use crate::{AssetName, Hash28, OutputRef, Signature, TxHash};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use thiserror::Error;

pub mod decode;
pub mod encode;

#[doc(inline)]
pub use decode::{decode, CborError};
#[doc(inline)]
pub use encode::encode;

/// A value of the ledger's datum type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlutusData {
    /// A constructor application.
    Constr {
        /// The constructor index.
        tag: u64,
        /// The constructor's fields.
        fields: Vec<PlutusData>,
    },
    /// An association list. Entry order is preserved.
    Map(Vec<(PlutusData, PlutusData)>),
    /// A list.
    List(Vec<PlutusData>),
    /// An integer, limited to the range of `i128`.
    Integer(i128),
    /// A byte string.
    Bytes(#[serde(with = "crate::serde")] Vec<u8>),
}

/// Errors that can occur when decoding a schema type from bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not well-formed Plutus data.
    #[error("invalid Plutus data: {0}")]
    Cbor(#[from] CborError),
    /// A value of the wrong kind where a schema field was expected.
    #[error("expected {expected} for `{field}`, found {found}")]
    UnexpectedKind {
        /// The schema field being decoded.
        field: &'static str,
        /// The expected kind of data.
        expected: &'static str,
        /// The kind of data found.
        found: &'static str,
    },
    /// A constructor index outside the variants of a type.
    #[error("invalid constructor {tag} for `{field}`")]
    InvalidConstructor {
        /// The schema field being decoded.
        field: &'static str,
        /// The constructor index found.
        tag: u64,
    },
    /// A constructor or tuple with the wrong number of fields.
    #[error("expected {expected} fields for `{field}`, found {found}")]
    InvalidFieldCount {
        /// The schema field being decoded.
        field: &'static str,
        /// The number of fields the schema requires.
        expected: usize,
        /// The number of fields found.
        found: usize,
    },
    /// A fixed-size byte string with the wrong length.
    #[error("expected {expected} bytes for `{field}`, found {found}")]
    InvalidLength {
        /// The schema field being decoded.
        field: &'static str,
        /// The required length.
        expected: usize,
        /// The length found.
        found: usize,
    },
    /// An asset name over the length limit.
    #[error(transparent)]
    AssetNameTooLong(#[from] crate::AssetNameTooLong),
    /// An integer outside the range of its schema field.
    #[error("integer {value} out of range for `{field}`")]
    IntegerOutOfRange {
        /// The schema field being decoded.
        field: &'static str,
        /// The integer found.
        value: i128,
    },
    /// The bytes decode to a valid value whose canonical encoding differs
    /// from the input.
    #[error("input is not the canonical encoding of the decoded value")]
    NonCanonical,
}

/// Conversion of a schema type into Plutus data.
pub trait ToPlutusData {
    /// Produce the Plutus data representation of `self`.
    fn to_plutus_data(&self) -> PlutusData;
}

/// Conversion of Plutus data into a schema type.
pub trait FromPlutusData: Sized {
    /// Parse `data` as `Self`, checking every schema bound.
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError>;
}

impl PlutusData {
    /// Shorthand for a constructor application.
    pub fn constr(tag: u64, fields: Vec<PlutusData>) -> Self {
        PlutusData::Constr { tag, fields }
    }

    /// Shorthand for a byte string.
    pub fn bytes(bytes: impl AsRef<[u8]>) -> Self {
        PlutusData::Bytes(bytes.as_ref().to_vec())
    }

    /// A short name for the kind of this value, used in errors.
    pub fn kind(&self) -> &'static str {
        match self {
            PlutusData::Constr { .. } => "constructor",
            PlutusData::Map(_) => "map",
            PlutusData::List(_) => "list",
            PlutusData::Integer(_) => "integer",
            PlutusData::Bytes(_) => "bytes",
        }
    }

    fn unexpected(&self, field: &'static str, expected: &'static str) -> DecodeError {
        DecodeError::UnexpectedKind {
            field,
            expected,
            found: self.kind(),
        }
    }

    /// View as a constructor application.
    pub fn as_constr(&self, field: &'static str) -> Result<(u64, &[PlutusData]), DecodeError> {
        match self {
            PlutusData::Constr { tag, fields } => Ok((*tag, fields)),
            other => Err(other.unexpected(field, "constructor")),
        }
    }

    /// View as a list.
    pub fn as_list(&self, field: &'static str) -> Result<&[PlutusData], DecodeError> {
        match self {
            PlutusData::List(items) => Ok(items),
            other => Err(other.unexpected(field, "list")),
        }
    }

    /// View as a map.
    pub fn as_map(
        &self,
        field: &'static str,
    ) -> Result<&[(PlutusData, PlutusData)], DecodeError> {
        match self {
            PlutusData::Map(entries) => Ok(entries),
            other => Err(other.unexpected(field, "map")),
        }
    }

    /// View as an integer.
    pub fn as_integer(&self, field: &'static str) -> Result<i128, DecodeError> {
        match self {
            PlutusData::Integer(n) => Ok(*n),
            other => Err(other.unexpected(field, "integer")),
        }
    }

    /// View as a byte string.
    pub fn as_bytes(&self, field: &'static str) -> Result<&[u8], DecodeError> {
        match self {
            PlutusData::Bytes(bytes) => Ok(bytes),
            other => Err(other.unexpected(field, "bytes")),
        }
    }

    /// View as a byte string of exactly `N` bytes.
    pub fn as_byte_array<const N: usize>(
        &self,
        field: &'static str,
    ) -> Result<[u8; N], DecodeError> {
        let bytes = self.as_bytes(field)?;
        bytes.try_into().map_err(|_| DecodeError::InvalidLength {
            field,
            expected: N,
            found: bytes.len(),
        })
    }

    /// View as an integer that fits in a `u64`.
    pub fn as_u64(&self, field: &'static str) -> Result<u64, DecodeError> {
        let value = self.as_integer(field)?;
        u64::try_from(value).map_err(|_| DecodeError::IntegerOutOfRange { field, value })
    }

    /// View as an integer that fits in an `i64`.
    pub fn as_i64(&self, field: &'static str) -> Result<i64, DecodeError> {
        let value = self.as_integer(field)?;
        i64::try_from(value).map_err(|_| DecodeError::IntegerOutOfRange { field, value })
    }

    /// View as a strictly positive integer that fits in a `u64`.
    pub fn as_positive(&self, field: &'static str) -> Result<NonZeroU64, DecodeError> {
        let value = self.as_integer(field)?;
        u64::try_from(value)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or(DecodeError::IntegerOutOfRange { field, value })
    }
}

/// Check that `data` is the constructor `tag` with exactly `N` fields.
pub fn expect_constr<'a, const N: usize>(
    data: &'a PlutusData,
    field: &'static str,
    tag: u64,
) -> Result<&'a [PlutusData; N], DecodeError> {
    let (found, fields) = data.as_constr(field)?;
    if found != tag {
        return Err(DecodeError::InvalidConstructor { field, tag: found });
    }
    expect_len(fields, field)
}

/// Check that `data` is a list (tuple) of exactly `N` items.
pub fn expect_tuple<'a, const N: usize>(
    data: &'a PlutusData,
    field: &'static str,
) -> Result<&'a [PlutusData; N], DecodeError> {
    expect_len(data.as_list(field)?, field)
}

/// Decode a schema type from bytes that must be its canonical encoding.
///
/// Any definite/indefinite framing, integer width or chunking that differs
/// from what [`encode`] produces for the decoded value is rejected with
/// [`DecodeError::NonCanonical`].
pub fn decode_canonical<T>(bytes: &[u8]) -> Result<T, DecodeError>
where
    T: FromPlutusData + ToPlutusData,
{
    let data = decode(bytes)?;
    let value = T::from_plutus_data(&data)?;
    if encode(&value.to_plutus_data()) != bytes {
        return Err(DecodeError::NonCanonical);
    }
    Ok(value)
}

fn expect_len<'a, const N: usize>(
    items: &'a [PlutusData],
    field: &'static str,
) -> Result<&'a [PlutusData; N], DecodeError> {
    items.try_into().map_err(|_| DecodeError::InvalidFieldCount {
        field,
        expected: N,
        found: items.len(),
    })
}

impl ToPlutusData for PlutusData {
    fn to_plutus_data(&self) -> PlutusData {
        self.clone()
    }
}

impl FromPlutusData for PlutusData {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        Ok(data.clone())
    }
}

impl ToPlutusData for u64 {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::Integer(i128::from(*self))
    }
}

impl FromPlutusData for u64 {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        data.as_u64("integer")
    }
}

impl ToPlutusData for i64 {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::Integer(i128::from(*self))
    }
}

impl FromPlutusData for i64 {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        data.as_i64("integer")
    }
}

impl ToPlutusData for NonZeroU64 {
    fn to_plutus_data(&self) -> PlutusData {
        self.get().to_plutus_data()
    }
}

impl FromPlutusData for NonZeroU64 {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        data.as_positive("positive integer")
    }
}

impl ToPlutusData for Hash28 {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::bytes(self.0)
    }
}

impl FromPlutusData for Hash28 {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        data.as_byte_array("hash").map(Hash28)
    }
}

impl ToPlutusData for TxHash {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::bytes(self.0)
    }
}

impl FromPlutusData for TxHash {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        data.as_byte_array("transaction id").map(TxHash)
    }
}

impl ToPlutusData for Signature {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::bytes(self.0)
    }
}

impl FromPlutusData for Signature {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        data.as_byte_array("signature").map(Signature)
    }
}

impl ToPlutusData for AssetName {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::bytes(self.as_bytes())
    }
}

impl FromPlutusData for AssetName {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        Ok(AssetName::new(data.as_bytes("asset name")?)?)
    }
}

impl ToPlutusData for OutputRef {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::constr(
            0,
            vec![self.tx_id.to_plutus_data(), self.output_index.to_plutus_data()],
        )
    }
}

impl FromPlutusData for OutputRef {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        let [tx_id, output_index] = expect_constr(data, "output reference", 0)?;
        Ok(OutputRef {
            tx_id: TxHash::from_plutus_data(tx_id)?,
            output_index: output_index.as_u64("output index")?,
        })
    }
}

/// `Some` is constructor 0 holding the value, `None` is constructor 1.
impl<T: ToPlutusData> ToPlutusData for Option<T> {
    fn to_plutus_data(&self) -> PlutusData {
        match self {
            Some(value) => PlutusData::constr(0, vec![value.to_plutus_data()]),
            None => PlutusData::constr(1, vec![]),
        }
    }
}

impl<T: FromPlutusData> FromPlutusData for Option<T> {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        match data.as_constr("option")?.0 {
            0 => {
                let [value] = expect_constr(data, "option", 0)?;
                Ok(Some(T::from_plutus_data(value)?))
            }
            _ => {
                expect_constr::<0>(data, "option", 1)?;
                Ok(None)
            }
        }
    }
}

impl<T: ToPlutusData> ToPlutusData for Vec<T> {
    fn to_plutus_data(&self) -> PlutusData {
        PlutusData::List(self.iter().map(ToPlutusData::to_plutus_data).collect())
    }
}

impl<T: FromPlutusData> FromPlutusData for Vec<T> {
    fn from_plutus_data(data: &PlutusData) -> Result<Self, DecodeError> {
        data.as_list("list")?
            .iter()
            .map(T::from_plutus_data)
            .collect()
    }
}
