//! Serde support for byte values.
//!
//! Every byte field in this crate serializes the same way: a lowercase hex
//! string in human-readable formats (JSON, YAML) and a byte string otherwise.
//! Use the module with `#[serde(with = "crate::serde")]` on hashes,
//! signatures, carrier bytes and raw datums, and [`seq`] on lists of byte
//! strings such as intention groups.
//!
//! Deserialization also enforces the length bound of the target type, so a
//! `Hash28` rejects 27 bytes and an [`AssetName`] rejects 33.

use crate::AssetName;
use ::serde::{
    de::{self, SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};
use core::fmt;

/// Byte containers that can be rebuilt from decoded bytes.
pub trait FromBytes: Sized {
    /// Build the value, checking any length bound.
    fn from_bytes(bytes: Vec<u8>) -> Result<Self, String>;
}

impl FromBytes for Vec<u8> {
    fn from_bytes(bytes: Vec<u8>) -> Result<Self, String> {
        Ok(bytes)
    }
}

impl<const N: usize> FromBytes for [u8; N] {
    fn from_bytes(bytes: Vec<u8>) -> Result<Self, String> {
        bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| format!("expected {N} bytes, found {}", bytes.len()))
    }
}

impl FromBytes for AssetName {
    fn from_bytes(bytes: Vec<u8>) -> Result<Self, String> {
        AssetName::new(bytes).map_err(|err| err.to_string())
    }
}

/// Serialize a byte value.
pub fn serialize<B, S>(bytes: &B, s: S) -> Result<S::Ok, S::Error>
where
    B: AsRef<[u8]> + ?Sized,
    S: Serializer,
{
    if s.is_human_readable() {
        s.serialize_str(&hex::encode(bytes))
    } else {
        s.serialize_bytes(bytes.as_ref())
    }
}

/// Deserialize a byte value.
pub fn deserialize<'de, B, D>(d: D) -> Result<B, D::Error>
where
    B: FromBytes,
    D: Deserializer<'de>,
{
    let bytes = if d.is_human_readable() {
        let string = String::deserialize(d)?;
        hex::decode(string).map_err(de::Error::custom)?
    } else {
        d.deserialize_byte_buf(ByteVisitor)?
    };
    B::from_bytes(bytes).map_err(de::Error::custom)
}

/// Lists of byte values, each serialized as [`serialize`] does.
pub mod seq {
    use super::*;

    /// Serialize a list of byte values.
    pub fn serialize<B, S>(items: &[B], s: S) -> Result<S::Ok, S::Error>
    where
        B: AsRef<[u8]>,
        S: Serializer,
    {
        let mut seq = s.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(&Hex(item.as_ref()))?;
        }
        seq.end()
    }

    /// Deserialize a list of byte values.
    pub fn deserialize<'de, B, D>(d: D) -> Result<Vec<B>, D::Error>
    where
        B: FromBytes,
        D: Deserializer<'de>,
    {
        let items: Vec<Hex<B>> = Vec::deserialize(d)?;
        Ok(items.into_iter().map(|Hex(item)| item).collect())
    }
}

/// A single byte value inside a list.
struct Hex<B>(B);

impl Serialize for Hex<&[u8]> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serialize(self.0, s)
    }
}

impl<'de, B: FromBytes> Deserialize<'de> for Hex<B> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        deserialize(d).map(Hex)
    }
}

/// Accepts both native byte strings and sequences of bytes.
struct ByteVisitor;

impl<'de> Visitor<'de> for ByteVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a byte string")
    }

    fn visit_bytes<E: de::Error>(self, bytes: &[u8]) -> Result<Vec<u8>, E> {
        Ok(bytes.to_vec())
    }

    fn visit_byte_buf<E: de::Error>(self, bytes: Vec<u8>) -> Result<Vec<u8>, E> {
        Ok(bytes)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<u8>, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(byte) = seq.next_element()? {
            bytes.push(byte);
        }
        Ok(bytes)
    }
}

impl Serialize for AssetName {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serialize(self, s)
    }
}

impl<'de> Deserialize<'de> for AssetName {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        deserialize(d)
    }
}

#[cfg(test)]
mod tests {
    use crate::{AssetName, Hash28};

    #[test]
    fn hashes_are_lowercase_hex() {
        let json = serde_json::to_string(&Hash28([0xab; 28])).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(28)));
        let parsed: Hash28 = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Hash28([0xab; 28]));
    }

    #[test]
    fn length_bounds_are_enforced() {
        let short = format!("\"{}\"", "ab".repeat(27));
        assert!(serde_json::from_str::<Hash28>(&short).is_err());
        let long = format!("\"{}\"", "00".repeat(33));
        assert!(serde_json::from_str::<AssetName>(&long).is_err());
        let name: AssetName = serde_json::from_str("\"746f6b656e\"").unwrap();
        assert_eq!(name.as_bytes(), b"token");
        assert!(serde_json::from_str::<Hash28>("\"zz\"").is_err());
    }

    #[test]
    fn byte_lists_are_hex_strings() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Groups(#[serde(with = "crate::serde::seq")] Vec<Vec<u8>>);

        let groups = Groups(vec![vec![], vec![0xca, 0xfe]]);
        let json = serde_json::to_string(&groups).unwrap();
        assert_eq!(json, r#"["","cafe"]"#);
        assert_eq!(serde_json::from_str::<Groups>(&json).unwrap(), groups);
    }

    #[test]
    fn yaml_uses_the_same_strings() {
        let name = AssetName::new(b"ab".to_vec()).unwrap();
        let yaml = serde_yaml::to_string(&name).unwrap();
        assert!(yaml.contains("6162"));
        assert_eq!(serde_yaml::from_str::<AssetName>(&yaml).unwrap(), name);
    }
}
