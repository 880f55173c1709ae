//! serde helpers shared by the concrete schema models.
//!
//! Chainspec files in the wild mix plain JSON numbers, decimal strings and
//! `0x` hex strings for the same quantities; every numeric field accepts all
//! three on decode. Serialization is normalized per module: `*_hex` modules
//! emit `0x…` strings, the plain modules emit JSON numbers.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;

pub fn parse_u128(s: &str) -> Result<u128, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u128::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|_| format!("invalid numeric literal {s:?}"))
}

pub fn parse_u64(s: &str) -> Result<u64, String> {
    let v = parse_u128(s)?;
    u64::try_from(v).map_err(|_| format!("numeric literal {s:?} overflows u64"))
}

struct NumVisitor;

impl Visitor<'_> for NumVisitor {
    type Value = u128;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a decimal string or a 0x-prefixed hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
        Ok(u128::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<u128, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
        u128::try_from(v).map_err(|_| E::custom("block heights cannot be negative"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
        parse_u128(v).map_err(E::custom)
    }
}

/// `u128` wrapper decoding from any of the accepted numeric encodings.
pub(crate) struct Num(pub u128);

impl<'de> Deserialize<'de> for Num {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumVisitor).map(Num)
    }
}

fn num_to_u64<E: de::Error>(v: u128) -> Result<u64, E> {
    u64::try_from(v).map_err(|_| E::custom("value overflows u64"))
}

/// `Option<u64>` as a `0x` hex string. Pair with `#[serde(default)]`.
pub mod u64_opt_hex {
    use super::{num_to_u64, Num};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&format!("{v:#x}")),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        let num = Option::<Num>::deserialize(deserializer)?;
        num.map(|n| num_to_u64(n.0)).transpose()
    }
}

/// `Option<u64>` as a plain JSON number, still lenient on decode.
/// Pair with `#[serde(default)]`.
pub mod u64_opt {
    use super::{num_to_u64, Num};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_u64(*v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        let num = Option::<Num>::deserialize(deserializer)?;
        num.map(|n| num_to_u64(n.0)).transpose()
    }
}

/// `Option<u128>` as a `0x` hex string. Pair with `#[serde(default)]`.
pub mod u128_opt_hex {
    use super::Num;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<u128>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&format!("{v:#x}")),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u128>, D::Error> {
        Ok(Option::<Num>::deserialize(deserializer)?.map(|n| n.0))
    }
}

/// Height-keyed `u64` map; keys and values accept any numeric encoding and
/// serialize as `0x` hex strings. Pair with `#[serde(default)]`.
pub mod u64_map_hex {
    use super::{num_to_u64, parse_u64, Num};
    use serde::de::{Error, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::collections::BTreeMap;
    use std::fmt;

    pub fn serialize<S: Serializer>(
        value: &BTreeMap<u64, u64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(value.len()))?;
        for (k, v) in value {
            map.serialize_entry(&format!("{k:#x}"), &format!("{v:#x}"))?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<u64, u64>, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = BTreeMap<u64, u64>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of block heights to numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = BTreeMap::new();
                while let Some((key, value)) = access.next_entry::<String, Num>()? {
                    let key = parse_u64(&key).map_err(A::Error::custom)?;
                    out.insert(key, num_to_u64(value.0)?);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

/// Height-keyed `u128` map, same encoding rules as [`u64_map_hex`].
pub mod u128_map_hex {
    use super::{parse_u64, Num};
    use serde::de::{Error, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::collections::BTreeMap;
    use std::fmt;

    pub fn serialize<S: Serializer>(
        value: &BTreeMap<u64, u128>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(value.len()))?;
        for (k, v) in value {
            map.serialize_entry(&format!("{k:#x}"), &format!("{v:#x}"))?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<u64, u128>, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = BTreeMap<u64, u128>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of block heights to numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = BTreeMap::new();
                while let Some((key, value)) = access.next_entry::<String, Num>()? {
                    let key = parse_u64(&key).map_err(A::Error::custom)?;
                    out.insert(key, value.0);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

/// `Vec<u8>` as a `0x` hex string; an empty vector round-trips as `"0x"`.
pub mod bytes_hex {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&const_hex::encode_prefixed(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        const_hex::decode(&s).map_err(D::Error::custom)
    }
}

/// `Option<Vec<u8>>` as a `0x` hex string. Pair with `#[serde(default)]`.
pub mod bytes_opt_hex {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&const_hex::encode_prefixed(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let s = Option::<String>::deserialize(deserializer)?;
        s.map(|s| const_hex::decode(&s).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
    struct Probe {
        #[serde(default, with = "u64_opt_hex", skip_serializing_if = "Option::is_none")]
        height: Option<u64>,
        #[serde(default, with = "bytes_hex", skip_serializing_if = "Vec::is_empty")]
        data: Vec<u8>,
    }

    #[test]
    fn hex_decimal_and_number_decode_identically() {
        for raw in [
            r#"{"height": 2000000}"#,
            r#"{"height": "2000000"}"#,
            r#"{"height": "0x1e8480"}"#,
        ] {
            let p: Probe = serde_json::from_str(raw).unwrap();
            assert_eq!(p.height, Some(2_000_000), "payload {raw}");
        }
    }

    #[test]
    fn missing_and_null_decode_as_absent() {
        let p: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(p.height, None);
        let p: Probe = serde_json::from_str(r#"{"height": null}"#).unwrap();
        assert_eq!(p.height, None);
    }

    #[test]
    fn serializes_as_prefixed_hex() {
        let p = Probe {
            height: Some(0x42),
            data: vec![0xde, 0xad],
        };
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r#"{"height":"0x42","data":"0xdead"}"#
        );
    }

    #[test]
    fn negative_height_is_rejected() {
        assert!(serde_json::from_str::<Probe>(r#"{"height": -1}"#).is_err());
    }
}
