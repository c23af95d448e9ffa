//! # Attribute Values — Closed Tagged Union for Metadata and Claims
//!
//! Audit entry metadata and credential claims are heterogeneous maps from
//! string keys to scalar-ish values. Leaving those values as open JSON
//! would make hashing depend on an ambient stringification routine; this
//! module closes the domain instead.
//!
//! ## Security Invariant
//!
//! `AttributeValue` admits strings, 64-bit integers, booleans, and nested
//! maps — nothing else. Floats are unrepresentable: their decimal
//! rendering differs across languages and would silently fork canonical
//! bytes between implementations. The canonical string projection defined
//! here is the one and only rendering used in digest and signature input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A value stored in an audit entry's metadata or a credential's claims.
///
/// Serializes untagged, so wire JSON reads naturally:
/// `{"model": "X1", "revision": 3, "certified": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A boolean flag.
    Boolean(bool),
    /// A 64-bit signed integer. Floats are deliberately not representable.
    Integer(i64),
    /// A UTF-8 string.
    String(String),
    /// A nested map, keys sorted by the underlying `BTreeMap`.
    Map(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    /// The canonical string projection used in digest and signature input.
    ///
    /// - strings pass through unchanged;
    /// - integers render as decimal;
    /// - booleans render as `true` / `false`;
    /// - maps render as `{k1=v1,k2=v2}` with keys in ascending
    ///   lexicographic order and values projected recursively.
    pub fn canonical_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Map(map) => {
                let inner: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{k}={}", v.canonical_string()))
                    .collect();
                format!("{{{}}}", inner.join(","))
            }
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<BTreeMap<String, AttributeValue>> for AttributeValue {
    fn from(map: BTreeMap<String, AttributeValue>) -> Self {
        Self::Map(map)
    }
}

/// Build an attribute map from `(key, value)` pairs.
///
/// Convenience for call sites assembling metadata inline:
///
/// ```
/// use aegis_core::value::attributes;
///
/// let meta = attributes([("model", "X1".into()), ("revision", 3i64.into())]);
/// assert_eq!(meta.len(), 2);
/// ```
pub fn attributes<I>(pairs: I) -> BTreeMap<String, AttributeValue>
where
    I: IntoIterator<Item = (&'static str, AttributeValue)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_projection_passthrough() {
        assert_eq!(AttributeValue::from("X1").canonical_string(), "X1");
    }

    #[test]
    fn test_integer_projection_decimal() {
        assert_eq!(AttributeValue::from(42i64).canonical_string(), "42");
        assert_eq!(AttributeValue::from(-7i64).canonical_string(), "-7");
    }

    #[test]
    fn test_boolean_projection() {
        assert_eq!(AttributeValue::from(true).canonical_string(), "true");
        assert_eq!(AttributeValue::from(false).canonical_string(), "false");
    }

    #[test]
    fn test_map_projection_sorted() {
        let mut map = BTreeMap::new();
        map.insert("z".to_string(), AttributeValue::from(1i64));
        map.insert("a".to_string(), AttributeValue::from("x"));
        let value = AttributeValue::Map(map);
        assert_eq!(value.canonical_string(), "{a=x,z=1}");
    }

    #[test]
    fn test_nested_map_projection() {
        let mut inner = BTreeMap::new();
        inner.insert("lat".to_string(), AttributeValue::from("51.0"));
        let mut outer = BTreeMap::new();
        outer.insert("site".to_string(), AttributeValue::Map(inner));
        outer.insert("rack".to_string(), AttributeValue::from(9i64));
        assert_eq!(
            AttributeValue::Map(outer).canonical_string(),
            "{rack=9,site={lat=51.0}}"
        );
    }

    #[test]
    fn test_empty_map_projection() {
        let value = AttributeValue::Map(BTreeMap::new());
        assert_eq!(value.canonical_string(), "{}");
    }

    #[test]
    fn test_display_matches_projection() {
        let value = AttributeValue::from(true);
        assert_eq!(format!("{value}"), value.canonical_string());
    }

    // ---- serde wire shape ----

    #[test]
    fn test_serde_untagged_scalars() {
        assert_eq!(serde_json::to_string(&AttributeValue::from("X1")).unwrap(), r#""X1""#);
        assert_eq!(serde_json::to_string(&AttributeValue::from(3i64)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&AttributeValue::from(true)).unwrap(), "true");
    }

    #[test]
    fn test_serde_untagged_map() {
        let mut map = BTreeMap::new();
        map.insert("model".to_string(), AttributeValue::from("X1"));
        let json = serde_json::to_string(&AttributeValue::Map(map)).unwrap();
        assert_eq!(json, r#"{"model":"X1"}"#);
    }

    #[test]
    fn test_serde_roundtrip_all_kinds() {
        let mut map = BTreeMap::new();
        map.insert("certified".to_string(), AttributeValue::from(true));
        map.insert("model".to_string(), AttributeValue::from("X1"));
        map.insert("revision".to_string(), AttributeValue::from(3i64));
        let value = AttributeValue::Map(map);

        let json = serde_json::to_string(&value).unwrap();
        let back: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_deserialize_float_rejected() {
        // No variant admits a fractional number; the untagged enum fails.
        let result: Result<AttributeValue, _> = serde_json::from_str("3.14");
        assert!(result.is_err());
    }

    #[test]
    fn test_attributes_helper() {
        let meta = attributes([("a", 1i64.into()), ("b", "x".into())]);
        assert_eq!(meta.len(), 2);
        assert_eq!(meta["a"], AttributeValue::Integer(1));
    }
}
