//! # Canonical Encoding — Deterministic Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for
//! bytes used in digest and signature computation across the workspace,
//! and `CanonicalEncoder`, the builder that produces them.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalEncoder::finish()`, which emits fields
//! in caller-fixed order with explicit length prefixes and sorts attribute
//! maps by key before emission.
//!
//! This makes the "wrong serialization path" defect class structurally
//! impossible: any function hashing or signing a record must accept
//! `&CanonicalBytes`, and the only way to produce one is through the
//! encoder. No raw `serde_json::to_vec()` anywhere in a digest path.
//!
//! ## Byte Layout
//!
//! Every field is a UTF-8 string prefixed with its byte length as 8 bytes
//! big-endian:
//!
//! ```text
//! field   := len(8 bytes, BE) || utf8-bytes
//! record  := field*                          (caller-fixed order)
//! map     := (field(key) || field(value))*   (ascending key order)
//! ```
//!
//! Integers are rendered as decimal strings before prefixing, so a record
//! is a flat sequence of length-delimited strings regardless of the source
//! field types. Two encoders fed the same logical record always produce
//! byte-identical output — map insertion order never leaks into the bytes.

use std::collections::BTreeMap;

use crate::value::AttributeValue;

/// Bytes produced exclusively by the canonical field encoder.
///
/// # Invariants
///
/// - The only constructor is `CanonicalEncoder::finish()`.
/// - Every field is length-prefixed before its UTF-8 bytes.
/// - Attribute maps are emitted in ascending lexicographic key order.
///
/// These invariants are enforced by construction and cannot be violated by
/// downstream code because the inner `Vec<u8>` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Access the canonical bytes for digest or signature computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no fields have been encoded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Builder producing `CanonicalBytes` from a fixed sequence of fields.
///
/// The caller decides the field order; the encoder guarantees that the
/// order of map entries and the byte rendering of each field are
/// deterministic. Encoding is infallible: the closed [`AttributeValue`]
/// type admits no value whose projection is ambiguous.
///
/// # Example
///
/// ```
/// use aegis_core::CanonicalEncoder;
///
/// let bytes = CanonicalEncoder::new()
///     .text("urn:uuid:1234")
///     .integer(42)
///     .finish();
/// assert!(!bytes.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct CanonicalEncoder {
    buf: Vec<u8>,
}

impl CanonicalEncoder {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Append one length-prefixed UTF-8 string field.
    pub fn text(mut self, s: &str) -> Self {
        self.push_field(s.as_bytes());
        self
    }

    /// Append an integer field, rendered as its decimal string.
    pub fn integer(self, n: i64) -> Self {
        let rendered = n.to_string();
        self.text(&rendered)
    }

    /// Append a string field only when present.
    ///
    /// Absent fields contribute no bytes at all — not an empty field —
    /// matching the rule that optional record fields are skipped entirely.
    pub fn optional_text(self, s: Option<&str>) -> Self {
        match s {
            Some(s) => self.text(s),
            None => self,
        }
    }

    /// Append an attribute map as sorted `(key, value)` field pairs.
    ///
    /// Each entry contributes two fields: the key, then the value's
    /// canonical string projection. `BTreeMap` iteration order is ascending
    /// lexicographic, so insertion order can never influence the bytes.
    pub fn attributes(mut self, map: &BTreeMap<String, AttributeValue>) -> Self {
        for (key, value) in map {
            self.push_field(key.as_bytes());
            self.push_field(value.canonical_string().as_bytes());
        }
        self
    }

    /// Seal the encoder into `CanonicalBytes`.
    pub fn finish(self) -> CanonicalBytes {
        CanonicalBytes(self.buf)
    }

    fn push_field(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(&(bytes.len() as u64).to_be_bytes());
        self.buf.extend_from_slice(bytes);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn attribute_value() -> impl Strategy<Value = AttributeValue> {
        let leaf = prop_oneof![
            any::<bool>().prop_map(AttributeValue::Boolean),
            any::<i64>().prop_map(AttributeValue::Integer),
            "[a-zA-Z0-9_ -]{0,32}".prop_map(AttributeValue::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(AttributeValue::Map)
        })
    }

    proptest! {
        /// Encoding the same fields twice always yields identical bytes.
        #[test]
        fn encoding_is_deterministic(
            fields in prop::collection::vec("[a-zA-Z0-9:/#_-]{0,40}", 0..8),
            map in prop::collection::btree_map("[a-z]{1,8}", attribute_value(), 0..6),
        ) {
            let encode = || {
                let mut enc = CanonicalEncoder::new();
                for f in &fields {
                    enc = enc.text(f);
                }
                enc.attributes(&map).finish()
            };
            prop_assert_eq!(encode(), encode());
        }

        /// Total length always equals sum of per-field prefix + payload.
        #[test]
        fn length_accounts_for_every_field(
            fields in prop::collection::vec("[a-z]{0,20}", 0..8),
        ) {
            let mut enc = CanonicalEncoder::new();
            let mut expected = 0usize;
            for f in &fields {
                enc = enc.text(f);
                expected += 8 + f.len();
            }
            prop_assert_eq!(enc.finish().len(), expected);
        }

        /// Two distinct field sequences never collide (prefix-delimited).
        #[test]
        fn distinct_sequences_do_not_collide(
            a in prop::collection::vec("[a-z]{0,10}", 1..5),
            b in prop::collection::vec("[a-z]{0,10}", 1..5),
        ) {
            prop_assume!(a != b);
            let encode = |fields: &[String]| {
                let mut enc = CanonicalEncoder::new();
                for f in fields {
                    enc = enc.text(f);
                }
                enc.finish()
            };
            prop_assert_ne!(encode(&a), encode(&b));
        }
    }
}
