//! Key Module
//!
//! Defines the closed set of key representations accepted by the gate and
//! their canonical byte form used as membership filter input.

use std::borrow::Cow;
use std::fmt;

// == Key ==
/// A cache key of one of the supported kinds.
///
/// `Unsupported` stands for any other type and carries its name; it never
/// normalizes, so the gate rejects it before touching the filter or backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Text(String),
    Bytes(Vec<u8>),
    I32(i32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Unsupported(&'static str),
}

// == Key Kind ==
/// Names the variant of a [`Key`] without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Text,
    Bytes,
    I32,
    I64,
    U64,
    F32,
    F64,
    Unsupported(&'static str),
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyKind::Text => "text",
            KeyKind::Bytes => "bytes",
            KeyKind::I32 => "i32",
            KeyKind::I64 => "i64",
            KeyKind::U64 => "u64",
            KeyKind::F32 => "f32",
            KeyKind::F64 => "f64",
            KeyKind::Unsupported(name) => *name,
        };
        f.write_str(name)
    }
}

impl Key {
    /// Builds a key for a type with no canonical form.
    pub fn unsupported(type_name: &'static str) -> Self {
        Key::Unsupported(type_name)
    }

    /// Returns the kind of this key.
    pub fn kind(&self) -> KeyKind {
        match self {
            Key::Text(_) => KeyKind::Text,
            Key::Bytes(_) => KeyKind::Bytes,
            Key::I32(_) => KeyKind::I32,
            Key::I64(_) => KeyKind::I64,
            Key::U64(_) => KeyKind::U64,
            Key::F32(_) => KeyKind::F32,
            Key::F64(_) => KeyKind::F64,
            Key::Unsupported(name) => KeyKind::Unsupported(*name),
        }
    }

    /// Returns the canonical bytes of this key, or `None` if unsupported.
    pub fn canonical_bytes(&self) -> Option<Cow<'_, [u8]>> {
        normalize(self)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match normalize(self) {
            Some(bytes) => write!(f, "{}", String::from_utf8_lossy(&bytes)),
            None => write!(f, "<{}>", self.kind()),
        }
    }
}

// == Normalize ==
/// Maps a key to its canonical byte representation.
///
/// - text: its UTF-8 bytes
/// - bytes: unchanged
/// - integers: decimal text with no leading zeros
/// - floats: shortest round-trippable decimal text, never in exponent form
///
/// Returns `None` for [`Key::Unsupported`].
pub fn normalize(key: &Key) -> Option<Cow<'_, [u8]>> {
    let canonical = match key {
        Key::Text(text) => Cow::Borrowed(text.as_bytes()),
        Key::Bytes(bytes) => Cow::Borrowed(bytes.as_slice()),
        Key::I32(v) => Cow::Owned(v.to_string().into_bytes()),
        Key::I64(v) => Cow::Owned(v.to_string().into_bytes()),
        Key::U64(v) => Cow::Owned(v.to_string().into_bytes()),
        Key::F32(v) => Cow::Owned(canonical_f32(*v).into_bytes()),
        Key::F64(v) => Cow::Owned(canonical_f64(*v).into_bytes()),
        Key::Unsupported(_) => return None,
    };
    Some(canonical)
}

// Display on floats already yields the shortest round-trip digits without
// an exponent; only the non-finite spellings need fixing up.
fn canonical_f64(value: f64) -> String {
    non_finite(value.is_nan(), value.is_infinite(), value.is_sign_negative())
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

fn canonical_f32(value: f32) -> String {
    non_finite(value.is_nan(), value.is_infinite(), value.is_sign_negative())
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

fn non_finite(is_nan: bool, is_infinite: bool, negative: bool) -> Option<&'static str> {
    match (is_nan, is_infinite, negative) {
        (true, _, _) => Some("NaN"),
        (false, true, false) => Some("+Inf"),
        (false, true, true) => Some("-Inf"),
        _ => None,
    }
}

// == Conversions ==
impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Text(value)
    }
}

impl From<&[u8]> for Key {
    fn from(value: &[u8]) -> Self {
        Key::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Key {
    fn from(value: Vec<u8>) -> Self {
        Key::Bytes(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::I32(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::I64(value)
    }
}

impl From<isize> for Key {
    fn from(value: isize) -> Self {
        Key::I64(value as i64)
    }
}

impl From<u64> for Key {
    fn from(value: u64) -> Self {
        Key::U64(value)
    }
}

impl From<f32> for Key {
    fn from(value: f32) -> Self {
        Key::F32(value)
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Key::F64(value)
    }
}

// == Unit Tests ==
#[cfg(test)]
#[allow(clippy::approx_constant)]
mod tests {
    use super::*;

    fn canonical(key: impl Into<Key>) -> Vec<u8> {
        normalize(&key.into()).unwrap().into_owned()
    }

    #[test]
    fn test_text_and_bytes_pass_through() {
        assert_eq!(canonical("foo"), b"foo");
        assert_eq!(canonical(vec![0u8, 159, 146, 150]), vec![0u8, 159, 146, 150]);
        assert_eq!(canonical(""), b"");
    }

    #[test]
    fn test_text_is_borrowed() {
        let key = Key::from("borrowed");
        assert!(matches!(normalize(&key), Some(Cow::Borrowed(_))));
    }

    #[test]
    fn test_integers_decimal() {
        assert_eq!(canonical(42i32), b"42");
        assert_eq!(canonical(-7i32), b"-7");
        assert_eq!(canonical(0i64), b"0");
        assert_eq!(canonical(i64::MIN), i64::MIN.to_string().as_bytes());
        assert_eq!(canonical(u64::MAX), b"18446744073709551615");
        assert_eq!(canonical(12isize), b"12");
    }

    #[test]
    fn test_integer_widths_agree() {
        assert_eq!(canonical(42i32), canonical(42i64));
        assert_eq!(canonical(42i64), canonical(42u64));
    }

    #[test]
    fn test_floats_shortest_no_exponent() {
        assert_eq!(canonical(3.14f64), b"3.14");
        assert_eq!(canonical(1.0f64), b"1");
        assert_eq!(canonical(0.000001f64), b"0.000001");
        assert_eq!(canonical(1e21f64), b"1000000000000000000000");
        assert_eq!(canonical(-2.5f64), b"-2.5");
    }

    #[test]
    fn test_f32_uses_f32_precision() {
        assert_eq!(canonical(0.1f32), b"0.1");
        assert_eq!(canonical(3.14f32), b"3.14");
    }

    #[test]
    fn test_float_special_values() {
        assert_eq!(canonical(f64::NAN), b"NaN");
        assert_eq!(canonical(f64::INFINITY), b"+Inf");
        assert_eq!(canonical(f64::NEG_INFINITY), b"-Inf");
        assert_eq!(canonical(f32::INFINITY), b"+Inf");
        assert_eq!(canonical(-0.0f64), b"-0");
    }

    #[test]
    fn test_unsupported_has_no_canonical_form() {
        let key = Key::unsupported("bool");
        assert!(normalize(&key).is_none());
        assert_eq!(key.kind(), KeyKind::Unsupported("bool"));
        assert_eq!(key.to_string(), "<bool>");
    }

    #[test]
    fn test_normalize_is_stable() {
        let key = Key::from(2.718281828f64);
        assert_eq!(normalize(&key), normalize(&key));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Key::from("x").kind().to_string(), "text");
        assert_eq!(Key::from(1u64).kind().to_string(), "u64");
        assert_eq!(Key::from(1.5f32).kind().to_string(), "f32");
    }
}
