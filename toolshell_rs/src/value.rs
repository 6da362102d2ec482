//! Typed value coercion shared by options and arguments.
//!
//! A declared option or argument carries a [`ValueKind`]; at validation
//! time every bound raw string is run through [`coerce`]. Failure is a
//! plain [`Result`] - the validity checks in `option`/`argument` treat a
//! `CoerceError` as "invalid", never as a crash.

use thiserror::Error;

/// Semantic type declared for an option or argument value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    /// Raw UTF-8 text, no conversion (the default).
    #[default]
    Text,
    /// `true` / `false`.
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl ValueKind {
    /// Human-readable kind name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Bool => "bool",
            ValueKind::Int8 => "i8",
            ValueKind::Int16 => "i16",
            ValueKind::Int32 => "i32",
            ValueKind::Int64 => "i64",
            ValueKind::Float32 => "f32",
            ValueKind::Float64 => "f64",
        }
    }
}

/// Raised when a raw string cannot convert to its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{raw}' cannot convert to {}", kind.name())]
pub struct CoerceError {
    /// The offending raw value.
    pub raw: String,
    /// The kind it was supposed to become.
    pub kind: ValueKind,
}

/// A successfully coerced value.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    Text(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl CoercedValue {
    /// Text payload, if this value is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CoercedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CoercedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer payload widened to `i64`, for any of the integer kinds.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CoercedValue::I8(n) => Some(i64::from(*n)),
            CoercedValue::I16(n) => Some(i64::from(*n)),
            CoercedValue::I32(n) => Some(i64::from(*n)),
            CoercedValue::I64(n) => Some(*n),
            _ => None,
        }
    }

    /// Float payload widened to `f64`, for either float kind.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CoercedValue::F32(n) => Some(f64::from(*n)),
            CoercedValue::F64(n) => Some(*n),
            _ => None,
        }
    }
}

/// Convert a raw string to its declared kind using the standard `FromStr`
/// conversions. No locale-specific parsing beyond Rust's defaults.
pub fn coerce(raw: &str, kind: ValueKind) -> Result<CoercedValue, CoerceError> {
    let fail = || CoerceError {
        raw: raw.to_string(),
        kind,
    };
    match kind {
        ValueKind::Text => Ok(CoercedValue::Text(raw.to_string())),
        ValueKind::Bool => raw.parse().map(CoercedValue::Bool).map_err(|_| fail()),
        ValueKind::Int8 => raw.parse().map(CoercedValue::I8).map_err(|_| fail()),
        ValueKind::Int16 => raw.parse().map(CoercedValue::I16).map_err(|_| fail()),
        ValueKind::Int32 => raw.parse().map(CoercedValue::I32).map_err(|_| fail()),
        ValueKind::Int64 => raw.parse().map(CoercedValue::I64).map_err(|_| fail()),
        ValueKind::Float32 => raw.parse().map(CoercedValue::F32).map_err(|_| fail()),
        ValueKind::Float64 => raw.parse().map(CoercedValue::F64).map_err(|_| fail()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_text_is_identity() {
        let v = coerce("hello", ValueKind::Text).unwrap();
        assert_eq!(v.as_text(), Some("hello"));
    }

    #[test]
    fn test_coerce_integer() {
        let v = coerce("42", ValueKind::Int32).unwrap();
        assert_eq!(v.as_i64(), Some(42));
    }

    #[test]
    fn test_coerce_integer_failure() {
        let err = coerce("abc", ValueKind::Int32).unwrap_err();
        assert_eq!(err.raw, "abc");
        assert_eq!(err.kind, ValueKind::Int32);
        assert_eq!(err.to_string(), "'abc' cannot convert to i32");
    }

    #[test]
    fn test_coerce_narrow_integer_overflow() {
        assert!(coerce("127", ValueKind::Int8).is_ok());
        assert!(coerce("128", ValueKind::Int8).is_err());
        assert!(coerce("-32768", ValueKind::Int16).is_ok());
        assert!(coerce("-32769", ValueKind::Int16).is_err());
    }

    #[test]
    fn test_coerce_bool() {
        assert_eq!(coerce("true", ValueKind::Bool).unwrap().as_bool(), Some(true));
        assert_eq!(coerce("false", ValueKind::Bool).unwrap().as_bool(), Some(false));
        assert!(coerce("yes", ValueKind::Bool).is_err());
    }

    #[test]
    fn test_coerce_floats() {
        assert_eq!(coerce("2.5", ValueKind::Float64).unwrap().as_f64(), Some(2.5));
        assert!(coerce("2.5.1", ValueKind::Float32).is_err());
    }

    #[test]
    fn test_accessors_reject_wrong_variant() {
        let v = coerce("42", ValueKind::Int64).unwrap();
        assert_eq!(v.as_text(), None);
        assert_eq!(v.as_f64(), None);
        assert_eq!(v.as_bool(), None);
    }
}
