pub mod cast;
pub mod digest;
pub mod encoding;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::types::TypeTag;

pub use cast::Scratch;
pub use digest::BatchChecksum;

/// Lowest possible value. Sorts before every other value, including NULL.
pub const MIN_VALUE: Value<'static> = Value::Min;

/// Highest possible value. Sorts after every other value.
pub const MAX_VALUE: Value<'static> = Value::Max;

/// A single typed scalar inside a rowkey.
///
/// Varchar payloads are borrowed from memory the caller owns: the buffer a
/// key was decoded from, or the scratch area a cast wrote into. A value is
/// `Copy` and never owns heap storage.
///
/// Ordering:
/// ```text
///   Min < (Null < Int < Float < Double < DateTime < PreciseDateTime < Varchar < Bool) < Max
///          └─────────── across types: by TypeTag rank ──────────────────────────┘
/// ```
/// Within a type values compare naturally; floats use IEEE total order so the
/// order is total even with NaN and signed zero.
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    Null,
    Int(i64),
    Float(f32),
    Double(f64),
    /// Seconds since the epoch.
    DateTime(i64),
    /// Microseconds since the epoch.
    PreciseDateTime(i64),
    Varchar(&'a [u8]),
    Bool(bool),
    /// Negative-infinity sentinel for open range bounds.
    Min,
    /// Positive-infinity sentinel for open range bounds.
    Max,
}

impl<'a> Value<'a> {
    /// Runtime type of this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Double(_) => TypeTag::Double,
            Value::DateTime(_) => TypeTag::DateTime,
            Value::PreciseDateTime(_) => TypeTag::PreciseDateTime,
            Value::Varchar(_) => TypeTag::Varchar,
            Value::Bool(_) => TypeTag::Bool,
            Value::Min | Value::Max => TypeTag::Extend,
        }
    }

    pub fn is_min_value(&self) -> bool {
        matches!(self, Value::Min)
    }

    pub fn is_max_value(&self) -> bool {
        matches!(self, Value::Max)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Length of the raw value: payload bytes for varchar, in-memory width
    /// for fixed-width kinds, zero for NULL and the sentinels.
    pub fn raw_len(&self) -> usize {
        match self {
            Value::Null | Value::Min | Value::Max => 0,
            Value::Int(_) | Value::DateTime(_) | Value::PreciseDateTime(_) => 8,
            Value::Double(_) => 8,
            Value::Float(_) => 4,
            Value::Bool(_) => 1,
            Value::Varchar(bytes) => bytes.len(),
        }
    }

    /// Total order over values. See the type-level docs for the rules.
    pub fn compare(&self, other: &Value<'_>) -> Ordering {
        match (self, other) {
            (Value::Min, Value::Min) | (Value::Max, Value::Max) => Ordering::Equal,
            (Value::Min, _) | (_, Value::Max) => Ordering::Less,
            (_, Value::Min) | (Value::Max, _) => Ordering::Greater,
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Double(a), Value::Double(b)) => a.total_cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::PreciseDateTime(a), Value::PreciseDateTime(b)) => a.cmp(b),
            (Value::Varchar(a), Value::Varchar(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (a, b) => a.type_tag().cmp(&b.type_tag()),
        }
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Value<'_> {}

impl PartialOrd for Value<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for Value<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.type_tag() as u8).hash(state);
        match self {
            Value::Null => {}
            Value::Min => 0u8.hash(state),
            Value::Max => 1u8.hash(state),
            Value::Int(v) | Value::DateTime(v) | Value::PreciseDateTime(v) => v.hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::Varchar(bytes) => bytes.hash(state),
            Value::Bool(v) => v.hash(state),
        }
    }
}

/// Plain decimal rendering is kept for magnitudes in `[1e-5, 1e16)`.
/// Anything outside switches to exponent form, so a float cast to varchar
/// needs at most a couple dozen scratch bytes.
const PLAIN_FLOAT_RANGE: std::ops::Range<f64> = 1e-5..1e16;

fn exponent_form(magnitude: f64) -> bool {
    magnitude.is_finite() && magnitude != 0.0 && !PLAIN_FLOAT_RANGE.contains(&magnitude)
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Min => write!(f, "MIN"),
            Value::Max => write!(f, "MAX"),
            Value::Int(v) | Value::DateTime(v) | Value::PreciseDateTime(v) => write!(f, "{v}"),
            Value::Float(v) if exponent_form(f64::from(v.abs())) => write!(f, "{v:e}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) if exponent_form(v.abs()) => write!(f, "{v:e}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Varchar(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_bracket_everything() {
        let values = [
            Value::Null,
            Value::Int(i64::MIN),
            Value::Int(i64::MAX),
            Value::Double(f64::INFINITY),
            Value::Varchar(b"zzz"),
            Value::Bool(true),
        ];
        for v in values {
            assert_eq!(MIN_VALUE.compare(&v), Ordering::Less);
            assert_eq!(MAX_VALUE.compare(&v), Ordering::Greater);
            assert_eq!(v.compare(&MIN_VALUE), Ordering::Greater);
            assert_eq!(v.compare(&MAX_VALUE), Ordering::Less);
        }
        assert_eq!(MIN_VALUE.compare(&MAX_VALUE), Ordering::Less);
        assert_eq!(MIN_VALUE.compare(&Value::Min), Ordering::Equal);
    }

    #[test]
    fn cross_type_by_rank() {
        assert_eq!(Value::Int(100).compare(&Value::Double(1.0)), Ordering::Less);
        assert_eq!(Value::Null.compare(&Value::Int(i64::MIN)), Ordering::Less);
        assert_eq!(Value::Bool(false).compare(&Value::Varchar(b"a")), Ordering::Greater);
    }

    #[test]
    fn floats_totally_ordered() {
        assert_eq!(Value::Double(f64::NAN).compare(&Value::Double(f64::NAN)), Ordering::Equal);
        assert_eq!(Value::Double(-0.0).compare(&Value::Double(0.0)), Ordering::Less);
    }

    #[test]
    fn raw_len_per_kind() {
        assert_eq!(Value::Varchar(b"hello").raw_len(), 5);
        assert_eq!(Value::Int(7).raw_len(), 8);
        assert_eq!(Value::Float(1.0).raw_len(), 4);
        assert_eq!(Value::Null.raw_len(), 0);
        assert_eq!(Value::Max.raw_len(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Varchar(b"abc").to_string(), "abc");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Min.to_string(), "MIN");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn display_floats_switch_to_exponent() {
        assert_eq!(Value::Double(2.5).to_string(), "2.5");
        assert_eq!(Value::Double(-1234.0).to_string(), "-1234");
        assert_eq!(Value::Double(0.0).to_string(), "0");
        assert_eq!(Value::Double(1e300).to_string(), "1e300");
        assert_eq!(Value::Double(-1.5e-7).to_string(), "-1.5e-7");
        assert_eq!(Value::Float(1e30).to_string(), "1e30");
        assert_eq!(Value::Double(f64::INFINITY).to_string(), "inf");
    }
}
