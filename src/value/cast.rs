use std::fmt::{self, Write as _};

use crate::error::{Error, Result};
use crate::types::TypeTag;
use crate::value::Value;

/// Bump allocator over a caller-supplied byte buffer.
///
/// Casting to a variable-length type writes the new payload here; the cast
/// value then borrows it, so the buffer must outlive the rowkey.
pub struct Scratch<'a> {
    free: &'a mut [u8],
    used: usize,
}

impl<'a> Scratch<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Scratch { free: buf, used: 0 }
    }

    /// Bytes handed out so far.
    pub fn used(&self) -> usize {
        self.used
    }

    pub fn remaining(&self) -> usize {
        self.free.len()
    }

    /// Carve `len` bytes off the front of the free region.
    pub fn alloc(&mut self, len: usize) -> Result<&'a mut [u8]> {
        if len > self.free.len() {
            return Err(Error::BufferTooSmall {
                needed: len,
                available: self.free.len(),
            });
        }
        let free = std::mem::take(&mut self.free);
        let (head, tail) = free.split_at_mut(len);
        self.free = tail;
        self.used += len;
        Ok(head)
    }

    /// Copy `bytes` into the scratch area and return the stored copy.
    pub fn store(&mut self, bytes: &[u8]) -> Result<&'a [u8]> {
        let dst = self.alloc(bytes.len())?;
        dst.copy_from_slice(bytes);
        Ok(dst)
    }

    /// Render `value` straight into the free region and keep the result.
    ///
    /// On overflow nothing is handed out and `needed` reports the full
    /// rendered length.
    pub fn store_display(&mut self, value: &dyn fmt::Display) -> Result<&'a [u8]> {
        let mut writer = FreeRegion {
            buf: &mut *self.free,
            written: 0,
        };
        // FreeRegion never fails, it only counts past the end.
        let _ = write!(writer, "{value}");
        let needed = writer.written;
        let dst = self.alloc(needed)?;
        Ok(dst)
    }
}

/// `fmt::Write` over a byte slice that keeps counting once the slice is full.
struct FreeRegion<'b> {
    buf: &'b mut [u8],
    written: usize,
}

impl fmt::Write for FreeRegion<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.written + s.len();
        if let Some(dst) = self.buf.get_mut(self.written..end) {
            dst.copy_from_slice(s.as_bytes());
        }
        self.written = end;
        Ok(())
    }
}

impl<'a> Value<'a> {
    /// Cast this value in place to `to`, returning the scratch bytes the
    /// new payload consumed.
    ///
    /// NULL, the sentinels and same-type casts are left untouched.
    pub fn cast_to(&mut self, to: TypeTag, scratch: &mut Scratch<'a>) -> Result<usize> {
        let from = self.type_tag();
        if from == to || matches!(self, Value::Null | Value::Min | Value::Max) {
            return Ok(0);
        }
        let fail = Error::CastFailure { from, to };

        let cast = match to {
            TypeTag::Int => Value::Int(self.to_i64().ok_or(fail)?),
            TypeTag::Double => Value::Double(self.to_f64().ok_or(fail)?),
            TypeTag::Float => {
                let v = self.to_f64().ok_or(fail.clone())?;
                let narrowed = v as f32;
                if v.is_finite() && !narrowed.is_finite() {
                    return Err(fail);
                }
                Value::Float(narrowed)
            }
            TypeTag::DateTime => {
                let secs = match *self {
                    Value::Int(v) => Some(v),
                    Value::PreciseDateTime(us) => Some(us.div_euclid(1_000_000)),
                    Value::Varchar(bytes) => parse::<i64>(bytes),
                    _ => None,
                };
                Value::DateTime(secs.ok_or(fail)?)
            }
            TypeTag::PreciseDateTime => {
                let micros = match *self {
                    Value::Int(v) => Some(v),
                    Value::DateTime(s) => s.checked_mul(1_000_000),
                    Value::Varchar(bytes) => parse::<i64>(bytes),
                    _ => None,
                };
                Value::PreciseDateTime(micros.ok_or(fail)?)
            }
            TypeTag::Bool => {
                let b = match *self {
                    Value::Int(v) => Some(v != 0),
                    Value::Float(v) => Some(v != 0.0),
                    Value::Double(v) => Some(v != 0.0),
                    Value::Varchar(bytes) => parse_bool(bytes),
                    _ => None,
                };
                Value::Bool(b.ok_or(fail)?)
            }
            TypeTag::Varchar => {
                let stored = scratch.store_display(&*self)?;
                *self = Value::Varchar(stored);
                return Ok(stored.len());
            }
            TypeTag::Null | TypeTag::Extend => return Err(fail),
        };
        *self = cast;
        Ok(0)
    }

    /// Copy this value so that any varchar payload lives in `scratch`.
    pub fn copy_into<'b>(&self, scratch: &mut Scratch<'b>) -> Result<Value<'b>> {
        Ok(match *self {
            Value::Null => Value::Null,
            Value::Int(v) => Value::Int(v),
            Value::Float(v) => Value::Float(v),
            Value::Double(v) => Value::Double(v),
            Value::DateTime(v) => Value::DateTime(v),
            Value::PreciseDateTime(v) => Value::PreciseDateTime(v),
            Value::Varchar(bytes) => Value::Varchar(scratch.store(bytes)?),
            Value::Bool(v) => Value::Bool(v),
            Value::Min => Value::Min,
            Value::Max => Value::Max,
        })
    }

    fn to_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(v) | Value::DateTime(v) | Value::PreciseDateTime(v) => Some(v),
            Value::Bool(v) => Some(i64::from(v)),
            Value::Float(v) => f64_to_i64(f64::from(v)),
            Value::Double(v) => f64_to_i64(v),
            Value::Varchar(bytes) => parse::<i64>(bytes),
            _ => None,
        }
    }

    fn to_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(v) => Some(v as f64),
            Value::Float(v) => Some(f64::from(v)),
            Value::Double(v) => Some(v),
            Value::Bool(v) => Some(if v { 1.0 } else { 0.0 }),
            Value::Varchar(bytes) => parse::<f64>(bytes),
            _ => None,
        }
    }
}

fn f64_to_i64(v: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Some(v.trunc() as i64)
    } else {
        None
    }
}

fn parse<T: std::str::FromStr>(bytes: &[u8]) -> Option<T> {
    std::str::from_utf8(bytes).ok()?.trim().parse().ok()
}

fn parse_bool(bytes: &[u8]) -> Option<bool> {
    let text = std::str::from_utf8(bytes).ok()?.trim();
    if text.eq_ignore_ascii_case("true") || text == "1" {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") || text == "0" {
        Some(false)
    } else {
        None
    }
}
