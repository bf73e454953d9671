//! Wire form of a single value.
//!
//! ```text
//! ┌──────────┬────────────────────────────────────────────┐
//! │ Tag (1B) │ Payload                                    │
//! ├──────────┼────────────────────────────────────────────┤
//! │ Null     │ (none)                                     │
//! │ Int      │ zig-zag varint                             │
//! │ Float    │ 4B little-endian bits                      │
//! │ Double   │ 8B little-endian bits                      │
//! │ DateTime │ zig-zag varint (seconds)                   │
//! │ Precise  │ zig-zag varint (microseconds)              │
//! │ Varchar  │ varint len + bytes                         │
//! │ Bool     │ 1B (0 / 1)                                 │
//! │ Extend   │ 1B (0 = MIN, 1 = MAX)                      │
//! └──────────┴────────────────────────────────────────────┘
//! ```

use crate::error::{Error, Result};
use crate::types::TypeTag;
use crate::value::Value;
use crate::varint;

const TAG_SIZE: usize = 1;
const EXTEND_MIN: u8 = 0;
const EXTEND_MAX: u8 = 1;

impl<'a> Value<'a> {
    /// Exact number of bytes `encode_into` writes.
    pub fn encoded_size(&self) -> usize {
        TAG_SIZE
            + match self {
                Value::Null => 0,
                Value::Min | Value::Max | Value::Bool(_) => 1,
                Value::Int(v) | Value::DateTime(v) | Value::PreciseDateTime(v) => {
                    varint::encoded_len(varint::zigzag(*v))
                }
                Value::Float(_) => 4,
                Value::Double(_) => 8,
                Value::Varchar(bytes) => varint::encoded_len(bytes.len() as u64) + bytes.len(),
            }
    }

    /// Write this value at the start of `buf`, returning bytes written.
    pub fn encode_into(&self, buf: &mut [u8]) -> Result<usize> {
        let needed = self.encoded_size();
        if buf.len() < needed {
            return Err(Error::BufferTooSmall {
                needed,
                available: buf.len(),
            });
        }

        buf[0] = self.type_tag() as u8;
        let payload = &mut buf[TAG_SIZE..];
        let written = match self {
            Value::Null => 0,
            Value::Min => {
                payload[0] = EXTEND_MIN;
                1
            }
            Value::Max => {
                payload[0] = EXTEND_MAX;
                1
            }
            Value::Bool(v) => {
                payload[0] = u8::from(*v);
                1
            }
            Value::Int(v) | Value::DateTime(v) | Value::PreciseDateTime(v) => {
                varint::encode(varint::zigzag(*v), payload)?
            }
            Value::Float(v) => {
                payload[..4].copy_from_slice(&v.to_bits().to_le_bytes());
                4
            }
            Value::Double(v) => {
                payload[..8].copy_from_slice(&v.to_bits().to_le_bytes());
                8
            }
            Value::Varchar(bytes) => {
                let n = varint::encode(bytes.len() as u64, payload)?;
                payload[n..n + bytes.len()].copy_from_slice(bytes);
                n + bytes.len()
            }
        };
        Ok(TAG_SIZE + written)
    }

    /// Decode one value from the start of `data`, returning (value,
    /// bytes_consumed). Varchar payloads borrow from `data`.
    pub fn decode(data: &'a [u8]) -> Result<(Self, usize)> {
        let (&tag, payload) = data.split_first().ok_or(Error::TruncatedInput)?;
        let tag = tag_from_u8(tag)?;

        let (value, used) = match tag {
            TypeTag::Null => (Value::Null, 0),
            TypeTag::Int => {
                let (v, n) = varint::decode(payload)?;
                (Value::Int(varint::unzigzag(v)), n)
            }
            TypeTag::DateTime => {
                let (v, n) = varint::decode(payload)?;
                (Value::DateTime(varint::unzigzag(v)), n)
            }
            TypeTag::PreciseDateTime => {
                let (v, n) = varint::decode(payload)?;
                (Value::PreciseDateTime(varint::unzigzag(v)), n)
            }
            TypeTag::Float => {
                let bits = fixed::<4>(payload)?;
                (Value::Float(f32::from_bits(u32::from_le_bytes(bits))), 4)
            }
            TypeTag::Double => {
                let bits = fixed::<8>(payload)?;
                (Value::Double(f64::from_bits(u64::from_le_bytes(bits))), 8)
            }
            TypeTag::Bool => match fixed::<1>(payload)?[0] {
                0 => (Value::Bool(false), 1),
                1 => (Value::Bool(true), 1),
                b => return Err(Error::Corruption(format!("invalid bool byte: {b}"))),
            },
            TypeTag::Extend => match fixed::<1>(payload)?[0] {
                EXTEND_MIN => (Value::Min, 1),
                EXTEND_MAX => (Value::Max, 1),
                b => return Err(Error::Corruption(format!("invalid extend marker: {b}"))),
            },
            TypeTag::Varchar => {
                let (len, n) = varint::decode(payload)?;
                let len = usize::try_from(len)
                    .map_err(|_| Error::Corruption(format!("varchar length {len} too large")))?;
                let end = n.checked_add(len).ok_or(Error::TruncatedInput)?;
                if payload.len() < end {
                    return Err(Error::TruncatedInput);
                }
                (Value::Varchar(&payload[n..end]), end)
            }
        };
        Ok((value, TAG_SIZE + used))
    }
}

fn tag_from_u8(byte: u8) -> Result<TypeTag> {
    match byte {
        0x00 => Ok(TypeTag::Null),
        0x01 => Ok(TypeTag::Int),
        0x02 => Ok(TypeTag::Float),
        0x03 => Ok(TypeTag::Double),
        0x04 => Ok(TypeTag::DateTime),
        0x05 => Ok(TypeTag::PreciseDateTime),
        0x06 => Ok(TypeTag::Varchar),
        0x07 => Ok(TypeTag::Bool),
        0x7F => Ok(TypeTag::Extend),
        _ => Err(Error::Corruption(format!("invalid value tag: {byte:#04x}"))),
    }
}

fn fixed<const N: usize>(payload: &[u8]) -> Result<[u8; N]> {
    payload
        .get(..N)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::TruncatedInput)
}
