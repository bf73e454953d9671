//! Unsigned LEB128 varints, plus zig-zag helpers for signed payloads.
//!
//! ```text
//!   300 = 0b1_0010_1100
//!   ┌──────────┬──────────┐
//!   │ 1010_1100│ 0000_0010│   low 7 bits first, high bit = "more follows"
//!   └──────────┴──────────┘
//! ```

use crate::error::{Error, Result};

/// Longest encoding of a u64 (ceil(64 / 7)).
pub const MAX_VARINT_LEN: usize = 10;

/// Number of bytes `encode` will write for `value`.
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Encode `value` at the start of `buf`, returning bytes written.
pub fn encode(value: u64, buf: &mut [u8]) -> Result<usize> {
    let needed = encoded_len(value);
    if buf.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
            available: buf.len(),
        });
    }

    let mut v = value;
    for slot in buf.iter_mut().take(needed - 1) {
        *slot = (v as u8 & 0x7F) | 0x80;
        v >>= 7;
    }
    buf[needed - 1] = v as u8;
    Ok(needed)
}

/// Decode a varint from the start of `data`, returning (value, bytes_read).
pub fn decode(data: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;
    for (i, &byte) in data.iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return Err(Error::Corruption("varint longer than 10 bytes".into()));
        }
        let chunk = u64::from(byte & 0x7F);
        if i == MAX_VARINT_LEN - 1 && chunk > 1 {
            return Err(Error::Corruption("varint overflows u64".into()));
        }
        value |= chunk << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(Error::TruncatedInput)
}

/// Map signed to unsigned so small magnitudes stay short: 0,-1,1,-2 → 0,1,2,3.
pub fn zigzag(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

pub fn unzigzag(v: u64) -> i64 {
    ((v >> 1) as i64) ^ -((v & 1) as i64)
}
