use crc::{Crc, Digest, CRC_64_ECMA_182};

use crate::value::Value;

static CRC64: Crc<u64> = Crc::<u64>::new(&CRC_64_ECMA_182);

/// Running CRC-64 over many keys, owned by the caller.
///
/// A rowkey feeds exactly the bytes its rolling [`checksum`] would fold, in
/// the same order, so per-key accumulation is identical in both styles.
///
/// [`checksum`]: crate::rowkey::Rowkey::checksum
pub struct BatchChecksum {
    digest: Digest<'static, u64>,
}

impl BatchChecksum {
    pub fn new() -> Self {
        BatchChecksum {
            digest: CRC64.digest(),
        }
    }

    /// Append raw bytes to the running checksum.
    pub fn fill(&mut self, bytes: &[u8]) {
        self.digest.update(bytes);
    }

    /// Checksum of everything filled so far. Does not reset.
    pub fn crc64(&self) -> u64 {
        self.digest.clone().finalize()
    }

    pub fn reset(&mut self) {
        self.digest = CRC64.digest();
    }
}

impl Default for BatchChecksum {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-width canonical form: tag byte, then the payload in little-endian.
/// Varchar bytes are passed to `f` separately so nothing is copied.
fn with_canonical_bytes<R>(value: &Value<'_>, f: impl FnOnce(&[u8], &[u8]) -> R) -> R {
    let mut head = [0u8; 9];
    head[0] = value.type_tag() as u8;
    let len = match value {
        Value::Null => 1,
        Value::Min => 2,
        Value::Max => {
            head[1] = 1;
            2
        }
        Value::Bool(v) => {
            head[1] = u8::from(*v);
            2
        }
        Value::Int(v) | Value::DateTime(v) | Value::PreciseDateTime(v) => {
            head[1..9].copy_from_slice(&v.to_le_bytes());
            9
        }
        Value::Float(v) => {
            head[1..5].copy_from_slice(&v.to_bits().to_le_bytes());
            5
        }
        Value::Double(v) => {
            head[1..9].copy_from_slice(&v.to_bits().to_le_bytes());
            9
        }
        Value::Varchar(_) => 1,
    };
    let tail: &[u8] = match value {
        Value::Varchar(bytes) => bytes,
        _ => &[],
    };
    f(&head[..len], tail)
}

impl Value<'_> {
    /// Fold this value into a running CRC-64 seeded with `seed`.
    pub fn checksum(&self, seed: u64) -> u64 {
        with_canonical_bytes(self, |head, tail| {
            let mut digest = CRC64.digest_with_initial(seed);
            digest.update(head);
            digest.update(tail);
            digest.finalize()
        })
    }

    /// Feed this value's canonical bytes into a batch accumulator.
    pub fn feed(&self, batch: &mut BatchChecksum) {
        with_canonical_bytes(self, |head, tail| {
            batch.fill(head);
            batch.fill(tail);
        })
    }

    /// Fold this value into a 32-bit MurmurHash2 seeded with `seed`.
    pub fn murmurhash2(&self, seed: u32) -> u32 {
        with_canonical_bytes(self, |head, tail| murmurhash2(tail, murmurhash2(head, seed)))
    }
}

/// MurmurHash2, 32-bit, little-endian block reads.
pub fn murmurhash2(data: &[u8], seed: u32) -> u32 {
    const M: u32 = 0x5bd1_e995;
    const R: u32 = 24;

    let mut h = seed ^ data.len() as u32;

    let mut blocks = data.chunks_exact(4);
    for block in &mut blocks {
        let mut k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);
        h = h.wrapping_mul(M);
        h ^= k;
    }

    let tail = blocks.remainder();
    if tail.len() >= 3 {
        h ^= u32::from(tail[2]) << 16;
    }
    if tail.len() >= 2 {
        h ^= u32::from(tail[1]) << 8;
    }
    if !tail.is_empty() {
        h ^= u32::from(tail[0]);
        h = h.wrapping_mul(M);
    }

    h ^= h >> 13;
    h = h.wrapping_mul(M);
    h ^= h >> 15;
    h
}
