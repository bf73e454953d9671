use crate::rowkey::Rowkey;
use crate::value::BatchChecksum;

impl Rowkey<'_> {
    /// Fold every value's checksum over `seed`, in key order.
    /// An empty key returns `seed` unchanged.
    pub fn checksum(&self, seed: u64) -> u64 {
        self.values.iter().fold(seed, |acc, v| v.checksum(acc))
    }

    /// Same traversal as [`checksum`](Self::checksum), folded into a
    /// caller-owned accumulator spanning many keys.
    pub fn checksum_into(&self, batch: &mut BatchChecksum) {
        for value in self.values {
            value.feed(batch);
        }
    }

    /// Fold every value's MurmurHash2 step over `seed`, in key order.
    pub fn murmurhash2(&self, seed: u32) -> u32 {
        self.values.iter().fold(seed, |acc, v| v.murmurhash2(acc))
    }
}
