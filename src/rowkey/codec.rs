//! Binary form of a rowkey.
//!
//! ```text
//! ┌──────────────────┬───────────┬───────────┬─────┬───────────┐
//! │ count (varint)   │ value 0   │ value 1   │ ... │ value n-1 │
//! └──────────────────┴───────────┴───────────┴─────┴───────────┘
//! ```
//!
//! No padding and no checksum trailer. The stream variant omits the count
//! and infers it from how many values fill the input.

use tracing::error;

use crate::error::{Error, Result};
use crate::rowkey::{Rowkey, RowkeyMut};
use crate::value::Value;
use crate::varint;

impl Rowkey<'_> {
    /// Exact number of bytes `serialize` writes.
    pub fn serialized_size(&self) -> usize {
        varint::encoded_len(self.len() as u64) + self.serialized_values_size()
    }

    /// Bytes of the values alone, without the count header.
    pub fn serialized_values_size(&self) -> usize {
        self.values.iter().map(Value::encoded_size).sum()
    }

    /// Write the key at the start of `buf`, returning bytes written.
    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize> {
        let header = varint::encode(self.len() as u64, buf)?;
        let values = self.serialize_values(&mut buf[header..])?;
        Ok(header + values)
    }

    /// Write only the values, back to back. Pairs with
    /// [`RowkeyMut::deserialize_from_stream`].
    pub fn serialize_values(&self, buf: &mut [u8]) -> Result<usize> {
        let mut pos = 0;
        for value in self.values {
            pos += value.encode_into(&mut buf[pos..])?;
        }
        Ok(pos)
    }

    /// Serialize into a freshly allocated, exactly sized buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; self.serialized_size()];
        self.serialize(&mut buf)?;
        Ok(buf)
    }
}

impl<'a> RowkeyMut<'_, 'a> {
    /// Decode a count-prefixed key from the start of `data` into the
    /// reserved slots, returning bytes consumed.
    ///
    /// The count must fit the capacity; slots are never allocated here. The
    /// live count is only updated once every value decoded, though slots may
    /// already be overwritten when a later value fails.
    pub fn deserialize(&mut self, data: &'a [u8]) -> Result<usize> {
        let slots = self.storage()?;
        let capacity = slots.len();

        let (raw_count, mut pos) = varint::decode(data)?;
        let count = usize::try_from(raw_count).unwrap_or(usize::MAX);
        if count > capacity {
            error!(
                expect_max_count = capacity,
                real_count = raw_count,
                "rowkey element count greater than reserved capacity"
            );
            return Err(Error::CapacityExceeded { count, capacity });
        }

        for slot in &mut slots[..count] {
            let (value, used) = Value::decode(&data[pos..])?;
            *slot = value;
            pos += used;
        }

        self.count = count;
        Ok(pos)
    }

    /// Decode values that were written without a count header.
    ///
    /// Values are read until either the capacity or the input runs out; both
    /// must run out together. Trailing bytes after the last slot is filled
    /// are `SizeOverflow`. Input that ends exactly on a value boundary
    /// before capacity is reached succeeds with the shorter count.
    pub fn deserialize_from_stream(&mut self, data: &'a [u8]) -> Result<()> {
        let slots = self.storage()?;
        let capacity = slots.len();

        let mut pos = 0;
        let mut i = 0;
        while i < capacity && pos < data.len() {
            let (value, used) = Value::decode(&data[pos..]).inspect_err(|e| {
                error!(index = i, error = %e, "failed to deserialize rowkey element");
            })?;
            slots[i] = value;
            pos += used;
            i += 1;
        }

        if pos != data.len() {
            error!(
                pos,
                buf_len = data.len(),
                decoded = i,
                capacity,
                "rowkey element count does not match stream length"
            );
            return Err(Error::SizeOverflow {
                consumed: pos,
                len: data.len(),
            });
        }

        self.count = i;
        Ok(())
    }
}
