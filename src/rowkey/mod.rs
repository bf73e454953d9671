//! Composite rowkeys: ordered tuples of [`Value`]s that identify and sort
//! rows in a table's primary store.
//!
//! Two views over caller-owned value slots:
//!
//! ```text
//!   RowkeyMut ── slots: [ v0 | v1 | v2 | ·· | ·· ]   capacity = 5
//!                         └──── count = 3 ───┘
//!                                   │ as_rowkey()
//!                                   ▼
//!   Rowkey ───── values: [ v0 | v1 | v2 ]           read-only, Copy
//! ```
//!
//! Neither view allocates value storage; decoding and casting write into
//! slots and byte buffers the caller reserved up front.

pub mod cast;
pub mod codec;
pub mod compare;
pub mod digest;

use std::fmt;
use std::mem;

use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::value::{Scratch, Value};

pub use cast::{cast_needs_buffer, cast_rowkey};
pub use compare::RowkeyLess;

/// Open lower bound for range scans: a single `MIN` value.
pub static MIN_ROWKEY: Rowkey<'static> = Rowkey::new(&[Value::Min]);

/// Open upper bound for range scans: a single `MAX` value.
pub static MAX_ROWKEY: Rowkey<'static> = Rowkey::new(&[Value::Max]);

/// Read-only view of a rowkey. The element count is the slice length.
#[derive(Debug, Clone, Copy)]
pub struct Rowkey<'a> {
    values: &'a [Value<'a>],
}

impl<'a> Rowkey<'a> {
    pub const fn new(values: &'a [Value<'a>]) -> Self {
        Rowkey { values }
    }

    pub fn values(&self) -> &'a [Value<'a>] {
        self.values
    }

    /// Number of values in the key.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Value<'a>> {
        self.values.get(index)
    }

    /// True for keys that compare equal to [`MIN_ROWKEY`].
    pub fn is_min_row(&self) -> bool {
        self.values.first().is_some_and(Value::is_min_value)
    }

    /// True for keys that compare equal to [`MAX_ROWKEY`].
    pub fn is_max_row(&self) -> bool {
        self.values.first().is_some_and(Value::is_max_value)
    }

    /// Sum of the raw value lengths of all elements.
    pub fn binary_key_length(&self) -> usize {
        self.values.iter().map(Value::raw_len).sum()
    }

    /// Bytes a deep copy needs: one slot per value plus every varchar payload.
    pub fn deep_copy_size(&self) -> usize {
        let payload: usize = self
            .values
            .iter()
            .filter_map(|v| match v {
                Value::Varchar(bytes) => Some(bytes.len()),
                _ => None,
            })
            .sum();
        self.len() * mem::size_of::<Value<'_>>() + payload
    }

    /// Copy this key into caller-owned slots, moving varchar payloads into
    /// `arena`. The copy no longer borrows from wherever `self` came from,
    /// and `slots` is free again once the copy is dropped.
    pub fn deep_copy<'s, 'b: 's>(
        &self,
        slots: &'s mut [Value<'b>],
        arena: &'b mut [u8],
    ) -> Result<Rowkey<'s>> {
        if slots.len() < self.len() {
            return Err(Error::CapacityExceeded {
                count: self.len(),
                capacity: slots.len(),
            });
        }
        let mut scratch = Scratch::new(arena);
        for (dst, src) in slots.iter_mut().zip(self.values) {
            *dst = src.copy_into(&mut scratch)?;
        }
        Ok(Rowkey::new(&slots[..self.len()]))
    }

    /// Log every element at debug level.
    pub fn dump(&self) {
        for (index, value) in self.values.iter().enumerate() {
            debug!(index, value = %value, type_tag = ?value.type_tag(), "rowkey element");
        }
    }
}

impl fmt::Display for Rowkey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// Mutable view over caller-reserved value slots with a live count.
///
/// Capacity is the slot slice length and never changes; `count` tracks
/// how many leading slots hold the key. A detached view has no slots at all,
/// which decoding reports as [`Error::UnexpectedNullStorage`].
#[derive(Debug)]
pub struct RowkeyMut<'s, 'a> {
    slots: Option<&'s mut [Value<'a>]>,
    count: usize,
}

impl<'s, 'a> RowkeyMut<'s, 'a> {
    /// View over `slots` with every slot live.
    pub fn new(slots: &'s mut [Value<'a>]) -> Self {
        let count = slots.len();
        RowkeyMut {
            slots: Some(slots),
            count,
        }
    }

    /// View over `slots` with only the first `count` live.
    pub fn with_count(slots: &'s mut [Value<'a>], count: usize) -> Result<Self> {
        let mut key = Self::new(slots);
        key.set_count(count)?;
        Ok(key)
    }

    /// A view with no backing storage.
    pub fn detached() -> Self {
        RowkeyMut {
            slots: None,
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.as_ref().map_or(0, |s| s.len())
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn set_count(&mut self, count: usize) -> Result<()> {
        let capacity = self.capacity();
        if count > capacity {
            return Err(Error::CapacityExceeded { count, capacity });
        }
        self.count = count;
        Ok(())
    }

    pub fn is_detached(&self) -> bool {
        self.slots.is_none()
    }

    /// The live prefix as a read-only key.
    pub fn as_rowkey(&self) -> Rowkey<'_> {
        match &self.slots {
            Some(slots) => Rowkey::new(&slots[..self.count]),
            None => Rowkey::new(&[]),
        }
    }

    /// The live prefix, writable.
    pub fn values_mut(&mut self) -> &mut [Value<'a>] {
        match self.slots.as_deref_mut() {
            Some(slots) => &mut slots[..self.count],
            None => &mut [],
        }
    }

    /// All reserved slots, or `UnexpectedNullStorage` for a detached view.
    fn storage(&mut self) -> Result<&mut [Value<'a>]> {
        match self.slots.as_deref_mut() {
            Some(slots) => Ok(slots),
            None => {
                error!("rowkey has no backing value slots");
                Err(Error::UnexpectedNullStorage)
            }
        }
    }
}
