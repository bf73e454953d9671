//! # Rowkey Engine
//!
//! The composite sort key of a sorted storage layer: an ordered tuple of
//! typed values that identifies a row and fixes where it sorts.
//!
//! ## Core idea
//! Range scans, merge iterators, compaction and index lookups all agree on
//! one order and one byte form for keys. This crate owns both:
//! comparison (with per-column sort direction and MIN/MAX sentinels),
//! a varint-prefixed binary codec, checksums and hashes, and in-place
//! coercion of externally sourced keys to a table's declared column types.
//!
//! Keys are views over memory the caller owns. Nothing here allocates value
//! slots or varchar payloads; decode targets and scratch buffers are
//! reserved by the caller and borrowed for the duration of a call.

pub mod error;
pub mod rowkey;
pub mod schema;
pub mod types;
pub mod value;
pub mod varint;

// Public re-exports for the top-level API
pub use error::{Error, Result};
pub use rowkey::{MAX_ROWKEY, MIN_ROWKEY, Rowkey, RowkeyLess, RowkeyMut, cast_needs_buffer, cast_rowkey};
pub use schema::{Catalog, ColumnDesc, KeySchema, MemoryCatalog, SchemaHolder};
pub use types::{SortOrder, TypeTag};
pub use value::{BatchChecksum, MAX_VALUE, MIN_VALUE, Scratch, Value};
