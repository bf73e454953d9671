//! Coerce a rowkey's values to the declared column types of a key schema.
//!
//! Used when keys arrive from outside (client requests, other replicas)
//! with types that differ from the table's canonical ones. Casts happen in
//! place; any new varchar payload is written into a caller scratch buffer.

use tracing::{error, warn};

use crate::error::{Error, Result};
use crate::rowkey::{Rowkey, RowkeyMut};
use crate::schema::KeySchema;
use crate::value::Scratch;

fn check_arity(schema: &KeySchema, rowkey_len: usize) -> Result<()> {
    if schema.len() != rowkey_len {
        error!(
            rowkey_info_len = schema.len(),
            rowkey_len, "wrong rowkey length for key schema"
        );
        return Err(Error::ArityMismatch {
            schema: schema.len(),
            rowkey: rowkey_len,
        });
    }
    Ok(())
}

/// Cast every value whose type differs from its column's declared type.
/// Returns the scratch bytes consumed.
///
/// Not transactional: on `CastFailure` the values before the failing one
/// are already cast.
pub fn cast_rowkey<'a>(schema: &KeySchema, rowkey: &mut RowkeyMut<'_, 'a>, scratch: &'a mut [u8]) -> Result<usize> {
    check_arity(schema, rowkey.count())?;

    let mut scratch = Scratch::new(scratch);
    for (i, (cell, column)) in rowkey.values_mut().iter_mut().zip(schema.columns()).enumerate() {
        if cell.type_tag() == column.declared_type {
            continue;
        }
        cell.cast_to(column.declared_type, &mut scratch).inspect_err(|e| {
            warn!(index = i, error = %e, "failed to cast rowkey element");
        })?;
    }
    Ok(scratch.used())
}

/// Whether [`cast_rowkey`] could need scratch space for this key: some value
/// differs from its declared type and that type is variable-length.
/// Performs no cast.
pub fn cast_needs_buffer(schema: &KeySchema, rowkey: Rowkey<'_>) -> Result<bool> {
    check_arity(schema, rowkey.len())?;

    Ok(rowkey
        .values()
        .iter()
        .zip(schema.columns())
        .any(|(cell, column)| cell.type_tag() != column.declared_type && column.declared_type.is_variable_length()))
}
