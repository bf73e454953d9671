pub mod catalog;
pub mod holder;

pub use catalog::{Catalog, MemoryCatalog};
pub use holder::SchemaHolder;

use crate::types::{SortOrder, TypeTag};

/// Type and sort direction of one rowkey position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDesc {
    pub column_id: u64,
    pub declared_type: TypeTag,
    pub order: SortOrder,
}

/// Ordered column descriptors for a table's rowkey. Its length is the arity
/// every rowkey bound to the table is expected to have.
///
/// Owned by the catalog behind an `Arc`; rowkeys and holders only borrow it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeySchema {
    columns: Vec<ColumnDesc>,
}

impl KeySchema {
    pub fn new(columns: Vec<ColumnDesc>) -> Self {
        KeySchema { columns }
    }

    pub fn builder() -> KeySchemaBuilder {
        KeySchemaBuilder::default()
    }

    /// Number of rowkey columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, index: usize) -> Option<&ColumnDesc> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[ColumnDesc] {
        &self.columns
    }

    /// Sort direction of column `index`; ascending past the last column.
    pub fn order(&self, index: usize) -> SortOrder {
        self.columns
            .get(index)
            .map(|c| c.order)
            .unwrap_or_default()
    }
}

/// Builds a [`KeySchema`] column by column. Column ids are assigned from 1
/// in declaration order unless given explicitly.
#[derive(Debug, Default)]
pub struct KeySchemaBuilder {
    columns: Vec<ColumnDesc>,
}

impl KeySchemaBuilder {
    pub fn column(mut self, declared_type: TypeTag, order: SortOrder) -> Self {
        let column_id = self.columns.len() as u64 + 1;
        self.columns.push(ColumnDesc {
            column_id,
            declared_type,
            order,
        });
        self
    }

    pub fn column_with_id(mut self, column_id: u64, declared_type: TypeTag, order: SortOrder) -> Self {
        self.columns.push(ColumnDesc {
            column_id,
            declared_type,
            order,
        });
        self
    }

    pub fn build(self) -> KeySchema {
        KeySchema::new(self.columns)
    }
}
