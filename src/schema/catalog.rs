use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::schema::KeySchema;

/// Source of table key schemas.
///
/// The catalog owns each schema; lookups hand out shared references that
/// callers may downgrade and cache (see [`SchemaHolder`]).
///
/// [`SchemaHolder`]: crate::schema::SchemaHolder
pub trait Catalog: Send + Sync {
    fn lookup_table(&self, table_id: u64) -> Option<Arc<KeySchema>>;
}

/// In-memory catalog keyed by table id.
#[derive(Default)]
pub struct MemoryCatalog {
    tables: RwLock<HashMap<u64, Arc<KeySchema>>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a table's schema, returning the shared handle.
    pub fn register(&self, table_id: u64, schema: KeySchema) -> Arc<KeySchema> {
        let schema = Arc::new(schema);
        self.tables.write().insert(table_id, Arc::clone(&schema));
        schema
    }

    /// Drop a table. Holders that cached it resolve to `None` afterwards
    /// unless someone else still holds the schema.
    pub fn remove(&self, table_id: u64) -> Option<Arc<KeySchema>> {
        self.tables.write().remove(&table_id)
    }

    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

impl Catalog for MemoryCatalog {
    fn lookup_table(&self, table_id: u64) -> Option<Arc<KeySchema>> {
        self.tables.read().get(&table_id).cloned()
    }
}
