use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::debug;

use crate::schema::{Catalog, KeySchema};

/// Cached, non-owning reference to a table's key schema.
///
/// The holder stores a `Weak`, so it never keeps a schema alive after the
/// catalog drops it. Rebinding swaps that one pointer under a lock: a
/// concurrent reader sees either the old or the new schema, never a torn
/// value. A lookup miss leaves the holder unresolved instead of failing;
/// callers find out on first use via [`SchemaHolder::get`].
#[derive(Debug, Default)]
pub struct SchemaHolder {
    schema: RwLock<Weak<KeySchema>>,
}

impl SchemaHolder {
    /// An unresolved holder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Holder bound to `schema` without a catalog round trip.
    pub fn with_schema(schema: &Arc<KeySchema>) -> Self {
        SchemaHolder {
            schema: RwLock::new(Arc::downgrade(schema)),
        }
    }

    /// Holder resolved from `catalog` for `table_id`.
    pub fn from_catalog(catalog: &dyn Catalog, table_id: u64) -> Self {
        let holder = Self::new();
        holder.bind(catalog, table_id);
        holder
    }

    /// Look the table up and cache the result, replacing whatever was cached.
    pub fn bind(&self, catalog: &dyn Catalog, table_id: u64) {
        let resolved = match catalog.lookup_table(table_id) {
            Some(schema) => Arc::downgrade(&schema),
            None => {
                debug!(table_id, "no key schema in catalog, holder left unresolved");
                Weak::new()
            }
        };
        *self.schema.write() = resolved;
    }

    /// Overwrite the cached reference directly.
    pub fn set(&self, schema: &Arc<KeySchema>) {
        *self.schema.write() = Arc::downgrade(schema);
    }

    pub fn clear(&self) {
        *self.schema.write() = Weak::new();
    }

    /// The cached schema, if bound and still alive in the catalog.
    pub fn get(&self) -> Option<Arc<KeySchema>> {
        self.schema.read().upgrade()
    }

    pub fn is_resolved(&self) -> bool {
        self.schema.read().strong_count() > 0
    }
}
