//! # Schema Cache
//!
//! Thread-safe map from record type identifier to its derived schema.
//!
//! Building runs outside the lock. When two callers race on the same type,
//! both build, the first insert wins, and every caller gets the stored
//! `Arc`. Schemas derived from the same type by the same generator are
//! structurally equal, so the loser's work is simply discarded.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use reqfield_core::{Introspect, RecordType};

use crate::error::SchemaError;
use crate::generator::SchemaGenerator;
use crate::schema::Schema;

/// Cloneable handle to a shared schema cache.
#[derive(Debug, Clone, Default)]
pub struct SchemaCache {
    schemas: Arc<RwLock<HashMap<TypeId, Arc<Schema>>>>,
}

impl SchemaCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached schema for `record`, building it with `generator`
    /// on a miss.
    ///
    /// # Errors
    ///
    /// Propagates the generator's [`SchemaError`]. Failed builds are not
    /// cached.
    pub fn get_or_build<G: SchemaGenerator + ?Sized>(
        &self,
        generator: &G,
        record: RecordType,
    ) -> Result<Arc<Schema>, SchemaError> {
        if let Some(schema) = self.get(record.type_id()) {
            return Ok(schema);
        }

        let built = Arc::new(generator.build(record)?);
        let mut guard = self.schemas.write();
        let stored = guard.entry(record.type_id()).or_insert(built);
        Ok(Arc::clone(stored))
    }

    /// Typed form of [`SchemaCache::get_or_build`].
    ///
    /// # Errors
    ///
    /// Propagates the generator's [`SchemaError`].
    pub fn get_or_build_for<T: Introspect, G: SchemaGenerator + ?Sized>(
        &self,
        generator: &G,
    ) -> Result<Arc<Schema>, SchemaError> {
        self.get_or_build(generator, RecordType::of::<T>())
    }

    /// Cached schema for a type identifier, if present.
    pub fn get(&self, type_id: TypeId) -> Option<Arc<Schema>> {
        self.schemas.read().get(&type_id).cloned()
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    /// Whether the cache holds no schema.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached schema.
    pub fn clear(&self) {
        self.schemas.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::JsonGenerator;
    use reqfield_core::impl_record;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[derive(Default)]
    struct Login {
        email: String,
        password: String,
    }

    impl_record!(Login {
        email: scalar => r#"json:"email""#,
        password: scalar => r#"json:"password""#,
    });

    #[derive(Default)]
    struct Broken {
        email: String,
    }

    impl_record!(Broken {
        email: scalar,
    });

    /// Counts how many times a schema was actually derived.
    #[derive(Default)]
    struct CountingGenerator {
        inner: JsonGenerator,
        builds: AtomicUsize,
    }

    impl SchemaGenerator for CountingGenerator {
        fn build(&self, record: RecordType) -> Result<Schema, SchemaError> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            self.inner.build(record)
        }
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = SchemaCache::new();
        let generator = CountingGenerator::default();
        assert!(cache.is_empty());

        let first = cache.get_or_build_for::<Login, _>(&generator).unwrap();
        let second = cache.get_or_build_for::<Login, _>(&generator).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(generator.builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(TypeId::of::<Login>()).is_some());
    }

    #[test]
    fn test_failed_build_not_cached() {
        let cache = SchemaCache::new();
        let generator = JsonGenerator::default();
        assert!(cache.get_or_build_for::<Broken, _>(&generator).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let cache = SchemaCache::new();
        cache
            .get_or_build_for::<Login, _>(&JsonGenerator::default())
            .unwrap();
        cache.clear();
        assert!(cache.get(TypeId::of::<Login>()).is_none());
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = SchemaCache::new();
        let clone = cache.clone();
        clone
            .get_or_build_for::<Login, _>(&JsonGenerator::default())
            .unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_callers_observe_one_schema() {
        let cache = SchemaCache::new();
        let generator = Arc::new(JsonGenerator::default());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let generator = Arc::clone(&generator);
                thread::spawn(move || {
                    cache
                        .get_or_build_for::<Login, _>(generator.as_ref())
                        .unwrap()
                })
            })
            .collect();

        let schemas: Vec<Arc<Schema>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let stored = cache.get(TypeId::of::<Login>()).unwrap();
        assert_eq!(cache.len(), 1);
        for schema in &schemas {
            assert!(Arc::ptr_eq(schema, &stored));
        }
    }
}
