use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Memo cache: function identity + input hash → computed value
// ---------------------------------------------------------------------------

/// Identifies one memoized call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub function: &'static str,
    pub input: u64,
}

impl CacheKey {
    pub fn new<T: Hash + ?Sized>(function: &'static str, input: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        input.hash(&mut hasher);
        Self {
            function,
            input: hasher.finish(),
        }
    }
}

/// Type-erased store of memoized results.
///
/// Values are shared as `Arc`s and never mutated after insertion; they are
/// dropped through [`MemoCache::invalidate`] or [`MemoCache::retain_only`].
#[derive(Default)]
pub struct MemoCache {
    entries: HashMap<CacheKey, Arc<dyn Any + Send + Sync>>,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, if present and of type `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: &CacheKey) -> Option<Arc<T>> {
        self.entries
            .get(key)
            .and_then(|value| Arc::clone(value).downcast::<T>().ok())
    }

    pub fn get_or_insert_with<T, F>(&mut self, key: CacheKey, compute: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        if let Some(hit) = self.get::<T>(&key) {
            log::debug!("cache hit: {}", key.function);
            return hit;
        }
        log::debug!("cache miss: {}", key.function);
        let value = Arc::new(compute());
        self.entries.insert(key, value.clone());
        value
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with) for fallible
    /// computations. Errors are returned and nothing is stored.
    pub fn get_or_try_insert_with<T, E, F>(&mut self, key: CacheKey, compute: F) -> Result<Arc<T>, E>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(hit) = self.get::<T>(&key) {
            log::debug!("cache hit: {}", key.function);
            return Ok(hit);
        }
        log::debug!("cache miss: {}", key.function);
        let value = Arc::new(compute()?);
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    /// Drop every entry of one function. Returns how many were removed.
    pub fn invalidate(&mut self, function: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.function != function);
        before - self.entries.len()
    }

    /// Drop every entry of `key.function` except `key` itself. Returns how
    /// many were removed.
    pub fn retain_only(&mut self, key: &CacheKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| k.function != key.function || k == key);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
