//! Key-value storage exposed by the execution host.

use std::collections::BTreeMap;

/// Byte-keyed persistent storage.
///
/// Implementations must be deterministic: the same sequence of writes always
/// yields the same reads on every replica.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;
    fn set(&mut self, key: &[u8], value: &[u8]);
    fn delete(&mut self, key: &[u8]);

    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }
}

/// Ordered in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries whose key starts with `prefix`, in key order.
    pub fn prefix_iter<'a>(
        &'a self,
        prefix: &'a [u8],
    ) -> impl Iterator<Item = (&'a [u8], &'a [u8])> + 'a {
        self.entries
            .range(prefix.to_vec()..)
            .take_while(move |(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.as_slice(), v.as_slice()))
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.entries.insert(key.to_vec(), value.to_vec());
    }

    fn delete(&mut self, key: &[u8]) {
        self.entries.remove(key);
    }
}

/// Write buffer over a parent store.
///
/// Reads see buffered writes first. `write` flushes the buffer into the
/// parent; dropping the cache without writing discards every change.
pub struct CacheStore<'p, S: KvStore + ?Sized> {
    parent: &'p mut S,
    // None marks a buffered delete
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'p, S: KvStore + ?Sized> CacheStore<'p, S> {
    pub fn new(parent: &'p mut S) -> Self {
        Self {
            parent,
            pending: BTreeMap::new(),
        }
    }

    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    pub fn write(self) {
        let CacheStore { parent, pending } = self;
        for (key, value) in pending {
            match value {
                Some(v) => parent.set(&key, &v),
                None => parent.delete(&key),
            }
        }
    }
}

impl<S: KvStore + ?Sized> KvStore for CacheStore<'_, S> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.pending.get(key) {
            Some(buffered) => buffered.clone(),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.pending.insert(key.to_vec(), Some(value.to_vec()));
    }

    fn delete(&mut self, key: &[u8]) {
        self.pending.insert(key.to_vec(), None);
    }
}
