use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use bytes::Bytes;
use casket_types::ObjectId;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::object::WrittenObject;
use crate::traits::ObjectStore;

/// One named namespace of objects.
///
/// Objects live in a `HashMap` behind a single `Mutex`. Every operation holds
/// the lock from the first map read through any mutation, so two operations
/// on the same repository never interleave. Stored bytes are `Bytes`, so a
/// fetch hands out a reference-counted view instead of copying the object.
pub struct Repository {
    name: String,
    objects: Mutex<HashMap<ObjectId, Bytes>>,
}

impl Repository {
    /// Create a new empty repository.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// The name this repository is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Returns `true` if the repository holds no objects.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Total bytes across all stored objects.
    pub fn total_bytes(&self) -> StoreResult<u64> {
        Ok(self.lock()?.values().map(|data| data.len() as u64).sum())
    }

    /// Sorted list of all object ids in the repository.
    pub fn object_ids(&self) -> StoreResult<Vec<ObjectId>> {
        let map = self.lock()?;
        let mut ids: Vec<ObjectId> = map.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<ObjectId, Bytes>>> {
        self.objects.lock().map_err(|e| {
            warn!(repository = %self.name, "object map lock poisoned");
            StoreError::LockPoisoned(format!("repository {}: {e}", self.name))
        })
    }
}

impl ObjectStore for Repository {
    fn store(&self, id: ObjectId, data: Bytes) -> StoreResult<WrittenObject> {
        let mut map = self.lock()?;
        match map.entry(id) {
            Entry::Occupied(_) => Err(StoreError::ObjectAlreadyExists(id)),
            Entry::Vacant(slot) => {
                let written = WrittenObject::new(id, &data);
                slot.insert(data);
                debug!(repository = %self.name, oid = %id, size = written.size, "stored object");
                Ok(written)
            }
        }
    }

    fn fetch(&self, id: &ObjectId) -> StoreResult<Bytes> {
        let map = self.lock()?;
        map.get(id).cloned().ok_or(StoreError::ObjectNotFound(*id))
    }

    fn delete(&self, id: &ObjectId) -> StoreResult<()> {
        let mut map = self.lock()?;
        match map.remove(id) {
            Some(_) => {
                debug!(repository = %self.name, oid = %id, "deleted object");
                Ok(())
            }
            None => Err(StoreError::ObjectNotFound(*id)),
        }
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.lock()?.contains_key(id))
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().ok();
        f.debug_struct("Repository")
            .field("name", &self.name)
            .field("object_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casket_crypto::ContentHasher;
    use proptest::prelude::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn blob(content: &[u8]) -> Bytes {
        Bytes::copy_from_slice(content)
    }

    // -----------------------------------------------------------------------
    // Core operations
    // -----------------------------------------------------------------------

    #[test]
    fn write_and_fetch() {
        let repo = Repository::new("r1");
        let written = repo.write(blob(b"hello world")).unwrap();
        assert_eq!(written.size, 11);
        assert_eq!(written.oid, ContentHasher::OBJECT.hash(b"hello world"));

        let read_back = repo.fetch(&written.oid).unwrap();
        assert_eq!(&read_back[..], b"hello world");
    }

    #[test]
    fn store_under_explicit_id() {
        let repo = Repository::new("r1");
        let id = ObjectId::from_hash([7; 32]);
        let written = repo.store(id, blob(b"abc")).unwrap();
        assert_eq!(written, WrittenObject { size: 3, oid: id });
        assert!(repo.exists(&id).unwrap());
    }

    #[test]
    fn empty_object_is_storable() {
        let repo = Repository::new("r1");
        let written = repo.write(Bytes::new()).unwrap();
        assert_eq!(written.size, 0);
        assert!(repo.fetch(&written.oid).unwrap().is_empty());
    }

    #[test]
    fn fetch_missing_is_not_found() {
        let repo = Repository::new("r1");
        let id = ObjectId::from_bytes(b"missing");
        assert_eq!(repo.fetch(&id), Err(StoreError::ObjectNotFound(id)));
    }

    // -----------------------------------------------------------------------
    // Write-once
    // -----------------------------------------------------------------------

    #[test]
    fn second_write_conflicts() {
        let repo = Repository::new("r1");
        let first = repo.write(blob(b"once")).unwrap();
        let second = repo.write(blob(b"once"));
        assert_eq!(second, Err(StoreError::ObjectAlreadyExists(first.oid)));
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[test]
    fn conflicting_store_leaves_bytes_unchanged() {
        let repo = Repository::new("r1");
        let id = ObjectId::from_hash([1; 32]);
        repo.store(id, blob(b"original")).unwrap();
        assert!(repo.store(id, blob(b"replacement")).is_err());
        assert_eq!(&repo.fetch(&id).unwrap()[..], b"original");
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[test]
    fn delete_is_final() {
        let repo = Repository::new("r1");
        let written = repo.write(blob(b"to-delete")).unwrap();
        repo.delete(&written.oid).unwrap();
        assert!(!repo.exists(&written.oid).unwrap());
        assert_eq!(
            repo.fetch(&written.oid),
            Err(StoreError::ObjectNotFound(written.oid))
        );
        assert_eq!(
            repo.delete(&written.oid),
            Err(StoreError::ObjectNotFound(written.oid))
        );
    }

    #[test]
    fn delete_missing_object() {
        let repo = Repository::new("r1");
        let id = ObjectId::from_bytes(b"never-written");
        assert_eq!(repo.delete(&id), Err(StoreError::ObjectNotFound(id)));
    }

    #[test]
    fn rewrite_after_delete_succeeds() {
        let repo = Repository::new("r1");
        let written = repo.write(blob(b"again")).unwrap();
        repo.delete(&written.oid).unwrap();
        assert_eq!(repo.write(blob(b"again")).unwrap(), written);
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    #[test]
    fn len_and_total_bytes() {
        let repo = Repository::new("r1");
        assert!(repo.is_empty().unwrap());
        repo.write(blob(b"12345")).unwrap();
        repo.write(blob(b"123456789")).unwrap();
        assert_eq!(repo.len().unwrap(), 2);
        assert_eq!(repo.total_bytes().unwrap(), 14);
    }

    #[test]
    fn object_ids_are_sorted() {
        let repo = Repository::new("r1");
        for content in [&b"aaa"[..], b"bbb", b"ccc"] {
            repo.write(blob(content)).unwrap();
        }
        let ids = repo.object_ids().unwrap();
        assert_eq!(ids.len(), 3);
        for w in ids.windows(2) {
            assert!(w[0] < w[1]);
        }
    }

    #[test]
    fn debug_format() {
        let repo = Repository::new("dbg");
        repo.write(blob(b"x")).unwrap();
        let debug = format!("{repo:?}");
        assert!(debug.contains("dbg"));
        assert!(debug.contains("object_count"));
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_identical_writes_have_one_winner() {
        const WRITERS: usize = 16;
        let repo = Arc::new(Repository::new("race"));
        let barrier = Arc::new(Barrier::new(WRITERS));

        let handles: Vec<_> = (0..WRITERS)
            .map(|_| {
                let repo = Arc::clone(&repo);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    repo.write(Bytes::from_static(b"contended"))
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect();

        let written = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(StoreError::ObjectAlreadyExists(_))))
            .count();
        assert_eq!(written, 1);
        assert_eq!(conflicts, WRITERS - 1);

        let oid = ContentHasher::OBJECT.hash(b"contended");
        assert_eq!(&repo.fetch(&oid).unwrap()[..], b"contended");
    }

    #[test]
    fn concurrent_distinct_writes_all_land() {
        let repo = Arc::new(Repository::new("parallel"));
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || repo.write(Bytes::from(vec![i; 64])).map(|w| w.oid))
            })
            .collect();
        for h in handles {
            let oid = h.join().expect("thread should not panic").unwrap();
            assert!(repo.exists(&oid).unwrap());
        }
        assert_eq!(repo.len().unwrap(), 8);
    }

    proptest! {
        #[test]
        fn fetch_returns_stored_bytes(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let repo = Repository::new("prop");
            let written = repo.write(Bytes::from(data.clone())).unwrap();
            prop_assert_eq!(written.size, data.len() as u64);
            prop_assert_eq!(repo.fetch(&written.oid).unwrap().to_vec(), data);
        }
    }
}
