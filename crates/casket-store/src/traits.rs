use bytes::Bytes;
use casket_crypto::ContentHasher;
use casket_types::ObjectId;

use crate::error::StoreResult;
use crate::object::WrittenObject;

/// Write-once, content-addressed object map.
///
/// All implementations must satisfy these invariants:
/// - Once an oid is present its bytes never change. `store` of a present oid
///   fails with `ObjectAlreadyExists` and mutates nothing.
/// - The check-and-insert in `store` is atomic: of N concurrent stores of
///   the same oid exactly one succeeds.
/// - Entries disappear only through `delete`.
/// - The store never interprets object contents.
pub trait ObjectStore: Send + Sync {
    /// Insert `data` under `id` if `id` is absent.
    fn store(&self, id: ObjectId, data: Bytes) -> StoreResult<WrittenObject>;

    /// Return the bytes stored under `id`.
    ///
    /// Returns `ObjectNotFound` if the id was never stored or was deleted.
    fn fetch(&self, id: &ObjectId) -> StoreResult<Bytes>;

    /// Remove the object stored under `id`.
    ///
    /// Returns `ObjectNotFound` if there was nothing to remove.
    fn delete(&self, id: &ObjectId) -> StoreResult<()>;

    /// Check whether an object exists.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Hash `data` with the object hasher and store it under the result.
    fn write(&self, data: Bytes) -> StoreResult<WrittenObject> {
        let id = ContentHasher::OBJECT.hash(&data);
        self.store(id, data)
    }
}
