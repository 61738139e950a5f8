//! Write/read/delete operations addressed by repository name.
//!
//! [`ObjectService`] is what a transport talks to. It resolves the
//! repository through [`Storage`] (creating it only for writes), drops the
//! registry lock, and then runs the repository operation.

use std::sync::Arc;

use bytes::Bytes;
use casket_crypto::ContentHasher;
use casket_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::WrittenObject;
use crate::registry::Storage;
use crate::traits::ObjectStore;

/// The closed set of operations a transport can request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectRequest {
    /// Store `data` in `repository`, creating the repository if needed.
    Write { repository: String, data: Bytes },
    /// Read the object `oid` from `repository`.
    Read { repository: String, oid: ObjectId },
    /// Delete the object `oid` from `repository`.
    Delete { repository: String, oid: ObjectId },
}

impl ObjectRequest {
    /// Name of the repository this request targets.
    pub fn repository(&self) -> &str {
        match self {
            Self::Write { repository, .. }
            | Self::Read { repository, .. }
            | Self::Delete { repository, .. } => repository,
        }
    }
}

/// Successful outcome of an [`ObjectRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectResponse {
    Written(WrittenObject),
    Data(Bytes),
    Deleted,
}

/// Object operations over a shared repository registry.
#[derive(Clone, Debug)]
pub struct ObjectService {
    storage: Arc<Storage>,
    hasher: ContentHasher,
}

impl ObjectService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            storage,
            hasher: ContentHasher::OBJECT,
        }
    }

    /// The registry backing this service.
    pub fn storage(&self) -> &Arc<Storage> {
        &self.storage
    }

    /// Hash `data` and store it in `repository`, creating the repository on
    /// first use.
    pub fn write_object(&self, repository: &str, data: Bytes) -> StoreResult<WrittenObject> {
        let repo = self
            .storage
            .repository(repository, true)?
            .ok_or_else(|| StoreError::RepositoryNotFound(repository.to_string()))?;
        let oid = self.hasher.hash(&data);
        repo.store(oid, data)
    }

    /// Read `oid` from `repository`. A missing repository reports
    /// `ObjectNotFound`, same as a missing object.
    pub fn read_object(&self, repository: &str, oid: &ObjectId) -> StoreResult<Bytes> {
        match self.storage.repository(repository, false)? {
            Some(repo) => repo.fetch(oid),
            None => Err(StoreError::ObjectNotFound(*oid)),
        }
    }

    /// Delete `oid` from `repository`. A missing repository reports
    /// `ObjectNotFound` and is not created.
    pub fn delete_object(&self, repository: &str, oid: &ObjectId) -> StoreResult<()> {
        match self.storage.repository(repository, false)? {
            Some(repo) => repo.delete(oid),
            None => Err(StoreError::ObjectNotFound(*oid)),
        }
    }

    /// Run one request.
    pub fn execute(&self, request: ObjectRequest) -> StoreResult<ObjectResponse> {
        match request {
            ObjectRequest::Write { repository, data } => self
                .write_object(&repository, data)
                .map(ObjectResponse::Written),
            ObjectRequest::Read { repository, oid } => self
                .read_object(&repository, &oid)
                .map(ObjectResponse::Data),
            ObjectRequest::Delete { repository, oid } => self
                .delete_object(&repository, &oid)
                .map(|()| ObjectResponse::Deleted),
        }
    }
}

impl Default for ObjectService {
    fn default() -> Self {
        Self::new(Arc::new(Storage::new()))
    }
}
