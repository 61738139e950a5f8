use casket_types::ObjectId;

/// Errors from repository and registry operations.
///
/// The first three variants are expected outcomes that callers branch on;
/// none of them leave the store in a modified state.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// A repository was looked up without creation and does not exist.
    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    /// The object is absent from the repository, or the repository itself
    /// is absent. Deleted objects report this too.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// A write targeted an oid that is already stored. The existing object
    /// is unchanged.
    #[error("object already exists: {0}")]
    ObjectAlreadyExists(ObjectId),

    /// A thread panicked while holding a store lock.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
