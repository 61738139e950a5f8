//! Content-addressed object storage for Casket.
//!
//! Objects are opaque byte sequences stored under the BLAKE3 hash of their
//! content, grouped into named repositories. Everything lives in memory and
//! is lost when the process exits.
//!
//! # Components
//!
//! - [`Repository`] -- one namespace's `oid -> bytes` map behind a mutex
//! - [`Storage`] -- the registry mapping repository names to repositories
//! - [`ObjectService`] -- write/read/delete addressed by repository name
//!
//! # Design Rules
//!
//! 1. Objects are write-once. Storing an oid that is already present fails
//!    with [`StoreError::ObjectAlreadyExists`] and changes nothing.
//! 2. Check-and-insert is atomic per repository.
//! 3. Repositories are created only by writes, never by reads or deletes.
//! 4. The registry lock and a repository lock are never held together.
//! 5. The store never interprets object contents.

pub mod error;
pub mod object;
pub mod registry;
pub mod repository;
pub mod service;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use object::WrittenObject;
pub use registry::{Storage, StorageStats};
pub use repository::Repository;
pub use service::{ObjectRequest, ObjectResponse, ObjectService};
pub use traits::ObjectStore;
