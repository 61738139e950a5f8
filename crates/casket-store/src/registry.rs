//! The repository registry.
//!
//! [`Storage`] maps repository names to shared [`Repository`] handles. Its
//! lock covers only the name lookup or insert; callers receive an
//! `Arc<Repository>` after the registry guard is dropped, so the registry
//! lock and a repository lock are never held at the same time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::repository::Repository;

/// Aggregate counts across every registered repository.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    pub repositories: usize,
    pub objects: usize,
    pub bytes: u64,
}

/// Registry of named repositories.
///
/// Constructed once per process and shared behind an `Arc`. At most one
/// [`Repository`] instance ever exists per name.
#[derive(Default)]
pub struct Storage {
    repositories: Mutex<HashMap<String, Arc<Repository>>>,
}

impl Storage {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the repository called `name`.
    ///
    /// With `create == false` a missing name yields `None` and nothing is
    /// inserted. With `create == true` a missing name is installed as an
    /// empty repository; concurrent creators of the same name all receive
    /// the same instance.
    pub fn repository(&self, name: &str, create: bool) -> StoreResult<Option<Arc<Repository>>> {
        let mut repos = self.lock()?;
        if let Some(repo) = repos.get(name) {
            return Ok(Some(Arc::clone(repo)));
        }
        if !create {
            return Ok(None);
        }
        let repo = Arc::new(Repository::new(name));
        repos.insert(name.to_string(), Arc::clone(&repo));
        debug!(repository = %name, "created repository");
        Ok(Some(repo))
    }

    /// Look up an existing repository, failing with `RepositoryNotFound`.
    pub fn require(&self, name: &str) -> StoreResult<Arc<Repository>> {
        self.repository(name, false)?
            .ok_or_else(|| StoreError::RepositoryNotFound(name.to_string()))
    }

    /// Number of registered repositories.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Returns `true` if no repository has been created yet.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Sorted names of all registered repositories.
    pub fn repository_names(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<String> = self.lock()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Object and byte totals across all repositories.
    ///
    /// Repositories are counted one at a time after the registry lock is
    /// released, so the totals are not a single atomic snapshot.
    pub fn stats(&self) -> StoreResult<StorageStats> {
        let repos: Vec<Arc<Repository>> = self.lock()?.values().cloned().collect();
        let mut stats = StorageStats {
            repositories: repos.len(),
            ..StorageStats::default()
        };
        for repo in &repos {
            stats.objects += repo.len()?;
            stats.bytes += repo.total_bytes()?;
        }
        Ok(stats)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, Arc<Repository>>>> {
        self.repositories.lock().map_err(|e| {
            warn!("repository registry lock poisoned");
            StoreError::LockPoisoned(format!("registry: {e}"))
        })
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("repository_count", &self.len().ok())
            .finish()
    }
}
