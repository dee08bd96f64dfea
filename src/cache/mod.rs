pub mod memory;
pub mod session;

pub use memory::MemoryCache;
pub use session::SessionCache;

use std::sync::Arc;
use async_trait::async_trait;
use crate::config::{CacheBackend, CacheConfig};
use crate::models::Dataset;
use crate::sources::SourceKind;

/// Keys for the slow-changing catalogs the cache holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKey {
    WeaknessCatalog,
    AttackPatternCatalog,
}

impl DatasetKey {
    pub const ALL: [DatasetKey; 2] = [Self::WeaknessCatalog, Self::AttackPatternCatalog];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeaknessCatalog => "CWE_DB_V1",
            Self::AttackPatternCatalog => "CAPEC_DB_V1",
        }
    }

    pub fn source(&self) -> SourceKind {
        match self {
            Self::WeaknessCatalog => SourceKind::WeaknessCatalog,
            Self::AttackPatternCatalog => SourceKind::AttackPatternCatalog,
        }
    }
}

impl std::fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared store for reference datasets. Entries are immutable snapshots:
/// `put` replaces the whole `Arc`, last writer wins. No expiry.
///
/// Backends never fail the caller; storage problems are logged and read
/// as a miss.
#[async_trait]
pub trait ReferenceCache: Send + Sync {
    async fn get(&self, key: DatasetKey) -> Option<Arc<Dataset>>;
    async fn put(&self, key: DatasetKey, dataset: Arc<Dataset>);
    async fn invalidate(&self, key: DatasetKey);
    async fn clear(&self);
}

/// Build the backend named in the cache configuration.
pub fn from_config(config: &CacheConfig) -> Arc<dyn ReferenceCache> {
    match config.backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::Session => Arc::new(SessionCache::new(config.session_dir())),
    }
}
