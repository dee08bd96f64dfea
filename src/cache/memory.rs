use std::sync::Arc;
use async_trait::async_trait;
use dashmap::DashMap;
use crate::models::Dataset;
use super::{DatasetKey, ReferenceCache};

/// Process-lifetime cache. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: Arc<DashMap<DatasetKey, Arc<Dataset>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ReferenceCache for MemoryCache {
    async fn get(&self, key: DatasetKey) -> Option<Arc<Dataset>> {
        self.entries.get(&key).map(|entry| Arc::clone(entry.value()))
    }

    async fn put(&self, key: DatasetKey, dataset: Arc<Dataset>) {
        self.entries.insert(key, dataset);
    }

    async fn invalidate(&self, key: DatasetKey) {
        self.entries.remove(&key);
    }

    async fn clear(&self) {
        self.entries.clear();
    }
}
