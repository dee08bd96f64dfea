use std::path::{Path, PathBuf};
use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;
use crate::models::Dataset;
use super::{DatasetKey, MemoryCache, ReferenceCache};

/// Cache persisted as one JSON file per dataset under a session directory,
/// so consecutive CLI runs reuse catalogs. Reads go through an in-memory
/// layer first. Disk problems are logged and treated as a miss.
#[derive(Debug, Clone)]
pub struct SessionCache {
    dir: PathBuf,
    memory: MemoryCache,
}

impl SessionCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), memory: MemoryCache::new() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: DatasetKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    async fn load(&self, key: DatasetKey) -> Option<Dataset> {
        let path = self.path_for(key);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read cached dataset");
                return None;
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Discarding unreadable cached dataset");
                let _ = tokio::fs::remove_file(&path).await;
                None
            }
        }
    }

    async fn store(&self, key: DatasetKey, dataset: &Dataset) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_vec(dataset)?;
        // Per-writer temp name, then rename: readers only ever see whole files
        let tmp = self.dir.join(format!("{}.{}.json.tmp", key.as_str(), Uuid::new_v4().simple()));
        tokio::fs::write(&tmp, json).await?;
        if let Err(e) = tokio::fs::rename(&tmp, self.path_for(key)).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }
        Ok(())
    }
}

#[async_trait]
impl ReferenceCache for SessionCache {
    async fn get(&self, key: DatasetKey) -> Option<Arc<Dataset>> {
        if let Some(hit) = self.memory.get(key).await {
            return Some(hit);
        }
        let dataset = Arc::new(self.load(key).await?);
        debug!(key = %key, "Loaded dataset from session cache");
        self.memory.put(key, Arc::clone(&dataset)).await;
        Some(dataset)
    }

    async fn put(&self, key: DatasetKey, dataset: Arc<Dataset>) {
        if let Err(e) = self.store(key, &dataset).await {
            warn!(key = %key, dir = %self.dir.display(), error = %e, "Failed to persist dataset");
        }
        self.memory.put(key, dataset).await;
    }

    async fn invalidate(&self, key: DatasetKey) {
        self.memory.invalidate(key).await;
        let path = self.path_for(key);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "Failed to remove cached dataset");
            }
        }
    }

    async fn clear(&self) {
        for key in DatasetKey::ALL {
            self.invalidate(key).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use crate::models::{AttackPatternCatalog, AttackPatternEntry};

    fn patterns() -> Dataset {
        let mut entries = HashMap::new();
        entries.insert("66".to_string(), AttackPatternEntry { name: Some("SQL Injection".into()) });
        entries.insert("7".to_string(), AttackPatternEntry { name: None });
        Dataset::AttackPatterns(AttackPatternCatalog::from_entries(entries))
    }

    #[tokio::test]
    async fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SessionCache::new(dir.path());
        writer.put(DatasetKey::AttackPatternCatalog, Arc::new(patterns())).await;

        // A fresh instance has an empty memory layer and must hit the file
        let reader = SessionCache::new(dir.path());
        let loaded = reader.get(DatasetKey::AttackPatternCatalog).await.unwrap();
        assert_eq!(*loaded, patterns());
        assert!(dir.path().join("CAPEC_DB_V1.json").exists());
    }

    #[tokio::test]
    async fn test_missing_directory_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path().join("never-created"));
        assert!(cache.get(DatasetKey::WeaknessCatalog).await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("CWE_DB_V1.json"), "{ not json").unwrap();
        let cache = SessionCache::new(dir.path());
        assert!(cache.get(DatasetKey::WeaknessCatalog).await.is_none());
        assert!(!dir.path().join("CWE_DB_V1.json").exists());
    }

    #[tokio::test]
    async fn test_clear_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(dir.path());
        cache.put(DatasetKey::AttackPatternCatalog, Arc::new(patterns())).await;
        cache.clear().await;
        assert!(cache.get(DatasetKey::AttackPatternCatalog).await.is_none());
        assert!(!dir.path().join("CAPEC_DB_V1.json").exists());
    }

    #[tokio::test]
    async fn test_concurrent_writers_leave_one_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = SessionCache::new(dir.path());
        let b = SessionCache::new(dir.path());
        tokio::join!(
            a.put(DatasetKey::AttackPatternCatalog, Arc::new(patterns())),
            b.put(DatasetKey::AttackPatternCatalog, Arc::new(patterns())),
        );

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["CAPEC_DB_V1.json"]);

        let loaded = SessionCache::new(dir.path()).get(DatasetKey::AttackPatternCatalog).await.unwrap();
        assert_eq!(*loaded, patterns());
    }
}
