//! Process-wide caching of the loaded pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::LoadError;
use crate::model::loader::ArtifactLoader;
use crate::model::pipeline::PricePipeline;

/// Caches the pipeline so the artifact is read from disk at most once.
///
/// The first caller of [`get_or_load`] performs the load while holding the
/// write lock, so concurrent callers block and then reuse the result rather
/// than racing their own reads. A failed load leaves the slot empty; the
/// next call retries from scratch.
///
/// [`get_or_load`]: ArtifactCache::get_or_load
#[derive(Debug)]
pub struct ArtifactCache {
    loader: ArtifactLoader,
    slot: RwLock<Option<Arc<PricePipeline>>>,
    loads: AtomicU64,
}

impl ArtifactCache {
    /// Create an empty cache backed by the given loader.
    pub fn new(loader: ArtifactLoader) -> Self {
        Self {
            loader,
            slot: RwLock::new(None),
            loads: AtomicU64::new(0),
        }
    }

    /// Return the cached pipeline, loading it on first use.
    pub fn get_or_load(&self) -> Result<Arc<PricePipeline>, LoadError> {
        // The slot only ever holds a complete Option, so a panic elsewhere
        // cannot leave it half-written; recover the guard and keep going.
        if let Some(pipeline) = self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(pipeline));
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(pipeline) = slot.as_ref() {
            return Ok(Arc::clone(pipeline));
        }

        let pipeline = Arc::new(self.loader.load()?);
        self.loads.fetch_add(1, Ordering::Relaxed);
        *slot = Some(Arc::clone(&pipeline));
        Ok(pipeline)
    }

    /// Drop the cached pipeline so the next call reloads from disk.
    pub fn invalidate(&self) {
        let dropped = self
            .slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if dropped.is_some() {
            debug!(path = %self.loader.path().display(), "Cached pipeline invalidated");
        }
    }

    /// Whether a pipeline is currently cached.
    pub fn is_loaded(&self) -> bool {
        self.slot
            .try_read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Number of times the artifact has been loaded from disk.
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    /// The loader this cache reads through.
    pub fn loader(&self) -> &ArtifactLoader {
        &self.loader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Barrier;
    use std::time::Duration;

    use tempfile::TempDir;

    use crate::model::loader::ArtifactEncoding;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn cache_for(path: std::path::PathBuf) -> ArtifactCache {
        ArtifactCache::new(ArtifactLoader::new(path, ArtifactEncoding::Raw, TIMEOUT))
    }

    fn write_artifact(path: &std::path::Path) {
        let bytes = bincode::serialize(&PricePipeline::reference()).unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_second_call_reuses_cached_pipeline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pipeline.bin");
        write_artifact(&path);

        let cache = cache_for(path);
        assert!(!cache.is_loaded());

        let first = cache.get_or_load().unwrap();
        let second = cache.get_or_load().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.load_count(), 1);
        assert!(cache.is_loaded());
    }

    #[test]
    fn test_concurrent_callers_share_one_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pipeline.bin");
        write_artifact(&path);

        let cache = Arc::new(cache_for(path));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    cache.get_or_load()
                })
            })
            .collect();

        let pipelines: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();

        assert_eq!(cache.load_count(), 1);
        for pipeline in &pipelines[1..] {
            assert!(Arc::ptr_eq(&pipelines[0], pipeline));
        }
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pipeline.bin");
        write_artifact(&path);

        let cache = cache_for(path);
        cache.get_or_load().unwrap();
        cache.invalidate();
        assert!(!cache.is_loaded());

        cache.get_or_load().unwrap();
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pipeline.bin");

        let cache = cache_for(path.clone());
        let err = cache.get_or_load().unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }), "error: {err:?}");
        assert!(!cache.is_loaded());
        assert_eq!(cache.load_count(), 0);

        write_artifact(&path);
        let pipeline = cache.get_or_load().unwrap();
        assert_eq!(pipeline.model, "ridge");
        assert_eq!(cache.load_count(), 1);
    }
}
