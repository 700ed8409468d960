use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::error::LoadError;
use super::loader::{load_file, LoadOptions};
use super::model::Catalog;

// ---------------------------------------------------------------------------
// Load-once catalog cache
// ---------------------------------------------------------------------------

/// Holds the loaded catalog for one source path.
///
/// The catalog is loaded on first access and kept until [`reload`] or
/// [`invalidate`]. Asking for a different path replaces the cached entry.
///
/// [`reload`]: CatalogCache::reload
/// [`invalidate`]: CatalogCache::invalidate
#[derive(Debug, Default)]
pub struct CatalogCache {
    options: LoadOptions,
    entry: Mutex<Option<(PathBuf, Arc<Catalog>)>>,
}

impl CatalogCache {
    pub fn new(options: LoadOptions) -> Self {
        CatalogCache {
            options,
            entry: Mutex::new(None),
        }
    }

    /// Return the cached catalog for `path`, loading it if needed.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Catalog>, LoadError> {
        let mut entry = self.lock();
        if let Some((cached_path, catalog)) = entry.as_ref() {
            if cached_path == path {
                log::debug!("Catalog cache hit for {}", path.display());
                return Ok(Arc::clone(catalog));
            }
        }
        log::debug!("Catalog cache miss for {}", path.display());
        let catalog = self.load(path)?;
        *entry = Some((path.to_path_buf(), Arc::clone(&catalog)));
        Ok(catalog)
    }

    /// Re-read `path` unconditionally and replace the cached entry.
    /// On failure the previous entry is kept.
    pub fn reload(&self, path: &Path) -> Result<Arc<Catalog>, LoadError> {
        let mut entry = self.lock();
        let catalog = self.load(path)?;
        *entry = Some((path.to_path_buf(), Arc::clone(&catalog)));
        Ok(catalog)
    }

    /// Drop the cached catalog.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// Path of the cached catalog, if any.
    pub fn cached_path(&self) -> Option<PathBuf> {
        self.lock().as_ref().map(|(path, _)| path.clone())
    }

    fn load(&self, path: &Path) -> Result<Arc<Catalog>, LoadError> {
        let (catalog, _report) = load_file(path, self.options)?;
        Ok(Arc::new(catalog))
    }

    fn lock(&self) -> MutexGuard<'_, Option<(PathBuf, Arc<Catalog>)>> {
        // Poisoning leaves either the previous entry or None.
        self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
