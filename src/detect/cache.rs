//! Lazy template cache.

use image::GrayImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Caches templates by path so repeated detection cycles do not hit the
/// disk. Load failures are not cached; the file is retried on next use.
#[derive(Debug, Default)]
pub struct TemplateCache {
    templates: HashMap<PathBuf, GrayImage>,
    disk_loads: usize,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a template, loading and caching it on first use. Returns
    /// `None` when the file is missing or undecodable.
    pub fn get(&mut self, path: &Path) -> Option<&GrayImage> {
        if self.templates.contains_key(path) {
            log::debug!("Loaded template from cache: {}", path.display());
            return self.templates.get(path);
        }

        if !path.exists() {
            log::debug!("Template file does not exist: {}", path.display());
            return None;
        }

        match image::open(path) {
            Ok(img) => {
                self.disk_loads += 1;
                log::debug!("Cached template: {}", path.display());
                self.templates.insert(path.to_path_buf(), img.to_luma8());
                self.templates.get(path)
            }
            Err(e) => {
                log::debug!("Cannot read template file {}: {e}", path.display());
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.templates.clear();
        log::debug!("Template cache cleared");
    }

    /// Number of successful loads from disk since construction. Not reset
    /// by `clear`, which makes cache invalidation observable.
    pub fn disk_loads(&self) -> usize {
        self.disk_loads
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
