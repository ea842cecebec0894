use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::html_parser::AssetCategory;

pub const INDEX_FILE: &str = "index.html";

/// Owns the on-disk mirror of one site: the root directory, one
/// subdirectory per mirrored category and the rewritten `index.html`.
#[derive(Clone, Debug)]
pub struct FileManager {
    base_dir: PathBuf,
}

impl FileManager {
    /// Does not touch the filesystem; see [`FileManager::prepare`].
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Creates the root and the category subdirectories. Safe to repeat.
    pub fn prepare(&self) -> Result<()> {
        Self::ensure_dir(&self.base_dir)?;
        for category in AssetCategory::MIRRORED {
            Self::ensure_dir(&self.category_dir(category))?;
        }
        Ok(())
    }

    pub fn ensure_dir(path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {:?}", path))
    }

    pub fn category_dir(&self, category: AssetCategory) -> PathBuf {
        self.base_dir.join(category.directory())
    }

    /// Absolute path for a mirror-relative `local_path` such as `css/site.css`.
    pub fn resolve(&self, local_path: &str) -> PathBuf {
        let mut path = self.base_dir.clone();
        for segment in local_path.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }

    /// Writes (or overwrites) a mirrored file and returns where it landed.
    pub fn write_file(&self, local_path: &str, content: &[u8]) -> io::Result<PathBuf> {
        let path = self.resolve(local_path);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn index_path(&self) -> PathBuf {
        self.base_dir.join(INDEX_FILE)
    }

    pub fn write_index(&self, html: &str) -> Result<PathBuf> {
        let path = self.index_path();
        fs::write(&path, html).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(path)
    }
}
