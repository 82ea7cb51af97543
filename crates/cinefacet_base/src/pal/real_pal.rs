use std::fs;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::{CatalogError, CatalogResult, error::ErrorKind};

use super::FilePath;
use super::traits::{Pal, ReadSeek};

/// PAL implementation backed by the real filesystem.
///
/// All paths are resolved relative to `base_dir`.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.as_path())
    }
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> CatalogResult<bool> {
        let resolved = self.resolve_path(path);
        let exists = resolved.is_file();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        Ok(exists)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> CatalogResult<Box<dyn ReadSeek + 'static>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file");
        let file = fs::File::open(&resolved).map_err(|e| {
            Box::new(CatalogError::new(ErrorKind::FileError {
                path: resolved.clone(),
                source: e,
            }))
        })?;
        Ok(Box::new(file))
    }
}
