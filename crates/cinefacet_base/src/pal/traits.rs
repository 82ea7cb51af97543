use std::io::{Read, Seek};
use std::sync::Arc;

use crate::CatalogResult;
use crate::error::{CatalogError, ErrorKind};

use super::file_path::FilePath;

/// Trait combining Read + Seek for file handles.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Platform Abstraction Layer: read-only filesystem access.
///
/// - `RealPal` reads through `std::fs` below a base directory
/// - `MockPal` serves files from memory for tests
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// Check if a file exists at the given path.
    fn file_exists(&self, path: &FilePath) -> CatalogResult<bool>;

    /// Open a file for reading.
    fn read_file(&self, path: &FilePath) -> CatalogResult<Box<dyn ReadSeek + 'static>>;

    /// Read entire file contents as a UTF-8 string.
    fn read_file_to_string(&self, path: &FilePath) -> CatalogResult<String> {
        let mut reader = self.read_file(path)?;
        let mut contents = Vec::new();
        reader.read_to_end(&mut contents).map_err(|e| {
            Box::new(CatalogError::new(ErrorKind::FileError {
                path: path.as_path().to_path_buf(),
                source: e,
            }))
        })?;
        String::from_utf8(contents).map_err(|_e| crate::err!("File is not valid UTF-8: {}", path))
    }
}

/// Shared handle to a PAL implementation (`Arc<dyn Pal>`).
///
/// ```
/// use cinefacet_base::{MockPal, PalHandle};
///
/// let pal = PalHandle::new(MockPal::new());
/// let _shared = pal.clone();
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Create a new PalHandle from a Pal implementation.
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
