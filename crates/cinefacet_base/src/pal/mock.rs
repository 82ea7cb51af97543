use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::CatalogResult;

use super::FilePath;
use super::traits::{Pal, ReadSeek};

/// In-memory PAL implementation for tests.
///
/// ```
/// use cinefacet_base::{FilePath, MockPal, Pal};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("movies.json"), b"[]".to_vec());
/// let content = mock.read_file_to_string(&FilePath::from("movies.json")).unwrap();
/// assert_eq!(content, "[]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockPal {
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
}

impl MockPal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file in the mock storage.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        self.files.lock().insert(path, content);
    }

    /// Convenience for text fixtures.
    pub fn add_text_file(&self, path: &str, content: &str) {
        self.add_file(FilePath::from(path), content.as_bytes().to_vec());
    }
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> CatalogResult<bool> {
        Ok(self.files.lock().contains_key(path))
    }

    fn read_file(&self, path: &FilePath) -> CatalogResult<Box<dyn ReadSeek + 'static>> {
        let files = self.files.lock();
        let content = files
            .get(path)
            .ok_or_else(|| crate::err!("File not found in MockPal: {}", path))?;
        Ok(Box::new(Cursor::new(content.clone())))
    }
}
