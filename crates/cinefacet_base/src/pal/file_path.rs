use relative_path::RelativePathBuf;
use std::path::Path;

/// File path relative to the PAL's base directory.
///
/// ```
/// use cinefacet_base::FilePath;
///
/// let catalog = FilePath::from("data/movies.json");
/// assert_eq!(catalog.to_string(), "data/movies.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePath(RelativePathBuf);

impl FilePath {
    /// The relative portion as a std Path, without any base directory.
    pub fn as_path(&self) -> &Path {
        Path::new(self.0.as_str())
    }

    /// Resolve a sibling path in the same directory as this one.
    ///
    /// Used to locate a catalog file named in a configuration file.
    pub fn sibling(&self, name: &str) -> FilePath {
        match self.as_path().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Self::from(parent.join(name).as_path()),
            _ => Self::from(name),
        }
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<String> for FilePath {
    fn from(s: String) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<&Path> for FilePath {
    fn from(p: &Path) -> Self {
        Self(RelativePathBuf::from(p.to_string_lossy().into_owned()))
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
