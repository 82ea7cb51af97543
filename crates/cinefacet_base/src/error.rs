use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use tracing_error::SpanTrace;

/* 📖 # Error layout

ErrorKind carries the structured variant (file path, record index, pattern text).
CatalogError wraps it with a stack of context strings and the span trace that was
active when the error was created. Callers match on `kind()`, humans read `Display`.
*/

/// Error variants that can occur while loading or querying a catalog.
#[derive(Debug)]
pub enum ErrorKind {
    /// File system operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A catalog entry is missing its title or has a facet that is not a list of strings
    MalformedRecord { index: usize, reason: String },

    /// The search text could not be compiled as a pattern
    PatternCompile { pattern: String, reason: String },

    /// A whole document (catalog file, configuration file) could not be parsed
    Parse { what: String, reason: String },

    /// Multiple errors occurred during batch operations
    Multiple {
        errors: Vec<CatalogError>,
        count: usize,
    },

    /// Catch-all for other errors with a message
    Message { message: String },
}

/// Error type wrapping an [`ErrorKind`] with context and a captured span trace.
#[derive(Debug)]
pub struct CatalogError {
    kind: ErrorKind,
    context: Vec<String>,
    span_trace: SpanTrace,
}

impl CatalogError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a catch-all error from a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the context strings in the order they were attached.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// Returns the span trace captured when the error was created.
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }
}

impl From<ErrorKind> for CatalogError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for CatalogError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::Multiple { errors, .. } => errors.first().and_then(|e| e.source()),
            ErrorKind::MalformedRecord { .. }
            | ErrorKind::PatternCompile { .. }
            | ErrorKind::Parse { .. }
            | ErrorKind::Message { .. } => None,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ctx in &self.context {
            write!(f, "{}: ", ctx)?;
        }

        match &self.kind {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::MalformedRecord { index, reason } => {
                write!(f, "Malformed record at index {}: {}", index, reason)
            }
            ErrorKind::PatternCompile { pattern, reason } => {
                write!(f, "Invalid search pattern '{}': {}", pattern, reason)
            }
            ErrorKind::Parse { what, reason } => {
                write!(f, "Failed to parse {}: {}", what, reason)
            }
            ErrorKind::Multiple { errors, count } => match errors.first() {
                Some(first) => write!(f, "Multiple errors occurred ({} total): {}", count, first),
                None => write!(f, "Multiple errors occurred ({} total)", count),
            },
            ErrorKind::Message { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

/// Standard result type for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, Box<CatalogError>>;

/// Extension trait for attaching context to Results during propagation.
pub trait ResultExt<T> {
    /// Attaches context to an error. Eager evaluation.
    fn context(self, context: impl Into<String>) -> CatalogResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    fn with_context<F>(self, f: F) -> CatalogResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for CatalogResult<T> {
    fn context(self, context: impl Into<String>) -> CatalogResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> CatalogResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

/// Creates a boxed [`CatalogError`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::CatalogError::message(format!($($arg)*)))
    };
}

/// Returns early with a boxed [`CatalogError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::err!($($arg)*))
    };
}
