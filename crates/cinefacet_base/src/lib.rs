/* 📖 # What lives in cinefacet_base?
Error handling, tracing setup and file access shared by the engine and the CLI.
Nothing in here knows about records or facets.
*/

pub mod error;
mod error_tests;
pub mod pal;
pub mod tracing;

pub use error::{CatalogError, CatalogResult, ErrorKind, ResultExt};
pub use pal::{FilePath, MockPal, Pal, PalHandle, ReadSeek, RealPal};
