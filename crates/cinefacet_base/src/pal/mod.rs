/* 📖 # What is the Platform Abstraction Layer?

The PAL is the only place that touches the filesystem. The engine reads its
configuration and catalog through a `PalHandle`, so tests swap in `MockPal`
and never need real files.
*/

mod file_path;
pub mod mock;
pub mod real_pal;
mod traits;

pub use file_path::FilePath;
pub use mock::MockPal;
pub use real_pal::RealPal;
pub use traits::{Pal, PalHandle, ReadSeek};
