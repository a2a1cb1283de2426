//! Filesystem abstraction for testable workspace probing
//!
//! Platform helpers inspect the workspace (project manifests, dockerfiles)
//! through this trait so inference logic can be tested against an in-memory
//! filesystem instead of real fixture directories.

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::{DirEntry, FileSystem, FileType};
pub use real::RealFileSystem;
