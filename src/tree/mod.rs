//! Filesystem tree traversal.

pub mod walker;

pub use walker::{list_files, WalkerConfig};
