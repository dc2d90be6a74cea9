//! Storage layer: whole-page file I/O.
//!
//! The database file is a flat run of `PAGE_SIZE` pages with no file header;
//! page 0 is the root node.

mod disk_manager;

pub use disk_manager::{DiskManager, FileDiskManager};
