//! Page layer: raw page buffers and the on-page node layout.
//!
//! Every page starts with a common node header (node type, root flag,
//! parent pointer). A leaf page follows it with a cell count and a
//! fixed-stride array of `key ‖ row` cells sorted by key:
//! ```text
//! ┌──────────────────────────────┐
//! │ node header (6 bytes)        │
//! │ cell count  (4 bytes)        │
//! ├──────────────────────────────┤
//! │ cell 0: key ‖ row            │
//! │ cell 1: key ‖ row            │
//! │ ...                          │
//! ├──────────────────────────────┤
//! │ unused                       │
//! └──────────────────────────────┘
//! ```

mod header;
pub mod leaf;

pub use header::{
    NodeHeader, COMMON_NODE_HEADER_SIZE, IS_ROOT_OFFSET, IS_ROOT_SIZE, NODE_TYPE_OFFSET,
    NODE_TYPE_SIZE, PARENT_POINTER_OFFSET, PARENT_POINTER_SIZE,
};

use crate::types::{PAGE_SIZE, ROW_SIZE};

/// A raw page buffer
#[derive(Clone)]
pub struct PageBuf {
    data: [u8; PAGE_SIZE],
}

impl PageBuf {
    /// Create a new zeroed page buffer
    pub fn new() -> Self {
        Self {
            data: [0u8; PAGE_SIZE],
        }
    }

    /// Get a reference to the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get a mutable reference to the raw bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Default for PageBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for PageBuf {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl std::ops::DerefMut for PageBuf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

/// Named layout constants, in the order `.constants` prints them
pub fn layout_constants() -> [(&'static str, usize); 6] {
    [
        ("ROW_SIZE", ROW_SIZE),
        ("COMMON_NODE_HEADER_SIZE", COMMON_NODE_HEADER_SIZE),
        ("LEAF_NODE_HEADER_SIZE", leaf::LEAF_NODE_HEADER_SIZE),
        ("LEAF_NODE_CELL_SIZE", leaf::LEAF_NODE_CELL_SIZE),
        ("LEAF_NODE_SPACE_FOR_CELLS", leaf::LEAF_NODE_SPACE_FOR_CELLS),
        ("LEAF_NODE_MAX_CELLS", leaf::LEAF_NODE_MAX_CELLS),
    ]
}
