//! Common types used throughout the storage engine.

mod page_id;
mod row;

pub use page_id::PageId;
pub use row::{
    Row, COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE,
    ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
};

/// Page size in bytes (4KB)
pub const PAGE_SIZE: usize = 4096;

/// Default ceiling on the number of pages the pager will hold
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Node kinds stored in the first byte of every tree page
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Interior node (child pointers + separator keys); never written today
    Internal = 0,
    /// Leaf node holding key/row cells
    Leaf = 1,
}

impl NodeType {
    /// Convert from byte value
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Self::Internal),
            1 => Some(Self::Leaf),
            _ => None,
        }
    }

    /// Lowercase name used in tree dumps
    pub fn name(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Leaf => "leaf",
        }
    }
}
