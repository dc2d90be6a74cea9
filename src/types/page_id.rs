//! Page numbers.

use std::fmt;

/// Zero-based page number within the table file; page 0 holds the root leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageId(u32);

impl PageId {
    pub const ROOT: PageId = PageId(0);

    pub const fn new(page_num: u32) -> Self {
        Self(page_num)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Slot in the pager's page table
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Byte offset of the page in a file of `page_size` pages
    pub const fn file_offset(self, page_size: usize) -> u64 {
        self.0 as u64 * page_size as u64
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
