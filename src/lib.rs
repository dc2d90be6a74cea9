//! # Row Store
//!
//! A single-table row store persisted as a paged B-tree file.
//!
//! ## Architecture
//!
//! The storage engine is composed of small layers:
//!
//! - **Page Layer** (`page`): node header and leaf cell layout over raw page buffers
//! - **Storage Layer** (`storage`): whole-page file I/O
//! - **Pager** (`pager`): lazily loaded page cache, flushed on close
//! - **B-Tree Layer** (`btree`): the table and the cursor that walks it
//! - **Statements** (`statement`): parsing and executing `insert`/`select`
//! - **Shell** (`shell`): the line-oriented front end used by the binary
//!
//! The tree is a single root leaf: once it is full, inserts fail with
//! [`StorageError::TableFull`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rowstore::{Config, Row, Table};
//!
//! let mut table = Table::open(&Config::new("t.db"))?;
//! table.insert(&Row::new(1, "bob", "bob@x.com")?)?;
//!
//! for row in table.scan()? {
//!     println!("{}", row?);
//! }
//!
//! table.close()?;
//! ```

pub mod btree;
pub mod error;
pub mod page;
pub mod pager;
pub mod shell;
pub mod statement;
pub mod storage;
pub mod types;

pub use error::{Result, StorageError};
pub use types::{PageId, Row, DEFAULT_MAX_PAGES, PAGE_SIZE};

// Re-export main public API
pub use btree::{Cursor, Rows, Table};
pub use pager::Pager;
pub use storage::{DiskManager, FileDiskManager};

use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

/// Table configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the database file
    pub path: PathBuf,
    /// Page cache ceiling (default: 100)
    pub max_pages: usize,
    /// Whether to fsync the file when the table closes (default: false)
    pub sync_on_close: bool,
}

impl Config {
    /// Create a new configuration with default settings
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            max_pages: DEFAULT_MAX_PAGES,
            sync_on_close: false,
        }
    }

    /// Set the page cache ceiling
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Enable fsync on close for durability
    pub fn sync_on_close(mut self, enabled: bool) -> Self {
        self.sync_on_close = enabled;
        self
    }
}

/// Node snapshot for visualization
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Page ID
    pub page_id: u32,
    /// "leaf" or "internal"
    pub node_type: String,
    /// Whether this is the root node
    pub is_root: bool,
    /// Number of cells on the page
    pub num_cells: u32,
    /// Keys in cell order
    pub keys: Vec<u32>,
}

impl TreeNode {
    /// Text dump, one line per cell
    pub fn render(&self) -> String {
        let mut out = format!("{} (size {})\n", self.node_type, self.num_cells);
        for (i, key) in self.keys.iter().enumerate() {
            let _ = writeln!(out, "  - {} : {}", i, key);
        }
        out
    }
}
