//! The table: a pager bound to a root page.
//!
//! This module provides the Table struct with operations for:
//! - open/close: lifecycle of the backing file
//! - insert: sorted insertion into the root leaf
//! - scan: in-order iteration over every row

use crate::btree::Cursor;
use crate::error::{Result, StorageError};
use crate::page::{leaf, NodeHeader};
use crate::pager::Pager;
use crate::types::{NodeType, PageId, Row};
use crate::{Config, TreeNode};
use log::{debug, info, warn};

/// A single table stored as one B-tree leaf
pub struct Table {
    /// Pager for page access
    pub(crate) pager: Pager,
    /// Root page ID (always page 0)
    root_page: PageId,
}

impl Table {
    /// Open or create the table file described by `config`
    pub fn open(config: &Config) -> Result<Self> {
        let pager =
            Pager::open(&config.path, config.max_pages)?.sync_on_close(config.sync_on_close);
        Self::with_pager(pager)
    }

    /// Build a table over an already-open pager
    ///
    /// An empty pager gets page 0 initialized as an empty root leaf. It stays
    /// in memory until [`Table::close`] flushes it.
    pub fn with_pager(mut pager: Pager) -> Result<Self> {
        let root_page = PageId::ROOT;

        if pager.num_pages() == 0 {
            let root = pager.get_page(root_page)?;
            leaf::initialize(root);
            leaf::set_root(root, true);
            info!("initialized new table with an empty root leaf");
        } else {
            let root = pager.get_page(root_page)?;
            match NodeHeader::read(root) {
                Ok(header) if header.node_type == NodeType::Leaf => {}
                Ok(header) => warn!(
                    "root page has node type {:?}, reading it as a leaf",
                    header.node_type
                ),
                Err(e) => warn!("root page header unreadable ({}), reading it as a leaf", e),
            }
            info!("opened table with {} rows", leaf::cell_count(root));
        }

        Ok(Self { pager, root_page })
    }

    /// Get the root page ID
    pub fn root_page(&self) -> PageId {
        self.root_page
    }

    /// Number of rows stored
    pub fn row_count(&mut self) -> Result<u32> {
        Ok(leaf::cell_count(self.pager.get_page(self.root_page)?))
    }

    /// Insert a row keyed by its id
    ///
    /// Fails with [`StorageError::TableFull`] when the root leaf is at
    /// capacity and with [`StorageError::DuplicateKey`] when the id is
    /// already present. Neither failure modifies the table.
    pub fn insert(&mut self, row: &Row) -> Result<()> {
        let root = self.pager.get_page(self.root_page)?;
        if leaf::is_full(root) {
            debug!("insert of key {} rejected: table full", row.id());
            return Err(StorageError::TableFull);
        }

        let key = row.id();
        let mut cursor = Cursor::find(self, key)?;
        if !cursor.is_end() && cursor.key()? == key {
            return Err(StorageError::DuplicateKey(key));
        }

        cursor.insert(key, row)
    }

    /// Iterate over all rows in key order
    ///
    /// Each call starts a fresh cursor, so a table can be scanned any number
    /// of times.
    pub fn scan(&mut self) -> Result<Rows<'_>> {
        Ok(Rows {
            cursor: Cursor::start(self)?,
            done: false,
        })
    }

    /// Collect a full scan
    pub fn select(&mut self) -> Result<Vec<Row>> {
        self.scan()?.collect()
    }

    /// Snapshot of the root node for display
    pub fn export_tree(&mut self) -> Result<TreeNode> {
        let root = self.pager.get_page(self.root_page)?;

        Ok(TreeNode {
            page_id: self.root_page.value(),
            node_type: NodeType::Leaf.name().to_string(),
            is_root: leaf::is_root(root),
            num_cells: leaf::cell_count(root),
            keys: leaf::keys(root),
        })
    }

    /// Flush every resident page and close the file
    pub fn close(self) -> Result<()> {
        self.pager.close()
    }
}

/// Rows produced by [`Table::scan`]
pub struct Rows<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl Iterator for Rows<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor.is_end() {
            return None;
        }

        let row = self.cursor.row().and_then(|row| {
            self.cursor.advance()?;
            Ok(row)
        });
        if row.is_err() {
            self.done = true;
        }
        Some(row)
    }
}
