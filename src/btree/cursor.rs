//! Table cursor.
//!
//! A cursor is a logical row position: a page number and a cell index on that
//! page, plus a flag for "one past the last row". Scans and inserts both go
//! through it. The tree is a single root leaf, so a cursor never leaves the
//! root page.

use crate::btree::Table;
use crate::error::{Result, StorageError};
use crate::page::leaf;
use crate::types::{PageId, Row};
use log::trace;

/// A position in a table
pub struct Cursor<'a> {
    /// The table this cursor walks
    table: &'a mut Table,
    /// Page holding the current cell
    page_num: PageId,
    /// Cell index within the page
    cell_num: u32,
    /// Whether the cursor is one past the last row
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    /// Cursor at the first row
    pub fn start(table: &'a mut Table) -> Result<Self> {
        let page_num = table.root_page();
        let num_cells = leaf::checked_cell_count(table.pager.get_page(page_num)?)?;

        Ok(Self {
            table,
            page_num,
            cell_num: 0,
            end_of_table: num_cells == 0,
        })
    }

    /// Cursor one past the last row
    pub fn end(table: &'a mut Table) -> Result<Self> {
        let page_num = table.root_page();
        let num_cells = leaf::checked_cell_count(table.pager.get_page(page_num)?)?;

        Ok(Self {
            table,
            page_num,
            cell_num: num_cells,
            end_of_table: true,
        })
    }

    /// Cursor at `key`, or where `key` would be inserted
    pub fn find(table: &'a mut Table, key: u32) -> Result<Self> {
        let page_num = table.root_page();
        let page = table.pager.get_page(page_num)?;
        let num_cells = leaf::checked_cell_count(page)?;

        let cell_num = match leaf::find_cell(page, key) {
            Ok(cell_num) | Err(cell_num) => cell_num,
        };
        trace!("cursor for key {} at cell {}", key, cell_num);

        if cell_num == num_cells {
            return Self::end(table);
        }

        Ok(Self {
            table,
            page_num,
            cell_num,
            end_of_table: false,
        })
    }

    pub fn page_num(&self) -> PageId {
        self.page_num
    }

    pub fn cell_num(&self) -> u32 {
        self.cell_num
    }

    pub fn is_end(&self) -> bool {
        self.end_of_table
    }

    /// Move to the next row
    pub fn advance(&mut self) -> Result<()> {
        let page = self.table.pager.get_page(self.page_num)?;
        self.cell_num += 1;
        if self.cell_num >= leaf::checked_cell_count(page)? {
            self.end_of_table = true;
        }
        Ok(())
    }

    fn check_not_end(&self) -> Result<()> {
        if self.end_of_table {
            return Err(StorageError::invalid_operation(
                "cursor is past the end of the table",
            ));
        }
        Ok(())
    }

    /// Serialized row bytes at the cursor
    pub fn value(&mut self) -> Result<&[u8]> {
        self.check_not_end()?;
        let page = self.table.pager.get_page(self.page_num)?;
        Ok(leaf::value(page, self.cell_num))
    }

    /// Key of the current row
    pub fn key(&mut self) -> Result<u32> {
        self.check_not_end()?;
        let page = self.table.pager.get_page(self.page_num)?;
        Ok(leaf::key(page, self.cell_num))
    }

    /// Decode the current row
    pub fn row(&mut self) -> Result<Row> {
        Row::deserialize(self.value()?)
    }

    /// Insert a cell at the cursor, shifting the rows after it
    pub fn insert(&mut self, key: u32, row: &Row) -> Result<()> {
        let page = self.table.pager.get_page(self.page_num)?;
        leaf::insert(page, self.cell_num, key, row)
    }
}
