//! Page cache implementation.
//!
//! Pages are loaded lazily on first touch and stay resident until the pager
//! is closed. There is no eviction: the number of slots is capped by
//! `max_pages` and asking for a page beyond it is an error.

use crate::error::{Result, StorageError};
use crate::page::PageBuf;
use crate::storage::{DiskManager, FileDiskManager};
use crate::types::PageId;
use log::{debug, info, trace};
use std::path::Path;

/// The pager: at most one in-memory copy of each page
pub struct Pager {
    /// The disk manager for I/O
    disk_manager: Box<dyn DiskManager>,
    /// Resident pages indexed by page number
    pages: Vec<Option<Box<PageBuf>>>,
    /// Pages known to exist, on disk or in memory
    num_pages: u32,
    /// Maximum number of page slots
    max_pages: usize,
    /// Whether to fsync the file when closing
    sync_on_close: bool,
}

impl Pager {
    /// Open a file-backed pager
    pub fn open(path: &Path, max_pages: usize) -> Result<Self> {
        let disk_manager = FileDiskManager::open(path)?;
        Ok(Self::new(Box::new(disk_manager), max_pages))
    }

    /// Create a pager over an existing disk manager
    pub fn new(disk_manager: Box<dyn DiskManager>, max_pages: usize) -> Self {
        let num_pages = disk_manager.page_count();
        Self {
            disk_manager,
            pages: Vec::new(),
            num_pages,
            max_pages,
            sync_on_close: false,
        }
    }

    /// Fsync the file on close
    pub fn sync_on_close(mut self, enabled: bool) -> Self {
        self.sync_on_close = enabled;
        self
    }

    /// Number of pages in the table, including ones not yet written
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// Whether `page_id` currently has an in-memory copy
    pub fn is_resident(&self, page_id: PageId) -> bool {
        matches!(self.pages.get(page_id.index()), Some(Some(_)))
    }

    /// Get the resident buffer for a page, loading it first if needed
    ///
    /// Pages inside the file are read from disk; pages past its end start
    /// zeroed.
    pub fn get_page(&mut self, page_id: PageId) -> Result<&mut PageBuf> {
        let index = page_id.index();
        if index >= self.max_pages {
            return Err(StorageError::PageOutOfBounds {
                page_id,
                max: self.max_pages,
            });
        }

        if self.pages.len() <= index {
            self.pages.resize_with(index + 1, || None);
        }

        if self.pages[index].is_none() {
            let page = self.load_page(page_id)?;
            self.pages[index] = Some(page);
            self.num_pages = self.num_pages.max(page_id.value() + 1);
        }

        self.pages[index]
            .as_deref_mut()
            .ok_or(StorageError::PageNotResident(page_id))
    }

    fn load_page(&mut self, page_id: PageId) -> Result<Box<PageBuf>> {
        let mut page = Box::new(PageBuf::new());
        if page_id.value() < self.disk_manager.page_count() {
            debug!("cache miss for page {}, loading from disk", page_id);
            self.disk_manager.read_page(page_id, &mut page)?;
        } else {
            trace!("page {} is past the end of the file, starting zeroed", page_id);
        }
        Ok(page)
    }

    /// Write a resident page back to the file
    pub fn flush(&mut self, page_id: PageId) -> Result<()> {
        let page = self
            .pages
            .get(page_id.index())
            .and_then(|slot| slot.as_deref())
            .ok_or(StorageError::PageNotResident(page_id))?;

        self.disk_manager.write_page(page_id, page.as_bytes())?;
        debug!("flushed page {}", page_id);
        Ok(())
    }

    /// Flush every resident page and release the file
    pub fn close(mut self) -> Result<()> {
        let mut flushed = 0;
        for page_num in 0..self.num_pages {
            let page_id = PageId::new(page_num);
            if self.is_resident(page_id) {
                self.flush(page_id)?;
                flushed += 1;
            }
        }

        if self.sync_on_close {
            self.disk_manager.sync()?;
        }

        self.pages.clear();
        info!("pager closed, {} pages flushed", flushed);
        Ok(())
    }
}
