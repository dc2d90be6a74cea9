//! Disk manager implementation.
//!
//! The disk manager is responsible for reading and writing whole pages of the
//! database file. It sits behind a trait so the pager can be tested against
//! an in-memory implementation.

use crate::error::{Result, StorageError};
use crate::page::PageBuf;
use crate::types::{PageId, PAGE_SIZE};
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Trait for disk I/O operations
pub trait DiskManager: Send {
    /// Read page `page_id` into `buf`; the page must lie within the file
    fn read_page(&mut self, page_id: PageId, buf: &mut PageBuf) -> Result<()>;

    /// Write a full page at `page_id`, growing the file if needed
    fn write_page(&mut self, page_id: PageId, data: &[u8]) -> Result<()>;

    /// Number of whole pages currently in the file
    fn page_count(&self) -> u32;

    /// Sync all data to disk
    fn sync(&mut self) -> Result<()>;
}

/// File-based disk manager implementation
pub struct FileDiskManager {
    /// The database file
    file: File,
    /// Current file length in bytes
    file_length: u64,
}

impl FileDiskManager {
    /// Open or create a database file
    ///
    /// A file whose length is not a whole number of pages is rejected.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let file_length = file.metadata()?.len();
        if file_length % PAGE_SIZE as u64 != 0 {
            return Err(StorageError::CorruptFileLength {
                len: file_length,
                page_size: PAGE_SIZE,
            });
        }

        info!(
            "opened {} ({} pages)",
            path.display(),
            file_length / PAGE_SIZE as u64
        );

        Ok(Self { file, file_length })
    }
}

impl DiskManager for FileDiskManager {
    fn read_page(&mut self, page_id: PageId, buf: &mut PageBuf) -> Result<()> {
        if page_id.value() >= self.page_count() {
            return Err(StorageError::ShortRead { page_id });
        }

        self.file
            .seek(SeekFrom::Start(page_id.file_offset(PAGE_SIZE)))?;
        self.file
            .read_exact(buf.as_bytes_mut())
            .map_err(|e| match e.kind() {
                ErrorKind::UnexpectedEof => StorageError::ShortRead { page_id },
                _ => StorageError::Io(e),
            })?;

        debug!("read page {} from disk", page_id);
        Ok(())
    }

    fn write_page(&mut self, page_id: PageId, data: &[u8]) -> Result<()> {
        if data.len() != PAGE_SIZE {
            return Err(StorageError::invalid_operation(format!(
                "page data must be {} bytes, got {}",
                PAGE_SIZE,
                data.len()
            )));
        }

        let offset = page_id.file_offset(PAGE_SIZE);
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(data)?;
        self.file_length = self.file_length.max(offset + PAGE_SIZE as u64);

        debug!("wrote page {} to disk", page_id);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        (self.file_length / PAGE_SIZE as u64) as u32
    }

    fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}
