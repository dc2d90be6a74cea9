//! Error types for the storage engine.

use crate::types::PageId;
use thiserror::Error;

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur in the storage engine
///
/// Only [`StorageError::TableFull`], [`StorageError::DuplicateKey`],
/// [`StorageError::StringTooLong`] and [`StorageError::EmbeddedNul`] are
/// expected outcomes of a statement.
/// Everything else means the table can no longer be trusted and the caller
/// should stop.
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O error from the underlying file system
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Page index beyond the pager's capacity ceiling
    #[error("Tried to fetch page {page_id} out of bounds (max pages: {max})")]
    PageOutOfBounds { page_id: PageId, max: usize },

    /// The file ended before a whole page could be read
    #[error("Short read on page {page_id}")]
    ShortRead { page_id: PageId },

    /// Flushing a page that was never loaded
    #[error("Tried to flush page {0} which is not resident")]
    PageNotResident(PageId),

    /// Database file is not a whole number of pages
    #[error("Database file length {len} is not a multiple of page size {page_size}")]
    CorruptFileLength { len: u64, page_size: usize },

    /// Data corruption detected while decoding a page
    #[error("Corruption detected: {0}")]
    Corruption(String),

    /// Invalid operation for the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The root leaf has no room for another cell
    #[error("Table full")]
    TableFull,

    /// A row with this id is already stored
    #[error("Duplicate key {0}")]
    DuplicateKey(u32),

    /// A row column exceeds its fixed width
    #[error("String too long: {field} is {len} bytes (max: {max})")]
    StringTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A row column contains a NUL byte, which the padded layout cannot store
    #[error("Invalid string: {field} contains a NUL byte")]
    EmbeddedNul { field: &'static str },
}

impl StorageError {
    /// Create a corruption error with a message
    pub fn corruption(msg: impl Into<String>) -> Self {
        Self::Corruption(msg.into())
    }

    /// Create an invalid operation error
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Whether the table is still consistent after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TableFull
                | Self::DuplicateKey(_)
                | Self::StringTooLong { .. }
                | Self::EmbeddedNul { .. }
        )
    }
}
