//! Pager: in-memory page cache over the database file.
//!
//! The pager is the single source of truth for the bytes of each page. It
//! caches pages read from disk and writes them back when the table closes.

mod cache;

pub use cache::Pager;
