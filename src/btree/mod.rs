//! B-tree table layer.
//!
//! The tree is a single root leaf. This module provides:
//! - `Table`: open/close, sorted insert, full scan
//! - `Cursor`: row positions used by scan and insert

mod cursor;
mod table;

pub use cursor::Cursor;
pub use table::{Rows, Table};
