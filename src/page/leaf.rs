//! Leaf node codec.
//!
//! Pure accessors over a raw page buffer. Offsets are computed once from the
//! row schema; nothing here touches the pager or the file.

use std::ops::Range;

use crate::error::{Result, StorageError};
use crate::page::header::{NodeHeader, COMMON_NODE_HEADER_SIZE, IS_ROOT_OFFSET};
use crate::types::{Row, PAGE_SIZE, ROW_SIZE};

pub const LEAF_NODE_NUM_CELLS_SIZE: usize = std::mem::size_of::<u32>();
pub const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

pub const LEAF_NODE_KEY_SIZE: usize = std::mem::size_of::<u32>();
pub const LEAF_NODE_KEY_OFFSET: usize = 0;
pub const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

const NUM_CELLS_RANGE: Range<usize> =
    LEAF_NODE_NUM_CELLS_OFFSET..LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE;

fn read_u32(bytes: &[u8]) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(raw)
}

/// Number of cells stored in the leaf
pub fn cell_count(page: &[u8]) -> u32 {
    read_u32(&page[NUM_CELLS_RANGE])
}

/// Cell count, rejecting values the page cannot hold
pub fn checked_cell_count(page: &[u8]) -> Result<u32> {
    let count = cell_count(page);
    if count as usize > LEAF_NODE_MAX_CELLS {
        return Err(StorageError::corruption(format!(
            "leaf claims {} cells (max: {})",
            count, LEAF_NODE_MAX_CELLS
        )));
    }
    Ok(count)
}

pub fn set_cell_count(page: &mut [u8], n: u32) {
    page[NUM_CELLS_RANGE].copy_from_slice(&n.to_le_bytes());
}

/// Byte range of cell `cell_num` within the page
pub fn cell_range(cell_num: u32) -> Range<usize> {
    let start = LEAF_NODE_HEADER_SIZE + cell_num as usize * LEAF_NODE_CELL_SIZE;
    start..start + LEAF_NODE_CELL_SIZE
}

pub fn cell(page: &[u8], cell_num: u32) -> &[u8] {
    &page[cell_range(cell_num)]
}

pub fn key(page: &[u8], cell_num: u32) -> u32 {
    let start = cell_range(cell_num).start + LEAF_NODE_KEY_OFFSET;
    read_u32(&page[start..start + LEAF_NODE_KEY_SIZE])
}

fn set_key(page: &mut [u8], cell_num: u32, key: u32) {
    let start = cell_range(cell_num).start + LEAF_NODE_KEY_OFFSET;
    page[start..start + LEAF_NODE_KEY_SIZE].copy_from_slice(&key.to_le_bytes());
}

fn value_range(cell_num: u32) -> Range<usize> {
    let start = cell_range(cell_num).start + LEAF_NODE_VALUE_OFFSET;
    start..start + LEAF_NODE_VALUE_SIZE
}

/// Serialized row bytes of cell `cell_num`
pub fn value(page: &[u8], cell_num: u32) -> &[u8] {
    &page[value_range(cell_num)]
}

pub fn value_mut(page: &mut [u8], cell_num: u32) -> &mut [u8] {
    &mut page[value_range(cell_num)]
}

/// Turn the page into an empty, non-root leaf
pub fn initialize(page: &mut [u8]) {
    NodeHeader::new_leaf().write(page);
    set_cell_count(page, 0);
}

pub fn is_root(page: &[u8]) -> bool {
    page[IS_ROOT_OFFSET] != 0
}

pub fn set_root(page: &mut [u8], is_root: bool) {
    page[IS_ROOT_OFFSET] = u8::from(is_root);
}

pub fn is_full(page: &[u8]) -> bool {
    cell_count(page) as usize >= LEAF_NODE_MAX_CELLS
}

/// Binary search the cell array for `key`.
///
/// Returns `Ok(i)` if cell `i` holds `key`, otherwise `Err(i)` where `i` is
/// the first cell whose key is greater.
pub fn find_cell(page: &[u8], key: u32) -> std::result::Result<u32, u32> {
    let mut low = 0;
    let mut high = cell_count(page).min(LEAF_NODE_MAX_CELLS as u32);

    while low < high {
        let mid = low + (high - low) / 2;
        let mid_key = self::key(page, mid);
        if mid_key == key {
            return Ok(mid);
        }
        if key < mid_key {
            high = mid;
        } else {
            low = mid + 1;
        }
    }

    Err(low)
}

/// Insert `key`/`row` as cell `cell_num`, shifting later cells right.
///
/// The caller picks `cell_num` so that sort order is preserved and checks
/// [`is_full`] beforehand.
pub fn insert(page: &mut [u8], cell_num: u32, key: u32, row: &Row) -> Result<()> {
    let count = cell_count(page);
    if is_full(page) {
        return Err(StorageError::invalid_operation(format!(
            "leaf already holds {} cells",
            count
        )));
    }
    if cell_num > count {
        return Err(StorageError::invalid_operation(format!(
            "cell index {} out of bounds (count: {})",
            cell_num, count
        )));
    }

    if cell_num < count {
        // memmove semantics: the overlapping tail is copied back to front
        let tail = cell_range(cell_num).start..cell_range(count - 1).end;
        page.copy_within(tail, cell_range(cell_num + 1).start);
    }

    set_key(page, cell_num, key);
    row.serialize(value_mut(page, cell_num));
    set_cell_count(page, count + 1);

    Ok(())
}

/// All keys in cell order
pub fn keys(page: &[u8]) -> Vec<u32> {
    let count = cell_count(page).min(LEAF_NODE_MAX_CELLS as u32);
    (0..count).map(|i| key(page, i)).collect()
}
