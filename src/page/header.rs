//! Common node header.
//!
//! The node header occupies the first bytes of every tree page, leaf or
//! internal.

use crate::error::{Result, StorageError};
use crate::types::{NodeType, PageId};

pub const NODE_TYPE_SIZE: usize = 1;
pub const NODE_TYPE_OFFSET: usize = 0;
pub const IS_ROOT_SIZE: usize = 1;
pub const IS_ROOT_OFFSET: usize = NODE_TYPE_OFFSET + NODE_TYPE_SIZE;
pub const PARENT_POINTER_SIZE: usize = 4;
pub const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;
pub const COMMON_NODE_HEADER_SIZE: usize = NODE_TYPE_SIZE + IS_ROOT_SIZE + PARENT_POINTER_SIZE;

/// Node header structure
///
/// Layout (6 bytes):
/// ```text
/// Offset  Size  Description
/// 0       1     Node type (0 = internal, 1 = leaf)
/// 1       1     Is-root flag
/// 2       4     Parent page pointer (reserved, always 0 today)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHeader {
    /// Kind of node stored on this page
    pub node_type: NodeType,
    /// Whether this page is the root of the tree
    pub is_root: bool,
    /// Parent page; meaningless for the root
    pub parent: PageId,
}

impl NodeHeader {
    /// Header of a fresh, non-root leaf
    pub fn new_leaf() -> Self {
        Self {
            node_type: NodeType::Leaf,
            is_root: false,
            parent: PageId::new(0),
        }
    }

    /// Read a node header from the start of a page
    pub fn read(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < COMMON_NODE_HEADER_SIZE {
            return Err(StorageError::corruption("page too small for node header"));
        }

        let node_type = NodeType::from_byte(bytes[NODE_TYPE_OFFSET]).ok_or_else(|| {
            StorageError::corruption(format!("unknown node type {}", bytes[NODE_TYPE_OFFSET]))
        })?;
        let is_root = bytes[IS_ROOT_OFFSET] != 0;
        let mut parent = [0u8; PARENT_POINTER_SIZE];
        parent.copy_from_slice(&bytes[PARENT_POINTER_OFFSET..COMMON_NODE_HEADER_SIZE]);

        Ok(Self {
            node_type,
            is_root,
            parent: PageId::new(u32::from_le_bytes(parent)),
        })
    }

    /// Write this header to the start of a page
    pub fn write(&self, bytes: &mut [u8]) {
        bytes[NODE_TYPE_OFFSET] = self.node_type as u8;
        bytes[IS_ROOT_OFFSET] = u8::from(self.is_root);
        bytes[PARENT_POINTER_OFFSET..COMMON_NODE_HEADER_SIZE]
            .copy_from_slice(&self.parent.value().to_le_bytes());
    }
}
