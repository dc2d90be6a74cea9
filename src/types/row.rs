//! The fixed-schema row stored in every leaf cell.
//!
//! ```text
//! Offset  Size  Field
//! 0       4     id (u32, little-endian)
//! 4       33    username (NUL padded)
//! 37      256   email (NUL padded)
//! ```

use crate::error::{Result, StorageError};
use std::fmt;

/// Maximum username length in bytes
pub const COLUMN_USERNAME_SIZE: usize = 32;
/// Maximum email length in bytes
pub const COLUMN_EMAIL_SIZE: usize = 255;

pub const ID_SIZE: usize = std::mem::size_of::<u32>();
/// One extra byte keeps a maximal username NUL terminated
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE + 1;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE + 1;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

/// A single table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: u32,
    username: String,
    email: String,
}

impl Row {
    /// Build a row, rejecting strings wider than their columns or holding a NUL
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let email = email.into();
        check_width("username", &username, COLUMN_USERNAME_SIZE)?;
        check_width("email", &email, COLUMN_EMAIL_SIZE)?;
        Ok(Self {
            id,
            username,
            email,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Write this row into the first `ROW_SIZE` bytes of `dest`
    pub fn serialize(&self, dest: &mut [u8]) {
        let dest = &mut dest[..ROW_SIZE];
        dest.fill(0);
        dest[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        dest[USERNAME_OFFSET..USERNAME_OFFSET + self.username.len()]
            .copy_from_slice(self.username.as_bytes());
        dest[EMAIL_OFFSET..EMAIL_OFFSET + self.email.len()].copy_from_slice(self.email.as_bytes());
    }

    /// Read a row back from its serialized form
    pub fn deserialize(src: &[u8]) -> Result<Self> {
        if src.len() < ROW_SIZE {
            return Err(StorageError::corruption(format!(
                "row needs {} bytes, got {}",
                ROW_SIZE,
                src.len()
            )));
        }

        let id = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
        let username = read_column("username", &src[USERNAME_OFFSET..EMAIL_OFFSET])?;
        let email = read_column("email", &src[EMAIL_OFFSET..ROW_SIZE])?;

        Ok(Self {
            id,
            username,
            email,
        })
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.id, self.email, self.username)
    }
}

fn check_width(field: &'static str, value: &str, max: usize) -> Result<()> {
    // deserialize stops at the first NUL
    if value.contains('\0') {
        return Err(StorageError::EmbeddedNul { field });
    }
    if value.len() > max {
        return Err(StorageError::StringTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

fn read_column(field: &str, bytes: &[u8]) -> Result<String> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8(bytes[..end].to_vec())
        .map_err(|_| StorageError::corruption(format!("{} is not valid UTF-8", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_layout() {
        assert_eq!(ROW_SIZE, 293);
        assert_eq!(USERNAME_OFFSET, 4);
        assert_eq!(EMAIL_OFFSET, 37);
    }

    #[test]
    fn test_row_roundtrip() -> Result<()> {
        let row = Row::new(1, "bob", "bob@x.com")?;
        let mut buf = [0xAAu8; ROW_SIZE];
        row.serialize(&mut buf);

        assert_eq!(&buf[0..4], &1u32.to_le_bytes());
        assert_eq!(buf[USERNAME_OFFSET + 3], 0);
        assert_eq!(Row::deserialize(&buf)?, row);
        Ok(())
    }

    #[test]
    fn test_row_max_width_strings() -> Result<()> {
        let username = "u".repeat(COLUMN_USERNAME_SIZE);
        let email = "e".repeat(COLUMN_EMAIL_SIZE);
        let row = Row::new(u32::MAX, username.clone(), email.clone())?;

        let mut buf = vec![0u8; ROW_SIZE];
        row.serialize(&mut buf);
        let back = Row::deserialize(&buf)?;
        assert_eq!(back.username(), username);
        assert_eq!(back.email(), email);
        assert_eq!(back.id(), u32::MAX);
        Ok(())
    }

    #[test]
    fn test_row_rejects_long_strings() {
        let err = Row::new(1, "a".repeat(COLUMN_USERNAME_SIZE + 1), "x").unwrap_err();
        assert!(matches!(
            err,
            StorageError::StringTooLong {
                field: "username",
                ..
            }
        ));

        let err = Row::new(1, "a", "e".repeat(COLUMN_EMAIL_SIZE + 1)).unwrap_err();
        assert!(matches!(err, StorageError::StringTooLong { field: "email", .. }));
    }

    #[test]
    fn test_row_rejects_embedded_nul() {
        let err = Row::new(1, "a\0b", "e@x").unwrap_err();
        assert!(matches!(err, StorageError::EmbeddedNul { field: "username" }));
        assert!(err.is_recoverable());

        let err = Row::new(1, "a", "e\0@x").unwrap_err();
        assert!(matches!(err, StorageError::EmbeddedNul { field: "email" }));
    }

    #[test]
    fn test_row_invalid_utf8_is_corruption() {
        let mut buf = [0u8; ROW_SIZE];
        buf[USERNAME_OFFSET] = 0xFF;
        assert!(matches!(
            Row::deserialize(&buf),
            Err(StorageError::Corruption(_))
        ));
    }

    #[test]
    fn test_row_display() -> Result<()> {
        let row = Row::new(1, "user1", "person1@example.com")?;
        assert_eq!(row.to_string(), "1 | person1@example.com | user1");
        Ok(())
    }
}
