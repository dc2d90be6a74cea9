//! Statements: the `insert`/`select` front end of the table.
//!
//! Input lines starting with `.` are meta-commands handled by the REPL;
//! everything else is prepared into a [`Statement`] and executed.

mod executor;
mod parser;

pub use executor::{execute_statement, ExecuteOutcome};
pub use parser::{parse_meta_command, prepare_statement, PrepareError};

use crate::types::Row;

/// A parsed statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

/// A REPL meta-command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    /// Close the table and quit
    Exit,
    /// Dump the tree, as text or JSON
    BTree { json: bool },
    /// Print the page layout constants
    Constants,
}
