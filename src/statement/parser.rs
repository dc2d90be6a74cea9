//! Statement and meta-command parsing.

use crate::error::StorageError;
use crate::statement::{MetaCommand, Statement};
use crate::types::Row;
use thiserror::Error;

/// Errors from turning an input line into a statement
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrepareError {
    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedStatement(String),

    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,

    #[error("String is too long.")]
    StringTooLong,

    #[error("String contains a NUL byte.")]
    EmbeddedNul,

    #[error("ID must be positive.")]
    NegativeId,

    #[error("Unrecognized command '{0}'")]
    UnrecognizedCommand(String),
}

/// Parse an `insert` or `select` statement
///
/// Keywords are case-insensitive. `insert` takes an id, a username and an
/// email; tokens after those are ignored.
pub fn prepare_statement(input: &str) -> Result<Statement, PrepareError> {
    let mut tokens = input.split_whitespace();
    let keyword = tokens.next().unwrap_or("").to_ascii_lowercase();

    match keyword.as_str() {
        "select" => Ok(Statement::Select),
        "insert" => {
            let (id, username, email) = match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(id), Some(username), Some(email)) => (id, username, email),
                _ => return Err(PrepareError::SyntaxError),
            };

            let id: i64 = id.parse().map_err(|_| PrepareError::SyntaxError)?;
            if id < 0 {
                return Err(PrepareError::NegativeId);
            }
            let id = u32::try_from(id).map_err(|_| PrepareError::SyntaxError)?;

            let row = Row::new(id, username, email).map_err(|e| match e {
                StorageError::StringTooLong { .. } => PrepareError::StringTooLong,
                StorageError::EmbeddedNul { .. } => PrepareError::EmbeddedNul,
                _ => PrepareError::SyntaxError,
            })?;
            Ok(Statement::Insert(row))
        }
        _ => Err(PrepareError::UnrecognizedStatement(input.to_string())),
    }
}

/// Parse a line starting with `.`
pub fn parse_meta_command(input: &str) -> Result<MetaCommand, PrepareError> {
    let mut tokens = input.split_whitespace();
    let command = tokens.next().unwrap_or("");
    let argument = tokens.next();

    match (command, argument) {
        (".exit", None) => Ok(MetaCommand::Exit),
        (".btree", None) => Ok(MetaCommand::BTree { json: false }),
        (".btree", Some("json")) => Ok(MetaCommand::BTree { json: true }),
        (".constants", None) => Ok(MetaCommand::Constants),
        _ => Err(PrepareError::UnrecognizedCommand(input.to_string())),
    }
}
