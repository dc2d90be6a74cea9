//! Statement execution against a table.

use crate::btree::Table;
use crate::error::Result;
use crate::statement::Statement;
use crate::types::Row;

/// What a successful statement produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteOutcome {
    Inserted,
    Rows(Vec<Row>),
}

/// Run a prepared statement
///
/// `TableFull` and `DuplicateKey` come back as errors that leave the table
/// usable; see [`crate::StorageError::is_recoverable`].
pub fn execute_statement(statement: Statement, table: &mut Table) -> Result<ExecuteOutcome> {
    match statement {
        Statement::Insert(row) => {
            table.insert(&row)?;
            Ok(ExecuteOutcome::Inserted)
        }
        Statement::Select => Ok(ExecuteOutcome::Rows(table.select()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::leaf::LEAF_NODE_MAX_CELLS;
    use crate::statement::prepare_statement;
    use crate::{Config, StorageError};
    use tempfile::tempdir;

    fn run(line: &str, table: &mut Table) -> Result<ExecuteOutcome> {
        execute_statement(prepare_statement(line).unwrap(), table)
    }

    #[test]
    fn test_insert_then_select() -> Result<()> {
        let dir = tempdir().unwrap();
        let mut table = Table::open(&Config::new(dir.path().join("test.db")))?;

        assert_eq!(
            run("insert 1 user1 person1@example.com", &mut table)?,
            ExecuteOutcome::Inserted
        );
        match run("select", &mut table)? {
            ExecuteOutcome::Rows(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].to_string(), "1 | person1@example.com | user1");
            }
            other => panic!("expected rows, got {:?}", other),
        }

        Ok(())
    }

    #[test]
    fn test_table_full_is_recoverable() -> Result<()> {
        let dir = tempdir().unwrap();
        let mut table = Table::open(&Config::new(dir.path().join("test.db")))?;

        for i in 1..=LEAF_NODE_MAX_CELLS {
            run(&format!("insert {} user{} p{}@gmail.com", i, i, i), &mut table)?;
        }

        let err = run("insert 100 late late@x.com", &mut table).unwrap_err();
        assert!(matches!(err, StorageError::TableFull));
        assert!(err.is_recoverable());

        match run("select", &mut table)? {
            ExecuteOutcome::Rows(rows) => assert_eq!(rows.len(), LEAF_NODE_MAX_CELLS),
            other => panic!("expected rows, got {:?}", other),
        }

        Ok(())
    }
}
