//! The line-oriented shell behind the `rowstore` binary.
//!
//! [`Shell`] owns the table and an output sink. Each input line is either a
//! meta-command (`.exit`, `.btree [json]`, `.constants`) or a statement.
//! Recoverable storage errors are reported on the output and the shell keeps
//! going; anything else is returned to the caller as fatal.

use crate::btree::Table;
use crate::error::StorageError;
use crate::page::layout_constants;
use crate::statement::{
    execute_statement, parse_meta_command, prepare_statement, ExecuteOutcome, MetaCommand,
};
use log::debug;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use thiserror::Error;

pub const PROMPT: &str = "db> ";

/// Errors that end a shell session
#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whether the shell should keep reading after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<W: Write> {
    table: Table,
    out: W,
    verbose: bool,
}

impl<W: Write> Shell<W> {
    pub fn new(table: Table, out: W) -> Self {
        Self {
            table,
            out,
            verbose: false,
        }
    }

    /// Print `Success. Took N ms.` after each successful statement
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Handle one input line
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        let input = line.trim();
        if input.is_empty() {
            return Ok(Flow::Continue);
        }

        if input.starts_with('.') {
            return match parse_meta_command(input) {
                Ok(command) => self.do_meta_command(command),
                Err(e) => {
                    writeln!(self.out, "{}", e)?;
                    Ok(Flow::Continue)
                }
            };
        }

        let statement = match prepare_statement(input) {
            Ok(statement) => statement,
            Err(e) => {
                writeln!(self.out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        let start = Instant::now();
        match execute_statement(statement, &mut self.table) {
            Ok(ExecuteOutcome::Inserted) => writeln!(self.out, "Inserted.")?,
            Ok(ExecuteOutcome::Rows(rows)) => {
                for row in rows {
                    writeln!(self.out, "{}", row)?;
                }
            }
            Err(e) if e.is_recoverable() => {
                debug!("statement failed: {}", e);
                writeln!(self.out, "Error: {}.", e)?;
                return Ok(Flow::Continue);
            }
            Err(e) => return Err(e.into()),
        }

        if self.verbose {
            writeln!(
                self.out,
                "Success. Took {} ms.",
                start.elapsed().as_millis()
            )?;
        }
        Ok(Flow::Continue)
    }

    fn do_meta_command(&mut self, command: MetaCommand) -> Result<Flow, ShellError> {
        match command {
            MetaCommand::Exit => return Ok(Flow::Exit),
            MetaCommand::Constants => {
                writeln!(self.out, "Constants:")?;
                for (name, value) in layout_constants() {
                    writeln!(self.out, "{}: {}", name, value)?;
                }
            }
            MetaCommand::BTree { json: false } => {
                let tree = self.table.export_tree()?;
                write!(self.out, "Tree:\n{}", tree.render())?;
            }
            MetaCommand::BTree { json: true } => {
                let tree = self.table.export_tree()?;
                writeln!(self.out, "{}", serde_json::to_string_pretty(&tree)?)?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Prompt for and run lines from `input` until `.exit` or end of input,
    /// then close the table
    pub fn run<R: BufRead>(mut self, input: R) -> Result<W, ShellError> {
        let mut lines = input.lines();
        loop {
            write!(self.out, "{}", PROMPT)?;
            self.out.flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };
            if self.execute_line(&line)? == Flow::Exit {
                break;
            }
        }
        self.close()
    }

    /// Flush the table and hand back the output sink
    pub fn close(mut self) -> Result<W, ShellError> {
        self.table.close()?;
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::leaf::{self, LEAF_NODE_MAX_CELLS};
    use crate::types::PageId;
    use crate::Config;
    use std::path::Path;
    use tempfile::tempdir;

    fn run_script(path: &Path, script: &str) -> Result<String, ShellError> {
        let table = Table::open(&Config::new(path))?;
        let out = Shell::new(table, Vec::new()).run(script.as_bytes())?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn inserts(range: std::ops::RangeInclusive<usize>) -> String {
        range
            .map(|i| format!("insert {} user{} person{}@example.com\n", i, i, i))
            .collect()
    }

    #[test]
    fn test_insert_and_select_output() -> Result<(), ShellError> {
        let dir = tempdir().unwrap();
        let output = run_script(
            &dir.path().join("test.db"),
            "insert 1 user1 person1@example.com\nselect\n.exit\n",
        )?;

        assert_eq!(
            output,
            "db> Inserted.\ndb> 1 | person1@example.com | user1\ndb> "
        );
        Ok(())
    }

    #[test]
    fn test_table_full_message() -> Result<(), ShellError> {
        let dir = tempdir().unwrap();
        let script = inserts(1..=LEAF_NODE_MAX_CELLS + 1) + ".exit\n";
        let output = run_script(&dir.path().join("test.db"), &script)?;

        let lines: Vec<&str> = output.split(PROMPT).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), LEAF_NODE_MAX_CELLS + 1);
        assert!(lines[..LEAF_NODE_MAX_CELLS]
            .iter()
            .all(|line| *line == "Inserted.\n"));
        assert_eq!(lines[LEAF_NODE_MAX_CELLS], "Error: Table full.\n");
        Ok(())
    }

    #[test]
    fn test_duplicate_key_message() -> Result<(), ShellError> {
        let dir = tempdir().unwrap();
        let output = run_script(
            &dir.path().join("test.db"),
            "insert 7 a a@x\ninsert 7 b b@x\nselect\n",
        )?;

        assert_eq!(
            output,
            "db> Inserted.\ndb> Error: Duplicate key 7.\ndb> 7 | a@x | a\ndb> "
        );
        Ok(())
    }

    #[test]
    fn test_end_of_input_flushes_like_exit() -> Result<(), ShellError> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        run_script(&path, "insert 1 a a@x\n")?;
        run_script(&path, "insert 2 b b@x\n.exit\n")?;

        let output = run_script(&path, "select\n")?;
        assert_eq!(output, "db> 1 | a@x | a\n2 | b@x | b\ndb> ");
        Ok(())
    }

    #[test]
    fn test_meta_command_output() -> Result<(), ShellError> {
        let dir = tempdir().unwrap();
        let output = run_script(
            &dir.path().join("test.db"),
            "insert 2 b b@x\ninsert 1 a a@x\n.constants\n.btree\n",
        )?;

        let expected_constants = "Constants:\n\
            ROW_SIZE: 293\n\
            COMMON_NODE_HEADER_SIZE: 6\n\
            LEAF_NODE_HEADER_SIZE: 10\n\
            LEAF_NODE_CELL_SIZE: 297\n\
            LEAF_NODE_SPACE_FOR_CELLS: 4086\n\
            LEAF_NODE_MAX_CELLS: 13\n";
        assert!(output.contains(expected_constants));
        assert!(output.contains("db> Tree:\nleaf (size 2)\n  - 0 : 1\n  - 1 : 2\ndb> "));
        Ok(())
    }

    #[test]
    fn test_btree_json_output() -> Result<(), ShellError> {
        let dir = tempdir().unwrap();
        let table = Table::open(&Config::new(dir.path().join("test.db")))?;
        let mut shell = Shell::new(table, Vec::new());
        shell.execute_line("insert 3 c c@x")?;
        shell.execute_line(".btree json")?;

        let output = String::from_utf8(shell.close()?).unwrap();
        let json_text = output.trim_start_matches("Inserted.\n");
        let json: serde_json::Value = serde_json::from_str(json_text)?;
        assert_eq!(json["keys"], serde_json::json!([3]));
        assert_eq!(json["isRoot"], serde_json::json!(true));
        Ok(())
    }

    #[test]
    fn test_prepare_errors_keep_the_shell_running() -> Result<(), ShellError> {
        let dir = tempdir().unwrap();
        let output = run_script(
            &dir.path().join("test.db"),
            "delete 1\ninsert -1 a b\ninsert 1 a\n.foo\n\nselect\n",
        )?;

        assert_eq!(
            output,
            "db> Unrecognized keyword at start of 'delete 1'.\n\
             db> ID must be positive.\n\
             db> Syntax error. Could not parse statement.\n\
             db> Unrecognized command '.foo'\n\
             db> db> db> "
        );
        Ok(())
    }

    #[test]
    fn test_verbose_reports_timing() -> Result<(), ShellError> {
        let dir = tempdir().unwrap();
        let table = Table::open(&Config::new(dir.path().join("test.db")))?;
        let mut shell = Shell::new(table, Vec::new()).verbose(true);
        shell.execute_line("insert 1 a a@x")?;
        shell.execute_line("insert 1 a a@x")?;

        let output = String::from_utf8(shell.close()?).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Inserted.");
        assert!(lines[1].starts_with("Success. Took ") && lines[1].ends_with(" ms."));
        assert_eq!(lines[2], "Error: Duplicate key 1.");
        assert_eq!(lines.len(), 3);
        Ok(())
    }

    #[test]
    fn test_corruption_is_fatal() -> Result<(), ShellError> {
        let dir = tempdir().unwrap();
        let mut table = Table::open(&Config::new(dir.path().join("test.db")))?;
        leaf::set_cell_count(table.pager.get_page(PageId::ROOT)?, 500);

        let mut shell = Shell::new(table, Vec::new());
        let result = shell.execute_line("select");
        assert!(matches!(
            result,
            Err(ShellError::Storage(StorageError::Corruption(_)))
        ));
        Ok(())
    }
}
