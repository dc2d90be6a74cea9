use std::io::{Result, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

fn rowstore(db: &Path, script: &str) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_rowstore"))
        .arg(db)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().expect("stdin is piped");
    stdin.write_all(script.as_bytes())?;
    drop(stdin);

    child.wait_with_output()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .split("db> ")
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| chunk.trim_end().to_string())
        .collect()
}

#[test]
fn inserts_and_selects_a_row() -> Result<()> {
    let dir = tempdir()?;
    let output = rowstore(
        &dir.path().join("test.db"),
        "insert 1 user1 person1@example.com\nselect\n.exit\n",
    )?;

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["Inserted.", "1 | person1@example.com | user1"]
    );
    Ok(())
}

#[test]
fn rows_survive_end_of_input_and_reopen() -> Result<()> {
    let dir = tempdir()?;
    let db = dir.path().join("test.db");

    let output = rowstore(&db, "insert 1 user1 person1@example.com\n")?;
    assert!(output.status.success());

    let output = rowstore(&db, "select\n.exit\n")?;
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["1 | person1@example.com | user1"]);
    Ok(())
}

#[test]
fn reports_table_full() -> Result<()> {
    let dir = tempdir()?;
    let mut script: String = (1..=14)
        .map(|i| format!("insert {} user{} person{}@example.com\n", i, i, i))
        .collect();
    script.push_str(".exit\n");

    let output = rowstore(&dir.path().join("test.db"), &script)?;
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 14);
    assert_eq!(lines[12], "Inserted.");
    assert_eq!(lines[13], "Error: Table full.");
    Ok(())
}

#[test]
fn partial_page_file_exits_with_status_1() -> Result<()> {
    let dir = tempdir()?;
    let db = dir.path().join("test.db");
    std::fs::write(&db, vec![0u8; 100])?;

    let output = rowstore(&db, "")?;
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a multiple of page size"));
    Ok(())
}
