//! Interactive shell for the row store.
//!
//! Usage:
//!   rowstore <db_path> [-v] [--max-pages N] [--sync]
//!
//! Statements:
//!   insert <id> <username> <email>
//!   select
//!
//! Meta-commands:
//!   .exit          - Flush the table and quit
//!   .btree [json]  - Dump the root node
//!   .constants     - Print the page layout constants
//!
//! A terminal gets a line editor with history; piped input is read line by
//! line. Either way, end of input closes the table like `.exit`.

use clap::Parser;
use env_logger::{Builder, Env};
use log::error;
use rowstore::shell::{Flow, Shell, PROMPT};
use rowstore::{Config, Table, DEFAULT_MAX_PAGES};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::error::Error;
use std::io::{self, IsTerminal, Stdout};
use std::path::PathBuf;
use std::process::exit;

#[derive(Parser, Debug)]
#[command(name = "rowstore", version, about = "Single-table row store shell")]
struct Args {
    /// Database file, created if missing
    filename: PathBuf,
    /// Print how long each statement took
    #[arg(short, long)]
    verbose: bool,
    /// Page cache ceiling
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: usize,
    /// Fsync the file on exit
    #[arg(long)]
    sync: bool,
}

fn init_logger() {
    // RUST_LOG overrides; stdout is reserved for query output
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();
    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{}", e);
        exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = Config::new(args.filename)
        .max_pages(args.max_pages)
        .sync_on_close(args.sync);
    let table = Table::open(&config)?;
    let shell = Shell::new(table, io::stdout()).verbose(args.verbose);

    if io::stdin().is_terminal() {
        interactive(shell)
    } else {
        shell.run(io::stdin().lock())?;
        Ok(())
    }
}

fn interactive(mut shell: Shell<Stdout>) -> Result<(), Box<dyn Error>> {
    let mut rl = DefaultEditor::new()?;

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let input = line.trim();
        if !input.is_empty() {
            rl.add_history_entry(input)?;
        }
        if shell.execute_line(input)? == Flow::Exit {
            break;
        }
    }

    shell.close()?;
    Ok(())
}
