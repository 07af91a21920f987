//! Command-line entry point (§6.1): run a `.kaynat` file, or start the
//! interactive shell when no file is given.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use is_terminal::IsTerminal;

use crate::error::KaynatError;
use crate::interpreter::StdHost;
use crate::{repl, run_source, SOURCE_EXTENSION};

#[derive(Parser)]
#[command(name = "kaynat")]
#[command(about = "An interpreter for Kaynat, an imperative programming language with English-prose syntax")]
#[command(version)]
pub struct Cli {
    /// Path to a Kaynat source file. Omit to start the interactive shell.
    pub path: Option<PathBuf>,
}

/// Parses arguments and dispatches to the file runner or the shell; returns
/// the process exit code.
pub fn run_cli() -> std::io::Result<i32> {
    let cli = Cli::parse();

    match cli.path {
        Some(path) => run_file(&path),
        None => repl::run(),
    }
}

fn run_file(path: &PathBuf) -> std::io::Result<i32> {
    if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
        eprintln!("warning: '{}' does not have a .{SOURCE_EXTENSION} extension", path.display());
    }

    let source = fs::read_to_string(path)?;
    let mut host = StdHost;

    match run_source(&source, &mut host) {
        Ok(()) => Ok(0),
        Err(err) => {
            report(&err, &source);
            Ok(1)
        }
    }
}

fn report(err: &KaynatError, source: &str) {
    let colored = std::io::stderr().is_terminal();
    eprintln!("{}", err.display_with_source(source, colored));
}
