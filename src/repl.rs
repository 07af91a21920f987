//! The interactive shell (§6.1.1): an external collaborator grounded in
//! the distilled reference's own REPL, rebuilt around one persistent
//! `Interpreter` session instead of a throwaway interpreter per line.

use std::io::{self, BufRead, Write};

use is_terminal::IsTerminal;

use crate::error::KaynatError;
use crate::interpreter::{Host, Interpreter, StdHost};
use crate::lexer::Lexer;
use crate::parser::Parser;

const PROMPT: &str = "kaynat> ";
const CONTINUATION_PROMPT: &str = "   ... ";

/// Runs the shell until `exit`/`quit` or end of input; returns the process
/// exit code.
pub fn run() -> io::Result<i32> {
    println!("Kaynat {} — interactive shell", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut interpreter = Interpreter::new();
    let mut host = StdHost;
    let mut buffer = String::new();

    loop {
        print!("{}", if buffer.is_empty() { PROMPT } else { CONTINUATION_PROMPT });
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(0);
        };
        let line = line?;

        if buffer.is_empty() {
            let trimmed = line.trim();
            if trimmed == "exit" || trimmed == "quit" {
                return Ok(0);
            }
            if trimmed.is_empty() {
                continue;
            }
        }

        buffer.push_str(&line);
        buffer.push('\n');

        match try_parse(&buffer) {
            Ok(program) => {
                if let Err(err) = interpreter.run(&program, &mut host) {
                    report(&err, &buffer);
                }
                buffer.clear();
            }
            Err(err) if awaiting_more_input(&err) => continue,
            Err(err) => {
                report(&err, &buffer);
                buffer.clear();
            }
        }
    }
}

fn try_parse(source: &str) -> Result<crate::ast::Program, KaynatError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse()
}

/// The parser only ever runs out of tokens mid-construct when a block
/// opened earlier in the buffer (`if ... then .`, `while ... .`, a
/// blueprint body, ...) hasn't been closed by a balancing `end .` yet —
/// every other parse failure is a genuine syntax error. Matching on
/// `TokenType::Eof`'s `Display` text ("end of input") distinguishes the
/// two without the parser needing to expose a dedicated signal for it.
fn awaiting_more_input(err: &KaynatError) -> bool {
    matches!(err.kind, crate::error::ErrorKind::Parser(ref m) if m.ends_with("found end of input"))
}

fn report(err: &KaynatError, source: &str) {
    let colored = io::stderr().is_terminal();
    eprintln!("{}", err.display_with_source(source, colored));
}
