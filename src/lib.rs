//! Kaynat: an interpreter for an imperative programming language written
//! in English prose.
//!
//! The pipeline is the conventional three stages — `lexer` tokenizes
//! source text, `parser` builds an AST (`ast`) by recursive descent,
//! `interpreter` walks that tree — plus the ambient pieces every runnable
//! language needs: a closed `error` taxonomy with source-position
//! rendering, a `builtins` library, and small `style`/`suggest` helpers
//! the error renderer leans on.

pub mod ast;
pub mod builtins;
pub mod cli;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod lexicon;
pub mod parser;
pub mod repl;
pub mod style;
pub mod suggest;
pub mod token;

pub use error::{ErrorKind, KaynatError};
pub use interpreter::{Host, Interpreter};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Span, Token, TokenType};

/// Conventional extension for a Kaynat source file (§6.2).
pub const SOURCE_EXTENSION: &str = "kaynat";

/// Runs a complete Kaynat program against a fresh interpreter and host,
/// the same lex → parse → execute pipeline the CLI and REPL both use.
pub fn run_source(source: &str, host: &mut dyn Host) -> Result<(), KaynatError> {
    let tokens = Lexer::new(source).tokenize()?;
    let program = Parser::new(tokens).parse()?;
    let mut interpreter = Interpreter::new();
    interpreter.run(&program, host)
}
