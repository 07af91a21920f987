//! The closed error taxonomy (§7) and its diagnostic rendering.

use crate::lexicon::RESERVED_WORDS;
use crate::style::Style;
use crate::suggest::find_similar;
use crate::token::Span;

#[derive(Debug, Clone)]
pub struct KaynatError {
    pub kind: ErrorKind,
    pub span: Option<Span>,
}

#[derive(Debug, Clone)]
pub enum ErrorKind {
    Lexer(String),
    Parser(String),
    Runtime(String),
    Type(String),
    Name(String),
    Value(String),
    File(String),
    Import(String),
}

impl KaynatError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self { kind: ErrorKind::Lexer(message.into()), span: Some(span) }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self { kind: ErrorKind::Parser(message.into()), span: Some(span) }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Runtime(message.into()), span: None }
    }

    pub fn runtime_at(message: impl Into<String>, span: Span) -> Self {
        Self { kind: ErrorKind::Runtime(message.into()), span: Some(span) }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Type(message.into()), span: None }
    }

    pub fn name_error(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Name(message.into()), span: None }
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Value(message.into()), span: None }
    }

    pub fn file_error(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::File(message.into()), span: None }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            ErrorKind::Lexer(_) => "LexerError",
            ErrorKind::Parser(_) => "ParserError",
            ErrorKind::Runtime(_) => "RuntimeError",
            ErrorKind::Type(_) => "TypeError",
            ErrorKind::Name(_) => "NameError",
            ErrorKind::Value(_) => "ValueError",
            ErrorKind::File(_) => "FileError",
            ErrorKind::Import(_) => "ImportError",
        }
    }

    pub fn message(&self) -> &str {
        match &self.kind {
            ErrorKind::Lexer(m)
            | ErrorKind::Parser(m)
            | ErrorKind::Runtime(m)
            | ErrorKind::Type(m)
            | ErrorKind::Name(m)
            | ErrorKind::Value(m)
            | ErrorKind::File(m)
            | ErrorKind::Import(m) => m,
        }
    }

    /// Render a diagnostic with the offending line, a caret underline, and
    /// (for name errors) a "did you mean" suggestion, colorized with ANSI
    /// escapes when writing to a terminal.
    pub fn display_with_source(&self, source: &str, colored: bool) -> String {
        let label = if colored { Style::bold_red(self.label()) } else { self.label().to_string() };
        let mut result = format!("{}: {}", label, self.message());

        if let Some(span) = self.span {
            if let Some(line_content) = source.lines().nth(span.line.saturating_sub(1)) {
                let col = span.column.saturating_sub(1);
                let underline = format!("{}{}", " ".repeat(col), "^");
                let (line_num_str, pipe, underline_colored) = if colored {
                    (Style::blue(&format!("{:4}", span.line)), Style::blue("|"), Style::red(&underline))
                } else {
                    (format!("{:4}", span.line), "|".to_string(), underline)
                };
                result.push_str(&format!(
                    "\n\n{} {} {}\n     {} {}",
                    line_num_str, pipe, line_content, pipe, underline_colored
                ));

                if let ErrorKind::Name(_) = self.kind {
                    if let Some(word) = extract_word(&self.kind) {
                        if let Some(suggestion) = find_similar(&word, RESERVED_WORDS, 2) {
                            let hint = if colored { Style::cyan("help") } else { "help".to_string() };
                            let suggestion = if colored { Style::green(suggestion) } else { suggestion.to_string() };
                            result.push_str(&format!("\n     {pipe} {hint}: did you mean '{suggestion}'?"));
                        }
                    }
                }
            }
        }

        result
    }
}

fn extract_word(kind: &ErrorKind) -> Option<String> {
    let ErrorKind::Name(message) = kind else { return None };
    message.split('\'').nth(1).map(str::to_string)
}

impl From<std::io::Error> for KaynatError {
    fn from(err: std::io::Error) -> Self {
        KaynatError::file_error(err.to_string())
    }
}

impl std::fmt::Display for KaynatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label(), self.message())
    }
}

impl std::error::Error for KaynatError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;

    #[test]
    fn error_carries_span() {
        let err = KaynatError::parser("unexpected token", Span::new(3, 5));
        assert_eq!(err.span, Some(Span::new(3, 5)));
    }

    #[test]
    fn display_with_source_shows_line_and_underline() {
        let err = KaynatError::parser("expected '.'", Span::new(1, 9));
        let source = "set x to 5";
        let display = err.display_with_source(source, false);
        assert!(display.contains("set x to 5"), "{display}");
        assert!(display.contains('^'), "{display}");
    }

    #[test]
    fn name_error_suggests_typo_fix() {
        let err = KaynatError::name_error("unbound name 'repeet'").with_span(Span::new(1, 1));
        let source = "repeet 3 times .";
        let display = err.display_with_source(source, false);
        assert!(display.contains("did you mean 'repeat'"), "{display}");
    }

    #[test]
    fn colored_rendering_has_ansi_escapes() {
        let err = KaynatError::parser("bad token", Span::new(1, 1));
        let display = err.display_with_source("set x to 5 .", true);
        assert!(display.contains("\x1b["));
    }

    #[test]
    fn plain_rendering_has_no_ansi_escapes() {
        let err = KaynatError::parser("bad token", Span::new(1, 1));
        let display = err.display_with_source("set x to 5 .", false);
        assert!(!display.contains("\x1b["));
    }
}
