//! Reserved-word table for the lexer.
//!
//! Single English words map to a single token kind; none of these are
//! multi-word in the lexer itself. Multi-word constructs (`is greater
//! than`, `give back`, `for each`, ...) are recognized by the parser as
//! sequences of these single-word tokens, not by the lexer.

use crate::token::TokenType;

pub fn lookup_keyword(word: &str) -> Option<TokenType> {
    use TokenType::*;
    let kind = match word {
        "set" => Set,
        "let" => Let,
        "always" => Always,
        "change" => Change,
        "to" => To,
        "as" => As,
        "my" => My,
        "this" => This,
        "the" => The,

        "plus" => Plus,
        "minus" => Minus,
        "multiplied" => Multiplied,
        "divided" => Divided,
        "by" => By,
        "add" => Add,
        "subtract" => Subtract,
        "from" => From,

        "is" => Is,
        "greater" => Greater,
        "less" => Less,
        "equal" => Equal,
        "not" => Not,
        "than" => Than,
        "negative" => Negative,

        "and" => And,
        "or" => Or,

        "if" => If,
        "then" => Then,
        "otherwise" => Otherwise,
        "end" => End,
        "while" => While,
        "repeat" => Repeat,
        "times" => Times,
        "for" => For,
        "each" => Each,
        "in" => In,
        "loop" => Loop,
        "stepping" => Stepping,
        "stop" => Stop,
        "skip" => Skip,

        "define" => Define,
        "a" => A,
        "an" => An,
        "function" => Function,
        "called" => Called,
        "that" => That,
        "takes" => Takes,
        "take" => Take,
        "do" => Do,
        "give" => Give,
        "back" => Back,
        "call" => Call,
        "with" => With,
        "store" => Store,
        "on" => On,

        "create" => Create,
        "list" => List,
        "map" => Map,
        "containing" => Containing,

        "blueprint" => Blueprint,
        "abstract" => Abstract,
        "has" => Has,
        "extends" => Extends,
        "contract" => Contract,
        "requires" => Requires,
        "new" => New,
        "it" => It,

        "say" => Say,
        "print" => Print,
        "show" => Show,
        "ask" => Ask,
        "user" => User,

        "begin" => Begin,
        "program" => Program,
        "note" => Note,

        "nothing" => Nothing,
        "true" | "yes" => Boolean(true),
        "false" | "no" => Boolean(false),

        "attempt" => Attempt,
        "fails" => Fails,
        "message" => Message,
        "saying" => Saying,
        "run" => Run,
        "wait" => Wait,
        "timer" => Timer,
        "cancel" => Cancel,

        _ => return None,
    };
    Some(kind)
}

/// Reserved words plus a handful of structural keywords, used as the
/// candidate pool for "did you mean" suggestions (see `suggest.rs`).
pub const RESERVED_WORDS: &[&str] = &[
    "set", "let", "always", "change", "to", "as", "my", "this", "the", "plus", "minus",
    "multiplied", "divided", "by", "add", "subtract", "from", "is", "greater", "less", "equal",
    "not", "than", "negative", "and", "or", "if", "then", "otherwise", "end", "while", "repeat",
    "times", "for", "each", "in", "loop", "stepping", "stop", "skip", "define", "a", "an",
    "function", "called", "that", "takes", "take", "do", "give", "back", "call", "with", "store", "on",
    "create", "list", "map", "containing", "blueprint", "abstract", "has", "extends", "contract",
    "requires", "new", "say", "print", "show", "ask", "user", "begin", "program", "note",
    "nothing", "true", "false",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_single_word_keywords() {
        assert_eq!(lookup_keyword("set"), Some(TokenType::Set));
        assert_eq!(lookup_keyword("blueprint"), Some(TokenType::Blueprint));
    }

    #[test]
    fn unknown_word_is_not_a_keyword() {
        assert_eq!(lookup_keyword("frobnicate"), None);
    }

    #[test]
    fn true_and_yes_both_lex_to_boolean_true() {
        assert_eq!(lookup_keyword("true"), Some(TokenType::Boolean(true)));
        assert_eq!(lookup_keyword("yes"), Some(TokenType::Boolean(true)));
    }

    #[test]
    fn false_and_no_both_lex_to_boolean_false() {
        assert_eq!(lookup_keyword("false"), Some(TokenType::Boolean(false)));
        assert_eq!(lookup_keyword("no"), Some(TokenType::Boolean(false)));
    }
}
