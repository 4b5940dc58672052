//! A module implementing lexical analysis (tokenization) for command lines.
//!
//! The grammar knows no quoting or escaping: a token is any maximal run of
//! non-whitespace characters. Delimiters (`;`, `&`) are only recognized by the
//! parser when they stand alone as a whole token.

/// The atomic unit of a command line.
pub type Token = String;

/// Splits a raw input line into whitespace-separated tokens, preserving order.
pub fn split_into_tokens(line: &str) -> Vec<Token> {
    line.split_whitespace().map(str::to_owned).collect()
}
