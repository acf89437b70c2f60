//! Tokenizer driving the scanner over one expression.

use crate::scanner::{ScanError, Scanner};
use crate::token::{is_identifier_char, Token, TokenKind};

/// Characters accepted as a sign operator.
const SIGN_CHARS: &str = "+-";

/// Produces sign and identifier tokens from one expression string.
///
/// Whitespace between tokens is insignificant and skipped on both sides of
/// every token read. End of input is a hard error only while a token is
/// being read; between tokens it is the normal terminator, checked with
/// [`at_end`](Self::at_end).
///
/// # Example
///
/// ```
/// use layc_lex::{Tokenizer, TokenKind};
///
/// let mut tokens = Tokenizer::new("x1 + w1 - x2");
/// assert_eq!(tokens.next_token().unwrap().text, "x1");
/// assert_eq!(tokens.next_token().unwrap().kind, TokenKind::Operator);
/// assert_eq!(tokens.next_token().unwrap().text, "w1");
/// ```
#[derive(Debug)]
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `source`.
    pub fn new(source: &'a str) -> Self {
        Self { scanner: Scanner::new(source) }
    }

    /// True when only whitespace (or nothing) remains.
    pub fn at_end(&mut self) -> bool {
        self.scanner.skip_whitespace();
        self.scanner.is_at_end()
    }

    /// Read the next token. A token is required: end of input here is an
    /// error.
    pub fn next_token(&mut self) -> Result<Token<'a>, ScanError> {
        self.scanner.set_eof_is_error(true);
        self.scanner.skip_whitespace();

        let start = self.scanner.pos();
        let token = if self.scanner.accept_any(SIGN_CHARS).is_some() {
            Some(Token { kind: TokenKind::Operator, text: self.scanner.slice_from(start) })
        } else if self.scanner.peek().is_some_and(is_identifier_char) {
            while self.scanner.peek().is_some_and(is_identifier_char) {
                self.scanner.advance();
            }
            Some(Token { kind: TokenKind::Identifier, text: self.scanner.slice_from(start) })
        } else {
            if let Some(c) = self.scanner.peek() {
                self.scanner.set_error(ScanError::UnexpectedChar(c));
            }
            None
        };

        self.scanner.set_eof_is_error(false);
        self.scanner.skip_whitespace();

        match token {
            Some(token) => Ok(token),
            None => Err(self.scanner.take_error().unwrap_or(ScanError::UnexpectedEof)),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // The tokenizer must never panic, whatever the input.
        #[test]
        fn tokenizer_never_panics(input in ".{0,64}") {
            let mut tokens = Tokenizer::new(&input);
            for _ in 0..128 {
                if tokens.at_end() || tokens.next_token().is_err() {
                    break;
                }
            }
        }

        // A lone identifier tokenizes back to exactly itself.
        #[test]
        fn identifier_roundtrip(name in "[A-Za-z0-9._][A-Za-z0-9._-]{0,15}") {
            let mut tokens = Tokenizer::new(&name);
            let token = tokens.next_token().unwrap();
            prop_assert_eq!(token.kind, TokenKind::Identifier);
            prop_assert_eq!(token.text, name.as_str());
            prop_assert!(tokens.at_end());
        }
    }
}
