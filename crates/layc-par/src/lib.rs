//! layc-par - Parser for constraint expressions.
//!
//! The grammar is a flat alternation of signed terms:
//!
//! ```text
//! expr       := [sign] term (sign term)*
//! sign       := '+' | '-'
//! term       := identifier
//! identifier := [A-Za-z0-9._-]+
//! ```
//!
//! Every term is one symbol name with an implicit coefficient of plus or
//! minus one; there are no numeric literals and no scalar multipliers. The
//! leading sign is optional and defaults to `+`. The signed sum of the
//! terms is an equation equal to zero.
//!
//! The parser is a small hand-written recursive descent over the two token
//! kinds. It is pull-based: [`ExprParser::next_term`] yields one term at a
//! time, which lets the caller keep every term parsed before a failure
//! (partial expressions are not rolled back; a parse failure is treated as
//! a bug in whatever generated the text).

use layc_lex::{ScanError, Token, TokenKind, Tokenizer};
use thiserror::Error;

/// Error produced while parsing one expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The tokenizer rejected the input.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A token of the wrong kind appeared.
    #[error("Expected token of type {expected}, got '{found}' of type {got}.")]
    Expected {
        /// The token kind the grammar required here.
        expected: TokenKind,
        /// Source text of the token actually read.
        found: String,
        /// Kind of the token actually read.
        got: TokenKind,
    },
}

/// One parsed term: a symbol name and its sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Term<'a> {
    /// True when the term carries a `-` sign.
    pub negative: bool,
    /// The symbol name, borrowed from the source expression.
    pub name: &'a str,
}

/// Pull parser for one expression.
///
/// # Example
///
/// ```
/// use layc_par::ExprParser;
///
/// let mut parser = ExprParser::new("x1 + w1 - x2");
/// let mut terms = Vec::new();
/// while let Some(term) = parser.next_term().unwrap() {
///     terms.push((term.negative, term.name));
/// }
/// assert_eq!(terms, vec![(false, "x1"), (false, "w1"), (true, "x2")]);
/// ```
#[derive(Debug)]
pub struct ExprParser<'a> {
    tokens: Tokenizer<'a>,
    started: bool,
}

impl<'a> ExprParser<'a> {
    /// Create a parser over one expression string.
    pub fn new(source: &'a str) -> Self {
        Self { tokens: Tokenizer::new(source), started: false }
    }

    /// Parse the next term, or `None` at the end of the expression.
    ///
    /// The first term is required: an empty expression is an error. After
    /// the first term, each further term must be introduced by a sign.
    pub fn next_term(&mut self) -> Result<Option<Term<'a>>, ParseError> {
        if !self.started {
            self.started = true;
            return self.first_term().map(Some);
        }

        if self.tokens.at_end() {
            return Ok(None);
        }

        let sign = self.expect(TokenKind::Operator)?;
        let name = self.expect(TokenKind::Identifier)?;
        Ok(Some(Term { negative: sign.is_minus(), name: name.text }))
    }

    /// Parse every remaining term into a vector.
    pub fn collect_terms(mut self) -> Result<Vec<Term<'a>>, ParseError> {
        let mut terms = Vec::new();
        while let Some(term) = self.next_term()? {
            terms.push(term);
        }
        Ok(terms)
    }

    /// First term: the sign is optional.
    fn first_term(&mut self) -> Result<Term<'a>, ParseError> {
        let token = self.tokens.next_token()?;
        match token.kind {
            TokenKind::Identifier => Ok(Term { negative: false, name: token.text }),
            TokenKind::Operator => {
                let name = self.expect(TokenKind::Identifier)?;
                Ok(Term { negative: token.is_minus(), name: name.text })
            }
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token<'a>, ParseError> {
        let token = self.tokens.next_token()?;
        if token.kind != expected {
            return Err(ParseError::Expected {
                expected,
                found: token.text.to_string(),
                got: token.kind,
            });
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Vec<(bool, String)>, ParseError> {
        let terms = ExprParser::new(source).collect_terms()?;
        Ok(terms.into_iter().map(|t| (t.negative, t.name.to_string())).collect())
    }

    #[test]
    fn test_single_term() {
        assert_eq!(parse("x1").unwrap(), vec![(false, "x1".into())]);
    }

    #[test]
    fn test_leading_signs() {
        assert_eq!(parse("-x1").unwrap(), vec![(true, "x1".into())]);
        assert_eq!(parse("+x1").unwrap(), vec![(false, "x1".into())]);
    }

    #[test]
    fn test_three_terms() {
        assert_eq!(
            parse("x1 + w1 - x2").unwrap(),
            vec![(false, "x1".into()), (false, "w1".into()), (true, "x2".into())]
        );
    }

    #[test]
    fn test_negated_expression() {
        assert_eq!(
            parse("-x1 - w1 + x2").unwrap(),
            vec![(true, "x1".into()), (true, "w1".into()), (false, "x2".into())]
        );
    }

    #[test]
    fn test_repeated_symbol_is_allowed() {
        assert_eq!(parse("x - x").unwrap(), vec![(false, "x".into()), (true, "x".into())]);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert_eq!(parse(""), Err(ParseError::Scan(ScanError::UnexpectedEof)));
        assert_eq!(parse("   "), Err(ParseError::Scan(ScanError::UnexpectedEof)));
    }

    #[test]
    fn test_operator_without_identifier() {
        assert_eq!(parse("x1 +"), Err(ParseError::Scan(ScanError::UnexpectedEof)));
    }

    #[test]
    fn test_two_identifiers_without_operator() {
        let err = parse("x1 y1").unwrap_err();
        assert_eq!(
            err,
            ParseError::Expected {
                expected: TokenKind::Operator,
                found: "y1".into(),
                got: TokenKind::Identifier,
            }
        );
        assert_eq!(
            err.to_string(),
            "Expected token of type operator, got 'y1' of type identifier."
        );
    }

    #[test]
    fn test_double_operator() {
        let err = parse("x1 + - x2").unwrap_err();
        assert_eq!(
            err,
            ParseError::Expected {
                expected: TokenKind::Identifier,
                found: "-".into(),
                got: TokenKind::Operator,
            }
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert!(matches!(parse("x1 * x2"), Err(ParseError::Scan(ScanError::UnexpectedChar('*')))));
    }

    #[test]
    fn test_partial_terms_survive_failure() {
        let mut parser = ExprParser::new("x1 + w1 - - x2");
        let mut terms = Vec::new();
        let err = loop {
            match parser.next_term() {
                Ok(Some(term)) => terms.push(term.name),
                Ok(None) => panic!("expected a parse error"),
                Err(err) => break err,
            }
        };
        assert_eq!(terms, vec!["x1", "w1"]);
        assert!(matches!(err, ParseError::Expected { .. }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ident() -> impl Strategy<Value = String> {
        "[A-Za-z0-9._][A-Za-z0-9._-]{0,11}"
    }

    proptest! {
        // Any whitespace-joined chain of signed identifiers parses back to
        // the same signs and names.
        #[test]
        fn generated_expressions_roundtrip(
            first_negative in any::<bool>(),
            terms in proptest::collection::vec((any::<bool>(), ident()), 1..8),
        ) {
            let mut source = String::new();
            for (i, (negative, name)) in terms.iter().enumerate() {
                if i == 0 {
                    if *negative && first_negative {
                        source.push_str("- ");
                    } else if *negative {
                        source.push('-');
                    }
                } else {
                    source.push_str(if *negative { " - " } else { " + " });
                }
                source.push_str(name);
            }

            let parsed = ExprParser::new(&source).collect_terms().unwrap();
            prop_assert_eq!(parsed.len(), terms.len());
            for (term, (negative, name)) in parsed.iter().zip(&terms) {
                prop_assert_eq!(term.negative, *negative);
                prop_assert_eq!(term.name, name.as_str());
            }
        }
    }
}
