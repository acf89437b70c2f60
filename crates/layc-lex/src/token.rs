//! Token types for the expression grammar.

use std::fmt;

/// Characters that may appear in an identifier.
///
/// `-` is included, so a `-` inside a run of identifier characters binds
/// to the identifier rather than acting as an operator.
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// The kind of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A `+` or `-` sign.
    Operator,
    /// A run of identifier characters, used as a symbol name.
    Identifier,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Operator => write!(f, "operator"),
            TokenKind::Identifier => write!(f, "identifier"),
        }
    }
}

/// One token, borrowing its text from the source expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token category.
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// True for a `-` operator token.
    pub fn is_minus(&self) -> bool {
        self.kind == TokenKind::Operator && self.text == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_chars() {
        for c in ['a', 'Z', '0', '9', '.', '_', '-'] {
            assert!(is_identifier_char(c), "{c:?} should be an identifier char");
        }
        for c in ['+', ' ', '\t', '*', '(', 'é'] {
            assert!(!is_identifier_char(c), "{c:?} should not be an identifier char");
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TokenKind::Operator.to_string(), "operator");
        assert_eq!(TokenKind::Identifier.to_string(), "identifier");
    }

    #[test]
    fn test_is_minus() {
        let minus = Token { kind: TokenKind::Operator, text: "-" };
        let plus = Token { kind: TokenKind::Operator, text: "+" };
        let ident = Token { kind: TokenKind::Identifier, text: "-" };
        assert!(minus.is_minus());
        assert!(!plus.is_minus());
        assert!(!ident.is_minus());
    }
}
