//! layc-lex - Tokenizer for constraint expressions.
//!
//! Expressions handed to the engine are flat linear combinations:
//!
//! ```text
//! r1.min.x + r1.size.x - r1.max.x
//! ```
//!
//! There are exactly two token kinds, a one-character sign operator and an
//! identifier. Identifier characters are letters, digits, `.`, `_` and `-`.
//! Note that `-` is both the subtraction operator and an identifier
//! character: a `-` that appears where a token starts (after whitespace)
//! is an operator, while a `-` inside a run of identifier characters
//! continues the identifier. `a - b` is therefore a subtraction and `a-b`
//! is a single identifier. Producers of expression text always put spaces
//! around operators.
//!
//! The [`Scanner`] is the underlying cursor primitive: byte positions,
//! peek and advance, whitespace skipping, and an `eof_is_error` mode used
//! while a token is required. The [`Tokenizer`] drives it to produce
//! [`Token`]s.

pub mod scanner;
pub mod token;
pub mod tokenizer;

pub use scanner::{ScanError, Scanner};
pub use token::{is_identifier_char, Token, TokenKind};
pub use tokenizer::Tokenizer;
