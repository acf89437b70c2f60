//! layc-solve - Symbolic linear equation engine.
//!
//! Constraints arrive as textual expressions over named symbols, each one
//! a signed sum equal to zero:
//!
//! ```text
//! r1.min.x + r1.size.x - r1.max.x
//! ```
//!
//! The [`LinearSystem`] interns every name into a dual-indexed symbol
//! table, keeps the expressions in insertion order, and on
//! [`solve`](LinearSystem::solve) assembles an augmented matrix over the
//! unassigned symbols. Gaussian elimination with partial pivoting brings
//! the matrix to row echelon form, back-substitution isolates the rows
//! that pin down exactly one symbol, and those symbols become `Solved`.
//!
//! The interesting part is what happens when the system is not cleanly
//! solvable. Three failure shapes are detected and reported per symbol,
//! without abandoning the rest of the solution:
//!
//! - **Overconstrained**: an equation reduces to `0 = c`, `c != 0`. The
//!   pivot column's symbol is named in the diagnostics and the row is
//!   ignored from then on.
//! - **Linearly dependent**: an equation reduces to `0 = 0`. Harmless;
//!   the row is skipped silently.
//! - **Underconstrained**: rows that still tie several symbols together
//!   after reduction. The affected symbols stay unassigned and are
//!   reported as unsolved.
//!
//! Solvable connected components still produce values in all three cases.
//! Total success requires no overconstraint and no unsolved symbols.
//!
//! # Example
//!
//! ```
//! use layc_solve::LinearSystem;
//! use layc_util::Handler;
//!
//! let mut system = LinearSystem::new();
//! system.add_equation("x1 + w1 - x2").unwrap();
//! system.assign("x2", 100.0);
//! system.assign("w1", 10.0);
//!
//! let mut handler = Handler::new();
//! assert!(system.solve(&mut handler));
//! assert_eq!(system.symbol_value("x1"), 90.0);
//! ```

pub mod matrix;
pub mod solver;
pub mod symbol;
pub mod system;

pub use layc_par::ParseError;
pub use matrix::Matrix;
pub use symbol::{SymbolDefinition, SymbolId, SymbolState, SymbolTable};
pub use system::{Expression, LinearSystem, SymbolRef};
