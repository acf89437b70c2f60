//! layc-util - Foundation types for the layc constraint engine.
//!
//! This crate holds the small pieces every other layer builds on:
//!
//! - [`IndexVec`] and the [`Idx`] trait, a vector indexed by a typed id.
//!   Symbol definitions are stored in one of these, which is what gives
//!   symbol ids their dense, insertion-ordered, never-reused shape.
//! - [`Handler`] and [`Diagnostic`], the line-oriented diagnostic sink the
//!   solver reports overconstrained and unsolved symbols through.
//!
//! Everything here is strictly single-threaded. The engine owns all of its
//! state per instance and never shares it across threads, so these types
//! deliberately avoid interior mutability and locking.

pub mod diagnostic;
pub mod index_vec;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use index_vec::{Idx, IndexVec};
