//! The linear system: expressions, assignments, and value read-back.

use layc_par::{ExprParser, ParseError};

use crate::symbol::{SymbolId, SymbolState, SymbolTable};

/// A signed use of a symbol inside one expression.
///
/// Many references may point at the same definition, across expressions
/// and within one expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolRef {
    /// True when the reference carries a coefficient of minus one.
    pub negative: bool,
    /// The shared definition this reference points at.
    pub id: SymbolId,
}

impl SymbolRef {
    /// The reference's coefficient, plus or minus one.
    pub fn coefficient(&self) -> f64 {
        if self.negative {
            -1.0
        } else {
            1.0
        }
    }
}

/// An ordered list of signed symbol references whose sum equals zero.
///
/// Append-only: once parsed an expression is never rewritten. The solver
/// rebuilds its matrix from the expression list on every solve.
#[derive(Clone, Debug, Default)]
pub struct Expression {
    refs: Vec<SymbolRef>,
}

impl Expression {
    pub(crate) fn push(&mut self, sref: SymbolRef) {
        self.refs.push(sref);
    }

    /// The references in source order.
    pub fn refs(&self) -> &[SymbolRef] {
        &self.refs
    }

    /// Number of references.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// True when the expression holds no references.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

/// A system of linear constraint equations over named symbols.
///
/// Populated by any interleaving of [`add_equation`](Self::add_equation)
/// and [`assign`](Self::assign) calls, then solved. The system exclusively
/// owns its symbol table and expression list.
///
/// # Example
///
/// ```
/// use layc_solve::LinearSystem;
/// use layc_util::Handler;
///
/// let mut system = LinearSystem::new();
/// system.add_equation("x + w - y").unwrap();
/// system.assign("w", 10.0);
/// system.assign("y", 100.0);
///
/// let mut handler = Handler::new();
/// assert!(system.solve(&mut handler));
/// assert_eq!(system.symbol_value("x"), 90.0);
/// ```
#[derive(Debug, Default)]
pub struct LinearSystem {
    table: SymbolTable,
    expressions: Vec<Expression>,
    success: bool,
}

impl LinearSystem {
    /// Create an empty system.
    pub fn new() -> Self {
        Self { table: SymbolTable::new(), expressions: Vec::new(), success: false }
    }

    /// Parse `text` as an expression equal to zero and append it.
    ///
    /// Any name not seen before is interned as a fresh `Unassigned`
    /// symbol. On a parse error the partially built expression stays in
    /// the system; there is no rollback. Expression text is normally
    /// machine-generated, so a parse failure here is a bug in the caller.
    pub fn add_equation(&mut self, text: &str) -> Result<(), ParseError> {
        let mut parser = ExprParser::new(text);
        let mut expression = Expression::default();
        let result = loop {
            match parser.next_term() {
                Ok(Some(term)) => {
                    let id = self.table.intern(term.name);
                    expression.push(SymbolRef { negative: term.negative, id });
                }
                Ok(None) => break Ok(()),
                Err(err) => break Err(err),
            }
        };
        self.expressions.push(expression);
        result
    }

    /// Mark `name` as a user-fixed constant with the given value.
    ///
    /// The name is interned if no expression has mentioned it yet, so
    /// assigning ahead of the first equation is legal. Assigning twice is
    /// allowed; the last value wins.
    pub fn assign(&mut self, name: &str, value: f64) {
        let id = self.table.intern(name);
        let def = self.table.def_mut(id);
        def.state = SymbolState::Assigned;
        def.value = value;
    }

    /// The value of the named symbol.
    ///
    /// Meaningful for `Assigned` and `Solved` symbols. Unknown or
    /// `Unassigned` names yield `0.0`, the initial value; callers should
    /// not rely on that.
    pub fn symbol_value(&self, name: &str) -> f64 {
        self.table.def_by_name(name).map_or(0.0, |def| def.value)
    }

    /// The state of the named symbol, if it exists.
    pub fn symbol_state(&self, name: &str) -> Option<SymbolState> {
        self.table.def_by_name(name).map(|def| def.state)
    }

    /// Iterate `(name, state, value)` for every symbol, in lexicographic
    /// name order. This is the enumeration a renderer walks to discover
    /// geometry, including symbols introduced only by user-written
    /// equations.
    pub fn symbols(&self) -> impl Iterator<Item = (&str, SymbolState, f64)> {
        self.table.iter_by_name().map(|def| (def.name.as_str(), def.state, def.value))
    }

    /// Whether the most recent solve fully succeeded.
    pub fn success(&self) -> bool {
        self.success
    }

    pub(crate) fn set_success(&mut self, success: bool) {
        self.success = success;
    }

    /// The symbol table.
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub(crate) fn table_mut(&mut self) -> &mut SymbolTable {
        &mut self.table
    }

    /// The expressions in insertion order.
    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }
}
