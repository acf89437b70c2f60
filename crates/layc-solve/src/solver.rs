//! Gaussian elimination over the assembled augmented matrix.
//!
//! One solve proceeds in four steps:
//!
//! 1. **Assembly.** Unassigned symbols become coefficient columns, in
//!    lexicographic name order. Expressions become rows, in insertion
//!    order. Known symbols (assigned by the user, or solved by an earlier
//!    run) fold into the constant column.
//! 2. **Row echelon.** Forward elimination with partial pivoting. A row
//!    that reduces to `0 = c` with `c` nonzero cannot be satisfied; the
//!    current pivot column's symbol is reported as overconstrained. The
//!    named symbol is a representative of its connected component, not
//!    a root cause.
//! 3. **Back-substitution.** Bottom-up normalization of rows that pin
//!    down exactly one symbol. Rows with two or more surviving
//!    coefficients belong to an underconstrained block and are left
//!    alone, as are the unsatisfiable rows from step 2.
//! 4. **Read-back.** Rows with a single unit coefficient write their
//!    constant into the symbol as `Solved`. Whatever is still unassigned
//!    afterwards is reported as unsolved.
//!
//! Failure is deliberately partial: one overconstrained or
//! underconstrained component does not stop disjoint components from
//! solving. The success flag answers "did everything solve", not "did
//! anything solve".

use rustc_hash::FxHashMap;

use layc_util::Handler;

use crate::matrix::Matrix;
use crate::symbol::{SymbolId, SymbolState};
use crate::system::LinearSystem;

impl LinearSystem {
    /// Solve the system, reporting failures into `handler`.
    ///
    /// Returns true only when every symbol ended up with a value and no
    /// equation was contradicted. Partial outcomes are normal: on a false
    /// return, symbols in solvable components still carry `Solved` values
    /// and `handler` lists the rest, one line each. On failure a
    /// pretty-printed dump of the reduced matrix is attached as a note.
    pub fn solve(&mut self, handler: &mut Handler) -> bool {
        self.set_success(true);

        // Columns: one per unassigned symbol, numbered in name order.
        let columns: Vec<SymbolId> = self
            .table()
            .iter_by_name()
            .filter(|def| def.state == SymbolState::Unassigned)
            .map(|def| def.id)
            .collect();

        // Nothing left to determine. An all-known system is trivially
        // consistent with its equations having collapsed to constants.
        if columns.is_empty() {
            return true;
        }

        let mut matrix = self.assemble(&columns);
        self.reduce(&mut matrix, &columns, handler);
        back_substitute(&mut matrix);
        self.read_back(&matrix, &columns);
        self.report_unsolved(handler);

        if !self.success() {
            handler.note(matrix.to_string());
        }
        self.success()
    }

    /// Build the augmented matrix: one row per expression, one coefficient
    /// column per unknown, constants on the right.
    fn assemble(&self, columns: &[SymbolId]) -> Matrix {
        let col_of: FxHashMap<SymbolId, usize> =
            columns.iter().copied().enumerate().map(|(col, id)| (id, col)).collect();

        let rows = self.expressions().len();
        let rhs = columns.len();
        let mut matrix = Matrix::zeroed(rows, rhs + 1);

        for (row, expression) in self.expressions().iter().enumerate() {
            for sref in expression.refs() {
                let def = self.table().def(sref.id);
                if def.is_known() {
                    // Known terms move to the right-hand side.
                    matrix[(row, rhs)] -= sref.coefficient() * def.value;
                } else {
                    // Repeated occurrences of one symbol accumulate, so
                    // `x - x` contributes nothing.
                    matrix[(row, col_of[&sref.id])] += sref.coefficient();
                }
            }
        }
        matrix
    }

    /// Forward elimination with partial pivoting, flagging unsatisfiable
    /// rows as they appear.
    fn reduce(&mut self, matrix: &mut Matrix, columns: &[SymbolId], handler: &mut Handler) {
        let rows = matrix.rows();
        let rhs = columns.len();

        let mut h = 0;
        let mut k = 0;
        while h < rows && k < rhs {
            // Largest magnitude in column k, rows h and below.
            let mut pivot = h;
            for row in h + 1..rows {
                if matrix[(row, k)].abs() > matrix[(pivot, k)].abs() {
                    pivot = row;
                }
            }
            if matrix[(pivot, k)] == 0.0 {
                // Free column; no equation constrains this symbol here.
                k += 1;
                continue;
            }
            matrix.swap_rows(h, pivot);

            for row in h + 1..rows {
                let was_zero = matrix[(row, k)] == 0.0;
                let factor = matrix[(row, k)] / matrix[(h, k)];
                matrix[(row, k)] = 0.0;
                for col in k + 1..=rhs {
                    matrix[(row, col)] -= factor * matrix[(h, col)];
                }

                // The row just became `0 = c` with c nonzero: no
                // assignment of the unknowns can satisfy it.
                let coefficients_vanished = (k + 1..rhs).all(|col| matrix[(row, col)] == 0.0);
                if !was_zero && coefficients_vanished && matrix[(row, rhs)] != 0.0 {
                    let name = &self.table().def(columns[k]).name;
                    handler.error(format!("Overconstrained symbol '{name}'"));
                    self.set_success(false);
                }
            }
            h += 1;
            k += 1;
        }
    }

    /// Write solved rows into the symbol table.
    fn read_back(&mut self, matrix: &Matrix, columns: &[SymbolId]) {
        let rhs = columns.len();
        for row in 0..matrix.rows() {
            let mut nonzero = None;
            let mut count = 0;
            for col in 0..rhs {
                if matrix[(row, col)] != 0.0 {
                    count += 1;
                    nonzero = Some(col);
                }
            }
            let Some(col) = nonzero else { continue };
            if count != 1 || matrix[(row, col)] != 1.0 {
                // Ambiguous combination; its symbols stay unassigned and
                // get reported below.
                continue;
            }
            let def = self.table_mut().def_mut(columns[col]);
            if def.state == SymbolState::Unassigned {
                def.state = SymbolState::Solved;
                def.value = matrix[(row, rhs)];
            }
        }
    }

    /// Flag every symbol that is still unassigned after read-back.
    fn report_unsolved(&mut self, handler: &mut Handler) {
        let mut any = false;
        for def in self.table().iter_by_name() {
            if def.state == SymbolState::Unassigned {
                handler.error(format!("Unsolved symbol '{}'", def.name));
                any = true;
            }
        }
        if any {
            self.set_success(false);
        }
    }
}

/// Bottom-up normalization of the reduced matrix.
fn back_substitute(matrix: &mut Matrix) {
    let rows = matrix.rows();
    let rhs = matrix.cols() - 1;

    for h in (0..rows).rev() {
        // Leading coefficient of this row. Rows that are entirely zero in
        // the coefficient columns are dependent equations or the
        // unsatisfiable leftovers from elimination; skip both.
        let Some(k) = (0..rhs).find(|&col| matrix[(h, col)] != 0.0) else {
            continue;
        };
        // A second surviving coefficient means this row still ties
        // several unknowns together: an underconstrained block.
        if (k + 1..rhs).any(|col| matrix[(h, col)] != 0.0) {
            continue;
        }

        // Normalize to a leading one, then clear column k upward.
        let lead = matrix[(h, k)];
        matrix[(h, k)] = 1.0;
        matrix[(h, rhs)] /= lead;
        for row in 0..h {
            let factor = matrix[(row, k)];
            if factor != 0.0 {
                matrix[(row, k)] = 0.0;
                matrix[(row, rhs)] -= factor * matrix[(h, rhs)];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved(system: &LinearSystem, name: &str) -> f64 {
        assert_eq!(system.symbol_state(name), Some(SymbolState::Solved), "symbol {name}");
        system.symbol_value(name)
    }

    #[test]
    fn test_empty_system_succeeds() {
        let mut system = LinearSystem::new();
        let mut handler = Handler::new();
        assert!(system.solve(&mut handler));
        assert!(!handler.has_errors());
        assert_eq!(system.symbols().count(), 0);
    }

    #[test]
    fn test_all_assigned_system_succeeds() {
        let mut system = LinearSystem::new();
        system.add_equation("x + w - y").unwrap();
        system.assign("x", 90.0);
        system.assign("w", 10.0);
        system.assign("y", 100.0);

        let mut handler = Handler::new();
        assert!(system.solve(&mut handler));
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_one_equation_one_unknown() {
        let mut system = LinearSystem::new();
        system.add_equation("x + w - y").unwrap();
        system.assign("w", 10.0);
        system.assign("y", 100.0);

        let mut handler = Handler::new();
        assert!(system.solve(&mut handler));
        assert_eq!(solved(&system, "x"), 90.0);
    }

    #[test]
    fn test_assigned_symbol_is_not_resolved() {
        let mut system = LinearSystem::new();
        system.add_equation("x + w - y").unwrap();
        system.assign("w", 10.0);
        system.assign("y", 100.0);

        let mut handler = Handler::new();
        system.solve(&mut handler);
        assert_eq!(system.symbol_state("w"), Some(SymbolState::Assigned));
        assert_eq!(system.symbol_state("y"), Some(SymbolState::Assigned));
    }

    #[test]
    fn test_duplicate_symbol_coefficients_accumulate() {
        // x - x + y = 0 with nothing assigned: the x terms cancel, y
        // solves to zero, x is unconstrained.
        let mut system = LinearSystem::new();
        system.add_equation("x - x + y").unwrap();

        let mut handler = Handler::new();
        assert!(!system.solve(&mut handler));
        assert_eq!(solved(&system, "y"), 0.0);
        let errors: Vec<_> = handler.errors().collect();
        assert_eq!(errors, vec!["Unsolved symbol 'x'"]);
    }

    #[test]
    fn test_solve_is_idempotent_on_determined_system() {
        let mut system = LinearSystem::new();
        system.add_equation("x + w - y").unwrap();
        system.assign("w", 10.0);
        system.assign("y", 100.0);

        let mut handler = Handler::new();
        assert!(system.solve(&mut handler));
        let first = system.symbol_value("x");

        // A second run folds the solved value in as a known constant and
        // leaves every value unchanged.
        let mut handler = Handler::new();
        assert!(system.solve(&mut handler));
        assert_eq!(system.symbol_value("x"), first);
        assert_eq!(system.symbol_state("x"), Some(SymbolState::Solved));
    }

    #[test]
    fn test_chain_solves_in_both_directions() {
        // x2 is pinned in the middle; x1 solves backwards, x3 forwards.
        let mut system = LinearSystem::new();
        system.add_equation("x1 + w1 - x2").unwrap();
        system.add_equation("x2 + w2 - x3").unwrap();
        system.assign("x2", 50.0);
        system.assign("w1", 10.0);
        system.assign("w2", 20.0);

        let mut handler = Handler::new();
        assert!(system.solve(&mut handler));
        assert_eq!(solved(&system, "x1"), 40.0);
        assert_eq!(solved(&system, "x3"), 70.0);
    }
}
