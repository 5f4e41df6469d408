// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Solver-independent representation of a mixed-integer linear program.
//!
//! Optimizers describe their models with [`MilpModel`]; a [`backend::SolverBackend`]
//! translates the model into a concrete solver and returns column values in
//! declaration order.

pub mod backend;
pub mod err;
#[cfg(feature = "highs")]
mod highs;

/// Feasibility tolerance used when checking returned values against the model.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnIndex(usize);

impl ColumnIndex {
    #[inline]
    pub fn new(i: usize) -> Self {
        Self(i)
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    Integer { lower: f64, upper: f64 },
    Binary,
}

impl Domain {
    #[inline]
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            Domain::Integer { lower, upper } => (lower, upper),
            Domain::Binary => (0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    domain: Domain,
}

impl Column {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn domain(&self) -> Domain {
        self.domain
    }
}

/// `constant + sum(coef * column)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(ColumnIndex, f64)>,
    constant: f64,
}

impl LinearExpr {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    #[inline]
    pub fn add_term(&mut self, column: ColumnIndex, coef: f64) -> &mut Self {
        self.terms.push((column, coef));
        self
    }

    #[inline]
    pub fn add_constant(&mut self, value: f64) -> &mut Self {
        self.constant += value;
        self
    }

    #[inline]
    pub fn terms(&self) -> &[(ColumnIndex, f64)] {
        &self.terms
    }

    #[inline]
    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    #[inline]
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, &(c, coef)| acc + coef * values[c.get()])
    }
}

impl FromIterator<(ColumnIndex, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (ColumnIndex, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
            constant: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    LessEq,
    Eq,
}

/// `expr <= rhs` or `expr == rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    expr: LinearExpr,
    sense: Sense,
    rhs: f64,
}

impl LinearConstraint {
    #[inline]
    pub fn leq(expr: LinearExpr, rhs: f64) -> Self {
        Self {
            expr,
            sense: Sense::LessEq,
            rhs,
        }
    }

    #[inline]
    pub fn eq(expr: LinearExpr, rhs: f64) -> Self {
        Self {
            expr,
            sense: Sense::Eq,
            rhs,
        }
    }

    #[inline]
    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    #[inline]
    pub fn sense(&self) -> Sense {
        self.sense
    }

    #[inline]
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn is_satisfied_by(&self, values: &[f64], tol: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.sense {
            Sense::LessEq => lhs <= self.rhs + tol,
            Sense::Eq => (lhs - self.rhs).abs() <= tol,
        }
    }
}

/// A minimisation MILP.
#[derive(Debug, Clone, Default)]
pub struct MilpModel {
    columns: Vec<Column>,
    objective: LinearExpr,
    constraints: Vec<LinearConstraint>,
}

impl MilpModel {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(columns: usize, constraints: usize) -> Self {
        Self {
            columns: Vec::with_capacity(columns),
            objective: LinearExpr::new(),
            constraints: Vec::with_capacity(constraints),
        }
    }

    pub fn add_integer(&mut self, name: impl Into<String>, lower: f64, upper: f64) -> ColumnIndex {
        self.push_column(name.into(), Domain::Integer { lower, upper })
    }

    pub fn add_binary(&mut self, name: impl Into<String>) -> ColumnIndex {
        self.push_column(name.into(), Domain::Binary)
    }

    fn push_column(&mut self, name: String, domain: Domain) -> ColumnIndex {
        let idx = ColumnIndex(self.columns.len());
        self.columns.push(Column { name, domain });
        idx
    }

    #[inline]
    pub fn add_objective_term(&mut self, column: ColumnIndex, coef: f64) {
        self.objective.add_term(column, coef);
    }

    #[inline]
    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[inline]
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    #[inline]
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Bounds, integrality and every constraint hold for `values`.
    pub fn is_satisfied_by(&self, values: &[f64], tol: f64) -> bool {
        if values.len() != self.columns.len() {
            return false;
        }
        let in_domain = self.columns.iter().zip(values).all(|(col, &v)| {
            let (lo, hi) = col.domain.bounds();
            v >= lo - tol && v <= hi + tol && (v - v.round()).abs() <= tol.max(1e-4)
        });
        in_domain && self.constraints.iter().all(|c| c.is_satisfied_by(values, tol))
    }
}

/// Column values of a solved model together with its objective.
#[derive(Debug, Clone, PartialEq)]
pub struct MilpSolution {
    values: Vec<f64>,
    objective: f64,
}

impl MilpSolution {
    #[inline]
    pub fn new(values: Vec<f64>, objective: f64) -> Self {
        Self { values, objective }
    }

    #[inline]
    pub fn value(&self, column: ColumnIndex) -> f64 {
        self.values[column.get()]
    }

    /// Value rounded to the nearest integer; integral columns come back with
    /// floating-point noise.
    #[inline]
    pub fn integer_value(&self, column: ColumnIndex) -> i64 {
        self.value(column).round() as i64
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn objective_value(&self) -> f64 {
        self.objective
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_evaluate() {
        let mut m = MilpModel::new();
        let x = m.add_integer("x", 0.0, 10.0);
        let y = m.add_binary("y");
        let mut e = LinearExpr::constant(1.5);
        e.add_term(x, 2.0).add_term(y, -3.0);
        assert_eq!(e.evaluate(&[4.0, 1.0]), 1.5 + 8.0 - 3.0);
    }

    #[test]
    fn test_satisfaction_checks_bounds_integrality_and_rows() {
        let mut m = MilpModel::new();
        let x = m.add_integer("x", 0.0, 5.0);
        let y = m.add_integer("y", 0.0, 5.0);
        m.add_constraint(LinearConstraint::leq(
            [(x, 1.0), (y, 1.0)].into_iter().collect(),
            6.0,
        ));
        m.add_constraint(LinearConstraint::eq([(x, 1.0)].into_iter().collect(), 2.0));

        assert!(m.is_satisfied_by(&[2.0, 4.0], FEASIBILITY_TOLERANCE));
        assert!(!m.is_satisfied_by(&[2.0, 5.0], FEASIBILITY_TOLERANCE)); // row
        assert!(!m.is_satisfied_by(&[3.0, 1.0], FEASIBILITY_TOLERANCE)); // equality
        assert!(!m.is_satisfied_by(&[2.0, 1.5], FEASIBILITY_TOLERANCE)); // integrality
        assert!(!m.is_satisfied_by(&[2.0, -1.0], FEASIBILITY_TOLERANCE)); // bound
        assert!(!m.is_satisfied_by(&[2.0], FEASIBILITY_TOLERANCE));
    }

    #[test]
    fn test_integer_value_rounds_noise() {
        let s = MilpSolution::new(vec![2.9999999, 0.0000001], 0.0);
        assert_eq!(s.integer_value(ColumnIndex::new(0)), 3);
        assert_eq!(s.integer_value(ColumnIndex::new(1)), 0);
    }
}
