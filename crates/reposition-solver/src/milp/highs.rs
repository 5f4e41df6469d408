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

use crate::milp::{Domain, LinearExpr, MilpModel, Sense, backend::RawSolution, err::MilpError};
use good_lp::solvers::highs::highs;
use good_lp::*;
use std::time::{Duration, Instant};

impl From<ResolutionError> for MilpError {
    fn from(err: ResolutionError) -> Self {
        match err {
            ResolutionError::Infeasible => MilpError::Infeasible,
            ResolutionError::Unbounded => MilpError::Unbounded,
            other => MilpError::Backend(other.to_string()),
        }
    }
}

fn to_expression(expr: &LinearExpr, columns: &[Variable]) -> Expression {
    expr.terms()
        .iter()
        .fold(Expression::from(expr.constant_term()), |acc, &(c, coef)| {
            acc + coef * columns[c.get()]
        })
}

pub(crate) fn solve(model: &MilpModel, time_limit: Duration) -> Result<RawSolution, MilpError> {
    let mut vars = variables!();
    let columns: Vec<Variable> = model
        .columns()
        .iter()
        .map(|col| {
            let def = match col.domain() {
                Domain::Binary => variable().binary(),
                Domain::Integer { lower, upper } => variable().integer().min(lower).max(upper),
            };
            vars.add(def.name(col.name()))
        })
        .collect();

    let objective = to_expression(model.objective(), &columns);
    let mut prob = vars
        .minimise(objective)
        .using(highs)
        .with_time_limit(time_limit.as_secs_f64());

    for c in model.constraints() {
        let lhs = to_expression(c.expr(), &columns);
        match c.sense() {
            Sense::LessEq => prob.add_constraint(lhs.leq(c.rhs())),
            Sense::Eq => prob.add_constraint(lhs.eq(c.rhs())),
        };
    }

    let started = Instant::now();
    let solution = prob.solve()?;
    let search_time = started.elapsed();

    Ok(RawSolution {
        values: columns.iter().map(|&v| solution.value(v)).collect(),
        search_time,
    })
}
