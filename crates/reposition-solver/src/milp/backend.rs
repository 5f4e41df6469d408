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

use crate::milp::{
    FEASIBILITY_TOLERANCE, MilpModel, MilpSolution,
    err::{BackendUnavailableError, MilpError},
};
use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    time::Duration,
};

/// Column values as reported by a backend, with the wall time of its search.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawSolution {
    pub values: Vec<f64>,
    pub search_time: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Highs,
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Highs => "HiGHS",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Backends compiled into this build, in order of preference.
pub fn available_backends() -> &'static [BackendKind] {
    if cfg!(feature = "highs") {
        &[BackendKind::Highs]
    } else {
        &[]
    }
}

/// A MILP backend selected once per optimizer, bounded by a wall-clock limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverBackend {
    kind: BackendKind,
    time_limit: Duration,
}

impl SolverBackend {
    /// Picks the preferred compiled-in backend. `problem` names the model family
    /// in the error returned when none is available.
    pub fn detect(
        problem: &'static str,
        time_limit: Duration,
    ) -> Result<Self, BackendUnavailableError> {
        let kind = available_backends()
            .first()
            .copied()
            .ok_or(BackendUnavailableError::new(problem))?;
        tracing::debug!("Selected {} backend for {} models", kind, problem);
        Ok(Self { kind, time_limit })
    }

    #[inline]
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Solves `model` to optimality.
    ///
    /// A panic inside the backend, a search that used up the whole time limit,
    /// or values that do not satisfy the model are all reported as errors.
    pub fn solve(&self, model: &MilpModel) -> Result<MilpSolution, MilpError> {
        if model.num_columns() == 0 {
            let objective = model.objective().evaluate(&[]);
            return Ok(MilpSolution::new(Vec::new(), objective));
        }

        let raw = catch_unwind(AssertUnwindSafe(|| self.dispatch(model)))
            .map_err(|_| MilpError::Panicked)??;
        self.accept(model, raw)
    }

    /// Checks what a backend returned. Only the time spent in the search
    /// counts against the limit; building the backend's model does not.
    fn accept(&self, model: &MilpModel, raw: RawSolution) -> Result<MilpSolution, MilpError> {
        if raw.search_time >= self.time_limit {
            tracing::warn!(
                "{} hit the time limit after {:.3}s",
                self.kind,
                raw.search_time.as_secs_f64()
            );
            return Err(MilpError::TimeLimit(self.time_limit));
        }

        // Every column is integral; strip the solver's floating-point noise.
        let values: Vec<f64> = raw.values.iter().map(|v| v.round()).collect();
        if !model.is_satisfied_by(&values, FEASIBILITY_TOLERANCE) {
            return Err(MilpError::InvalidSolution);
        }

        let objective = model.objective().evaluate(&values);
        tracing::debug!(
            "{} solved {} columns / {} rows in {:.3}s, objective {}",
            self.kind,
            model.num_columns(),
            model.num_constraints(),
            raw.search_time.as_secs_f64(),
            objective
        );
        Ok(MilpSolution::new(values, objective))
    }

    fn dispatch(&self, model: &MilpModel) -> Result<RawSolution, MilpError> {
        match self.kind {
            #[cfg(feature = "highs")]
            BackendKind::Highs => crate::milp::highs::solve(model, self.time_limit),
            #[cfg(not(feature = "highs"))]
            BackendKind::Highs => Err(MilpError::Backend(
                "HiGHS support is not compiled in".to_string(),
            )),
        }
    }
}
