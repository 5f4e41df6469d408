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

use std::time::Duration;

/// No MILP backend was compiled into this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendUnavailableError {
    problem: &'static str,
}

impl BackendUnavailableError {
    pub fn new(problem: &'static str) -> Self {
        Self { problem }
    }

    pub fn problem(&self) -> &'static str {
        self.problem
    }
}

impl std::fmt::Display for BackendUnavailableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} solver not available", self.problem)
    }
}

impl std::error::Error for BackendUnavailableError {}

/// Every way a solve can end without a proven optimum.
#[derive(Debug, Clone, PartialEq)]
pub enum MilpError {
    Infeasible,
    Unbounded,
    TimeLimit(Duration),
    InvalidSolution,
    Backend(String),
    Panicked,
}

impl MilpError {
    /// Short machine-readable status label.
    pub fn status(&self) -> &'static str {
        match self {
            MilpError::Infeasible => "infeasible",
            MilpError::Unbounded => "unbounded",
            MilpError::TimeLimit(_) => "time_limit",
            MilpError::InvalidSolution => "invalid_solution",
            MilpError::Backend(_) => "error",
            MilpError::Panicked => "aborted",
        }
    }
}

impl std::fmt::Display for MilpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MilpError::Infeasible => write!(f, "the model is infeasible"),
            MilpError::Unbounded => write!(f, "the model is unbounded"),
            MilpError::TimeLimit(limit) => {
                write!(f, "no proven optimum within {:.1}s", limit.as_secs_f64())
            }
            MilpError::InvalidSolution => {
                write!(f, "the backend returned a solution that violates the model")
            }
            MilpError::Backend(msg) => write!(f, "backend error: {}", msg),
            MilpError::Panicked => write!(f, "the backend aborted unexpectedly"),
        }
    }
}

impl std::error::Error for MilpError {}
