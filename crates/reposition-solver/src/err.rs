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

use crate::milp::err::{BackendUnavailableError, MilpError};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// A routing batch that cannot be sequenced within the vehicle capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapacityExceededError {
    task: usize,
    load: u32,
    capacity: u32,
}

impl CapacityExceededError {
    pub fn new(task: usize, load: u32, capacity: u32) -> Self {
        Self {
            task,
            load,
            capacity,
        }
    }

    /// Index of the first task that no longer fits.
    pub fn task(&self) -> usize {
        self.task
    }

    pub fn load(&self) -> u32 {
        self.load
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

impl std::fmt::Display for CapacityExceededError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "No solution found for vehicle routing: task {} would raise the load to {} (capacity {})",
            self.task, self.load, self.capacity
        )
    }
}

impl std::error::Error for CapacityExceededError {}

/// The failure of one optimization call, reported to callers as `{error}`.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizationError {
    BackendUnavailable(BackendUnavailableError),
    NotOptimal {
        problem: &'static str,
        cause: MilpError,
    },
    CapacityExceeded(CapacityExceededError),
    /// A panic caught while building a model or reading its solution.
    Internal(String),
}

impl OptimizationError {
    #[inline]
    pub fn not_optimal(problem: &'static str, cause: MilpError) -> Self {
        OptimizationError::NotOptimal { problem, cause }
    }

    /// Short machine-readable status label.
    pub fn status(&self) -> &'static str {
        match self {
            OptimizationError::BackendUnavailable(_) => "unavailable",
            OptimizationError::NotOptimal { cause, .. } => cause.status(),
            OptimizationError::CapacityExceeded(_) => "infeasible",
            OptimizationError::Internal(_) => "error",
        }
    }
}

impl std::fmt::Display for OptimizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimizationError::BackendUnavailable(e) => write!(f, "{}", e),
            OptimizationError::NotOptimal { problem, cause } => write!(
                f,
                "{} optimization failed with status: {} ({})",
                problem,
                cause.status(),
                cause
            ),
            OptimizationError::CapacityExceeded(e) => write!(f, "{}", e),
            OptimizationError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for OptimizationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptimizationError::BackendUnavailable(e) => Some(e),
            OptimizationError::NotOptimal { cause, .. } => Some(cause),
            OptimizationError::CapacityExceeded(e) => Some(e),
            OptimizationError::Internal(_) => None,
        }
    }
}

impl From<BackendUnavailableError> for OptimizationError {
    fn from(e: BackendUnavailableError) -> Self {
        OptimizationError::BackendUnavailable(e)
    }
}

impl From<CapacityExceededError> for OptimizationError {
    fn from(e: CapacityExceededError) -> Self {
        OptimizationError::CapacityExceeded(e)
    }
}

/// Runs one optimization, turning a panic into [`OptimizationError::Internal`].
pub(crate) fn guarded<T>(
    f: impl FnOnce() -> Result<T, OptimizationError>,
) -> Result<T, OptimizationError> {
    catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(OptimizationError::Internal(panic_message(payload))))
}

/// Renders a caught panic payload as an error message.
pub(crate) fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected failure during optimization".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = OptimizationError::from(BackendUnavailableError::new("Assignment"));
        assert_eq!(e.to_string(), "Assignment solver not available");
        assert_eq!(e.status(), "unavailable");

        let e = OptimizationError::not_optimal("Redistribution", MilpError::Infeasible);
        assert!(e.to_string().starts_with("Redistribution optimization failed with status: infeasible"));
        assert_eq!(e.status(), "infeasible");

        let e = OptimizationError::from(CapacityExceededError::new(3, 120, 100));
        assert!(e.to_string().starts_with("No solution found for vehicle routing"));
    }

    #[test]
    fn test_panic_message_downcasts() {
        fn explode(n: u32) -> u32 {
            if n == 7 {
                panic!("boom {}", n);
            }
            if n == 0 {
                panic!("static");
            }
            n
        }

        let r = std::panic::catch_unwind(|| explode(7));
        assert_eq!(panic_message(r.unwrap_err()), "boom 7");
        let r = std::panic::catch_unwind(|| explode(0));
        assert_eq!(panic_message(r.unwrap_err()), "static");
        assert_eq!(std::panic::catch_unwind(|| explode(3)).unwrap(), 3);

        let r: Result<u32, _> = guarded(|| Ok(explode(7)));
        assert_eq!(r.unwrap_err(), OptimizationError::Internal("boom 7".to_string()));
    }
}
