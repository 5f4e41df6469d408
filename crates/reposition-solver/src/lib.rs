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

pub mod advisor;
pub mod assignment;
pub mod config;
pub mod engine;
pub mod err;
pub mod fallback;
pub mod flow;
pub mod milp;
pub mod plan;
pub mod routing;

pub mod prelude {
    pub use crate::advisor::{Advisor, format_usd};
    pub use crate::assignment::AssignmentOptimizer;
    pub use crate::config::OptimizerConfig;
    pub use crate::engine::{OptimizationEngine, OptimizationResponse};
    pub use crate::err::{CapacityExceededError, OptimizationError};
    pub use crate::fallback::FallbackPolicy;
    pub use crate::flow::FlowOptimizer;
    pub use crate::milp::backend::{BackendKind, SolverBackend, available_backends};
    pub use crate::milp::err::{BackendUnavailableError, MilpError};
    pub use crate::plan::{
        AssignmentPair, AssignmentPlan, FallbackPlan, MovePriority, PlanStatus, PortStorage,
        RedistributionFailure, RedistributionPlan, RelocationMove, RoutePlan, StoragePlan,
    };
    pub use crate::routing::RoutingOptimizer;
}
