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

use crate::{
    assignment::AssignmentOptimizer,
    config::OptimizerConfig,
    flow::FlowOptimizer,
    plan::{AssignmentPlan, RedistributionFailure, RedistributionPlan, RoutePlan},
    routing::RoutingOptimizer,
};
use reposition_model::prelude::{OptimizationKind, OptimizationRequest};
use serde::Serialize;

/// The result of one request, serialized exactly as it goes over the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptimizationResponse {
    Redistribution(RedistributionPlan),
    RedistributionFailed(RedistributionFailure),
    Routing(RoutePlan),
    Assignment(AssignmentPlan),
    Error { error: String },
}

impl OptimizationResponse {
    #[inline]
    pub fn error(message: impl Into<String>) -> Self {
        OptimizationResponse::Error {
            error: message.into(),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            OptimizationResponse::Redistribution(_) | OptimizationResponse::Assignment(_) => {
                "optimal"
            }
            OptimizationResponse::RedistributionFailed(_) => "fallback",
            OptimizationResponse::Routing(_) => "feasible",
            OptimizationResponse::Error { .. } => "error",
        }
    }

    /// Objective value or route distance, when the call produced one.
    pub fn cost(&self) -> Option<f64> {
        match self {
            OptimizationResponse::Redistribution(p) => Some(p.total_cost),
            OptimizationResponse::Assignment(p) => Some(p.total_cost),
            OptimizationResponse::Routing(p) => Some(p.total_distance as f64),
            OptimizationResponse::RedistributionFailed(_) | OptimizationResponse::Error { .. } => {
                None
            }
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            OptimizationResponse::RedistributionFailed(_) | OptimizationResponse::Error { .. }
        )
    }
}

/// Routes each request to the optimizer named by its `optimization_type`.
#[derive(Debug, Clone)]
pub struct OptimizationEngine {
    flow: FlowOptimizer,
    routing: RoutingOptimizer,
    assignment: AssignmentOptimizer,
}

impl Default for OptimizationEngine {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

impl OptimizationEngine {
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            flow: FlowOptimizer::new(config),
            routing: RoutingOptimizer::new(config),
            assignment: AssignmentOptimizer::new(config),
        }
    }

    pub fn run(&self, request: &OptimizationRequest) -> OptimizationResponse {
        let network = request.network();
        match request.kind() {
            OptimizationKind::Redistribution => match self.flow.optimize(network) {
                Ok(plan) => OptimizationResponse::Redistribution(plan),
                Err(failure) => OptimizationResponse::RedistributionFailed(failure),
            },
            OptimizationKind::Routing => {
                match self.routing.optimize(network, request.relocations()) {
                    Ok(plan) => OptimizationResponse::Routing(plan),
                    Err(e) => OptimizationResponse::error(e.to_string()),
                }
            }
            OptimizationKind::Assignment => {
                match self.assignment.optimize(network, request.demands()) {
                    Ok(plan) => OptimizationResponse::Assignment(plan),
                    Err(e) => OptimizationResponse::error(e.to_string()),
                }
            }
            OptimizationKind::Unknown(kind) => {
                tracing::warn!("Rejecting unknown optimization type {:?}", kind);
                OptimizationResponse::error(format!("Unknown optimization type: {}", kind))
            }
        }
    }
}
