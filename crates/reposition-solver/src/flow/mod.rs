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

pub mod model;

use crate::{
    advisor::Advisor,
    config::OptimizerConfig,
    err::{OptimizationError, guarded},
    fallback::FallbackPolicy,
    flow::model::FlowModel,
    milp::{
        MilpSolution,
        backend::SolverBackend,
        err::{BackendUnavailableError, MilpError},
    },
    plan::{
        MovePriority, PlanStatus, PortStorage, RedistributionFailure, RedistributionPlan,
        RelocationMove, StoragePlan,
    },
};
use reposition_model::prelude::NetworkModel;

const PROBLEM: &str = "Redistribution";

/// Plans day-by-day empty-container moves and storage over the horizon.
#[derive(Debug, Clone)]
pub struct FlowOptimizer {
    config: OptimizerConfig,
    backend: Result<SolverBackend, BackendUnavailableError>,
    fallback: FallbackPolicy,
}

impl Default for FlowOptimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

impl FlowOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            backend: SolverBackend::detect(PROBLEM, config.time_limit),
            config,
            fallback: FallbackPolicy,
        }
    }

    #[inline]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    #[tracing::instrument(
        level = "info",
        name = "Redistribution",
        skip_all,
        fields(ports = network.port_count(), containers = network.containers().len())
    )]
    pub fn optimize(
        &self,
        network: &NetworkModel,
    ) -> Result<RedistributionPlan, RedistributionFailure> {
        guarded(|| self.try_optimize(network)).map_err(|cause| {
            tracing::warn!("{}; handing out the fallback plan", cause);
            RedistributionFailure::new(cause, self.fallback.plan())
        })
    }

    fn try_optimize(&self, network: &NetworkModel) -> Result<RedistributionPlan, OptimizationError> {
        if network.ports().is_empty() || network.containers().is_empty() {
            tracing::info!("Nothing to redistribute");
            return Ok(self.empty_plan(network));
        }
        let backend = self.backend?;

        let model = FlowModel::build(network, &self.config);
        let solution = backend
            .solve(model.milp())
            .map_err(|e: MilpError| OptimizationError::not_optimal(PROBLEM, e))?;
        let plan = self.extract(&model, &solution);

        tracing::info!(
            "Optimal redistribution: {} relocations, total cost {:.2}",
            plan.relocations.len(),
            plan.total_cost
        );
        Ok(plan)
    }

    fn empty_plan(&self, network: &NetworkModel) -> RedistributionPlan {
        let storage_plan = StoragePlan::new(
            network
                .ports()
                .iter()
                .map(|p| PortStorage {
                    port: p.name().clone(),
                    by_type: Vec::new(),
                })
                .collect(),
        );
        RedistributionPlan {
            status: PlanStatus::Optimal,
            total_cost: 0.0,
            relocations: Vec::new(),
            storage_plan,
            recommendations: Advisor::new(self.config.urgent_day_cutoff).recommend(&[], 0.0),
        }
    }

    fn extract(&self, model: &FlowModel<'_>, solution: &MilpSolution) -> RedistributionPlan {
        let ports = model.network().ports();
        let types = model.container_types();

        let mut relocations = Vec::new();
        for (i, from) in ports.iter().enumerate() {
            for (j, to) in ports.iter().enumerate() {
                for (ti, t) in types.iter().enumerate() {
                    for day in 0..model.horizon() {
                        let Some(col) = model.flow_column(i, j, ti, day) else {
                            continue;
                        };
                        let quantity = solution.integer_value(col);
                        if quantity <= 0 {
                            continue;
                        }
                        relocations.push(RelocationMove {
                            from_port: from.name().clone(),
                            to_port: to.name().clone(),
                            container_type: t.clone(),
                            quantity,
                            day: day + 1,
                            priority: if day <= self.config.urgent_day_cutoff {
                                MovePriority::High
                            } else {
                                MovePriority::Medium
                            },
                        });
                    }
                }
            }
        }

        let storage_plan = StoragePlan::new(
            ports
                .iter()
                .enumerate()
                .map(|(pi, port)| PortStorage {
                    port: port.name().clone(),
                    by_type: types
                        .iter()
                        .enumerate()
                        .map(|(ti, t)| {
                            let days = (0..model.horizon())
                                .map(|day| solution.integer_value(model.storage_column(pi, ti, day)))
                                .collect();
                            (t.clone(), days)
                        })
                        .collect(),
                })
                .collect(),
        );

        let total_cost = solution.objective_value();
        let recommendations =
            Advisor::new(self.config.urgent_day_cutoff).recommend(&relocations, total_cost);

        RedistributionPlan {
            status: PlanStatus::Optimal,
            total_cost,
            relocations,
            storage_plan,
            recommendations,
        }
    }
}


#[cfg(all(test, not(feature = "highs")))]
mod without_backend_tests {
    use super::*;
    use reposition_model::prelude::{Container, ContainerType, Coordinates, NetworkBuilder, Port};

    fn port(name: &str) -> Port {
        Port::new(name, 1, 10, vec![0; 7], 1.0, 0.0, Coordinates { lat: 0.0, lng: 0.0 })
    }

    #[test]
    fn test_missing_backend_hands_out_fallback() {
        let mut b = NetworkBuilder::new();
        b.add_port(port("A"))
            .add_port(port("B"))
            .add_container(Container::new("c1", ContainerType::Gp20, "A", 0, None, 3));
        let net = b.build().unwrap();

        let failure = FlowOptimizer::default().optimize(&net).unwrap_err();
        assert_eq!(failure.error, "Redistribution solver not available");
        assert!(matches!(failure.cause(), OptimizationError::BackendUnavailable(_)));
        assert_eq!(failure.fallback_solution.status, PlanStatus::Fallback);
        assert!(failure.fallback_solution.relocations.is_empty());
    }

    #[test]
    fn test_trivial_instance_needs_no_backend() {
        let mut b = NetworkBuilder::new();
        b.add_port(port("A"));
        let net = b.build().unwrap();

        let plan = FlowOptimizer::default().optimize(&net).unwrap();
        assert_eq!(plan.status, PlanStatus::Optimal);
        assert_eq!(plan.total_cost, 0.0);
        assert!(plan.relocations.is_empty());
    }
}
