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
    config::OptimizerConfig,
    err::{OptimizationError, guarded},
    milp::{
        ColumnIndex, LinearConstraint, LinearExpr, MilpModel, MilpSolution,
        backend::SolverBackend, err::BackendUnavailableError,
    },
    plan::{AssignmentPair, AssignmentPlan},
};
use fixedbitset::FixedBitSet;
use reposition_model::prelude::{Container, Demand, NetworkModel};

const PROBLEM: &str = "Assignment";

/// Matches containers to bookings at minimum total cost.
#[derive(Debug, Clone)]
pub struct AssignmentOptimizer {
    config: OptimizerConfig,
    backend: Result<SolverBackend, BackendUnavailableError>,
}

impl Default for AssignmentOptimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

impl AssignmentOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            backend: SolverBackend::detect(PROBLEM, config.time_limit),
            config,
        }
    }

    /// Cost of serving `demand` with `container`. Higher booking priority makes
    /// a pair cheaper.
    pub fn pair_cost(&self, network: &NetworkModel, container: &Container, demand: &Demand) -> f64 {
        let transport = network
            .route(container.current_port(), demand.port())
            .map_or(0.0, |r| r.transport_cost());
        let penalty = if container.container_type().satisfies(demand.required_type()) {
            0.0
        } else {
            self.config.incompatibility_penalty
        };
        self.config.assignment_base_cost + transport + penalty
            - self.config.priority_weight * demand.priority() as f64
    }

    #[tracing::instrument(
        level = "info",
        name = "Assignment",
        skip_all,
        fields(containers = network.containers().len(), demands = demands.len())
    )]
    pub fn optimize(
        &self,
        network: &NetworkModel,
        demands: &[Demand],
    ) -> Result<AssignmentPlan, OptimizationError> {
        guarded(|| {
            let containers = network.containers();
            if containers.is_empty() || demands.is_empty() {
                return Ok(AssignmentPlan {
                    assignments: Vec::new(),
                    unassigned_containers: containers.to_vec(),
                    unmet_demands: demands.to_vec(),
                    total_cost: 0.0,
                });
            }
            let backend = self.backend?;

            let (model, x) = self.build(network, demands);
            let solution = backend
                .solve(&model)
                .map_err(|e| OptimizationError::not_optimal(PROBLEM, e))?;
            let plan = self.extract(network, demands, &x, &solution);

            tracing::info!(
                "Assigned {} of {} containers to {} demands, total cost {:.2}",
                plan.assignments.len(),
                containers.len(),
                demands.len(),
                plan.total_cost
            );
            Ok(plan)
        })
    }

    /// One binary column per (container, demand) pair, row-major by container.
    fn build(&self, network: &NetworkModel, demands: &[Demand]) -> (MilpModel, Vec<ColumnIndex>) {
        let containers = network.containers();
        let (n, m) = (containers.len(), demands.len());
        let mut model = MilpModel::with_capacity(n * m, n + m + n * m);
        let mut x = Vec::with_capacity(n * m);

        for (i, c) in containers.iter().enumerate() {
            for (j, d) in demands.iter().enumerate() {
                let col = model.add_binary(format!("x_{}_{}", i, j));
                model.add_objective_term(col, self.pair_cost(network, c, d));
                if !c.container_type().satisfies(d.required_type()) {
                    let mut forbidden = LinearExpr::new();
                    forbidden.add_term(col, 1.0);
                    model.add_constraint(LinearConstraint::eq(forbidden, 0.0));
                }
                x.push(col);
            }
        }

        for i in 0..n {
            let row: LinearExpr = (0..m).map(|j| (x[i * m + j], 1.0)).collect();
            model.add_constraint(LinearConstraint::leq(row, 1.0));
        }
        for j in 0..m {
            let column: LinearExpr = (0..n).map(|i| (x[i * m + j], 1.0)).collect();
            model.add_constraint(LinearConstraint::leq(column, 1.0));
        }

        tracing::debug!(
            "Assignment model: {} variables, {} constraints",
            model.num_columns(),
            model.num_constraints()
        );
        (model, x)
    }

    fn extract(
        &self,
        network: &NetworkModel,
        demands: &[Demand],
        x: &[ColumnIndex],
        solution: &MilpSolution,
    ) -> AssignmentPlan {
        let containers = network.containers();
        let m = demands.len();
        let mut used = FixedBitSet::with_capacity(containers.len());
        let mut served = FixedBitSet::with_capacity(m);
        let mut assignments = Vec::new();

        for (i, c) in containers.iter().enumerate() {
            for (j, d) in demands.iter().enumerate() {
                if solution.integer_value(x[i * m + j]) != 1 {
                    continue;
                }
                used.insert(i);
                served.insert(j);
                assignments.push(AssignmentPair {
                    container_id: c.id().value().clone(),
                    demand_id: d.id().value().clone(),
                    from_port: c.current_port().clone(),
                    to_port: d.port().clone(),
                    container_type: c.container_type().clone(),
                    cost: self.pair_cost(network, c, d),
                });
            }
        }

        AssignmentPlan {
            assignments,
            unassigned_containers: used.zeroes().map(|i| containers[i].clone()).collect(),
            unmet_demands: served.zeroes().map(|j| demands[j].clone()).collect(),
            total_cost: solution.objective_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reposition_model::prelude::{ContainerType, Coordinates, NetworkBuilder, Port, Route};

    fn port(name: &str) -> Port {
        Port::new(name, 0, 100, vec![0; 7], 1.0, 1.0, Coordinates { lat: 0.0, lng: 0.0 })
    }

    fn network(containers: Vec<Container>) -> NetworkModel {
        let mut b = NetworkBuilder::new();
        b.add_port(port("Hamburg"))
            .add_port(port("Rotterdam"))
            .extend_containers(containers)
            .add_route(Route::new("Hamburg", "Rotterdam", 500.0, 40.0, 20, 100));
        b.build().unwrap()
    }

    fn container(id: &str, t: ContainerType, at: &str) -> Container {
        Container::new(id, t, at, 2, None, 5)
    }

    #[test]
    fn test_pair_cost_formula() {
        let net = network(vec![container("c1", ContainerType::Gp20, "Hamburg")]);
        let opt = AssignmentOptimizer::default();
        let c = &net.containers()[0];

        let remote = Demand::new("d1", "Rotterdam", ContainerType::Gp20, 3);
        assert_eq!(opt.pair_cost(&net, c, &remote), 10.0 + 40.0 - 15.0);

        let local = Demand::new("d2", "Hamburg", ContainerType::Gp40, 0);
        assert_eq!(opt.pair_cost(&net, c, &local), 10.0 + 1000.0);
    }

    #[test]
    fn test_empty_inputs_short_circuit() {
        let net = network(vec![container("c1", ContainerType::Gp20, "Hamburg")]);
        let plan = AssignmentOptimizer::default().optimize(&net, &[]).unwrap();
        assert!(plan.assignments.is_empty());
        assert_eq!(plan.unassigned_containers.len(), 1);
        assert_eq!(plan.total_cost, 0.0);

        let demands = [Demand::new("d1", "Hamburg", ContainerType::Gp20, 9)];
        let plan = AssignmentOptimizer::default()
            .optimize(&network(Vec::new()), &demands)
            .unwrap();
        assert_eq!(plan.unmet_demands, demands.to_vec());
    }

    #[cfg(not(feature = "highs"))]
    #[test]
    fn test_missing_backend_is_reported() {
        let net = network(vec![container("c1", ContainerType::Gp20, "Hamburg")]);
        let demands = [Demand::new("d1", "Rotterdam", ContainerType::Gp20, 5)];
        let err = AssignmentOptimizer::default()
            .optimize(&net, &demands)
            .unwrap_err();

        assert!(matches!(err, OptimizationError::BackendUnavailable(_)));
        assert_eq!(err.to_string(), "Assignment solver not available");
        assert_eq!(err.status(), "unavailable");
    }

    #[cfg(feature = "highs")]
    #[test]
    fn test_incompatible_pair_is_never_assigned() {
        let net = network(vec![container("c1", ContainerType::Gp20, "Hamburg")]);
        // Even a huge priority cannot pay for the incompatibility.
        let demands = [Demand::new("d1", "Hamburg", ContainerType::Gp40, 1000)];
        let plan = AssignmentOptimizer::default().optimize(&net, &demands).unwrap();

        assert!(plan.assignments.is_empty());
        assert_eq!(plan.unassigned_containers.len(), 1);
        assert_eq!(plan.unmet_demands.len(), 1);
        assert_eq!(plan.total_cost, 0.0);
    }

    #[cfg(feature = "highs")]
    #[test]
    fn test_priority_pulls_cheapest_matching() {
        let net = network(vec![
            container("c1", ContainerType::Gp20, "Hamburg"),
            container("c2", ContainerType::Hc40, "Rotterdam"),
            container("c3", ContainerType::Gp40, "Hamburg"),
        ]);
        let demands = [
            Demand::new("d1", "Rotterdam", ContainerType::Hc40, 4),
            Demand::new("d2", "Hamburg", ContainerType::Gp20, 6),
            Demand::new("d3", "Rotterdam", ContainerType::Gp20, 0),
        ];
        let plan = AssignmentOptimizer::default().optimize(&net, &demands).unwrap();

        // c2 serves d1 locally (-10), c1 serves d2 locally (-20); d3 would cost more than it saves.
        let pairs: Vec<_> = plan
            .assignments
            .iter()
            .map(|a| (a.container_id.as_str(), a.demand_id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("c1", "d2"), ("c2", "d1")]);
        assert_eq!(plan.total_cost, -30.0);
        assert_eq!(plan.unassigned_containers[0].id().as_str(), "c3");
        assert_eq!(plan.unmet_demands[0].id().as_str(), "d3");
        assert_eq!(plan.assignments[1].cost, -10.0);
    }

    #[cfg(feature = "highs")]
    #[test]
    fn test_each_side_used_at_most_once() {
        let containers = (0..4)
            .map(|i| container(&format!("c{i}"), ContainerType::Gp40, "Hamburg"))
            .collect();
        let net = network(containers);
        let demands: Vec<_> = (0..6)
            .map(|j| Demand::new(format!("d{j}").as_str(), "Rotterdam", ContainerType::Hc40, 20))
            .collect();

        let plan = AssignmentOptimizer::default().optimize(&net, &demands).unwrap();
        assert_eq!(plan.assignments.len(), 4);
        assert_eq!(plan.unmet_demands.len(), 2);
        assert!(plan.unassigned_containers.is_empty());
        // 4 x (10 + 40 - 100)
        assert_eq!(plan.total_cost, -200.0);
    }
}
