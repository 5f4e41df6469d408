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
    err::{CapacityExceededError, OptimizationError, guarded},
    plan::RoutePlan,
};
use fixedbitset::FixedBitSet;
use reposition_model::prelude::{NetworkModel, RelocationTask};

/// Arc costs between the depot and one node per task.
///
/// Travelling from task `a` to task `b` is priced by the lane from `a`'s
/// origin to `b`'s destination. Depot arcs are free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcCosts {
    n: usize,
    costs: Vec<i64>,
}

impl ArcCosts {
    pub fn new(network: &NetworkModel, tasks: &[RelocationTask], unknown_route_penalty: i64) -> Self {
        let n = tasks.len();
        let mut costs = vec![0; n * n];
        for (a, from) in tasks.iter().enumerate() {
            for (b, to) in tasks.iter().enumerate() {
                if a == b {
                    continue;
                }
                costs[a * n + b] = network
                    .route(from.from_port(), to.to_port())
                    .map_or(unknown_route_penalty, |r| r.distance_km() as i64);
            }
        }
        Self { n, costs }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// `None` is the depot.
    #[inline]
    pub fn cost(&self, from: Option<usize>, to: usize) -> i64 {
        match from {
            Some(a) => self.costs[a * self.n + to],
            None => 0,
        }
    }
}

/// Sequences a batch of relocation tasks for a single vehicle.
#[derive(Debug, Clone, Default)]
pub struct RoutingOptimizer {
    config: OptimizerConfig,
}

impl RoutingOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    #[tracing::instrument(level = "info", name = "Routing", skip_all, fields(tasks = tasks.len()))]
    pub fn optimize(
        &self,
        network: &NetworkModel,
        tasks: &[RelocationTask],
    ) -> Result<RoutePlan, OptimizationError> {
        guarded(|| {
            if tasks.is_empty() {
                return Ok(RoutePlan::empty());
            }
            let arcs = ArcCosts::new(network, tasks, self.config.unknown_route_penalty);
            let plan = self.sequence(tasks, &arcs)?;
            tracing::info!(
                "Sequenced {} tasks, total distance {}",
                tasks.len(),
                plan.total_distance
            );
            Ok(plan)
        })
    }

    /// Greedy cheapest-arc construction. From the current node the vehicle
    /// moves to the cheapest unvisited task whose containers still fit, lowest
    /// index first on ties.
    fn sequence(
        &self,
        tasks: &[RelocationTask],
        arcs: &ArcCosts,
    ) -> Result<RoutePlan, CapacityExceededError> {
        let capacity = self.config.vehicle_capacity;
        let mut visited = FixedBitSet::with_capacity(tasks.len());
        let mut order = Vec::with_capacity(tasks.len());
        let mut current: Option<usize> = None;
        let mut load = 0u32;
        let mut distance = 0i64;

        while order.len() < tasks.len() {
            let next = visited
                .zeroes()
                .filter(|&j| load.saturating_add(tasks[j].container_count()) <= capacity)
                .min_by_key(|&j| (arcs.cost(current, j), j));

            let Some(j) = next else {
                let stuck = visited.zeroes().next().unwrap_or_default();
                return Err(CapacityExceededError::new(
                    stuck,
                    load.saturating_add(tasks[stuck].container_count()),
                    capacity,
                ));
            };

            distance += arcs.cost(current, j);
            load += tasks[j].container_count();
            visited.insert(j);
            order.push(tasks[j].clone());
            current = Some(j);
        }

        Ok(RoutePlan {
            total_distance: distance,
            routes: vec![order],
        })
    }
}
