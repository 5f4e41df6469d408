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
    milp::{ColumnIndex, LinearConstraint, LinearExpr, MilpModel},
};
use reposition_model::prelude::{ContainerType, NetworkModel};

/// Time-expanded multi-commodity flow program over a port network.
///
/// Columns are laid out densely: `flow[from][to][type][day]` for every ordered
/// pair of distinct ports, then `storage[port][type][day]`.
#[derive(Debug, Clone)]
pub struct FlowModel<'n> {
    network: &'n NetworkModel,
    types: Vec<ContainerType>,
    horizon: usize,
    milp: MilpModel,
    flow: Vec<Option<ColumnIndex>>,
    storage: Vec<ColumnIndex>,
}

impl<'n> FlowModel<'n> {
    pub fn build(network: &'n NetworkModel, config: &OptimizerConfig) -> Self {
        let types = network.container_types();
        let horizon = config.horizon_days;
        let ports = network.ports();
        let (p, k, h) = (ports.len(), types.len(), horizon);

        let num_flow = p * p.saturating_sub(1) * k * h;
        let num_rows = p * k * h + p * h + p * p.saturating_sub(1) * h;
        let mut milp = MilpModel::with_capacity(num_flow + p * k * h, num_rows);

        let mut flow = vec![None; p * p * k * h];
        for (i, from) in ports.iter().enumerate() {
            for (j, to) in ports.iter().enumerate() {
                if i == j {
                    continue;
                }
                let cost = network
                    .route(from.name(), to.name())
                    .map_or(config.default_route_cost, |r| r.transport_cost());
                for (ti, t) in types.iter().enumerate() {
                    for day in 0..h {
                        let col = milp.add_integer(
                            format!("flow_{}_{}_{}_{}", from.name().as_str(), to.name().as_str(), t, day),
                            0.0,
                            config.flow_upper_bound as f64,
                        );
                        milp.add_objective_term(col, cost);
                        flow[((i * p + j) * k + ti) * h + day] = Some(col);
                    }
                }
            }
        }

        let mut storage = Vec::with_capacity(p * k * h);
        for port in ports {
            for t in &types {
                for day in 0..h {
                    let col = milp.add_integer(
                        format!("storage_{}_{}_{}", port.name().as_str(), t, day),
                        0.0,
                        port.capacity() as f64,
                    );
                    milp.add_objective_term(col, port.storage_cost_per_day());
                    storage.push(col);
                }
            }
        }

        let mut model = Self {
            network,
            types,
            horizon,
            milp,
            flow,
            storage,
        };
        model.add_conservation();
        model.add_port_capacity();
        model.add_route_capacity(config);

        tracing::debug!(
            "Flow model: {} ports, {} container types, {} days -> {} variables, {} constraints",
            p,
            k,
            h,
            model.milp.num_columns(),
            model.milp.num_constraints()
        );
        model
    }

    fn add_conservation(&mut self) {
        let network = self.network;
        let ports = network.ports();
        let p = ports.len();

        // Initial inventory from the container list; containers parked at
        // ports outside the network are not part of any balance.
        let mut initial = vec![0i64; p * self.types.len()];
        for c in network.containers() {
            let Some(pi) = network.port_position(c.current_port()) else {
                continue;
            };
            if let Some(ti) = self.types.iter().position(|t| t == c.container_type()) {
                initial[pi * self.types.len() + ti] += 1;
            }
        }

        for (pi, port) in ports.iter().enumerate() {
            if !port.covers_horizon(self.horizon) {
                tracing::warn!(
                    "Port {} forecasts {} of {} days; missing days count as zero demand",
                    port.name(),
                    port.demand_forecast().len(),
                    self.horizon
                );
            }
            for ti in 0..self.types.len() {
                for day in 0..self.horizon {
                    let mut balance = LinearExpr::new();
                    balance.add_term(self.storage_column(pi, ti, day), 1.0);
                    for q in (0..p).filter(|&q| q != pi) {
                        if let Some(inflow) = self.flow_column(q, pi, ti, day) {
                            balance.add_term(inflow, -1.0);
                        }
                        if let Some(outflow) = self.flow_column(pi, q, ti, day) {
                            balance.add_term(outflow, 1.0);
                        }
                    }

                    // Today's inventory is already net of today's demand.
                    let rhs = if day == 0 {
                        initial[pi * self.types.len() + ti] as f64
                    } else {
                        balance.add_term(self.storage_column(pi, ti, day - 1), -1.0);
                        -(port.demand_on(day) as f64)
                    };
                    self.milp.add_constraint(LinearConstraint::eq(balance, rhs));
                }
            }
        }
    }

    fn add_port_capacity(&mut self) {
        let network = self.network;
        for (pi, port) in network.ports().iter().enumerate() {
            for day in 0..self.horizon {
                let load: LinearExpr = (0..self.types.len())
                    .map(|ti| (self.storage_column(pi, ti, day), 1.0))
                    .collect();
                self.milp
                    .add_constraint(LinearConstraint::leq(load, port.capacity() as f64));
            }
        }
    }

    fn add_route_capacity(&mut self, config: &OptimizerConfig) {
        let network = self.network;
        let ports = network.ports();
        for (i, from) in ports.iter().enumerate() {
            for (j, to) in ports.iter().enumerate() {
                if i == j {
                    continue;
                }
                let capacity = network
                    .route(from.name(), to.name())
                    .map_or(config.default_route_capacity, |r| r.capacity_teu());
                for day in 0..self.horizon {
                    let lane: LinearExpr = (0..self.types.len())
                        .filter_map(|ti| self.flow_column(i, j, ti, day))
                        .map(|col| (col, 1.0))
                        .collect();
                    self.milp
                        .add_constraint(LinearConstraint::leq(lane, capacity as f64));
                }
            }
        }
    }

    #[inline]
    pub fn network(&self) -> &'n NetworkModel {
        self.network
    }

    #[inline]
    pub fn container_types(&self) -> &[ContainerType] {
        &self.types
    }

    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    #[inline]
    pub fn milp(&self) -> &MilpModel {
        &self.milp
    }

    /// `None` for `from == to`.
    #[inline]
    pub fn flow_column(&self, from: usize, to: usize, ty: usize, day: usize) -> Option<ColumnIndex> {
        let (p, k, h) = (self.network.port_count(), self.types.len(), self.horizon);
        self.flow[((from * p + to) * k + ty) * h + day]
    }

    #[inline]
    pub fn storage_column(&self, port: usize, ty: usize, day: usize) -> ColumnIndex {
        let (k, h) = (self.types.len(), self.horizon);
        self.storage[(port * k + ty) * h + day]
    }
}
