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

/// Tunable constants of the three optimizers.
///
/// The route fallbacks (`default_route_cost`, `default_route_capacity`) apply to
/// port pairs without a declared lane. They keep the flow model closed; they do
/// not make such a pair physically usable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerConfig {
    /// Number of planning days in the time-expanded network.
    pub horizon_days: usize,
    /// Upper bound of every `flow` variable.
    pub flow_upper_bound: u32,
    pub default_route_cost: f64,
    pub default_route_capacity: u32,
    /// Relocations on a day index `<=` this are labelled urgent.
    pub urgent_day_cutoff: usize,
    /// Arc cost between two routing tasks without a declared lane.
    pub unknown_route_penalty: i64,
    pub vehicle_capacity: u32,
    pub assignment_base_cost: f64,
    pub incompatibility_penalty: f64,
    /// Cost reduction per point of booking priority.
    pub priority_weight: f64,
    /// Wall-clock budget for one MILP solve.
    pub time_limit: Duration,
}

impl Default for OptimizerConfig {
    #[inline]
    fn default() -> Self {
        Self {
            horizon_days: 7,
            flow_upper_bound: 1000,
            default_route_cost: 50.0,
            default_route_capacity: 100,
            urgent_day_cutoff: 2,
            unknown_route_penalty: 1000,
            vehicle_capacity: 100,
            assignment_base_cost: 10.0,
            incompatibility_penalty: 1000.0,
            priority_weight: 5.0,
            time_limit: Duration::from_secs(60),
        }
    }
}

impl OptimizerConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_horizon_days(mut self, days: usize) -> Self {
        self.horizon_days = days;
        self
    }

    #[inline]
    pub fn with_flow_upper_bound(mut self, bound: u32) -> Self {
        self.flow_upper_bound = bound;
        self
    }

    #[inline]
    pub fn with_default_route_cost(mut self, cost: f64) -> Self {
        self.default_route_cost = cost;
        self
    }

    #[inline]
    pub fn with_default_route_capacity(mut self, capacity: u32) -> Self {
        self.default_route_capacity = capacity;
        self
    }

    #[inline]
    pub fn with_urgent_day_cutoff(mut self, day: usize) -> Self {
        self.urgent_day_cutoff = day;
        self
    }

    #[inline]
    pub fn with_unknown_route_penalty(mut self, penalty: i64) -> Self {
        self.unknown_route_penalty = penalty;
        self
    }

    #[inline]
    pub fn with_vehicle_capacity(mut self, capacity: u32) -> Self {
        self.vehicle_capacity = capacity;
        self
    }

    #[inline]
    pub fn with_assignment_base_cost(mut self, cost: f64) -> Self {
        self.assignment_base_cost = cost;
        self
    }

    #[inline]
    pub fn with_incompatibility_penalty(mut self, penalty: f64) -> Self {
        self.incompatibility_penalty = penalty;
        self
    }

    #[inline]
    pub fn with_priority_weight(mut self, weight: f64) -> Self {
        self.priority_weight = weight;
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_policy() {
        let c = OptimizerConfig::default();
        assert_eq!(c.horizon_days, 7);
        assert_eq!(c.flow_upper_bound, 1000);
        assert_eq!(c.default_route_cost, 50.0);
        assert_eq!(c.default_route_capacity, 100);
        assert_eq!(c.unknown_route_penalty, 1000);
        assert_eq!(c.vehicle_capacity, 100);
        assert_eq!(c.assignment_base_cost, 10.0);
        assert_eq!(c.incompatibility_penalty, 1000.0);
        assert_eq!(c.priority_weight, 5.0);
    }

    #[test]
    fn test_builders_override() {
        let c = OptimizerConfig::new()
            .with_horizon_days(3)
            .with_vehicle_capacity(40)
            .with_time_limit(Duration::from_millis(250));
        assert_eq!(c.horizon_days, 3);
        assert_eq!(c.vehicle_capacity, 40);
        assert_eq!(c.time_limit, Duration::from_millis(250));
        assert_eq!(c.flow_upper_bound, 1000);
    }
}
