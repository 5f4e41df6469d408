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

use crate::err::OptimizationError;
use reposition_model::prelude::{Container, ContainerType, Demand, PortName, RelocationTask};
use serde::{Serialize, Serializer, ser::SerializeMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Optimal,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePriority {
    High,
    Medium,
}

/// Units of one container type moved along one lane on one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RelocationMove {
    pub from_port: PortName,
    pub to_port: PortName,
    pub container_type: ContainerType,
    pub quantity: i64,
    /// One-based day of the horizon.
    pub day: usize,
    pub priority: MovePriority,
}

impl RelocationMove {
    /// Zero-based day of the horizon. A malformed `day` of 0 maps to 0.
    #[inline]
    pub fn day_index(&self) -> usize {
        self.day.saturating_sub(1)
    }

    #[inline]
    pub fn is_urgent(&self) -> bool {
        self.priority == MovePriority::High
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortStorage {
    pub port: PortName,
    pub by_type: Vec<(ContainerType, Vec<i64>)>,
}

/// End-of-day inventory per port and container type. Serializes as a nested
/// object that keeps the network's port order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoragePlan {
    ports: Vec<PortStorage>,
}

impl StoragePlan {
    #[inline]
    pub fn new(ports: Vec<PortStorage>) -> Self {
        Self { ports }
    }

    #[inline]
    pub fn ports(&self) -> &[PortStorage] {
        &self.ports
    }

    pub fn get(&self, port: &PortName, container_type: &ContainerType) -> Option<&[i64]> {
        self.ports
            .iter()
            .find(|p| &p.port == port)?
            .by_type
            .iter()
            .find(|(t, _)| t == container_type)
            .map(|(_, days)| days.as_slice())
    }

    /// Inventory of all types at `port` on `day`. `None` for an unknown port
    /// or a day past the horizon.
    pub fn total_at(&self, port: &PortName, day: usize) -> Option<i64> {
        let p = self.ports.iter().find(|p| &p.port == port)?;
        p.by_type.iter().map(|(_, days)| days.get(day).copied()).sum()
    }
}

struct TypeRows<'a>(&'a [(ContainerType, Vec<i64>)]);

impl Serialize for TypeRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (t, days) in self.0 {
            map.serialize_entry(t.as_str(), days)?;
        }
        map.end()
    }
}

impl Serialize for StoragePlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.ports.len()))?;
        for p in &self.ports {
            map.serialize_entry(p.port.as_str(), &TypeRows(&p.by_type))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedistributionPlan {
    pub status: PlanStatus,
    pub total_cost: f64,
    pub relocations: Vec<RelocationMove>,
    pub storage_plan: StoragePlan,
    pub recommendations: Vec<String>,
}

/// The degraded answer handed out when no optimal plan exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackPlan {
    pub status: PlanStatus,
    pub relocations: Vec<RelocationMove>,
    pub recommendations: Vec<String>,
}

/// A redistribution call that produced no optimal plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedistributionFailure {
    #[serde(skip)]
    cause: OptimizationError,
    pub error: String,
    pub fallback_solution: FallbackPlan,
}

impl RedistributionFailure {
    pub fn new(cause: OptimizationError, fallback_solution: FallbackPlan) -> Self {
        Self {
            error: cause.to_string(),
            cause,
            fallback_solution,
        }
    }

    #[inline]
    pub fn cause(&self) -> &OptimizationError {
        &self.cause
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    pub total_distance: i64,
    /// One route per vehicle; always exactly one.
    pub routes: Vec<Vec<RelocationTask>>,
}

impl RoutePlan {
    #[inline]
    pub fn empty() -> Self {
        Self {
            total_distance: 0,
            routes: vec![Vec::new()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentPair {
    pub container_id: String,
    pub demand_id: String,
    pub from_port: PortName,
    pub to_port: PortName,
    pub container_type: ContainerType,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentPlan {
    pub assignments: Vec<AssignmentPair>,
    pub unassigned_containers: Vec<Container>,
    pub unmet_demands: Vec<Demand>,
    pub total_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pn(s: &str) -> PortName {
        PortName::from(s)
    }

    #[test]
    fn test_storage_plan_keeps_port_order_and_shape() {
        let plan = StoragePlan::new(vec![
            PortStorage {
                port: pn("Zeebrugge"),
                by_type: vec![(ContainerType::Gp20, vec![1, 2]), (ContainerType::Hc40, vec![0, 4])],
            },
            PortStorage {
                port: pn("Antwerp"),
                by_type: vec![(ContainerType::Gp20, vec![3, 3])],
            },
        ]);

        let json = serde_json::to_string(&plan).unwrap();
        assert_eq!(
            json,
            r#"{"Zeebrugge":{"20GP":[1,2],"40HC":[0,4]},"Antwerp":{"20GP":[3,3]}}"#
        );
        assert_eq!(plan.get(&pn("Antwerp"), &ContainerType::Gp20), Some(&[3, 3][..]));
        assert_eq!(plan.get(&pn("Antwerp"), &ContainerType::Hc40), None);
        assert_eq!(plan.total_at(&pn("Zeebrugge"), 1), Some(6));
        assert_eq!(plan.total_at(&pn("Zeebrugge"), 2), None);
        assert_eq!(plan.total_at(&pn("Ghent"), 0), None);
    }

    #[test]
    fn test_move_wire_format() {
        let m = RelocationMove {
            from_port: pn("A"),
            to_port: pn("B"),
            container_type: ContainerType::Gp40,
            quantity: 4,
            day: 3,
            priority: MovePriority::High,
        };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["from_port"], "A");
        assert_eq!(v["container_type"], "40GP");
        assert_eq!(v["priority"], "high");
        assert_eq!(v["day"], 3);
        assert_eq!(m.day_index(), 2);

        let malformed = RelocationMove { day: 0, ..m };
        assert_eq!(malformed.day_index(), 0);
    }

    #[test]
    fn test_empty_route_plan_shape() {
        let v = serde_json::to_value(RoutePlan::empty()).unwrap();
        assert_eq!(v, serde_json::json!({"total_distance": 0, "routes": [[]]}));
    }
}
