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

use crate::network::port::PortName;
use serde::{Deserialize, Serialize};

/// A directed lane between two ports. Lanes are asymmetric: `A -> B` says
/// nothing about `B -> A`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Route {
    #[serde(rename = "from")]
    from_port: PortName,
    #[serde(rename = "to")]
    to_port: PortName,
    #[serde(rename = "distance")]
    distance_km: f64,
    #[serde(rename = "cost")]
    transport_cost: f64,
    #[serde(rename = "transit_time")]
    transit_time_hours: u32,
    #[serde(rename = "capacity")]
    capacity_teu: u32,
}

impl Route {
    #[inline]
    pub fn new(
        from_port: impl Into<PortName>,
        to_port: impl Into<PortName>,
        distance_km: f64,
        transport_cost: f64,
        transit_time_hours: u32,
        capacity_teu: u32,
    ) -> Self {
        Self {
            from_port: from_port.into(),
            to_port: to_port.into(),
            distance_km,
            transport_cost,
            transit_time_hours,
            capacity_teu,
        }
    }

    #[inline]
    pub fn from_port(&self) -> &PortName {
        &self.from_port
    }

    #[inline]
    pub fn to_port(&self) -> &PortName {
        &self.to_port
    }

    #[inline]
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    #[inline]
    pub fn transport_cost(&self) -> f64 {
        self.transport_cost
    }

    #[inline]
    pub fn transit_time_hours(&self) -> u32 {
        self.transit_time_hours
    }

    #[inline]
    pub fn capacity_teu(&self) -> u32 {
        self.capacity_teu
    }

    #[inline]
    pub fn connects(&self, from: &PortName, to: &PortName) -> bool {
        &self.from_port == from && &self.to_port == to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_and_direction() {
        let json = r#"{"from":"A","to":"B","distance":120.5,"cost":10,"transit_time":6,"capacity":50}"#;
        let r: Route = serde_json::from_str(json).unwrap();
        assert_eq!(r.transport_cost(), 10.0);
        assert_eq!(r.capacity_teu(), 50);
        assert!(r.connects(&PortName::from("A"), &PortName::from("B")));
        assert!(!r.connects(&PortName::from("B"), &PortName::from("A")));
    }
}
