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

use crate::common::{Identifier, IdentifierMarkerName};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortIdentifierMarker;

impl IdentifierMarkerName for PortIdentifierMarker {
    const NAME: &'static str = "Port";
}

pub type PortName = Identifier<String, PortIdentifierMarker>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A port in the repositioning network.
///
/// `demand_forecast[0]` is tomorrow. Positive values consume empties, negative
/// values release empties back into the port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Port {
    name: PortName,
    current_empty: u32,
    capacity: u32,
    #[serde(rename = "lstm_forecast")]
    demand_forecast: Vec<i64>,
    #[serde(rename = "storage_cost")]
    storage_cost_per_day: f64,
    handling_cost: f64,
    lat: f64,
    lng: f64,
}

impl Port {
    #[inline]
    pub fn new(
        name: impl Into<PortName>,
        current_empty: u32,
        capacity: u32,
        demand_forecast: Vec<i64>,
        storage_cost_per_day: f64,
        handling_cost: f64,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            name: name.into(),
            current_empty,
            capacity,
            demand_forecast,
            storage_cost_per_day,
            handling_cost,
            lat: coordinates.lat,
            lng: coordinates.lng,
        }
    }

    #[inline]
    pub fn name(&self) -> &PortName {
        &self.name
    }

    #[inline]
    pub fn current_empty(&self) -> u32 {
        self.current_empty
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn demand_forecast(&self) -> &[i64] {
        &self.demand_forecast
    }

    /// Forecast demand on `day`; days past the end of the forecast have none.
    #[inline]
    pub fn demand_on(&self, day: usize) -> i64 {
        self.demand_forecast.get(day).copied().unwrap_or(0)
    }

    #[inline]
    pub fn covers_horizon(&self, horizon: usize) -> bool {
        self.demand_forecast.len() >= horizon
    }

    #[inline]
    pub fn storage_cost_per_day(&self) -> f64 {
        self.storage_cost_per_day
    }

    #[inline]
    pub fn handling_cost(&self) -> f64 {
        self.handling_cost
    }

    #[inline]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_wire_names() {
        let json = r#"{
            "name": "HAM", "current_empty": 20, "capacity": 100,
            "lstm_forecast": [5, -3, 0], "storage_cost": 1.5,
            "handling_cost": 12.0, "lat": 53.5, "lng": 9.9
        }"#;
        let port: Port = serde_json::from_str(json).unwrap();
        assert_eq!(port.name().as_str(), "HAM");
        assert_eq!(port.capacity(), 100);
        assert_eq!(port.demand_forecast(), &[5, -3, 0]);
        assert_eq!(port.storage_cost_per_day(), 1.5);
        assert_eq!(port.coordinates(), Coordinates { lat: 53.5, lng: 9.9 });
    }

    #[test]
    fn test_demand_past_forecast_is_zero() {
        let port = Port::new(
            "A",
            0,
            10,
            vec![4, 7],
            1.0,
            0.0,
            Coordinates { lat: 0.0, lng: 0.0 },
        );
        assert_eq!(port.demand_on(1), 7);
        assert_eq!(port.demand_on(2), 0);
        assert!(port.covers_horizon(2));
        assert!(!port.covers_horizon(7));
    }

    #[test]
    fn test_rejects_negative_capacity_and_unknown_fields() {
        let negative = r#"{
            "name": "A", "current_empty": 0, "capacity": -1, "lstm_forecast": [],
            "storage_cost": 1.0, "handling_cost": 0.0, "lat": 0.0, "lng": 0.0
        }"#;
        assert!(serde_json::from_str::<Port>(negative).is_err());

        let unknown = r#"{
            "name": "A", "current_empty": 0, "capacity": 1, "lstm_forecast": [],
            "storage_cost": 1.0, "handling_cost": 0.0, "lat": 0.0, "lng": 0.0,
            "terminals": 4
        }"#;
        assert!(serde_json::from_str::<Port>(unknown).is_err());
    }
}
