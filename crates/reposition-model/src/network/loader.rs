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

use crate::network::{
    builder::NetworkBuilder,
    container::Container,
    err::{EntryKind, MalformedEntryError, NetworkLoadError},
    model::NetworkModel,
    port::Port,
    route::Route,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkLoader {
    require_known_ports: bool,
}

impl Default for NetworkLoader {
    fn default() -> Self {
        Self {
            require_known_ports: true,
        }
    }
}

impl NetworkLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn require_known_ports(mut self, yes: bool) -> Self {
        self.require_known_ports = yes;
        self
    }

    /// Loads `ports`, `containers` and `routes` from a payload object.
    ///
    /// Missing sections are empty. Any malformed entry fails the whole load.
    pub fn from_value(&self, payload: &Value) -> Result<NetworkModel, NetworkLoadError> {
        let res = self.load_object(payload);
        if let Err(e) = &res {
            tracing::error!("Error loading network: {}", e);
        }
        res
    }

    fn load_object(&self, payload: &Value) -> Result<NetworkModel, NetworkLoadError> {
        let obj = payload.as_object().ok_or(NetworkLoadError::NotAnObject)?;

        let ports: Vec<Port> = parse_section(obj, EntryKind::Port)?;
        let containers: Vec<Container> = parse_section(obj, EntryKind::Container)?;
        let routes: Vec<Route> = parse_section(obj, EntryKind::Route)?;

        let mut builder = NetworkBuilder::with_capacities(ports.len(), containers.len(), routes.len())
            .require_known_ports(self.require_known_ports);
        builder
            .extend_ports(ports)
            .extend_containers(containers)
            .extend_routes(routes);
        Ok(builder.build()?)
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<NetworkModel, NetworkLoadError> {
        let value: Value =
            serde_json::from_reader(BufReader::new(r)).map_err(NetworkLoadError::Json)?;
        self.from_value(&value)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<NetworkModel, NetworkLoadError> {
        let file = File::open(path).map_err(NetworkLoadError::Io)?;
        self.from_reader(file)
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<NetworkModel, NetworkLoadError> {
        let value: Value = serde_json::from_str(s).map_err(NetworkLoadError::Json)?;
        self.from_value(&value)
    }
}

/// Parses the array stored under `kind`'s section key. A missing or `null`
/// section yields no entries.
pub(crate) fn parse_section<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    kind: EntryKind,
) -> Result<Vec<T>, NetworkLoadError> {
    let entries = match obj.get(kind.section()) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(NetworkLoadError::InvalidSection(kind.section())),
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            T::deserialize(entry)
                .map_err(|e| NetworkLoadError::from(MalformedEntryError::new(kind, i, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{err::NetworkError, port::PortName};

    const SMALL_OK: &str = r#"{
        "ports": [
            {"name": "A", "current_empty": 20, "capacity": 100, "lstm_forecast": [5,5,5,5,5,5,5],
             "storage_cost": 2.0, "handling_cost": 1.0, "lat": 1.0, "lng": 2.0},
            {"name": "B", "current_empty": 5, "capacity": 100, "lstm_forecast": [-10,-10,-10,-10,-10,-10,-10],
             "storage_cost": 1.0, "handling_cost": 1.0, "lat": 3.0, "lng": 4.0}
        ],
        "containers": [
            {"id": "C1", "type": "20GP", "current_port": "A", "dwell_time": 4, "priority": 5},
            {"id": "C2", "type": "40HC", "current_port": "B", "dwell_time": 1,
             "next_booking_port": "A", "priority": 9}
        ],
        "routes": [
            {"from": "A", "to": "B", "distance": 300, "cost": 10, "transit_time": 12, "capacity": 50}
        ]
    }"#;

    #[test]
    fn test_loads_minimal() {
        let model = NetworkLoader::new().from_str(SMALL_OK).unwrap();
        assert_eq!(model.port_count(), 2);
        assert_eq!(model.containers().len(), 2);
        assert_eq!(model.routes().len(), 1);
        assert_eq!(
            model.containers()[1].next_booking_port(),
            Some(&PortName::from("A"))
        );
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let model = NetworkLoader::new().from_str("{}").unwrap();
        assert!(model.is_empty());

        let model = NetworkLoader::new()
            .from_str(r#"{"ports": null, "routes": []}"#)
            .unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_missing_required_field_fails_whole_load() {
        let payload = r#"{
            "ports": [{"name": "A", "current_empty": 1, "capacity": 10, "lstm_forecast": [],
                       "storage_cost": 1.0, "handling_cost": 1.0, "lat": 0.0, "lng": 0.0}],
            "routes": [
                {"from": "A", "to": "A", "distance": 1, "cost": 1, "transit_time": 1, "capacity": 1},
                {"from": "A", "distance": 1, "cost": 1, "transit_time": 1, "capacity": 1}
            ]
        }"#;
        match NetworkLoader::new().from_str(payload) {
            Err(NetworkLoadError::MalformedEntry(e)) => {
                assert_eq!(e.kind(), EntryKind::Route);
                assert_eq!(e.index(), 1);
            }
            other => panic!("expected malformed route, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_section_type_and_non_object() {
        assert!(matches!(
            NetworkLoader::new().from_str(r#"{"ports": {}}"#),
            Err(NetworkLoadError::InvalidSection("ports"))
        ));
        assert!(matches!(
            NetworkLoader::new().from_str("[1, 2]"),
            Err(NetworkLoadError::NotAnObject)
        ));
        assert!(matches!(
            NetworkLoader::new().from_str("{not json"),
            Err(NetworkLoadError::Json(_))
        ));
    }

    #[test]
    fn test_unknown_container_port() {
        let payload = r#"{
            "containers": [{"id": "C1", "type": "20GP", "current_port": "Z", "dwell_time": 0, "priority": 1}]
        }"#;
        assert!(matches!(
            NetworkLoader::new().from_str(payload),
            Err(NetworkLoadError::Network(NetworkError::UnknownPort(_)))
        ));
        assert!(
            NetworkLoader::new()
                .require_known_ports(false)
                .from_str(payload)
                .is_ok()
        );
    }

    #[test]
    fn test_from_path_missing_file() {
        let res = NetworkLoader::new().from_path("/definitely/not/here.json");
        assert!(matches!(res, Err(NetworkLoadError::Io(_))));
    }
}
