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
    common::ContainerType,
    network::{
        container::{Container, ContainerIdentifier},
        err::{
            DuplicateContainerError, DuplicatePortError, NetworkError, PriorityOutOfRangeError,
            UnknownPortError,
        },
        port::{Port, PortName},
        route::Route,
    },
};
use std::collections::{HashMap, HashSet};

/// Ports, containers and lanes of a single optimization call.
///
/// Ports iterate in declaration order. Route lookups return the first lane
/// declared for an ordered pair; later duplicates are kept but never consulted.
#[derive(Debug, Clone, Default)]
pub struct NetworkModel {
    ports: Vec<Port>,
    port_index: HashMap<PortName, usize>,
    containers: Vec<Container>,
    routes: Vec<Route>,
    route_index: HashMap<PortName, HashMap<PortName, usize>>,
}

impl NetworkModel {
    pub fn new(
        ports: Vec<Port>,
        containers: Vec<Container>,
        routes: Vec<Route>,
        require_known_ports: bool,
    ) -> Result<Self, NetworkError> {
        let mut port_index = HashMap::with_capacity(ports.len());
        for (i, port) in ports.iter().enumerate() {
            if port_index.insert(port.name().clone(), i).is_some() {
                return Err(DuplicatePortError::new(port.name().clone()).into());
            }
        }

        let mut seen: HashSet<&ContainerIdentifier> = HashSet::with_capacity(containers.len());
        for c in containers.iter() {
            if !seen.insert(c.id()) {
                return Err(DuplicateContainerError::new(c.id().clone()).into());
            }
            if !c.has_valid_priority() {
                return Err(PriorityOutOfRangeError::new(c.id().clone(), c.priority()).into());
            }
            if require_known_ports && !port_index.contains_key(c.current_port()) {
                return Err(
                    UnknownPortError::new(c.id().clone(), c.current_port().clone()).into(),
                );
            }
        }

        let mut route_index: HashMap<PortName, HashMap<PortName, usize>> = HashMap::new();
        for (i, r) in routes.iter().enumerate() {
            route_index
                .entry(r.from_port().clone())
                .or_default()
                .entry(r.to_port().clone())
                .or_insert(i);
        }

        Ok(Self {
            ports,
            port_index,
            containers,
            routes,
            route_index,
        })
    }

    #[inline]
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    #[inline]
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    #[inline]
    pub fn port(&self, name: &PortName) -> Option<&Port> {
        self.port_position(name).map(|i| &self.ports[i])
    }

    #[inline]
    pub fn port_position(&self, name: &PortName) -> Option<usize> {
        self.port_index.get(name).copied()
    }

    #[inline]
    pub fn contains_port(&self, name: &PortName) -> bool {
        self.port_index.contains_key(name)
    }

    #[inline]
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The first lane declared for `from -> to`, if any.
    #[inline]
    pub fn route(&self, from: &PortName, to: &PortName) -> Option<&Route> {
        self.route_index
            .get(from)
            .and_then(|m| m.get(to))
            .map(|&i| &self.routes[i])
    }

    /// Distinct container types in order of first appearance.
    pub fn container_types(&self) -> Vec<ContainerType> {
        let mut seen = HashSet::new();
        self.containers
            .iter()
            .map(|c| c.container_type())
            .filter(|t| seen.insert(*t))
            .cloned()
            .collect()
    }

    /// Number of containers of `container_type` currently sitting at `port`.
    pub fn inventory(&self, port: &PortName, container_type: &ContainerType) -> usize {
        self.containers
            .iter()
            .filter(|c| c.current_port() == port && c.container_type() == container_type)
            .count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty() && self.containers.is_empty() && self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::port::Coordinates;

    fn port(name: &str, capacity: u32) -> Port {
        Port::new(
            name,
            0,
            capacity,
            vec![0; 7],
            1.0,
            0.0,
            Coordinates { lat: 0.0, lng: 0.0 },
        )
    }

    fn container(id: &str, t: &str, at: &str) -> Container {
        Container::new(id, ContainerType::from(t), at, 0, None, 5)
    }

    fn pn(s: &str) -> PortName {
        PortName::from(s)
    }

    #[test]
    fn test_first_declared_route_wins() {
        let model = NetworkModel::new(
            vec![port("A", 10), port("B", 10)],
            vec![],
            vec![
                Route::new("A", "B", 100.0, 10.0, 5, 50),
                Route::new("A", "B", 999.0, 99.0, 5, 1),
            ],
            true,
        )
        .unwrap();

        let r = model.route(&pn("A"), &pn("B")).unwrap();
        assert_eq!(r.transport_cost(), 10.0);
        assert!(model.route(&pn("B"), &pn("A")).is_none());
        assert_eq!(model.routes().len(), 2);
    }

    #[test]
    fn test_container_types_in_first_appearance_order() {
        let model = NetworkModel::new(
            vec![port("A", 10)],
            vec![
                container("c1", "40HC", "A"),
                container("c2", "20GP", "A"),
                container("c3", "40HC", "A"),
            ],
            vec![],
            true,
        )
        .unwrap();
        assert_eq!(
            model.container_types(),
            vec![ContainerType::Hc40, ContainerType::Gp20]
        );
        assert_eq!(model.inventory(&pn("A"), &ContainerType::Hc40), 2);
        assert_eq!(model.inventory(&pn("A"), &ContainerType::Gp40), 0);
    }

    #[test]
    fn test_rejects_duplicate_port() {
        let err = NetworkModel::new(vec![port("A", 1), port("A", 2)], vec![], vec![], true)
            .unwrap_err();
        assert!(matches!(err, NetworkError::DuplicatePort(_)));
    }

    #[test]
    fn test_rejects_duplicate_container() {
        let err = NetworkModel::new(
            vec![port("A", 1)],
            vec![container("c", "20GP", "A"), container("c", "40GP", "A")],
            vec![],
            true,
        )
        .unwrap_err();
        assert!(matches!(err, NetworkError::DuplicateContainer(_)));
    }

    #[test]
    fn test_rejects_bad_priority() {
        let bad = Container::new("c", ContainerType::Gp20, "A", 0, None, 0);
        let err = NetworkModel::new(vec![port("A", 1)], vec![bad], vec![], true).unwrap_err();
        assert!(matches!(err, NetworkError::PriorityOutOfRange(_)));
    }

    #[test]
    fn test_unknown_port_only_when_required() {
        let stray = || vec![container("c", "20GP", "Nowhere")];
        let err = NetworkModel::new(vec![port("A", 1)], stray(), vec![], true).unwrap_err();
        assert!(matches!(err, NetworkError::UnknownPort(_)));

        let relaxed = NetworkModel::new(vec![port("A", 1)], stray(), vec![], false).unwrap();
        assert_eq!(relaxed.containers().len(), 1);
        assert!(!relaxed.contains_port(&pn("Nowhere")));
    }
}
