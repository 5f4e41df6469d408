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
    container::Container, err::NetworkError, model::NetworkModel, port::Port, route::Route,
};

#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    ports: Vec<Port>,
    containers: Vec<Container>,
    routes: Vec<Route>,
    require_known_ports: bool,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self {
            ports: Vec::new(),
            containers: Vec::new(),
            routes: Vec::new(),
            require_known_ports: true,
        }
    }
}

impl NetworkBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacities(ports: usize, containers: usize, routes: usize) -> Self {
        Self {
            ports: Vec::with_capacity(ports),
            containers: Vec::with_capacity(containers),
            routes: Vec::with_capacity(routes),
            require_known_ports: true,
        }
    }

    #[inline]
    pub fn require_known_ports(mut self, yes: bool) -> Self {
        self.require_known_ports = yes;
        self
    }

    #[inline]
    pub fn add_port(&mut self, port: Port) -> &mut Self {
        self.ports.push(port);
        self
    }

    #[inline]
    pub fn extend_ports<I>(&mut self, ports: I) -> &mut Self
    where
        I: IntoIterator<Item = Port>,
    {
        self.ports.extend(ports);
        self
    }

    #[inline]
    pub fn add_container(&mut self, container: Container) -> &mut Self {
        self.containers.push(container);
        self
    }

    #[inline]
    pub fn extend_containers<I>(&mut self, containers: I) -> &mut Self
    where
        I: IntoIterator<Item = Container>,
    {
        self.containers.extend(containers);
        self
    }

    #[inline]
    pub fn add_route(&mut self, route: Route) -> &mut Self {
        self.routes.push(route);
        self
    }

    #[inline]
    pub fn extend_routes<I>(&mut self, routes: I) -> &mut Self
    where
        I: IntoIterator<Item = Route>,
    {
        self.routes.extend(routes);
        self
    }

    #[inline]
    pub fn build(self) -> Result<NetworkModel, NetworkError> {
        NetworkModel::new(
            self.ports,
            self.containers,
            self.routes,
            self.require_known_ports,
        )
    }
}
