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
    common::{ContainerType, Identifier, IdentifierMarkerName},
    network::port::PortName,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerIdentifierMarker;

impl IdentifierMarkerName for ContainerIdentifierMarker {
    const NAME: &'static str = "ContainerId";
}

pub type ContainerIdentifier = Identifier<String, ContainerIdentifierMarker>;

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Container {
    id: ContainerIdentifier,
    #[serde(rename = "type")]
    container_type: ContainerType,
    current_port: PortName,
    dwell_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_booking_port: Option<PortName>,
    priority: u8,
}

impl Container {
    #[inline]
    pub fn new(
        id: impl Into<ContainerIdentifier>,
        container_type: ContainerType,
        current_port: impl Into<PortName>,
        dwell_time: u32,
        next_booking_port: Option<PortName>,
        priority: u8,
    ) -> Self {
        Self {
            id: id.into(),
            container_type,
            current_port: current_port.into(),
            dwell_time,
            next_booking_port,
            priority,
        }
    }

    #[inline]
    pub fn id(&self) -> &ContainerIdentifier {
        &self.id
    }

    #[inline]
    pub fn container_type(&self) -> &ContainerType {
        &self.container_type
    }

    #[inline]
    pub fn current_port(&self) -> &PortName {
        &self.current_port
    }

    #[inline]
    pub fn dwell_time(&self) -> u32 {
        self.dwell_time
    }

    #[inline]
    pub fn next_booking_port(&self) -> Option<&PortName> {
        self.next_booking_port.as_ref()
    }

    #[inline]
    pub fn priority(&self) -> u8 {
        self.priority
    }

    #[inline]
    pub fn has_valid_priority(&self) -> bool {
        (MIN_PRIORITY..=MAX_PRIORITY).contains(&self.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_booking_port_roundtrips_as_absent() {
        let json = r#"{"id":"C1","type":"40HC","current_port":"RTM","dwell_time":3,"priority":7}"#;
        let c: Container = serde_json::from_str(json).unwrap();
        assert_eq!(c.container_type(), &ContainerType::Hc40);
        assert!(c.next_booking_port().is_none());

        let out = serde_json::to_value(&c).unwrap();
        assert!(out.get("next_booking_port").is_none());
        assert_eq!(out["type"], "40HC");
        assert_eq!(out["current_port"], "RTM");
    }

    #[test]
    fn test_priority_range() {
        let mk = |p| Container::new("C", ContainerType::Gp20, "A", 0, None, p);
        assert!(!mk(0).has_valid_priority());
        assert!(mk(1).has_valid_priority());
        assert!(mk(10).has_valid_priority());
        assert!(!mk(11).has_valid_priority());
    }
}
