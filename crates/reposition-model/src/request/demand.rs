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
pub struct DemandIdentifierMarker;

impl IdentifierMarkerName for DemandIdentifierMarker {
    const NAME: &'static str = "DemandId";
}

pub type DemandIdentifier = Identifier<String, DemandIdentifierMarker>;

/// A booking that needs one empty container of a given type at a port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Demand {
    id: DemandIdentifier,
    port: PortName,
    required_type: ContainerType,
    // Absent priority means no urgency bonus.
    #[serde(default)]
    priority: i64,
}

impl Demand {
    #[inline]
    pub fn new(
        id: impl Into<DemandIdentifier>,
        port: impl Into<PortName>,
        required_type: ContainerType,
        priority: i64,
    ) -> Self {
        Self {
            id: id.into(),
            port: port.into(),
            required_type,
            priority,
        }
    }

    #[inline]
    pub fn id(&self) -> &DemandIdentifier {
        &self.id
    }

    #[inline]
    pub fn port(&self) -> &PortName {
        &self.port
    }

    #[inline]
    pub fn required_type(&self) -> &ContainerType {
        &self.required_type
    }

    #[inline]
    pub fn priority(&self) -> i64 {
        self.priority
    }
}
