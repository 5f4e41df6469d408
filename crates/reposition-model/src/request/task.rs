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

/// One pickup/delivery job handed to the routing optimizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelocationTask {
    from_port: PortName,
    to_port: PortName,
    container_count: u32,
}

impl RelocationTask {
    #[inline]
    pub fn new(
        from_port: impl Into<PortName>,
        to_port: impl Into<PortName>,
        container_count: u32,
    ) -> Self {
        Self {
            from_port: from_port.into(),
            to_port: to_port.into(),
            container_count,
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
    pub fn container_count(&self) -> u32 {
        self.container_count
    }
}
