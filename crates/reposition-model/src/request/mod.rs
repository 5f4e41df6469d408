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

pub mod demand;
pub mod loader;
pub mod task;

use crate::{
    network::model::NetworkModel,
    request::{demand::Demand, task::RelocationTask},
};

/// Which optimizer a payload asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OptimizationKind {
    #[default]
    Redistribution,
    Routing,
    Assignment,
    /// Anything else; reported back to the caller rather than rejected at load.
    Unknown(String),
}

impl OptimizationKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "redistribution" => OptimizationKind::Redistribution,
            "routing" => OptimizationKind::Routing,
            "assignment" => OptimizationKind::Assignment,
            other => OptimizationKind::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OptimizationKind::Redistribution => "redistribution",
            OptimizationKind::Routing => "routing",
            OptimizationKind::Assignment => "assignment",
            OptimizationKind::Unknown(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for OptimizationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully parsed payload: the network plus the mode-specific batches.
#[derive(Debug, Clone, Default)]
pub struct OptimizationRequest {
    kind: OptimizationKind,
    network: NetworkModel,
    relocations: Vec<RelocationTask>,
    demands: Vec<Demand>,
}

impl OptimizationRequest {
    #[inline]
    pub fn new(
        kind: OptimizationKind,
        network: NetworkModel,
        relocations: Vec<RelocationTask>,
        demands: Vec<Demand>,
    ) -> Self {
        Self {
            kind,
            network,
            relocations,
            demands,
        }
    }

    #[inline]
    pub fn kind(&self) -> &OptimizationKind {
        &self.kind
    }

    #[inline]
    pub fn network(&self) -> &NetworkModel {
        &self.network
    }

    #[inline]
    pub fn relocations(&self) -> &[RelocationTask] {
        &self.relocations
    }

    #[inline]
    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_roundtrip() {
        for s in ["redistribution", "routing", "assignment"] {
            assert_eq!(OptimizationKind::parse(s).as_str(), s);
        }
        assert_eq!(
            OptimizationKind::parse("teleport"),
            OptimizationKind::Unknown("teleport".to_string())
        );
        assert_eq!(OptimizationKind::default(), OptimizationKind::Redistribution);
    }
}
