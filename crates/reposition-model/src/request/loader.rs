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
    network::{
        err::{EntryKind, NetworkLoadError},
        loader::{NetworkLoader, parse_section},
    },
    request::{OptimizationKind, OptimizationRequest, demand::Demand, task::RelocationTask},
};
use serde_json::Value;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// Loads a complete optimization payload: the network sections plus
/// `optimization_type`, `relocations` and `demands`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestLoader {
    network: NetworkLoader,
}

impl RequestLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_network_loader(mut self, network: NetworkLoader) -> Self {
        self.network = network;
        self
    }

    pub fn from_value(&self, payload: &Value) -> Result<OptimizationRequest, NetworkLoadError> {
        let network = self.network.from_value(payload)?;
        let res = Self::load_batches(payload);
        if let Err(e) = &res {
            tracing::error!("Error loading request: {}", e);
        }
        let (kind, relocations, demands) = res?;
        Ok(OptimizationRequest::new(kind, network, relocations, demands))
    }

    fn load_batches(
        payload: &Value,
    ) -> Result<(OptimizationKind, Vec<RelocationTask>, Vec<Demand>), NetworkLoadError> {
        let obj = payload.as_object().ok_or(NetworkLoadError::NotAnObject)?;
        let kind = match obj.get("optimization_type") {
            None | Some(Value::Null) => OptimizationKind::default(),
            Some(Value::String(s)) => OptimizationKind::parse(s),
            Some(_) => return Err(NetworkLoadError::InvalidSection("optimization_type")),
        };
        let relocations = parse_section(obj, EntryKind::Relocation)?;
        let demands = parse_section(obj, EntryKind::Demand)?;
        Ok((kind, relocations, demands))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<OptimizationRequest, NetworkLoadError> {
        let value: Value =
            serde_json::from_reader(BufReader::new(r)).map_err(NetworkLoadError::Json)?;
        self.from_value(&value)
    }

    #[inline]
    pub fn from_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<OptimizationRequest, NetworkLoadError> {
        let file = File::open(path).map_err(NetworkLoadError::Io)?;
        self.from_reader(file)
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<OptimizationRequest, NetworkLoadError> {
        let value: Value = serde_json::from_str(s).map_err(NetworkLoadError::Json)?;
        self.from_value(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_redistribution() {
        let req = RequestLoader::new().from_str("{}").unwrap();
        assert_eq!(req.kind(), &OptimizationKind::Redistribution);
        assert!(req.relocations().is_empty());
        assert!(req.demands().is_empty());
    }

    #[test]
    fn test_loads_routing_batch() {
        let req = RequestLoader::new()
            .from_str(
                r#"{
                    "optimization_type": "routing",
                    "relocations": [
                        {"from_port": "A", "to_port": "B", "container_count": 12},
                        {"from_port": "B", "to_port": "C", "container_count": 3}
                    ]
                }"#,
            )
            .unwrap();
        assert_eq!(req.kind(), &OptimizationKind::Routing);
        assert_eq!(req.relocations().len(), 2);
        assert_eq!(req.relocations()[0].container_count(), 12);
    }

    #[test]
    fn test_unknown_kind_is_kept() {
        let req = RequestLoader::new()
            .from_str(r#"{"optimization_type": "teleport"}"#)
            .unwrap();
        assert_eq!(req.kind().as_str(), "teleport");
    }

    #[test]
    fn test_malformed_demand_fails() {
        let res = RequestLoader::new().from_str(
            r#"{"optimization_type": "assignment", "demands": [{"id": "D1", "port": "A"}]}"#,
        );
        match res {
            Err(NetworkLoadError::MalformedEntry(e)) => assert_eq!(e.kind(), EntryKind::Demand),
            other => panic!("expected malformed demand, got {other:?}"),
        }
    }

    #[test]
    fn test_non_string_kind_fails() {
        assert!(matches!(
            RequestLoader::new().from_str(r#"{"optimization_type": 3}"#),
            Err(NetworkLoadError::InvalidSection("optimization_type"))
        ));
    }

    #[test]
    fn test_negative_container_count_fails() {
        let res = RequestLoader::new().from_str(
            r#"{"relocations": [{"from_port": "A", "to_port": "B", "container_count": -2}]}"#,
        );
        assert!(matches!(res, Err(NetworkLoadError::MalformedEntry(_))));
    }
}
