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

use crate::plan::{FallbackPlan, PlanStatus};

const FALLBACK_ADVICE: [&str; 3] = [
    "Optimization solver failed - using simple heuristics",
    "Consider manual review of container distribution",
    "Check data quality and constraints",
];

/// The plan handed out when redistribution has no optimal answer. It never
/// moves a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FallbackPolicy;

impl FallbackPolicy {
    pub fn plan(&self) -> FallbackPlan {
        FallbackPlan {
            status: PlanStatus::Fallback,
            relocations: Vec::new(),
            recommendations: FALLBACK_ADVICE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_flagged_and_empty() {
        let plan = FallbackPolicy.plan();
        assert_eq!(plan.status, PlanStatus::Fallback);
        assert!(plan.relocations.is_empty());
        assert_eq!(plan.recommendations.len(), 3);

        let v = serde_json::to_value(&plan).unwrap();
        assert_eq!(v["status"], "fallback");
        assert_eq!(v["relocations"], serde_json::json!([]));
    }
}
