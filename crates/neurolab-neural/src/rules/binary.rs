// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Binary threshold neuron.

use serde::{Deserialize, Serialize};

use super::{RuleDefaults, RuleInput, TimeType, UpdateRule};

/// Steps to the upper bound when `weighted + bias` exceeds the threshold,
/// to the lower bound otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinaryRule {
    pub threshold: f64,
    pub bias: f64,
}

impl Default for BinaryRule {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            bias: 0.0,
        }
    }
}

impl UpdateRule for BinaryRule {
    fn name(&self) -> &'static str {
        "Binary"
    }

    fn time_type(&self) -> TimeType {
        TimeType::Discrete
    }

    fn defaults(&self) -> RuleDefaults {
        RuleDefaults {
            lower_bound: 0.0,
            upper_bound: 1.0,
            increment: 1.0,
        }
    }

    fn update(&mut self, input: &RuleInput<'_>) -> f64 {
        if input.weighted + self.bias > self.threshold {
            input.upper_bound
        } else {
            input.lower_bound
        }
    }
}
