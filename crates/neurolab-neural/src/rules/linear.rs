// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Linear neuron: scaled weighted input plus bias, optionally clipped.

use serde::{Deserialize, Serialize};

use super::{RuleDefaults, RuleInput, TimeType, UpdateRule};
use crate::noise::Randomizer;

/// `next = clip(slope * weighted + bias [+ noise])`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRule {
    pub slope: f64,
    pub bias: f64,
    pub add_noise: bool,
    pub clipping: bool,
    pub noise: Randomizer,
}

impl Default for LinearRule {
    fn default() -> Self {
        Self {
            slope: 1.0,
            bias: 0.0,
            add_noise: false,
            clipping: true,
            noise: Randomizer::default(),
        }
    }
}

impl UpdateRule for LinearRule {
    fn name(&self) -> &'static str {
        "Linear"
    }

    fn time_type(&self) -> TimeType {
        TimeType::Discrete
    }

    fn defaults(&self) -> RuleDefaults {
        RuleDefaults {
            lower_bound: -1.0,
            upper_bound: 1.0,
            increment: 0.1,
        }
    }

    fn update(&mut self, input: &RuleInput<'_>) -> f64 {
        let mut val = self.slope * input.weighted + self.bias;
        if self.add_noise {
            val += self.noise.sample();
        }
        if self.clipping {
            val = input.clip(val);
        }
        val
    }
}
