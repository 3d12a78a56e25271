// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Sigmoidal neuron: bounded squash of the weighted input.
//!
//! All three squash functions map `weighted + bias` into
//! `[lower_bound, upper_bound]` and cross the midpoint at zero input:
//!
//! ```text
//! Logistic: lower + diff / (1 + e^(-slope * x))
//! Tanh:     lower + diff * (1 + tanh(slope * x)) / 2
//! ArcTan:   lower + diff * (atan(slope * x) / PI + 1/2)
//! ```

use serde::{Deserialize, Serialize};

use super::{RuleDefaults, RuleInput, TimeType, UpdateRule};
use crate::noise::Randomizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquashFunction {
    Logistic,
    Tanh,
    ArcTan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigmoidalRule {
    pub squash: SquashFunction,
    pub slope: f64,
    pub bias: f64,
    pub add_noise: bool,
    pub noise: Randomizer,
}

impl Default for SigmoidalRule {
    fn default() -> Self {
        Self {
            squash: SquashFunction::Logistic,
            slope: 1.0,
            bias: 0.0,
            add_noise: false,
            noise: Randomizer::default(),
        }
    }
}

impl UpdateRule for SigmoidalRule {
    fn name(&self) -> &'static str {
        "Sigmoidal"
    }

    fn time_type(&self) -> TimeType {
        TimeType::Discrete
    }

    fn defaults(&self) -> RuleDefaults {
        RuleDefaults {
            lower_bound: 0.0,
            upper_bound: 1.0,
            increment: 0.1,
        }
    }

    fn update(&mut self, input: &RuleInput<'_>) -> f64 {
        let x = self.slope * (input.weighted + self.bias);
        let diff = input.upper_bound - input.lower_bound;
        let mut val = match self.squash {
            SquashFunction::Logistic => input.lower_bound + diff / (1.0 + (-x).exp()),
            SquashFunction::Tanh => input.lower_bound + diff * 0.5 * (1.0 + x.tanh()),
            SquashFunction::ArcTan => {
                input.lower_bound + diff * (x.atan() / std::f64::consts::PI + 0.5)
            }
        };
        if self.add_noise {
            val += self.noise.sample();
        }
        input.clip(val)
    }
}
