// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Additive (Hopfield-style continuous) neuron.
//!
//! One Euler step of the leaky additive equation:
//!
//! ```text
//! next = act + dt * (-act / resistance + SUM(w_i * g(src_i)) + external)
//!
//! g(x) = (2 / PI) * atan(PI * lambda * x / 2)
//! ```
//!
//! Each fan-in source activation is squashed individually before weighting,
//! so this rule consumes the raw fan-in samples rather than the pre-summed
//! weighted input.

use serde::{Deserialize, Serialize};

use super::{RuleDefaults, RuleInput, TimeType, UpdateRule};
use crate::noise::Randomizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditiveRule {
    /// Gain of the arctangent squash.
    pub lambda: f64,
    /// Leak resistance; the leak current is `-act / resistance`.
    pub resistance: f64,
    pub add_noise: bool,
    pub clipping: bool,
    pub noise: Randomizer,
}

impl AdditiveRule {
    /// The Hopfield squashing function.
    pub fn g(&self, x: f64) -> f64 {
        2.0 / std::f64::consts::PI * (std::f64::consts::PI * self.lambda * x / 2.0).atan()
    }
}

impl Default for AdditiveRule {
    fn default() -> Self {
        Self {
            lambda: 1.4,
            resistance: 1.0,
            add_noise: false,
            clipping: false,
            noise: Randomizer::default(),
        }
    }
}

impl UpdateRule for AdditiveRule {
    fn name(&self) -> &'static str {
        "Additive"
    }

    fn time_type(&self) -> TimeType {
        TimeType::Continuous
    }

    fn defaults(&self) -> RuleDefaults {
        RuleDefaults {
            lower_bound: -1.0,
            upper_bound: 1.0,
            increment: 0.1,
        }
    }

    fn update(&mut self, input: &RuleInput<'_>) -> f64 {
        let mut wtd_sum = 0.0;
        for sample in input.fan_in {
            wtd_sum += sample.strength * self.g(sample.source_activation);
        }

        let mut val = input.activation
            + input.time_step
                * (-input.activation / self.resistance + wtd_sum + input.external);

        if self.add_noise {
            val += self.noise.sample();
        }
        if self.clipping {
            val = input.clip(val);
        }
        val
    }
}
