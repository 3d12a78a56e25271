// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Decay neuron: activation relaxes toward a baseline each iteration.

use serde::{Deserialize, Serialize};

use super::{RuleDefaults, RuleInput, TimeType, UpdateRule};
use crate::noise::Randomizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecayKind {
    /// Subtract a fixed `decay_amount` toward the baseline.
    Absolute,
    /// Remove `decay_fraction` of the distance to the baseline.
    Relative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayRule {
    pub kind: DecayKind,
    pub baseline: f64,
    pub decay_amount: f64,
    pub decay_fraction: f64,
    pub add_noise: bool,
    pub noise: Randomizer,
}

impl Default for DecayRule {
    fn default() -> Self {
        Self {
            kind: DecayKind::Relative,
            baseline: 0.0,
            decay_amount: 0.1,
            decay_fraction: 0.1,
            add_noise: false,
            noise: Randomizer::default(),
        }
    }
}

impl UpdateRule for DecayRule {
    fn name(&self) -> &'static str {
        "Decay"
    }

    fn time_type(&self) -> TimeType {
        TimeType::Discrete
    }

    fn defaults(&self) -> RuleDefaults {
        RuleDefaults::default()
    }

    fn update(&mut self, input: &RuleInput<'_>) -> f64 {
        let mut val = input.activation + input.weighted;
        let distance = val - self.baseline;
        match self.kind {
            DecayKind::Relative => {
                val -= self.decay_fraction * distance;
            }
            DecayKind::Absolute => {
                let step = self.decay_amount.min(distance.abs());
                val -= step * distance.signum();
            }
        }
        if self.add_noise {
            val += self.noise.sample();
        }
        input.clip(val)
    }
}
