// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! FitzHugh-Nagumo relaxation oscillator.
//!
//! ```text
//! dv/dt = v - v^3/3 - w + I
//! dw/dt = (v + a - b*w) / tau
//! ```

use serde::{Deserialize, Serialize};

use super::{RuleDefaults, RuleInput, TimeType, UpdateRule};
use crate::noise::Randomizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitzhughNagumoRule {
    pub a: f64,
    pub b: f64,
    /// Recovery time scale.
    pub tau: f64,
    /// Voltage at which an action potential is declared.
    pub spike_threshold: f64,
    pub background_current: f64,
    pub add_noise: bool,
    pub noise: Randomizer,
    /// Recovery variable.
    w: f64,
    #[serde(skip)]
    spiked: bool,
}

impl Default for FitzhughNagumoRule {
    fn default() -> Self {
        Self {
            a: 0.7,
            b: 0.8,
            tau: 12.5,
            spike_threshold: 1.5,
            background_current: 0.0,
            add_noise: false,
            noise: Randomizer::default(),
            w: 0.0,
            spiked: false,
        }
    }
}

impl FitzhughNagumoRule {
    pub fn recovery(&self) -> f64 {
        self.w
    }
}

impl UpdateRule for FitzhughNagumoRule {
    fn name(&self) -> &'static str {
        "FitzHugh-Nagumo"
    }

    fn time_type(&self) -> TimeType {
        TimeType::Continuous
    }

    fn defaults(&self) -> RuleDefaults {
        RuleDefaults {
            lower_bound: -2.5,
            upper_bound: 2.5,
            increment: 0.1,
        }
    }

    fn update(&mut self, input: &RuleInput<'_>) -> f64 {
        let v = input.activation;
        let dt = input.time_step;

        let mut current = input.weighted + self.background_current;
        if self.add_noise {
            current += self.noise.sample();
        }

        let dv = v - v.powi(3) / 3.0 - self.w + current;
        let dw = (v + self.a - self.b * self.w) / self.tau;

        let v_next = v + dv * dt;
        self.w += dw * dt;

        self.spiked = v < self.spike_threshold && v_next >= self.spike_threshold;
        v_next
    }

    fn spiked(&self) -> bool {
        self.spiked
    }

    fn is_spiking(&self) -> bool {
        true
    }

    fn clear(&mut self) {
        self.w = 0.0;
        self.spiked = false;
    }
}
