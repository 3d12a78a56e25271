// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Leaky integrate-and-fire neuron.
//!
//! ```text
//! tau * dV/dt = -(V - V_rest) + R * I
//! if V >= threshold and not refractory: spike, V = V_reset
//! ```

use serde::{Deserialize, Serialize};

use super::{RuleDefaults, RuleInput, TimeType, UpdateRule};
use crate::noise::Randomizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrateAndFireRule {
    pub threshold: f64,
    pub reset_potential: f64,
    pub resting_potential: f64,
    /// Membrane resistance applied to the input current.
    pub resistance: f64,
    /// Membrane time constant (same unit as the network time step).
    pub time_constant: f64,
    /// Absolute refractory period after a spike.
    pub refractory_period: f64,
    pub background_current: f64,
    pub add_noise: bool,
    pub noise: Randomizer,
    /// Time of the most recent spike.
    last_spike: Option<f64>,
    #[serde(skip)]
    spiked: bool,
}

impl Default for IntegrateAndFireRule {
    fn default() -> Self {
        Self {
            threshold: -50.0,
            reset_potential: -55.0,
            resting_potential: -70.0,
            resistance: 1.0,
            time_constant: 10.0,
            refractory_period: 3.0,
            background_current: 0.0,
            add_noise: false,
            noise: Randomizer::default(),
            last_spike: None,
            spiked: false,
        }
    }
}

impl UpdateRule for IntegrateAndFireRule {
    fn name(&self) -> &'static str {
        "Integrate and fire"
    }

    fn time_type(&self) -> TimeType {
        TimeType::Continuous
    }

    fn defaults(&self) -> RuleDefaults {
        RuleDefaults {
            lower_bound: -90.0,
            upper_bound: 0.0,
            increment: 1.0,
        }
    }

    fn update(&mut self, input: &RuleInput<'_>) -> f64 {
        let refractory = self
            .last_spike
            .is_some_and(|t| input.time < t + self.refractory_period);

        if refractory {
            self.spiked = false;
            return self.reset_potential;
        }

        let mut current = input.weighted + self.background_current;
        if self.add_noise {
            current += self.noise.sample();
        }

        let v = input.activation;
        let dv = (-(v - self.resting_potential) + self.resistance * current)
            / self.time_constant;
        let v_next = v + dv * input.time_step;

        if v_next >= self.threshold {
            self.spiked = true;
            self.last_spike = Some(input.time);
            self.reset_potential
        } else {
            self.spiked = false;
            v_next
        }
    }

    fn spiked(&self) -> bool {
        self.spiked
    }

    fn is_spiking(&self) -> bool {
        true
    }

    fn clear(&mut self) {
        self.last_spike = None;
        self.spiked = false;
    }
}
