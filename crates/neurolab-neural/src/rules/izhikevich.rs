// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Izhikevich neuron model.
//!
//! ```text
//! dv/dt = 0.04v^2 + 5v + 140 - u + I
//! du/dt = a(bv - u)
//! if v >= v_peak: v = c, u = u + d
//! ```
//!
//! The neuron's activation is the membrane potential `v`; the recovery
//! variable `u` is internal rule state.

use serde::{Deserialize, Serialize};

use super::{RuleDefaults, RuleInput, TimeType, UpdateRule};
use crate::noise::Randomizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IzhikevichRule {
    /// Time scale of the recovery variable.
    pub a: f64,
    /// Sensitivity of `u` to subthreshold fluctuations of `v`.
    pub b: f64,
    /// After-spike reset value for `v` (mV).
    pub c: f64,
    /// After-spike increment of `u`.
    pub d: f64,
    /// Spike cutoff (mV).
    pub v_peak: f64,
    /// Constant background current.
    pub background_current: f64,
    pub add_noise: bool,
    pub noise: Randomizer,
    /// Recovery variable.
    u: f64,
    #[serde(skip)]
    spiked: bool,
}

impl Default for IzhikevichRule {
    fn default() -> Self {
        // Regular-spiking cortical parameters.
        Self {
            a: 0.02,
            b: 0.2,
            c: -65.0,
            d: 8.0,
            v_peak: 30.0,
            background_current: 0.0,
            add_noise: false,
            noise: Randomizer::default(),
            u: 0.2 * -65.0,
            spiked: false,
        }
    }
}

impl IzhikevichRule {
    pub fn recovery(&self) -> f64 {
        self.u
    }
}

impl UpdateRule for IzhikevichRule {
    fn name(&self) -> &'static str {
        "Izhikevich"
    }

    fn time_type(&self) -> TimeType {
        TimeType::Continuous
    }

    fn defaults(&self) -> RuleDefaults {
        RuleDefaults {
            lower_bound: -90.0,
            upper_bound: 40.0,
            increment: 1.0,
        }
    }

    fn update(&mut self, input: &RuleInput<'_>) -> f64 {
        let mut i_syn = input.weighted + self.background_current;
        if self.add_noise {
            i_syn += self.noise.sample();
        }

        let v = input.activation;
        let dv = 0.04 * v * v + 5.0 * v + 140.0 - self.u + i_syn;
        let du = self.a * (self.b * v - self.u);

        let mut v_next = v + dv * input.time_step;
        self.u += du * input.time_step;

        if v_next >= self.v_peak {
            v_next = self.c;
            self.u += self.d;
            self.spiked = true;
        } else {
            self.spiked = false;
        }
        v_next
    }

    fn spiked(&self) -> bool {
        self.spiked
    }

    fn is_spiking(&self) -> bool {
        true
    }

    fn clear(&mut self) {
        self.u = self.b * self.c;
        self.spiked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleInput;

    fn input(activation: f64, weighted: f64, dt: f64) -> RuleInput<'static> {
        RuleInput {
            activation,
            external: 0.0,
            weighted,
            fan_in: &[],
            lower_bound: -90.0,
            upper_bound: 40.0,
            time: 0.0,
            time_step: dt,
        }
    }

    #[test]
    fn test_subthreshold_step() {
        let mut rule = IzhikevichRule::default();
        // v=-65, u=-13, I=10, dt=1:
        // dv = 0.04*4225 - 325 + 140 + 13 + 10 = 7
        let v = rule.update(&input(-65.0, 10.0, 1.0));
        assert!((v - -58.0).abs() < 1e-9);
        assert!(!rule.spiked());
        // du = 0.02 * (0.2 * -65 - -13) = 0
        assert!((rule.recovery() - -13.0).abs() < 1e-9);
    }

    #[test]
    fn test_spike_resets_and_latches() {
        let mut rule = IzhikevichRule::default();
        let u_before = rule.recovery();
        let v = rule.update(&input(-50.0, 500.0, 1.0));
        assert_eq!(v, rule.c);
        assert!(rule.spiked());
        assert!(rule.recovery() > u_before);
        // Next quiet step clears the latch.
        rule.update(&input(rule.c, 0.0, 1.0));
        assert!(!rule.spiked());
    }

    #[test]
    fn test_resting_neuron_fires_with_sustained_current() {
        let mut rule = IzhikevichRule::default();
        let mut v = -65.0;
        let mut fired = false;
        for _ in 0..200 {
            v = rule.update(&input(v, 14.0, 1.0));
            fired |= rule.spiked();
        }
        assert!(fired);
    }
}
