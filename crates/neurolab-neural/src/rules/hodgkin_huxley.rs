// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hodgkin-Huxley neuron model.
//!
//! Classic squid-axon formulation in the shifted convention (resting
//! potential at 0 mV):
//!
//! ```text
//! C * dV/dt = I - I_Na - I_K - I_leak
//! I_Na   = g_Na * m^3 * h * (V - E_Na)
//! I_K    = g_K  * n^4     * (V - E_K)
//! I_leak = g_L            * (V - E_L)
//! ```
//!
//! Gating variables relax toward their voltage-dependent steady states:
//! `dx/dt = alpha_x(V) * (1 - x) - beta_x(V) * x`.

use serde::{Deserialize, Serialize};

use super::{RuleDefaults, RuleInput, TimeType, UpdateRule};
use crate::noise::Randomizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HodgkinHuxleyRule {
    /// Sodium conductance (mS/cm^2).
    pub g_na: f64,
    /// Potassium conductance (mS/cm^2).
    pub g_k: f64,
    /// Leak conductance (mS/cm^2).
    pub g_leak: f64,
    /// Sodium reversal (mV).
    pub e_na: f64,
    /// Potassium reversal (mV).
    pub e_k: f64,
    /// Leak reversal (mV).
    pub e_leak: f64,
    /// Membrane capacitance (uF/cm^2).
    pub capacitance: f64,
    /// Voltage at which an action potential is declared (mV).
    pub spike_threshold: f64,
    pub background_current: f64,
    pub add_noise: bool,
    pub noise: Randomizer,
    // Gating variables, initialized to their V=0 steady states.
    m: f64,
    h: f64,
    n: f64,
    #[serde(skip)]
    spiked: bool,
}

impl Default for HodgkinHuxleyRule {
    fn default() -> Self {
        Self {
            g_na: 120.0,
            g_k: 36.0,
            g_leak: 0.3,
            e_na: 115.0,
            e_k: -12.0,
            e_leak: 10.613,
            capacitance: 1.0,
            spike_threshold: 50.0,
            background_current: 0.0,
            add_noise: false,
            noise: Randomizer::default(),
            m: 0.0529,
            h: 0.5961,
            n: 0.3177,
            spiked: false,
        }
    }
}

/// `x / (e^(x/scale) - 1)` with its limit value at the removable
/// singularity x = 0.
fn vtrap(x: f64, scale: f64) -> f64 {
    if x.abs() < 1e-7 {
        scale * (1.0 - x / (2.0 * scale))
    } else {
        x / ((x / scale).exp() - 1.0)
    }
}

impl HodgkinHuxleyRule {
    fn alpha_m(v: f64) -> f64 {
        0.1 * vtrap(25.0 - v, 10.0)
    }

    fn beta_m(v: f64) -> f64 {
        4.0 * (-v / 18.0).exp()
    }

    fn alpha_h(v: f64) -> f64 {
        0.07 * (-v / 20.0).exp()
    }

    fn beta_h(v: f64) -> f64 {
        1.0 / (((30.0 - v) / 10.0).exp() + 1.0)
    }

    fn alpha_n(v: f64) -> f64 {
        0.01 * vtrap(10.0 - v, 10.0)
    }

    fn beta_n(v: f64) -> f64 {
        0.125 * (-v / 80.0).exp()
    }

    pub fn gates(&self) -> (f64, f64, f64) {
        (self.m, self.h, self.n)
    }
}

impl UpdateRule for HodgkinHuxleyRule {
    fn name(&self) -> &'static str {
        "Hodgkin-Huxley"
    }

    fn time_type(&self) -> TimeType {
        TimeType::Continuous
    }

    fn defaults(&self) -> RuleDefaults {
        RuleDefaults {
            lower_bound: -20.0,
            upper_bound: 120.0,
            increment: 1.0,
        }
    }

    fn update(&mut self, input: &RuleInput<'_>) -> f64 {
        let v = input.activation;
        let dt = input.time_step;

        let mut current = input.weighted + self.background_current;
        if self.add_noise {
            current += self.noise.sample();
        }

        let i_na = self.g_na * self.m.powi(3) * self.h * (v - self.e_na);
        let i_k = self.g_k * self.n.powi(4) * (v - self.e_k);
        let i_leak = self.g_leak * (v - self.e_leak);

        let dv = (current - i_na - i_k - i_leak) / self.capacitance;
        let v_next = v + dv * dt;

        self.m = (self.m + (Self::alpha_m(v) * (1.0 - self.m) - Self::beta_m(v) * self.m) * dt)
            .clamp(0.0, 1.0);
        self.h = (self.h + (Self::alpha_h(v) * (1.0 - self.h) - Self::beta_h(v) * self.h) * dt)
            .clamp(0.0, 1.0);
        self.n = (self.n + (Self::alpha_n(v) * (1.0 - self.n) - Self::beta_n(v) * self.n) * dt)
            .clamp(0.0, 1.0);

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
        self.m = 0.0529;
        self.h = 0.5961;
        self.n = 0.3177;
        self.spiked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleInput;

    fn input(activation: f64, weighted: f64) -> RuleInput<'static> {
        RuleInput {
            activation,
            external: 0.0,
            weighted,
            fan_in: &[],
            lower_bound: -20.0,
            upper_bound: 120.0,
            time: 0.0,
            time_step: 0.01,
        }
    }

    #[test]
    fn test_rest_is_near_equilibrium() {
        let mut rule = HodgkinHuxleyRule::default();
        let mut v = 0.0;
        for _ in 0..1000 {
            v = rule.update(&input(v, 0.0));
        }
        // With steady-state gates and no drive the membrane drifts less
        // than a millivolt from rest.
        assert!(v.abs() < 1.0, "rest drifted to {v}");
    }

    #[test]
    fn test_current_step_produces_action_potential() {
        let mut rule = HodgkinHuxleyRule::default();
        let mut v = 0.0;
        let mut peak: f64 = 0.0;
        let mut fired = false;
        for _ in 0..2000 {
            v = rule.update(&input(v, 15.0));
            peak = peak.max(v);
            fired |= rule.spiked();
        }
        assert!(fired, "15 uA/cm^2 should trigger a spike, peak={peak}");
        assert!(peak > 80.0, "action potential should overshoot, peak={peak}");
    }

    #[test]
    fn test_vtrap_limit() {
        assert!((vtrap(0.0, 10.0) - 10.0).abs() < 1e-9);
        assert!((vtrap(1e-9, 10.0) - 10.0).abs() < 1e-6);
    }
}
