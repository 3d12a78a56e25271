// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Morris-Lecar neuron: two-variable calcium/potassium membrane model.
//!
//! ```text
//! C * dV/dt = I - g_Ca * m_inf(V) * (V - E_Ca) - g_K * w * (V - E_K) - g_L * (V - E_L)
//! dw/dt     = phi * (w_inf(V) - w) / tau_w(V)
//! ```
//!
//! with `m_inf`, `w_inf` the tanh steady-state curves and `tau_w` the
//! cosh recovery time scale.

use serde::{Deserialize, Serialize};

use super::{RuleDefaults, RuleInput, TimeType, UpdateRule};
use crate::noise::Randomizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorrisLecarRule {
    pub g_ca: f64,
    pub g_k: f64,
    pub g_leak: f64,
    pub e_ca: f64,
    pub e_k: f64,
    pub e_leak: f64,
    pub capacitance: f64,
    /// Half-activation voltage of the calcium steady state.
    pub v1: f64,
    /// Slope of the calcium steady state.
    pub v2: f64,
    /// Half-activation voltage of the potassium steady state.
    pub v3: f64,
    /// Slope of the potassium steady state.
    pub v4: f64,
    /// Recovery rate scale.
    pub phi: f64,
    /// Voltage at which an action potential is declared (mV).
    pub spike_threshold: f64,
    pub background_current: f64,
    pub add_noise: bool,
    pub noise: Randomizer,
    /// Potassium channel open fraction.
    w: f64,
    #[serde(skip)]
    spiked: bool,
}

impl Default for MorrisLecarRule {
    fn default() -> Self {
        Self {
            g_ca: 4.0,
            g_k: 8.0,
            g_leak: 2.0,
            e_ca: 120.0,
            e_k: -84.0,
            e_leak: -60.0,
            capacitance: 20.0,
            v1: -1.2,
            v2: 18.0,
            v3: 12.0,
            v4: 17.4,
            phi: 0.067,
            spike_threshold: 10.0,
            background_current: 0.0,
            add_noise: false,
            noise: Randomizer::default(),
            w: 0.0,
            spiked: false,
        }
    }
}

impl MorrisLecarRule {
    fn m_inf(&self, v: f64) -> f64 {
        0.5 * (1.0 + ((v - self.v1) / self.v2).tanh())
    }

    fn w_inf(&self, v: f64) -> f64 {
        0.5 * (1.0 + ((v - self.v3) / self.v4).tanh())
    }

    fn tau_w(&self, v: f64) -> f64 {
        1.0 / ((v - self.v3) / (2.0 * self.v4)).cosh()
    }

    pub fn recovery(&self) -> f64 {
        self.w
    }
}

impl UpdateRule for MorrisLecarRule {
    fn name(&self) -> &'static str {
        "Morris-Lecar"
    }

    fn time_type(&self) -> TimeType {
        TimeType::Continuous
    }

    fn defaults(&self) -> RuleDefaults {
        RuleDefaults {
            lower_bound: -80.0,
            upper_bound: 40.0,
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

        let i_ca = self.g_ca * self.m_inf(v) * (v - self.e_ca);
        let i_k = self.g_k * self.w * (v - self.e_k);
        let i_leak = self.g_leak * (v - self.e_leak);

        let dv = (current - i_ca - i_k - i_leak) / self.capacitance;
        let dw = self.phi * (self.w_inf(v) - self.w) / self.tau_w(v);

        let v_next = v + dv * dt;
        self.w = (self.w + dw * dt).clamp(0.0, 1.0);

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
