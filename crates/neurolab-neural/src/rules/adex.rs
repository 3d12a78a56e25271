// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Adaptive exponential integrate-and-fire (AdEx), after Touboul & Brette.
//!
//! ```text
//! C * dV/dt = g_L*slope*e^((V - V_th)/slope) + g_L*(E_L - V) + I - w
//! tau_w * dw/dt = a*(V - E_L) - w
//! if V >= V_peak: V = V_reset, w = w + b*1000
//! ```
//!
//! The exponential term starts a divergent upswing once `V` passes `V_th`;
//! `V_peak` is where an action potential is declared and the state reset.
//! The adaptation current `w` is in pA while the step parameter `b` is
//! entered in nA, hence the conversion factor on reset.

use serde::{Deserialize, Serialize};

use super::{RuleDefaults, RuleInput, TimeType, UpdateRule};
use crate::noise::Randomizer;

/// pA per nA; adaptation bookkeeping runs in pA.
const CURRENT_CONVERTER: f64 = 1000.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdExRule {
    /// Reset voltage after a spike (mV). -47.7 gives 3-spike bursting at
    /// 0.8 nA; -48 is chaotic spiking.
    pub v_reset: f64,
    /// Threshold voltage (mV) where the exponential upswing begins.
    pub v_threshold: f64,
    /// Peak voltage (mV) at which a spike is declared.
    pub v_peak: f64,
    /// Leak conductance (nS).
    pub leak_conductance: f64,
    /// Leak reversal potential (mV).
    pub leak_reversal: f64,
    /// Slope factor (mV) regulating the exponential term.
    pub slope_factor: f64,
    /// Adaptation coupling constant (nS).
    pub a: f64,
    /// Adaptation step size (nA).
    pub b: f64,
    /// Adaptation time constant (ms).
    pub tau_w: f64,
    /// Membrane capacitance (pF).
    pub capacitance: f64,
    /// Background current (pA).
    pub background_current: f64,
    pub add_noise: bool,
    pub noise: Randomizer,
    /// Adaptation current (pA).
    w: f64,
    #[serde(skip)]
    spiked: bool,
}

impl Default for AdExRule {
    fn default() -> Self {
        Self {
            v_reset: -47.7,
            v_threshold: -50.4,
            v_peak: 20.0,
            leak_conductance: 30.0,
            leak_reversal: -70.6,
            slope_factor: 2.0,
            a: 4.0,
            b: 0.0805,
            tau_w: 40.0,
            capacitance: 281.0,
            background_current: 0.0,
            add_noise: false,
            noise: Randomizer::default(),
            w: 200.0,
            spiked: false,
        }
    }
}

impl AdExRule {
    pub fn adaptation(&self) -> f64 {
        self.w
    }
}

impl UpdateRule for AdExRule {
    fn name(&self) -> &'static str {
        "AdEx integrate and fire"
    }

    fn time_type(&self) -> TimeType {
        TimeType::Continuous
    }

    fn defaults(&self) -> RuleDefaults {
        RuleDefaults {
            lower_bound: -90.0,
            upper_bound: 30.0,
            increment: 1.0,
        }
    }

    fn update(&mut self, input: &RuleInput<'_>) -> f64 {
        let v = input.activation;

        let mut i_bg = self.background_current;
        if self.add_noise {
            i_bg += self.noise.sample();
        }

        let i_leak = self.leak_conductance * (self.leak_reversal - v);
        let exp_term = self.leak_conductance
            * self.slope_factor
            * ((v - self.v_threshold) / self.slope_factor).exp();

        let dv_dt = (exp_term + i_leak + input.weighted + i_bg - self.w) / self.capacitance;
        let dw_dt = (self.a * (v - self.leak_reversal) - self.w) / self.tau_w;

        let mut v_next = v + dv_dt * input.time_step;
        self.w += dw_dt * input.time_step;

        if v_next >= self.v_peak {
            v_next = self.v_reset;
            self.w += self.b * CURRENT_CONVERTER;
            self.spiked = true;
        } else {
            self.spiked = false;
        }
        // Keep the exponential term from running away between resets.
        v_next.clamp(-1000.0, 1000.0)
    }

    fn spiked(&self) -> bool {
        self.spiked
    }

    fn is_spiking(&self) -> bool {
        true
    }

    fn clear(&mut self) {
        self.w = 200.0;
        self.spiked = false;
    }
}
