// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pair-based spike-timing-dependent plasticity.
//!
//! ```text
//! post spike at t, pre spike at t_pre:  delta = +rate * w_plus  * e^(-(t - t_pre)/tau_plus)
//! pre spike at t, post spike at t_post: delta = -rate * w_minus * e^(-(t - t_post)/tau_minus)
//! ```
//!
//! Both endpoints must be driven by spiking rules for this rule to do
//! anything; with no spike history the strength passes through unchanged.

use serde::{Deserialize, Serialize};

use super::{LearningRule, SynapseRuleInput};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StdpRule {
    /// Potentiation window time constant.
    pub tau_plus: f64,
    /// Depression window time constant.
    pub tau_minus: f64,
    /// Peak potentiation amplitude.
    pub w_plus: f64,
    /// Peak depression amplitude.
    pub w_minus: f64,
    pub learning_rate: f64,
}

impl Default for StdpRule {
    fn default() -> Self {
        Self {
            tau_plus: 30.0,
            tau_minus: 60.0,
            w_plus: 10.0,
            w_minus: 5.0,
            learning_rate: 0.01,
        }
    }
}

impl LearningRule for StdpRule {
    fn name(&self) -> &'static str {
        "STDP"
    }

    fn update(&mut self, input: &SynapseRuleInput) -> f64 {
        let mut strength = input.strength;

        // Pre-before-post: potentiate on the post spike.
        if input.target_spiked {
            if let Some(t_pre) = input.source_last_spike {
                let dt = input.time - t_pre;
                strength += self.learning_rate * self.w_plus * (-dt / self.tau_plus).exp();
            }
        }

        // Post-before-pre: depress on the pre spike.
        if input.source_spiked {
            if let Some(t_post) = input.target_last_spike {
                let dt = input.time - t_post;
                strength -= self.learning_rate * self.w_minus * (-dt / self.tau_minus).exp();
            }
        }

        strength
    }
}
