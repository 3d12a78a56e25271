// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Oja's rule: Hebbian growth with a normalizing forgetting term.

use serde::{Deserialize, Serialize};

use super::{LearningRule, SynapseRuleInput};

/// `delta = learning_rate * (source*target - target^2 * strength / normalization)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OjaRule {
    pub learning_rate: f64,
    pub normalization: f64,
}

impl Default for OjaRule {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            normalization: 1.0,
        }
    }
}

impl LearningRule for OjaRule {
    fn name(&self) -> &'static str {
        "Oja"
    }

    fn update(&mut self, input: &SynapseRuleInput) -> f64 {
        let hebb = input.source_activation * input.target_activation;
        let forget =
            input.target_activation * input.target_activation * input.strength / self.normalization;
        input.strength + self.learning_rate * (hebb - forget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synapse_rules::quiet_input;

    #[test]
    fn test_growth_saturates() {
        // With src = tgt = 1 the fixed point is strength = normalization.
        let mut rule = OjaRule::default();
        let mut strength = 0.0;
        for _ in 0..500 {
            let mut input = quiet_input(strength);
            input.source_activation = 1.0;
            input.target_activation = 1.0;
            strength = rule.update(&input);
        }
        assert!((strength - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_step() {
        let mut rule = OjaRule::default();
        let mut input = quiet_input(0.5);
        input.source_activation = 1.0;
        input.target_activation = 0.5;
        // delta = 0.1 * (0.5 - 0.25*0.5) = 0.0375
        assert!((rule.update(&input) - 0.5375).abs() < 1e-12);
    }
}
