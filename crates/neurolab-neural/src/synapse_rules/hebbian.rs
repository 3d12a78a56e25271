// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Plain Hebbian learning: strength grows with coactivation.

use serde::{Deserialize, Serialize};

use super::{LearningRule, SynapseRuleInput};

/// `delta = learning_rate * source * target`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HebbianRule {
    pub learning_rate: f64,
}

impl Default for HebbianRule {
    fn default() -> Self {
        Self { learning_rate: 0.1 }
    }
}

impl LearningRule for HebbianRule {
    fn name(&self) -> &'static str {
        "Hebbian"
    }

    fn update(&mut self, input: &SynapseRuleInput) -> f64 {
        input.strength
            + self.learning_rate * input.source_activation * input.target_activation
    }
}
