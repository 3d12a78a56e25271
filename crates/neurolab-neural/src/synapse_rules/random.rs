// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Random synapse: resamples its strength from an embedded noise source
//! every update. Mostly useful as a perturbation baseline.

use serde::{Deserialize, Serialize};

use super::{LearningRule, SynapseRuleInput};
use crate::noise::Randomizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomRule {
    pub randomizer: Randomizer,
}

impl Default for RandomRule {
    fn default() -> Self {
        Self {
            randomizer: Randomizer::uniform(-1.0, 1.0, 0),
        }
    }
}

impl LearningRule for RandomRule {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn update(&mut self, _input: &SynapseRuleInput) -> f64 {
        self.randomizer.sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synapse_rules::quiet_input;

    #[test]
    fn test_resamples_within_distribution() {
        let mut rule = RandomRule::default();
        for _ in 0..100 {
            let s = rule.update(&quiet_input(0.0));
            assert!((-1.0..1.0).contains(&s));
        }
    }

    #[test]
    fn test_cloned_rule_replays_stream() {
        let rule = RandomRule::default();
        let mut a = rule.clone();
        let mut b = rule;
        assert_eq!(a.update(&quiet_input(0.0)), b.update(&quiet_input(0.0)));
    }
}
