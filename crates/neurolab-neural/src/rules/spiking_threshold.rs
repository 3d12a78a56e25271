// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Memoryless threshold spiker: fires whenever the weighted input exceeds
//! the threshold, with no membrane state between iterations.

use serde::{Deserialize, Serialize};

use super::{RuleDefaults, RuleInput, TimeType, UpdateRule};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpikingThresholdRule {
    pub threshold: f64,
    #[serde(skip)]
    spiked: bool,
}

impl Default for SpikingThresholdRule {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            spiked: false,
        }
    }
}

impl UpdateRule for SpikingThresholdRule {
    fn name(&self) -> &'static str {
        "Spiking threshold"
    }

    fn time_type(&self) -> TimeType {
        TimeType::Discrete
    }

    fn defaults(&self) -> RuleDefaults {
        RuleDefaults {
            lower_bound: 0.0,
            upper_bound: 1.0,
            increment: 0.1,
        }
    }

    fn update(&mut self, input: &RuleInput<'_>) -> f64 {
        if input.weighted > self.threshold {
            self.spiked = true;
            1.0
        } else {
            self.spiked = false;
            0.0
        }
    }

    fn spiked(&self) -> bool {
        self.spiked
    }

    fn is_spiking(&self) -> bool {
        true
    }

    fn clear(&mut self) {
        self.spiked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::input_with_weighted;

    #[test]
    fn test_fires_above_threshold_only() {
        let mut rule = SpikingThresholdRule::default();
        assert_eq!(rule.update(&input_with_weighted(0.0, 0.6)), 1.0);
        assert!(rule.spiked());
        assert_eq!(rule.update(&input_with_weighted(1.0, 0.4)), 0.0);
        assert!(!rule.spiked());
    }
}
