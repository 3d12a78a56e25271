// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Synapse Update Rules
//!
//! Weight-learning state machines. A synapse rule computes the *raw* next
//! strength from the pre-tick endpoint activations; bound clipping is the
//! engine's post-update pass, never the rule's concern, so learning rules
//! stay free of bound bookkeeping.

pub mod hebbian;
pub mod oja;
pub mod random;
pub mod stdp;

pub use hebbian::HebbianRule;
pub use oja::OjaRule;
pub use random::RandomRule;
pub use stdp::StdpRule;

use serde::{Deserialize, Serialize};

/// Per-tick view of a synapse handed to its learning rule.
#[derive(Debug, Clone, Copy)]
pub struct SynapseRuleInput {
    pub strength: f64,
    pub source_activation: f64,
    pub target_activation: f64,
    /// Whether the endpoints spiked on this tick.
    pub source_spiked: bool,
    pub target_spiked: bool,
    /// Most recent spike times of the endpoints, if any.
    pub source_last_spike: Option<f64>,
    pub target_last_spike: Option<f64>,
    pub time: f64,
    pub time_step: f64,
}

/// The capability surface of a synapse learning rule.
pub trait LearningRule {
    fn name(&self) -> &'static str;

    /// Compute the raw (unclipped) next strength.
    fn update(&mut self, input: &SynapseRuleInput) -> f64;
}

/// Clamped synapse: strength only changes through explicit edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticRule;

impl LearningRule for StaticRule {
    fn name(&self) -> &'static str {
        "Static"
    }

    fn update(&mut self, input: &SynapseRuleInput) -> f64 {
        input.strength
    }
}

/// Tagged union over the synapse rule catalog. Deep copy is `Clone`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SynapseRule {
    Static(StaticRule),
    Hebbian(HebbianRule),
    Oja(OjaRule),
    Stdp(StdpRule),
    Random(RandomRule),
}

impl SynapseRule {
    fn inner_mut(&mut self) -> &mut dyn LearningRule {
        match self {
            SynapseRule::Static(r) => r,
            SynapseRule::Hebbian(r) => r,
            SynapseRule::Oja(r) => r,
            SynapseRule::Stdp(r) => r,
            SynapseRule::Random(r) => r,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SynapseRule::Static(_) => "Static",
            SynapseRule::Hebbian(_) => "Hebbian",
            SynapseRule::Oja(_) => "Oja",
            SynapseRule::Stdp(_) => "STDP",
            SynapseRule::Random(_) => "Random",
        }
    }

    pub fn update(&mut self, input: &SynapseRuleInput) -> f64 {
        self.inner_mut().update(input)
    }
}

impl Default for SynapseRule {
    fn default() -> Self {
        SynapseRule::Static(StaticRule)
    }
}

#[cfg(test)]
pub(crate) fn quiet_input(strength: f64) -> SynapseRuleInput {
    SynapseRuleInput {
        strength,
        source_activation: 0.0,
        target_activation: 0.0,
        source_spiked: false,
        target_spiked: false,
        source_last_spike: None,
        target_last_spike: None,
        time: 0.0,
        time_step: 1.0,
    }
}
