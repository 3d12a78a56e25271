// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Neurolab Neural Computation
//!
//! ALL update-rule state machines in one place:
//! - **Rules**: Neuron models (Linear, Additive, Izhikevich, AdEx, Hodgkin-Huxley, ...)
//! - **Synapse rules**: Weight-learning rules (Hebbian, Oja, STDP, ...)
//! - **Responders**: Spike responders turning discrete spikes into currents
//! - **Noise**: Seedable noise sources embedded in rules
//!
//! This crate has no dependency on the network engine. A rule is a pure
//! state machine: the engine assembles a [`RuleInput`] view of the pre-tick
//! world, the rule returns the next buffered value. Rules never touch
//! activations directly; committing the buffer is the engine's job.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod noise;
pub mod responders;
pub mod rules;
pub mod synapse_rules;

// Re-export the rule surface for convenience
pub use noise::{NoiseDistribution, Randomizer};
pub use responders::SpikeResponder;
pub use rules::{
    AdExRule, AdditiveRule, BinaryRule, DecayRule, FanInSample, FitzhughNagumoRule,
    HodgkinHuxleyRule, IntegrateAndFireRule, IzhikevichRule, LinearRule, MorrisLecarRule,
    NeuronRule, RuleDefaults, RuleInput, SigmoidalRule, SpikingThresholdRule, SquashFunction,
    TimeType, UpdateRule,
};
pub use synapse_rules::{
    HebbianRule, OjaRule, RandomRule, StaticRule, StdpRule, SynapseRule, SynapseRuleInput,
};
