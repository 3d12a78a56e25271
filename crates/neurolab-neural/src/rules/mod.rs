// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Neuron Update Rule Architecture
//!
//! This module defines the rule system that lets the engine drive multiple
//! neuron types (Linear, Additive, Izhikevich, AdEx, ...) behind one fixed
//! capability surface.
//!
//! A rule is a state machine over its own parameters and internal fast/slow
//! variables. Each tick the engine hands it a [`RuleInput`] snapshot of the
//! pre-tick world and the rule returns the next activation, which the engine
//! writes to the neuron's *buffer*. Rules never write activations; the
//! double-buffer commit is owned by the scheduler.
//!
//! ## Adding a New Rule
//!
//! 1. Create `src/rules/your_rule.rs`
//! 2. Implement `UpdateRule`
//! 3. Add a variant to `NeuronRule`
//! 4. Add tests

pub mod additive;
pub mod adex;
pub mod binary;
pub mod decay;
pub mod fitzhugh_nagumo;
pub mod hodgkin_huxley;
pub mod integrate_and_fire;
pub mod izhikevich;
pub mod linear;
pub mod morris_lecar;
pub mod sigmoidal;
pub mod spiking_threshold;

pub use additive::AdditiveRule;
pub use adex::AdExRule;
pub use binary::BinaryRule;
pub use decay::DecayRule;
pub use fitzhugh_nagumo::FitzhughNagumoRule;
pub use hodgkin_huxley::HodgkinHuxleyRule;
pub use integrate_and_fire::IntegrateAndFireRule;
pub use izhikevich::IzhikevichRule;
pub use linear::LinearRule;
pub use morris_lecar::MorrisLecarRule;
pub use sigmoidal::{SigmoidalRule, SquashFunction};
pub use spiking_threshold::SpikingThresholdRule;

use serde::{Deserialize, Serialize};

/// How a rule advances simulation time.
///
/// `Discrete` rules treat one update as one iteration; `Continuous` rules
/// integrate an ODE step of length `time_step`. A network containing at
/// least one continuous rule runs on continuous time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeType {
    Discrete,
    Continuous,
}

/// One sampled fan-in edge: raw strength and the source's pre-tick
/// activation. Used by rules that squash per-source instead of consuming
/// the pre-summed weighted input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanInSample {
    pub strength: f64,
    pub source_activation: f64,
}

/// Per-tick view of a neuron handed to its rule.
///
/// Everything here is pre-tick state: `weighted` already includes synaptic
/// delay and spike-response processing plus the one-shot `external` input,
/// so the common case is `rule output = f(activation, weighted)`.
#[derive(Debug, Clone)]
pub struct RuleInput<'a> {
    /// Pre-tick activation of the neuron being updated.
    pub activation: f64,
    /// One-shot external/coupling-injected input (cleared by the engine
    /// after every tick).
    pub external: f64,
    /// Σ transmitted synapse values + `external`.
    pub weighted: f64,
    /// Raw (strength, source activation) pairs of the fan-in.
    pub fan_in: &'a [FanInSample],
    /// Clipping bounds of the neuron being updated.
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Simulation time of the tick being computed (the scheduler advances
    /// time before running rules).
    pub time: f64,
    /// Integration step for continuous rules.
    pub time_step: f64,
}

impl RuleInput<'_> {
    /// Clip a value to the neuron's bounds.
    pub fn clip(&self, value: f64) -> f64 {
        value.min(self.upper_bound).max(self.lower_bound)
    }
}

/// Bound and step defaults a rule applies to its neuron on attachment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleDefaults {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub increment: f64,
}

impl Default for RuleDefaults {
    fn default() -> Self {
        Self {
            lower_bound: -1.0,
            upper_bound: 1.0,
            increment: 0.1,
        }
    }
}

/// The fixed capability surface every neuron rule implements.
pub trait UpdateRule {
    /// Human-readable rule name.
    fn name(&self) -> &'static str;

    /// Whether this rule advances discrete or continuous time.
    fn time_type(&self) -> TimeType;

    /// Bound/step defaults applied once when a neuron adopts this rule.
    fn defaults(&self) -> RuleDefaults {
        RuleDefaults::default()
    }

    /// Compute the next activation from the pre-tick view. The return
    /// value goes to the neuron's buffer, never directly to `activation`.
    fn update(&mut self, input: &RuleInput<'_>) -> f64;

    /// Whether the most recent `update` produced an action potential.
    fn spiked(&self) -> bool {
        false
    }

    /// Capability marker: spiking rules get spike responders attached to
    /// their outgoing synapses.
    fn is_spiking(&self) -> bool {
        false
    }

    /// Reset internal fast/slow variables (adaptation currents, gating
    /// variables) without touching tunable parameters.
    fn clear(&mut self) {}
}

/// Tagged union over the concrete rule catalog.
///
/// Deep copy is `Clone`: every variant (including any embedded
/// [`crate::Randomizer`]) is a value type, so copied rules never alias
/// state with the original.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NeuronRule {
    Linear(LinearRule),
    Binary(BinaryRule),
    Sigmoidal(SigmoidalRule),
    Additive(AdditiveRule),
    Decay(DecayRule),
    Izhikevich(IzhikevichRule),
    IntegrateAndFire(IntegrateAndFireRule),
    AdEx(AdExRule),
    HodgkinHuxley(HodgkinHuxleyRule),
    MorrisLecar(MorrisLecarRule),
    FitzhughNagumo(FitzhughNagumoRule),
    SpikingThreshold(SpikingThresholdRule),
}

impl NeuronRule {
    fn inner(&self) -> &dyn UpdateRule {
        match self {
            NeuronRule::Linear(r) => r,
            NeuronRule::Binary(r) => r,
            NeuronRule::Sigmoidal(r) => r,
            NeuronRule::Additive(r) => r,
            NeuronRule::Decay(r) => r,
            NeuronRule::Izhikevich(r) => r,
            NeuronRule::IntegrateAndFire(r) => r,
            NeuronRule::AdEx(r) => r,
            NeuronRule::HodgkinHuxley(r) => r,
            NeuronRule::MorrisLecar(r) => r,
            NeuronRule::FitzhughNagumo(r) => r,
            NeuronRule::SpikingThreshold(r) => r,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn UpdateRule {
        match self {
            NeuronRule::Linear(r) => r,
            NeuronRule::Binary(r) => r,
            NeuronRule::Sigmoidal(r) => r,
            NeuronRule::Additive(r) => r,
            NeuronRule::Decay(r) => r,
            NeuronRule::Izhikevich(r) => r,
            NeuronRule::IntegrateAndFire(r) => r,
            NeuronRule::AdEx(r) => r,
            NeuronRule::HodgkinHuxley(r) => r,
            NeuronRule::MorrisLecar(r) => r,
            NeuronRule::FitzhughNagumo(r) => r,
            NeuronRule::SpikingThreshold(r) => r,
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner().name()
    }

    pub fn time_type(&self) -> TimeType {
        self.inner().time_type()
    }

    pub fn defaults(&self) -> RuleDefaults {
        self.inner().defaults()
    }

    pub fn update(&mut self, input: &RuleInput<'_>) -> f64 {
        self.inner_mut().update(input)
    }

    pub fn spiked(&self) -> bool {
        self.inner().spiked()
    }

    pub fn is_spiking(&self) -> bool {
        self.inner().is_spiking()
    }

    pub fn clear(&mut self) {
        self.inner_mut().clear()
    }
}

impl Default for NeuronRule {
    fn default() -> Self {
        NeuronRule::Linear(LinearRule::default())
    }
}

#[cfg(test)]
pub(crate) fn input_with_weighted(activation: f64, weighted: f64) -> RuleInput<'static> {
    RuleInput {
        activation,
        external: 0.0,
        weighted,
        fan_in: &[],
        lower_bound: -1.0,
        upper_bound: 1.0,
        time: 0.0,
        time_step: 0.1,
    }
}
