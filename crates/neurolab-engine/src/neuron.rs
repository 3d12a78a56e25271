// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! The neuron entity.
//!
//! A neuron owns its scalar state (activation, buffer, one-shot input),
//! clipping bounds, scheduling priority and exactly one update rule.
//! Topology is held as ordered synapse-id lists; the synapses themselves
//! live in the root network's arena and are shared between their source's
//! fan-out and their target's fan-in.

use neurolab_neural::rules::{NeuronRule, TimeType};
use serde::{Deserialize, Serialize};

use crate::ids::{NetworkId, NeuronId, SynapseId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neuron {
    pub(crate) id: NeuronId,
    pub(crate) parent: NetworkId,
    /// The main state variable.
    activation: f64,
    /// Next-activation slot written during a rule update and committed in a
    /// separate pass.
    buffer: f64,
    /// External/coupling-injected value, consumed once per tick then reset.
    input_value: f64,
    lower_bound: f64,
    upper_bound: f64,
    increment: f64,
    /// Smaller values update first under priority-based scheduling.
    update_priority: i32,
    /// While set, activation writes through `set_activation` are no-ops.
    clamped: bool,
    label: String,
    rule: NeuronRule,
    pub(crate) fan_in: Vec<SynapseId>,
    pub(crate) fan_out: Vec<SynapseId>,
    /// Whether the last committed update was a spike.
    spiked: bool,
    /// Time of the most recent committed spike.
    last_spike: Option<f64>,
}

impl Neuron {
    /// Create a detached neuron with the given rule. Bound and increment
    /// defaults come from the rule; the id is assigned when the neuron is
    /// attached to a network.
    pub fn new(rule: NeuronRule) -> Self {
        let defaults = rule.defaults();
        Self {
            id: NeuronId(0),
            parent: NetworkId(0),
            activation: 0.0,
            buffer: 0.0,
            input_value: 0.0,
            lower_bound: defaults.lower_bound,
            upper_bound: defaults.upper_bound,
            increment: defaults.increment,
            update_priority: 0,
            clamped: false,
            label: String::new(),
            rule,
            fan_in: Vec::new(),
            fan_out: Vec::new(),
            spiked: false,
            last_spike: None,
        }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn parent(&self) -> NetworkId {
        self.parent
    }

    pub fn activation(&self) -> f64 {
        self.activation
    }

    /// Set the activation; a no-op while the neuron is clamped.
    pub fn set_activation(&mut self, value: f64) {
        if !self.clamped {
            self.activation = value;
        }
    }

    /// Set the activation regardless of clamping (editing-layer escape
    /// hatch).
    pub fn force_set_activation(&mut self, value: f64) {
        self.activation = value;
    }

    pub fn buffer(&self) -> f64 {
        self.buffer
    }

    pub fn set_buffer(&mut self, value: f64) {
        self.buffer = value;
    }

    /// Commit the buffered value (and the rule's spike flag) as this tick's
    /// activation.
    pub(crate) fn commit_buffer(&mut self, time: f64) {
        self.set_activation(self.buffer);
        self.spiked = self.rule.spiked();
        if self.spiked {
            self.last_spike = Some(time);
        }
    }

    pub fn input_value(&self) -> f64 {
        self.input_value
    }

    /// Inject a one-shot external input; consumed by the next update and
    /// then cleared to zero by the scheduler.
    pub fn set_input_value(&mut self, value: f64) {
        self.input_value = value;
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn set_lower_bound(&mut self, value: f64) {
        self.lower_bound = value;
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn set_upper_bound(&mut self, value: f64) {
        self.upper_bound = value;
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn set_increment(&mut self, value: f64) {
        self.increment = value;
    }

    pub fn update_priority(&self) -> i32 {
        self.update_priority
    }

    /// Raw priority write; [`crate::RootNetwork::set_update_priority`]
    /// keeps the sorted list in sync.
    pub(crate) fn set_update_priority_value(&mut self, priority: i32) {
        self.update_priority = priority;
    }

    pub fn is_clamped(&self) -> bool {
        self.clamped
    }

    pub fn set_clamped(&mut self, clamped: bool) {
        self.clamped = clamped;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn rule(&self) -> &NeuronRule {
        &self.rule
    }

    pub(crate) fn rule_mut(&mut self) -> &mut NeuronRule {
        &mut self.rule
    }

    /// Swap in a new rule, re-applying its bound/step defaults. Topology is
    /// untouched; responder re-initialization on fan-out synapses is the
    /// root network's job.
    pub(crate) fn replace_rule(&mut self, rule: NeuronRule) {
        let defaults = rule.defaults();
        self.lower_bound = defaults.lower_bound;
        self.upper_bound = defaults.upper_bound;
        self.increment = defaults.increment;
        self.rule = rule;
        self.spiked = false;
        self.last_spike = None;
    }

    pub fn time_type(&self) -> TimeType {
        self.rule.time_type()
    }

    pub fn spiked(&self) -> bool {
        self.spiked
    }

    pub fn last_spike(&self) -> Option<f64> {
        self.last_spike
    }

    pub fn fan_in(&self) -> &[SynapseId] {
        &self.fan_in
    }

    pub fn fan_out(&self) -> &[SynapseId] {
        &self.fan_out
    }

    /// Clip a value to this neuron's bounds.
    pub fn clip(&self, value: f64) -> f64 {
        value.min(self.upper_bound).max(self.lower_bound)
    }

    /// Clip the current activation to the bounds.
    pub fn check_bounds(&mut self) {
        self.activation = self.clip(self.activation);
    }

    /// Step the activation up by the increment, saturating at the upper
    /// bound.
    pub fn increment_activation(&mut self) {
        if self.activation < self.upper_bound {
            self.force_set_activation((self.activation + self.increment).min(self.upper_bound));
        }
    }

    /// Step the activation down by the increment, saturating at the lower
    /// bound.
    pub fn decrement_activation(&mut self) {
        if self.activation > self.lower_bound {
            self.force_set_activation((self.activation - self.increment).max(self.lower_bound));
        }
    }

    /// Zero the activation and the rule's transient variables.
    pub fn clear(&mut self) {
        self.force_set_activation(0.0);
        self.buffer = 0.0;
        self.input_value = 0.0;
        self.spiked = false;
        self.last_spike = None;
        self.rule.clear();
    }
}

impl Default for Neuron {
    fn default() -> Self {
        Self::new(NeuronRule::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurolab_neural::rules::{IzhikevichRule, LinearRule};

    #[test]
    fn test_clamped_blocks_set_activation() {
        let mut n = Neuron::default();
        n.set_activation(0.5);
        assert_eq!(n.activation(), 0.5);
        n.set_clamped(true);
        n.set_activation(0.9);
        assert_eq!(n.activation(), 0.5);
        n.force_set_activation(0.9);
        assert_eq!(n.activation(), 0.9);
    }

    #[test]
    fn test_rule_defaults_applied_on_creation() {
        let n = Neuron::new(NeuronRule::Izhikevich(IzhikevichRule::default()));
        assert_eq!(n.lower_bound(), -90.0);
        assert_eq!(n.upper_bound(), 40.0);
    }

    #[test]
    fn test_replace_rule_resets_bounds_keeps_label() {
        let mut n = Neuron::new(NeuronRule::Linear(LinearRule::default()));
        n.set_label("input cell");
        n.replace_rule(NeuronRule::Izhikevich(IzhikevichRule::default()));
        assert_eq!(n.upper_bound(), 40.0);
        assert_eq!(n.label(), "input cell");
        assert_eq!(n.rule().name(), "Izhikevich");
    }

    #[test]
    fn test_increment_saturates_at_bounds() {
        let mut n = Neuron::default();
        for _ in 0..100 {
            n.increment_activation();
        }
        assert_eq!(n.activation(), n.upper_bound());
        for _ in 0..100 {
            n.decrement_activation();
        }
        assert_eq!(n.activation(), n.lower_bound());
    }
}
