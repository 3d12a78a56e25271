// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! The synapse entity.
//!
//! A synapse references its endpoints by id and owns the transmission
//! machinery: strength, clipping bounds, an optional axonal-delay FIFO and
//! an optional spike responder (attached iff the source rule is spiking).

use std::collections::VecDeque;

use neurolab_neural::responders::SpikeResponder;
use neurolab_neural::synapse_rules::SynapseRule;
use serde::{Deserialize, Serialize};

use crate::ids::{NetworkId, NeuronId, SynapseId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synapse {
    pub(crate) id: SynapseId,
    pub(crate) parent: NetworkId,
    pub(crate) source: NeuronId,
    pub(crate) target: NeuronId,
    strength: f64,
    lower_bound: f64,
    upper_bound: f64,
    increment: f64,
    /// Transmission delay in ticks; 0 = direct.
    delay: usize,
    /// FIFO of past values, length = delay, zero-prefilled on `set_delay`.
    delay_queue: VecDeque<f64>,
    /// Present iff the source neuron's rule is spiking.
    responder: Option<SpikeResponder>,
    rule: SynapseRule,
}

impl Synapse {
    /// Construct a synapse between two neurons with the default (static)
    /// learning rule. The endpoints are registered when the synapse is
    /// added to a network.
    pub fn new(source: NeuronId, target: NeuronId) -> Self {
        Self::with_rule(source, target, SynapseRule::default())
    }

    pub fn with_rule(source: NeuronId, target: NeuronId, rule: SynapseRule) -> Self {
        Self {
            id: SynapseId(0),
            parent: NetworkId(0),
            source,
            target,
            strength: 1.0,
            lower_bound: -10.0,
            upper_bound: 10.0,
            increment: 1.0,
            delay: 0,
            delay_queue: VecDeque::new(),
            responder: None,
            rule,
        }
    }

    pub fn id(&self) -> SynapseId {
        self.id
    }

    pub fn parent(&self) -> NetworkId {
        self.parent
    }

    pub fn source(&self) -> NeuronId {
        self.source
    }

    pub fn target(&self) -> NeuronId {
        self.target
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn set_strength(&mut self, strength: f64) {
        self.strength = strength;
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

    pub fn rule(&self) -> &SynapseRule {
        &self.rule
    }

    pub(crate) fn rule_mut(&mut self) -> &mut SynapseRule {
        &mut self.rule
    }

    pub fn set_rule(&mut self, rule: SynapseRule) {
        self.rule = rule;
    }

    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Configure the transmission delay. The FIFO is rebuilt and
    /// zero-prefilled, so the first `delay` transmissions after the call
    /// yield zero.
    pub fn set_delay(&mut self, delay: usize) {
        self.delay = delay;
        self.delay_queue.clear();
        if delay > 0 {
            self.delay_queue.resize(delay, 0.0);
        }
    }

    pub fn responder(&self) -> Option<&SpikeResponder> {
        self.responder.as_ref()
    }

    /// Attach or detach the spike responder depending on whether the
    /// source rule is spiking. Called by the root network whenever the
    /// synapse is added or the source's rule changes.
    pub(crate) fn init_responder(&mut self, source_is_spiking: bool) {
        if source_is_spiking {
            if self.responder.is_none() {
                self.responder = Some(SpikeResponder::default());
            }
        } else {
            self.responder = None;
        }
    }

    /// Compute the value this synapse delivers to its target this tick.
    ///
    /// Spiking source: the responder is advanced with the source's
    /// committed spike flag and its decayed pulse scales the strength.
    /// Non-spiking source: plain `activation * strength`. With a delay
    /// configured, the fresh value enters the FIFO and the oldest entry is
    /// delivered instead.
    pub(crate) fn transmit(
        &mut self,
        source_activation: f64,
        source_spiked: bool,
        time_step: f64,
    ) -> f64 {
        let val = match &mut self.responder {
            Some(responder) => self.strength * responder.update(source_spiked, time_step),
            None => self.strength * source_activation,
        };

        if self.delay == 0 {
            val
        } else {
            self.delay_queue.push_back(val);
            self.delay_queue.pop_front().unwrap_or(0.0)
        }
    }

    /// Clip the strength to the bounds. Invoked by the network-level
    /// post-update pass, not by learning rules.
    pub fn check_bounds(&mut self) {
        self.strength = self.clip(self.strength);
    }

    pub fn clip(&self, value: f64) -> f64 {
        value.min(self.upper_bound).max(self.lower_bound)
    }

    /// Step the strength up by the increment, saturating at the upper
    /// bound.
    pub fn increment_weight(&mut self) {
        if self.strength < self.upper_bound {
            self.strength = (self.strength + self.increment).min(self.upper_bound);
        }
    }

    /// Step the strength down by the increment, saturating at the lower
    /// bound.
    pub fn decrement_weight(&mut self) {
        if self.strength > self.lower_bound {
            self.strength = (self.strength - self.increment).max(self.lower_bound);
        }
    }
}

/// A synapse with no endpoints: rule and parameters used as a prototype
/// for batch connection building.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynapseTemplate {
    pub strength: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub increment: f64,
    pub delay: usize,
    pub rule: SynapseRule,
}

impl SynapseTemplate {
    /// Give the template proper endpoint references.
    pub fn instantiate(&self, source: NeuronId, target: NeuronId) -> Synapse {
        let mut synapse = Synapse::with_rule(source, target, self.rule.clone());
        synapse.strength = self.strength;
        synapse.lower_bound = self.lower_bound;
        synapse.upper_bound = self.upper_bound;
        synapse.increment = self.increment;
        synapse.set_delay(self.delay);
        synapse
    }
}

impl Default for SynapseTemplate {
    fn default() -> Self {
        Self {
            strength: 1.0,
            lower_bound: -10.0,
            upper_bound: 10.0,
            increment: 1.0,
            delay: 0,
            rule: SynapseRule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_transmission() {
        let mut s = Synapse::new(NeuronId(1), NeuronId(2));
        s.set_strength(0.5);
        assert_eq!(s.transmit(0.8, false, 1.0), 0.4);
    }

    #[test]
    fn test_delay_fifo_step_input() {
        let mut s = Synapse::new(NeuronId(1), NeuronId(2));
        s.set_strength(2.0);
        s.set_delay(3);
        // Source steps from 0 to 1; the target sees zeros for the first
        // three queries, then the delayed step.
        let inputs = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let mut seen = Vec::new();
        for x in inputs {
            seen.push(s.transmit(x, false, 1.0));
        }
        assert_eq!(seen, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_set_delay_refills_with_zeros() {
        let mut s = Synapse::new(NeuronId(1), NeuronId(2));
        s.set_delay(2);
        s.transmit(1.0, false, 1.0);
        s.set_delay(2);
        assert_eq!(s.transmit(1.0, false, 1.0), 0.0);
    }

    #[test]
    fn test_responder_gates_transmission() {
        let mut s = Synapse::new(NeuronId(1), NeuronId(2));
        s.init_responder(true);
        s.set_strength(3.0);
        // No spike yet: the responder sits at baseline zero even though
        // the source activation is high.
        assert_eq!(s.transmit(100.0, false, 1.0), 0.0);
        // On a spike the pulse jumps and the synapse delivers it scaled.
        assert_eq!(s.transmit(100.0, true, 1.0), 3.0);
        // And decays afterwards.
        let decayed = s.transmit(100.0, false, 1.0);
        assert!(decayed > 0.0 && decayed < 3.0);
    }

    #[test]
    fn test_check_bounds_clips() {
        let mut s = Synapse::new(NeuronId(1), NeuronId(2));
        s.set_strength(99.0);
        s.check_bounds();
        assert_eq!(s.strength(), 10.0);
    }

    #[test]
    fn test_template_instantiation() {
        let template = SynapseTemplate {
            strength: 0.25,
            delay: 2,
            ..Default::default()
        };
        let s = template.instantiate(NeuronId(3), NeuronId(4));
        assert_eq!(s.source(), NeuronId(3));
        assert_eq!(s.target(), NeuronId(4));
        assert_eq!(s.strength(), 0.25);
        assert_eq!(s.delay(), 2);
    }
}
