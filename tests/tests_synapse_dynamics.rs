// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Synapse-level integration: delay FIFOs, spike responders, learning and
//! deep copies.

use neurolab::prelude::*;

fn linear() -> Neuron {
    Neuron::new(NeuronRule::Linear(LinearRule::default()))
}

fn pinned(value: f64) -> Neuron {
    let mut neuron = linear();
    neuron.force_set_activation(value);
    neuron.set_clamped(true);
    neuron
}

#[test]
fn test_delay_fifo_holds_back_step_input() {
    // delay = 3, source pinned at 1.0, strength 2.0: the target sees
    // zeros for the first three ticks, then strength * 1.
    let mut net = RootNetwork::new();
    let source = net.add_neuron(pinned(1.0));
    let target = net.add_neuron(linear());
    let sid = net.connect(source, target).unwrap();
    {
        let synapse = net.synapse_mut(sid).unwrap();
        synapse.set_strength(2.0);
        synapse.set_delay(3);
    }

    let mut seen = Vec::new();
    for _ in 0..5 {
        net.update();
        seen.push(net.neuron(target).unwrap().activation());
    }
    // Linear clips at the default upper bound of 1.0.
    assert_eq!(seen, vec![0.0, 0.0, 0.0, 1.0, 1.0]);
}

#[test]
fn test_responder_attached_iff_source_rule_spikes() {
    let mut net = RootNetwork::new();
    let source = net.add_neuron(Neuron::new(NeuronRule::Izhikevich(
        IzhikevichRule::default(),
    )));
    let target = net.add_neuron(linear());
    let sid = net.connect(source, target).unwrap();
    assert!(net.synapse(sid).unwrap().responder().is_some());

    // Swapping in a non-spiking rule detaches the responder...
    net.set_neuron_rule(source, NeuronRule::Linear(LinearRule::default()))
        .unwrap();
    assert!(net.synapse(sid).unwrap().responder().is_none());

    // ...and a spiking rule brings it back.
    net.set_neuron_rule(
        source,
        NeuronRule::SpikingThreshold(SpikingThresholdRule::default()),
    )
    .unwrap();
    assert!(net.synapse(sid).unwrap().responder().is_some());
}

#[test]
fn test_spike_travels_through_responder() {
    let mut net = RootNetwork::new();
    let source = net.add_neuron(Neuron::new(NeuronRule::SpikingThreshold(
        SpikingThresholdRule::default(),
    )));
    let target = net.add_neuron(linear());
    net.connect(source, target).unwrap();

    // Tick 1: the drive makes the source spike.
    net.neuron_mut(source).unwrap().set_input_value(1.0);
    net.update();
    assert!(net.neuron(source).unwrap().spiked());
    assert_eq!(net.neuron(target).unwrap().activation(), 0.0);

    // Tick 2: the responder pulse (jump height 1.0) reaches the target.
    net.update();
    assert_eq!(net.neuron(target).unwrap().activation(), 1.0);

    // Later ticks decay rather than cut off.
    net.update();
    let decayed = net.neuron(target).unwrap().activation();
    assert!(decayed > 0.0 && decayed < 1.0);
}

#[test]
fn test_hebbian_growth_is_clipped_by_engine() {
    let mut net = RootNetwork::new();
    let source = net.add_neuron(pinned(1.0));
    let target = net.add_neuron(linear());
    let mut synapse = Synapse::with_rule(
        source,
        target,
        SynapseRule::Hebbian(HebbianRule { learning_rate: 5.0 }),
    );
    synapse.set_upper_bound(2.0);
    let sid = net.add_synapse(synapse).unwrap();

    for _ in 0..10 {
        net.update();
    }
    // rate * src * tgt would have blown far past 2.0; the network-level
    // bound check caps it every tick.
    assert_eq!(net.synapse(sid).unwrap().strength(), 2.0);
}

#[test]
fn test_stdp_potentiates_pre_before_post() {
    let mut net = RootNetwork::new();
    let source = net.add_neuron(Neuron::new(NeuronRule::SpikingThreshold(
        SpikingThresholdRule::default(),
    )));
    let target = net.add_neuron(Neuron::new(NeuronRule::SpikingThreshold(
        SpikingThresholdRule::default(),
    )));
    let synapse = Synapse::with_rule(source, target, SynapseRule::Stdp(StdpRule::default()));
    let sid = net.add_synapse(synapse).unwrap();
    let initial = net.synapse(sid).unwrap().strength();

    // Tick 1: source spikes. Tick 2: the responder pulse drives the
    // target over threshold, a pre-before-post pairing.
    net.neuron_mut(source).unwrap().set_input_value(1.0);
    net.update();
    net.update();
    assert!(net.neuron(target).unwrap().spiked());
    assert!(net.synapse(sid).unwrap().strength() > initial);
}

#[test]
fn test_deep_copy_rule_is_independent() {
    // Copying a neuron's rule must copy parameters and noise state, with
    // no aliasing back to the original.
    let mut rule = AdditiveRule {
        add_noise: true,
        noise: Randomizer::normal(0.0, 1.0, 77),
        ..Default::default()
    };
    let mut copy = rule.clone();
    copy.lambda = 9.9;
    assert_eq!(rule.lambda, 1.4);

    // Same captured PRNG state, independent streams.
    let a = rule.noise.sample();
    let b = copy.noise.sample();
    assert_eq!(a, b);

    // Advancing the copy's stream leaves the original untouched.
    let _ = copy.noise.sample();
    let next_original = rule.noise.sample();
    let expected = {
        let mut fresh = Randomizer::normal(0.0, 1.0, 77);
        fresh.sample();
        fresh.sample()
    };
    assert_eq!(next_original, expected);
}

#[test]
fn test_template_synapses_stamp_out_copies() {
    let mut net = RootNetwork::new();
    let a = net.add_neuron(pinned(1.0));
    let b = net.add_neuron(linear());
    let c = net.add_neuron(linear());

    let template = SynapseTemplate {
        strength: 0.25,
        delay: 1,
        ..Default::default()
    };
    let s1 = net.add_synapse(template.instantiate(a, b)).unwrap();
    let s2 = net.add_synapse(template.instantiate(a, c)).unwrap();
    assert_eq!(net.synapse(s1).unwrap().strength(), 0.25);
    assert_eq!(net.synapse(s2).unwrap().delay(), 1);
    assert_ne!(s1, s2);
}
