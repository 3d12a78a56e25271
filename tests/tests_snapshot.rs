// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Persistence contract: a network rebuilt from a serialized capture
//! behaves identically to the original.

use neurolab::engine::NetworkSnapshot;
use neurolab::prelude::*;

fn build() -> RootNetwork {
    let mut net = RootNetwork::new();
    net.set_time_step(0.1);
    let source = {
        let mut neuron = Neuron::new(NeuronRule::Linear(LinearRule::default()));
        neuron.force_set_activation(0.8);
        neuron.set_clamped(true);
        neuron.set_label("drive");
        net.add_neuron(neuron)
    };
    let middle = net.add_neuron(Neuron::new(NeuronRule::Additive(AdditiveRule::default())));
    let spiker = net.add_neuron(Neuron::new(NeuronRule::Izhikevich(IzhikevichRule::default())));
    let sid = net.connect(source, middle).unwrap();
    net.synapse_mut(sid).unwrap().set_strength(0.5);
    let mut learned = Synapse::with_rule(
        middle,
        spiker,
        SynapseRule::Hebbian(HebbianRule::default()),
    );
    learned.set_delay(2);
    net.add_synapse(learned).unwrap();
    net
}

#[test]
fn test_restored_network_replays_the_original_trajectory() {
    let original = build();
    let json = serde_json::to_string(&original.snapshot()).unwrap();
    let capture: NetworkSnapshot = serde_json::from_str(&json).unwrap();
    let restored = RootNetwork::from_snapshot(&capture).unwrap();

    let mut a = original;
    let mut b = restored;
    for _ in 0..25 {
        a.update();
        b.update();
    }
    let left = a.activations();
    let right = b.activations();
    assert_eq!(left.len(), right.len());
    for (x, y) in left.iter().zip(&right) {
        assert!((x - y).abs() < 1e-12, "diverged: {x} vs {y}");
    }
    assert!((a.time() - b.time()).abs() < 1e-12);
}

#[test]
fn test_capture_stores_topology_by_id_reference() {
    let net = build();
    let capture = net.snapshot();
    assert_eq!(capture.neurons.len(), 3);
    assert_eq!(capture.synapses.len(), 2);
    // Endpoints are plain id references, resolvable without any live
    // graph.
    for synapse in &capture.synapses {
        assert!(capture.neurons.iter().any(|n| n.id == synapse.source));
        assert!(capture.neurons.iter().any(|n| n.id == synapse.target));
    }
    let labeled = capture.neurons.iter().find(|n| n.label == "drive").unwrap();
    assert!(labeled.clamped);
}
