// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Coupling subsystem integration: tick consistency, type safety and the
//! workspace updater driving real networks.

use neurolab::coupling::{container_ref, AttributeAccess, AttributeDescriptor, ContainerRef};
use neurolab::prelude::*;

/// Free-standing scalar cell with a typed text field, for wiring tests.
struct Cell {
    name: String,
    level: f64,
    caption: String,
}

impl Cell {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            level: 0.0,
            caption: String::new(),
        }
    }
}

impl AttributeContainer for Cell {
    fn container_name(&self) -> String {
        self.name.clone()
    }

    fn descriptors(&self) -> Vec<AttributeDescriptor> {
        vec![
            AttributeDescriptor::new("level", AttributeKind::Double, AttributeAccess::ReadWrite),
            AttributeDescriptor::new("caption", AttributeKind::Text, AttributeAccess::ReadWrite),
        ]
    }

    fn read(&self, key: &str) -> Option<AttributeValue> {
        match key {
            "level" => Some(AttributeValue::Double(self.level)),
            "caption" => Some(AttributeValue::Text(self.caption.clone())),
            _ => None,
        }
    }

    fn write(&mut self, key: &str, value: AttributeValue) {
        match (key, value) {
            ("level", AttributeValue::Double(v)) => self.level = v,
            ("caption", AttributeValue::Text(v)) => self.caption = v,
            _ => {}
        }
    }
}

fn level(container: &ContainerRef) -> f64 {
    container
        .read()
        .read("level")
        .and_then(|v| v.as_double())
        .unwrap_or(f64::NAN)
}

#[test]
fn test_type_mismatch_is_rejected_and_try_variant_skips() {
    let a = container_ref(Cell::new("a"));
    let b = container_ref(Cell::new("b"));
    let mut manager = CouplingManager::new();

    let double_producer = producer(&a, "level").unwrap();
    let text_consumer = consumer(&b, "caption").unwrap();
    let err = manager
        .couple(double_producer.clone(), text_consumer.clone())
        .unwrap_err();
    assert!(matches!(err, CouplingError::TypeMismatch { .. }));
    assert!(manager.is_empty());

    assert!(!manager.try_couple(double_producer, text_consumer));
    assert!(manager.is_empty());
}

#[test]
fn test_couplings_are_insensitive_to_flush_feedback() {
    // c1 writes into a's level; c2 reads a's level. If buffering and
    // flushing interleaved per coupling, c2 would leak c1's same-tick
    // write. Two strict phases mean every consumer sees pre-flush values.
    let a = container_ref(Cell::new("a"));
    let b = container_ref(Cell::new("b"));
    let c = container_ref(Cell::new("c"));
    a.write().write("level", AttributeValue::Double(10.0));
    b.write().write("level", AttributeValue::Double(99.0));

    let mut manager = CouplingManager::new();
    // Registered first, so a per-coupling flush would run before c2's
    // buffer fill.
    manager
        .couple(
            producer(&b, "level").unwrap(),
            consumer(&a, "level").unwrap(),
        )
        .unwrap();
    manager
        .couple(
            producer(&a, "level").unwrap(),
            consumer(&c, "level").unwrap(),
        )
        .unwrap();

    manager.update_all();
    assert_eq!(level(&a), 99.0);
    // c received a's value as it stood when the buffer phase ran.
    assert_eq!(level(&c), 10.0);

    // Next tick the new value propagates normally.
    manager.update_all();
    assert_eq!(level(&c), 99.0);
}

#[test]
fn test_fan_out_consumers_agree_within_a_tick() {
    let source = container_ref(Cell::new("source"));
    let sinks: Vec<ContainerRef> = (0..4)
        .map(|i| container_ref(Cell::new(&format!("sink{i}"))))
        .collect();
    source.write().write("level", AttributeValue::Double(2.5));

    let mut manager = CouplingManager::new();
    let producers = vec![producer(&source, "level").unwrap()];
    let consumers: Vec<_> = sinks.iter().map(|s| consumer(s, "level").unwrap()).collect();
    manager.couple_one_to_many(&producers, &consumers).unwrap();

    manager.update_all();
    for sink in &sinks {
        assert_eq!(level(sink), 2.5);
    }
}

#[test]
fn test_workspace_couples_networks_end_to_end() {
    // Component A holds a clamped neuron at 0.7; its activation is
    // coupled into a neuron of component B.
    let mut source_net = RootNetwork::new();
    let source_neuron = {
        let mut neuron = Neuron::new(NeuronRule::Linear(LinearRule::default()));
        neuron.force_set_activation(0.7);
        neuron.set_clamped(true);
        source_net.add_neuron(neuron)
    };
    let mut sink_net = RootNetwork::new();
    let sink_neuron = sink_net.add_neuron(Neuron::new(NeuronRule::Linear(LinearRule::default())));

    let mut source_component = NetworkComponent::new("source", source_net);
    let mut sink_component = NetworkComponent::new("sink", sink_net);
    let source_handle = source_component.neuron_container(source_neuron);
    let sink_handle = sink_component.neuron_container(sink_neuron);
    let sink_shared = sink_component.network();

    let mut workspace = Workspace::new();
    workspace.add_component(source_component);
    workspace.add_component(sink_component);
    workspace
        .coupling_manager_mut()
        .couple(
            producer(&source_handle, "activation").unwrap(),
            consumer(&sink_handle, "activation").unwrap(),
        )
        .unwrap();

    let mut updater = WorkspaceUpdater::new(workspace, UpdateMode::SingleThreaded);

    // Tick 1 flushes 0.7 into the sink's input value; tick 2's network
    // update consumes it.
    updater.update();
    assert_eq!(sink_shared.read().neuron(sink_neuron).unwrap().input_value(), 0.7);
    updater.update();
    assert_eq!(sink_shared.read().neuron(sink_neuron).unwrap().activation(), 0.7);
}

#[test]
fn test_uncoupled_input_decays_to_zero() {
    let mut sink_net = RootNetwork::new();
    let sink_neuron = sink_net.add_neuron(Neuron::new(NeuronRule::Linear(LinearRule::default())));
    let mut sink_component = NetworkComponent::new("sink", sink_net);
    let sink_handle = sink_component.neuron_container(sink_neuron);
    let sink_shared = sink_component.network();

    let driver = container_ref(Cell::new("driver"));
    driver.write().write("level", AttributeValue::Double(0.4));

    let mut workspace = Workspace::new();
    workspace.add_component(sink_component);
    workspace
        .coupling_manager_mut()
        .couple(
            producer(&driver, "level").unwrap(),
            consumer(&sink_handle, "activation").unwrap(),
        )
        .unwrap();

    let mut updater = WorkspaceUpdater::new(workspace, UpdateMode::SingleThreaded);
    updater.update();
    updater.update();
    assert_eq!(
        sink_shared.read().neuron(sink_neuron).unwrap().activation(),
        0.4
    );

    // Drop the coupling: the producer stops re-pushing. One more tick
    // consumes the input the final flush already delivered...
    updater.workspace_mut().coupling_manager_mut().clear();
    updater.update();
    // ...after which the external contribution silently drops to zero.
    updater.update();
    assert_eq!(
        sink_shared.read().neuron(sink_neuron).unwrap().activation(),
        0.0
    );
}

#[test]
fn test_parallel_updater_matches_single_threaded_result() {
    fn build() -> (Workspace, SharedNetwork, NeuronId) {
        let mut source_net = RootNetwork::new();
        let source_neuron = {
            let mut neuron = Neuron::new(NeuronRule::Linear(LinearRule::default()));
            neuron.force_set_activation(0.3);
            neuron.set_clamped(true);
            source_net.add_neuron(neuron)
        };
        let mut sink_net = RootNetwork::new();
        let sink_neuron =
            sink_net.add_neuron(Neuron::new(NeuronRule::Linear(LinearRule::default())));

        let mut source_component = NetworkComponent::new("source", source_net);
        let mut sink_component = NetworkComponent::new("sink", sink_net);
        let source_handle = source_component.neuron_container(source_neuron);
        let sink_handle = sink_component.neuron_container(sink_neuron);
        let shared = sink_component.network();

        let mut workspace = Workspace::new();
        workspace.add_component(source_component);
        workspace.add_component(sink_component);
        workspace
            .coupling_manager_mut()
            .couple(
                producer(&source_handle, "activation").unwrap(),
                consumer(&sink_handle, "activation").unwrap(),
            )
            .unwrap();
        (workspace, shared, sink_neuron)
    }

    let (workspace, single_net, single_id) = build();
    let mut single = WorkspaceUpdater::new(workspace, UpdateMode::SingleThreaded);
    for _ in 0..5 {
        single.update();
    }

    let (workspace, parallel_net, parallel_id) = build();
    let mut parallel = WorkspaceUpdater::new(workspace, UpdateMode::Parallel { threads: 2 });
    for _ in 0..5 {
        parallel.update();
    }

    assert_eq!(
        single_net.read().neuron(single_id).unwrap().activation(),
        parallel_net.read().neuron(parallel_id).unwrap().activation(),
    );
}

#[test]
fn test_unresolvable_attribute_reports_container_and_key() {
    let cell = container_ref(Cell::new("gauge"));
    let err = producer(&cell, "temperature").unwrap_err();
    assert_eq!(
        err.to_string(),
        "container 'gauge' declares no attribute 'temperature'"
    );
}
