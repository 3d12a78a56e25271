// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bridges a [`RootNetwork`] into the coupling layer.
//!
//! A [`NetworkComponent`] runs its network once per workspace tick and
//! exposes neurons as attribute containers: the activation attribute
//! produces the neuron's current activation and consumes into its
//! one-shot input value, so a coupled value enters the next update as
//! external input (and must be re-pushed every tick to persist).

use std::sync::Arc;

use parking_lot::RwLock;

use neurolab_coupling::{
    container_ref, AttributeAccess, AttributeContainer, AttributeDescriptor, AttributeKind,
    AttributeValue, ContainerRef, WorkspaceComponent,
};
use neurolab_engine::{NeuronId, RootNetwork};

/// A root network shared between its component, neuron handles and the
/// caller.
pub type SharedNetwork = Arc<RwLock<RootNetwork>>;

/// Workspace component wrapping a root network.
pub struct NetworkComponent {
    name: String,
    network: SharedNetwork,
    handles: Vec<(NeuronId, ContainerRef)>,
}

impl NetworkComponent {
    pub fn new(name: impl Into<String>, network: RootNetwork) -> Self {
        Self {
            name: name.into(),
            network: Arc::new(RwLock::new(network)),
            handles: Vec::new(),
        }
    }

    /// The shared network handle, for scripting and inspection.
    pub fn network(&self) -> SharedNetwork {
        self.network.clone()
    }

    /// Stable attribute container for one neuron. Handles are cached so
    /// coupling endpoint identity survives rediscovery.
    pub fn neuron_container(&mut self, neuron: NeuronId) -> ContainerRef {
        if let Some((_, handle)) = self.handles.iter().find(|(id, _)| *id == neuron) {
            return handle.clone();
        }
        let handle = container_ref(NeuronHandle {
            network: self.network.clone(),
            neuron,
        });
        self.handles.push((neuron, handle.clone()));
        handle
    }
}

impl WorkspaceComponent for NetworkComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self) {
        self.network.write().update();
    }

    fn containers(&self) -> Vec<ContainerRef> {
        self.handles.iter().map(|(_, h)| h.clone()).collect()
    }
}

/// Attribute container over one neuron of a shared network.
struct NeuronHandle {
    network: SharedNetwork,
    neuron: NeuronId,
}

impl AttributeContainer for NeuronHandle {
    fn container_name(&self) -> String {
        let network = self.network.read();
        match network.neuron(self.neuron) {
            Some(neuron) if !neuron.label().is_empty() => {
                format!("{} ({})", self.neuron, neuron.label())
            }
            _ => self.neuron.to_string(),
        }
    }

    fn descriptors(&self) -> Vec<AttributeDescriptor> {
        vec![
            AttributeDescriptor::new(
                "activation",
                AttributeKind::Double,
                AttributeAccess::ReadWrite,
            ),
            AttributeDescriptor::new(
                "upperBound",
                AttributeKind::Double,
                AttributeAccess::ReadWrite,
            ),
            AttributeDescriptor::new(
                "lowerBound",
                AttributeKind::Double,
                AttributeAccess::ReadWrite,
            ),
        ]
    }

    fn read(&self, key: &str) -> Option<AttributeValue> {
        let network = self.network.read();
        let neuron = network.neuron(self.neuron)?;
        match key {
            "activation" => Some(AttributeValue::Double(neuron.activation())),
            "upperBound" => Some(AttributeValue::Double(neuron.upper_bound())),
            "lowerBound" => Some(AttributeValue::Double(neuron.lower_bound())),
            _ => None,
        }
    }

    fn write(&mut self, key: &str, value: AttributeValue) {
        let AttributeValue::Double(value) = value else {
            return;
        };
        let mut network = self.network.write();
        let Some(neuron) = network.neuron_mut(self.neuron) else {
            return;
        };
        match key {
            // Consumed activation lands in the one-shot input value, the
            // way external drive enters a neuron.
            "activation" => neuron.set_input_value(value),
            "upperBound" => neuron.set_upper_bound(value),
            "lowerBound" => neuron.set_lower_bound(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurolab_coupling::{consumer, producer};
    use neurolab_neural::rules::{LinearRule, NeuronRule};
    use neurolab_engine::Neuron;

    fn linear() -> Neuron {
        Neuron::new(NeuronRule::Linear(LinearRule::default()))
    }

    #[test]
    fn test_neuron_handle_produces_activation() {
        let mut network = RootNetwork::new();
        let id = network.add_neuron(linear());
        network.neuron_mut(id).unwrap().force_set_activation(0.25);
        let mut component = NetworkComponent::new("net", network);
        let handle = component.neuron_container(id);
        let p = producer(&handle, "activation").unwrap();
        assert_eq!(p.value(), AttributeValue::Double(0.25));
    }

    #[test]
    fn test_neuron_handle_consumes_into_input_value() {
        let mut network = RootNetwork::new();
        let id = network.add_neuron(linear());
        let mut component = NetworkComponent::new("net", network);
        let handle = component.neuron_container(id);
        let c = consumer(&handle, "activation").unwrap();
        c.set_value(AttributeValue::Double(0.8));
        let shared = component.network();
        let network = shared.read();
        assert_eq!(network.neuron(id).unwrap().input_value(), 0.8);
        // The activation itself is untouched until the next tick.
        assert_eq!(network.neuron(id).unwrap().activation(), 0.0);
    }

    #[test]
    fn test_handles_are_stable() {
        let mut network = RootNetwork::new();
        let id = network.add_neuron(linear());
        let mut component = NetworkComponent::new("net", network);
        let first = component.neuron_container(id);
        let second = component.neuron_container(id);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(component.containers().len(), 1);
    }
}
