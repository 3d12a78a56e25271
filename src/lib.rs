// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Neurolab - Neural Network Simulation Core
//!
//! Neurolab is a headless neural-network simulation toolkit: biologically
//! inspired neuron and synapse update rules, a tick scheduler over a
//! hierarchical network graph, and a typed producer/consumer coupling
//! layer for wiring heterogeneous simulation components together.
//!
//! ## Quick Start
//!
//! ```rust
//! use neurolab::prelude::*;
//!
//! // Build a two-neuron network.
//! let mut network = RootNetwork::new();
//! let input = network.add_neuron(Neuron::new(NeuronRule::Linear(LinearRule::default())));
//! let output = network.add_neuron(Neuron::new(NeuronRule::Linear(LinearRule::default())));
//! let synapse = network.connect(input, output).unwrap();
//! network.synapse_mut(synapse).unwrap().set_strength(0.5);
//!
//! // Drive the input and tick the network.
//! network.neuron_mut(input).unwrap().set_input_value(1.0);
//! network.update();
//! network.update();
//! assert!((network.neuron(output).unwrap().activation() - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Crates
//!
//! - [`neural`]: update-rule state machines (neuron models, synapse
//!   learning rules, spike responders, noise sources)
//! - [`engine`]: neuron/synapse arenas, the network tree and the tick
//!   scheduler
//! - [`coupling`]: attribute containers, producers/consumers, couplings
//!   and the workspace updater
//!
//! The [`component`] module bridges the engine into the coupling layer:
//! a [`NetworkComponent`](component::NetworkComponent) exposes its
//! neurons' activations as coupling endpoints.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use neurolab_coupling as coupling;
pub use neurolab_engine as engine;
pub use neurolab_neural as neural;

pub mod component;

/// The common import surface for simulations and scripts.
pub mod prelude {
    pub use crate::component::{NetworkComponent, SharedNetwork};
    pub use neurolab_coupling::{
        consumer, consumers_from, producer, producers_from, AttributeContainer, AttributeKind,
        AttributeValue, Coupling, CouplingError, CouplingManager, UpdateMode, Workspace,
        WorkspaceComponent, WorkspaceConfig, WorkspaceUpdater,
    };
    pub use neurolab_engine::{
        NetworkError, NetworkEvent, NetworkListener, Neuron, NeuronId, RootNetwork, Synapse,
        SynapseId, SynapseTemplate, UpdateMethod,
    };
    pub use neurolab_neural::rules::{
        AdExRule, AdditiveRule, BinaryRule, DecayRule, FitzhughNagumoRule, HodgkinHuxleyRule,
        IntegrateAndFireRule, IzhikevichRule, LinearRule, MorrisLecarRule, NeuronRule,
        SigmoidalRule, SpikingThresholdRule, TimeType,
    };
    pub use neurolab_neural::synapse_rules::{
        HebbianRule, OjaRule, StaticRule, StdpRule, SynapseRule,
    };
    pub use neurolab_neural::{NoiseDistribution, Randomizer, SpikeResponder};
}
