// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Network capture and reconstruction.
//!
//! A [`NetworkSnapshot`] records the public state of every entity by id;
//! topology is stored as id references. Reconstruction is two-pass:
//! network nodes and neurons are rebuilt first, then synapse endpoints are
//! resolved once every neuron exists, so a capture never requires the rest
//! of the graph to be live while it is being read.

use neurolab_neural::rules::NeuronRule;
use neurolab_neural::synapse_rules::SynapseRule;
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::ids::{GroupId, NetworkId, NeuronId, SynapseId};
use crate::network::Network;
use crate::neuron::Neuron;
use crate::root::{RootNetwork, UpdateMethod};
use crate::synapse::Synapse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkNodeSnapshot {
    pub id: u64,
    /// `None` marks the root node.
    pub parent: Option<u64>,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuronSnapshot {
    pub id: u64,
    pub parent: u64,
    pub activation: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub increment: f64,
    pub update_priority: i32,
    pub clamped: bool,
    pub label: String,
    pub rule: NeuronRule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynapseSnapshot {
    pub id: u64,
    pub parent: u64,
    pub source: u64,
    pub target: u64,
    pub strength: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub increment: f64,
    pub delay: usize,
    pub rule: SynapseRule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub id: u64,
    pub label: String,
    pub neurons: Vec<u64>,
    pub synapses: Vec<u64>,
}

/// Complete capture of a root network's public state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub time: f64,
    pub time_step: f64,
    pub update_method: UpdateMethod,
    /// Depth-first, root node first.
    pub networks: Vec<NetworkNodeSnapshot>,
    /// Flat (recursive) order.
    pub neurons: Vec<NeuronSnapshot>,
    pub synapses: Vec<SynapseSnapshot>,
    pub groups: Vec<GroupSnapshot>,
}

impl RootNetwork {
    /// Capture the network's public state.
    pub fn snapshot(&self) -> NetworkSnapshot {
        let mut networks = vec![NetworkNodeSnapshot {
            id: self.root.0,
            parent: None,
            label: self
                .networks
                .get(&self.root)
                .map(|n| n.label().to_owned())
                .unwrap_or_default(),
        }];
        for id in self.flat_network_ids() {
            if let Some(node) = self.networks.get(&id) {
                networks.push(NetworkNodeSnapshot {
                    id: id.0,
                    parent: node.parent().map(|p| p.0),
                    label: node.label().to_owned(),
                });
            }
        }

        let neurons = self
            .flat_neuron_ids()
            .into_iter()
            .filter_map(|id| self.neuron(id))
            .map(|n| NeuronSnapshot {
                id: n.id().0,
                parent: n.parent().0,
                activation: n.activation(),
                lower_bound: n.lower_bound(),
                upper_bound: n.upper_bound(),
                increment: n.increment(),
                update_priority: n.update_priority(),
                clamped: n.is_clamped(),
                label: n.label().to_owned(),
                rule: n.rule().clone(),
            })
            .collect();

        let synapses = self
            .flat_synapse_ids()
            .into_iter()
            .filter_map(|id| self.synapse(id))
            .map(|s| SynapseSnapshot {
                id: s.id().0,
                parent: s.parent().0,
                source: s.source().0,
                target: s.target().0,
                strength: s.strength(),
                lower_bound: s.lower_bound(),
                upper_bound: s.upper_bound(),
                increment: s.increment(),
                delay: s.delay(),
                rule: s.rule().clone(),
            })
            .collect();

        let groups = self
            .group_order
            .iter()
            .filter_map(|id| self.groups.get(id))
            .map(|g| GroupSnapshot {
                id: g.id().0,
                label: g.label().to_owned(),
                neurons: g.neurons().iter().map(|n| n.0).collect(),
                synapses: g.synapses().iter().map(|s| s.0).collect(),
            })
            .collect();

        NetworkSnapshot {
            time: self.time,
            time_step: self.time_step,
            update_method: self.update_method,
            networks,
            neurons,
            synapses,
            groups,
        }
    }

    /// Rebuild a network from a capture. Neurons are reconstructed first;
    /// synapse endpoints are resolved in a second pass and any dangling id
    /// reference is an error.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<RootNetwork> {
        let mut net = RootNetwork::new();
        net.networks.clear();

        // Pass 0: the network tree.
        let mut root = None;
        for node in &snapshot.networks {
            let id = NetworkId(node.id);
            net.network_ids.reserve(node.id);
            let mut network = Network::new(id, node.parent.map(NetworkId));
            network.set_label(node.label.clone());
            net.networks.insert(id, network);
            if node.parent.is_none() {
                root = Some(id);
            }
        }
        let root = root.ok_or(NetworkError::UnresolvedReference {
            kind: "root network",
            id: 0,
        })?;
        net.root = root;
        for node in &snapshot.networks {
            if let Some(parent) = node.parent {
                let parent = NetworkId(parent);
                if !net.networks.contains_key(&parent) {
                    return Err(NetworkError::UnresolvedReference {
                        kind: "network",
                        id: parent.0,
                    });
                }
                if let Some(entry) = net.networks.get_mut(&parent) {
                    entry.subnetworks.push(NetworkId(node.id));
                }
            }
        }

        // Pass 1: neurons.
        for capture in &snapshot.neurons {
            let parent = NetworkId(capture.parent);
            if !net.networks.contains_key(&parent) {
                return Err(NetworkError::UnresolvedReference {
                    kind: "network",
                    id: capture.parent,
                });
            }
            let id = NeuronId(capture.id);
            net.neuron_ids.reserve(capture.id);
            let mut neuron = Neuron::new(capture.rule.clone());
            neuron.id = id;
            neuron.parent = parent;
            neuron.set_lower_bound(capture.lower_bound);
            neuron.set_upper_bound(capture.upper_bound);
            neuron.set_increment(capture.increment);
            neuron.set_update_priority_value(capture.update_priority);
            neuron.set_label(capture.label.clone());
            neuron.force_set_activation(capture.activation);
            neuron.set_clamped(capture.clamped);
            if let Some(node) = net.networks.get_mut(&parent) {
                node.neurons.push(id);
            }
            net.neurons.insert(id, neuron);
        }

        // Pass 2: synapses, now that every endpoint exists.
        for capture in &snapshot.synapses {
            let source = NeuronId(capture.source);
            let target = NeuronId(capture.target);
            for (endpoint, raw) in [(source, capture.source), (target, capture.target)] {
                if !net.neurons.contains_key(&endpoint) {
                    return Err(NetworkError::UnresolvedReference {
                        kind: "neuron",
                        id: raw,
                    });
                }
            }
            let parent = NetworkId(capture.parent);
            if !net.networks.contains_key(&parent) {
                return Err(NetworkError::UnresolvedReference {
                    kind: "network",
                    id: capture.parent,
                });
            }
            let id = SynapseId(capture.id);
            net.synapse_ids.reserve(capture.id);
            let mut synapse = Synapse::with_rule(source, target, capture.rule.clone());
            synapse.id = id;
            synapse.parent = parent;
            synapse.set_strength(capture.strength);
            synapse.set_lower_bound(capture.lower_bound);
            synapse.set_upper_bound(capture.upper_bound);
            synapse.set_increment(capture.increment);
            synapse.set_delay(capture.delay);
            let spiking = net
                .neurons
                .get(&source)
                .is_some_and(|n| n.rule().is_spiking());
            synapse.init_responder(spiking);
            if let Some(neuron) = net.neurons.get_mut(&source) {
                neuron.fan_out.push(id);
            }
            if let Some(neuron) = net.neurons.get_mut(&target) {
                neuron.fan_in.push(id);
            }
            if let Some(node) = net.networks.get_mut(&parent) {
                node.synapses.push(id);
            }
            net.synapses.insert(id, synapse);
        }

        // Groups: membership restricted to entities that resolved.
        for capture in &snapshot.groups {
            let id = GroupId(capture.id);
            net.group_ids.reserve(capture.id);
            let mut group = crate::group::Group::new(id, capture.label.clone());
            group.neurons = capture
                .neurons
                .iter()
                .map(|n| NeuronId(*n))
                .filter(|n| net.neurons.contains_key(n))
                .collect();
            group.synapses = capture
                .synapses
                .iter()
                .map(|s| SynapseId(*s))
                .filter(|s| net.synapses.contains_key(s))
                .collect();
            net.groups.insert(id, group);
            net.group_order.push(id);
        }

        net.time_step = snapshot.time_step;
        net.update_method = snapshot.update_method;
        // Derive the time type directly so restoring does not reset the
        // captured clock.
        net.time_type = if net
            .neurons
            .values()
            .any(|n| n.time_type() == neurolab_neural::rules::TimeType::Continuous)
        {
            neurolab_neural::rules::TimeType::Continuous
        } else {
            neurolab_neural::rules::TimeType::Discrete
        };
        net.time = snapshot.time;
        net.refresh_priority_list();
        Ok(net)
    }
}
