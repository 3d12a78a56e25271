// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Network tree nodes.
//!
//! A [`Network`] is one node of the root's network/subnetwork tree. It
//! holds the ids of its direct children (neurons, synapses, subnetworks);
//! the entities themselves live in the root network's arenas, so tree
//! nodes stay cheap to create and prune.

use serde::{Deserialize, Serialize};

use crate::ids::{NetworkId, NeuronId, SynapseId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub(crate) id: NetworkId,
    /// `None` only for the root node.
    pub(crate) parent: Option<NetworkId>,
    label: String,
    pub(crate) neurons: Vec<NeuronId>,
    pub(crate) synapses: Vec<SynapseId>,
    pub(crate) subnetworks: Vec<NetworkId>,
}

impl Network {
    pub(crate) fn new(id: NetworkId, parent: Option<NetworkId>) -> Self {
        Self {
            id,
            parent,
            label: String::new(),
            neurons: Vec::new(),
            synapses: Vec::new(),
            subnetworks: Vec::new(),
        }
    }

    pub fn id(&self) -> NetworkId {
        self.id
    }

    pub fn parent(&self) -> Option<NetworkId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Direct (immediate-children) neuron list.
    pub fn neurons(&self) -> &[NeuronId] {
        &self.neurons
    }

    /// Direct synapse list.
    pub fn synapses(&self) -> &[SynapseId] {
        &self.synapses
    }

    /// Direct subnetwork list.
    pub fn subnetworks(&self) -> &[NetworkId] {
        &self.subnetworks
    }

    /// True when no neurons and no subnetworks remain; empty non-root
    /// nodes are pruned by the root network.
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty() && self.subnetworks.is_empty()
    }
}
