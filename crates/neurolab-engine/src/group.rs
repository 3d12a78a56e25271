// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Groups: labeled collections of neurons and synapses spanning the
//! network hierarchy. Groups track membership only; they carry no update
//! logic of their own. A group emptied by entity deletion is removed by
//! the root network.

use serde::{Deserialize, Serialize};

use crate::ids::{GroupId, NeuronId, SynapseId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub(crate) id: GroupId,
    label: String,
    pub(crate) neurons: Vec<NeuronId>,
    pub(crate) synapses: Vec<SynapseId>,
}

impl Group {
    pub(crate) fn new(id: GroupId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            neurons: Vec::new(),
            synapses: Vec::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn neurons(&self) -> &[NeuronId] {
        &self.neurons
    }

    pub fn synapses(&self) -> &[SynapseId] {
        &self.synapses
    }

    pub fn contains_neuron(&self, id: NeuronId) -> bool {
        self.neurons.contains(&id)
    }

    pub fn contains_synapse(&self, id: SynapseId) -> bool {
        self.synapses.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty() && self.synapses.is_empty()
    }

    pub(crate) fn remove_neuron(&mut self, id: NeuronId) {
        self.neurons.retain(|n| *n != id);
    }

    pub(crate) fn remove_synapse(&mut self, id: SynapseId) {
        self.synapses.retain(|s| *s != id);
    }
}
