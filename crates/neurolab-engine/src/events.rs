// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Network change notifications.
//!
//! Observers register a [`NetworkListener`] on the root network; every
//! method has a default empty body so implementations override only what
//! they care about. Listeners receive ids, never references, so they can
//! hold their own handle to the network.

use crate::ids::{GroupId, NetworkId, NeuronId, SynapseId};

/// Structural and per-tick events fired by a root network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkEvent {
    NetworkChanged,
    UpdateMethodChanged,
    NeuronAdded(NeuronId),
    NeuronRemoved(NeuronId),
    NeuronChanged(NeuronId),
    SynapseAdded(SynapseId),
    SynapseRemoved(SynapseId),
    SynapseChanged(SynapseId),
    SubnetworkAdded(NetworkId),
    SubnetworkRemoved(NetworkId),
    GroupAdded(GroupId),
    GroupRemoved(GroupId),
}

/// Observer of network events.
pub trait NetworkListener: Send + Sync {
    /// The whole network finished one update tick.
    fn network_changed(&mut self) {}
    fn update_method_changed(&mut self) {}
    fn neuron_added(&mut self, _id: NeuronId) {}
    fn neuron_removed(&mut self, _id: NeuronId) {}
    fn neuron_changed(&mut self, _id: NeuronId) {}
    fn synapse_added(&mut self, _id: SynapseId) {}
    fn synapse_removed(&mut self, _id: SynapseId) {}
    fn synapse_changed(&mut self, _id: SynapseId) {}
    fn subnetwork_added(&mut self, _id: NetworkId) {}
    fn subnetwork_removed(&mut self, _id: NetworkId) {}
    fn group_added(&mut self, _id: GroupId) {}
    fn group_removed(&mut self, _id: GroupId) {}
}

pub(crate) fn dispatch(listener: &mut dyn NetworkListener, event: NetworkEvent) {
    match event {
        NetworkEvent::NetworkChanged => listener.network_changed(),
        NetworkEvent::UpdateMethodChanged => listener.update_method_changed(),
        NetworkEvent::NeuronAdded(id) => listener.neuron_added(id),
        NetworkEvent::NeuronRemoved(id) => listener.neuron_removed(id),
        NetworkEvent::NeuronChanged(id) => listener.neuron_changed(id),
        NetworkEvent::SynapseAdded(id) => listener.synapse_added(id),
        NetworkEvent::SynapseRemoved(id) => listener.synapse_removed(id),
        NetworkEvent::SynapseChanged(id) => listener.synapse_changed(id),
        NetworkEvent::SubnetworkAdded(id) => listener.subnetwork_added(id),
        NetworkEvent::SubnetworkRemoved(id) => listener.subnetwork_removed(id),
        NetworkEvent::GroupAdded(id) => listener.group_added(id),
        NetworkEvent::GroupRemoved(id) => listener.group_removed(id),
    }
}
