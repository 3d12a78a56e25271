// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! The root network: entity arenas, the network tree and the tick
//! scheduler.
//!
//! ## Update disciplines
//!
//! ```text
//! Buffered:      all rules write buffers, then all buffers commit.
//!                No neuron observes a neighbor's same-tick activation.
//! PriorityBased: neurons update and commit one at a time in ascending
//!                priority order. Lower-priority neurons intentionally see
//!                higher-priority neurons' new activations within the tick.
//! Custom:        a user callback runs once per tick; the engine only
//!                invokes it.
//! ```
//!
//! Every tick: time advances first, the active discipline runs, the
//! network-changed notification fires, then every neuron's one-shot input
//! value is cleared to zero.

use ahash::AHashMap;
use tracing::{debug, trace};

use neurolab_neural::noise::Randomizer;
use neurolab_neural::rules::{FanInSample, NeuronRule, RuleInput, TimeType};
use neurolab_neural::synapse_rules::{SynapseRule, SynapseRuleInput};

use crate::error::{NetworkError, Result};
use crate::events::{self, NetworkEvent, NetworkListener};
use crate::group::Group;
use crate::ids::{GroupId, IdSource, NetworkId, NeuronId, SynapseId};
use crate::network::Network;
use crate::neuron::Neuron;
use crate::synapse::Synapse;

/// Scheduling discipline for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum UpdateMethod {
    #[default]
    Buffered,
    PriorityBased,
    Custom,
}

type CustomRule = Box<dyn FnMut(&mut RootNetwork) + Send + Sync>;

/// Top level of the network hierarchy. Owns the neuron/synapse arenas, the
/// tree of subnetworks, groups, simulation time and the scheduler.
pub struct RootNetwork {
    pub(crate) neurons: AHashMap<NeuronId, Neuron>,
    pub(crate) synapses: AHashMap<SynapseId, Synapse>,
    pub(crate) networks: AHashMap<NetworkId, Network>,
    pub(crate) groups: AHashMap<GroupId, Group>,
    pub(crate) group_order: Vec<GroupId>,
    pub(crate) root: NetworkId,
    pub(crate) neuron_ids: IdSource,
    pub(crate) synapse_ids: IdSource,
    pub(crate) network_ids: IdSource,
    pub(crate) group_ids: IdSource,
    /// Iterations (discrete) or elapsed model time (continuous).
    pub(crate) time: f64,
    pub(crate) time_step: f64,
    pub(crate) time_type: TimeType,
    pub(crate) update_method: UpdateMethod,
    /// Flat neuron list sorted ascending by update priority; maintained
    /// while the priority-based discipline is active.
    pub(crate) priority_sorted: Vec<NeuronId>,
    custom_rule: Option<CustomRule>,
    /// Temporarily suppress all neuron updates.
    clamp_neurons: bool,
    /// Temporarily suppress all weight learning.
    clamp_weights: bool,
    listeners: Vec<Box<dyn NetworkListener>>,
}

impl RootNetwork {
    pub fn new() -> Self {
        let mut network_ids = IdSource::default();
        let root = NetworkId(network_ids.next());
        let mut networks = AHashMap::new();
        networks.insert(root, Network::new(root, None));
        Self {
            neurons: AHashMap::new(),
            synapses: AHashMap::new(),
            networks,
            groups: AHashMap::new(),
            group_order: Vec::new(),
            root,
            neuron_ids: IdSource::default(),
            synapse_ids: IdSource::default(),
            network_ids,
            group_ids: IdSource::default(),
            time: 0.0,
            time_step: 0.1,
            time_type: TimeType::Discrete,
            update_method: UpdateMethod::Buffered,
            priority_sorted: Vec::new(),
            custom_rule: None,
            clamp_neurons: false,
            clamp_weights: false,
            listeners: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn set_time_step(&mut self, time_step: f64) {
        self.time_step = time_step;
    }

    /// Discrete iff no contained neuron rule is continuous.
    pub fn time_type(&self) -> TimeType {
        self.time_type
    }

    fn update_time(&mut self) {
        match self.time_type {
            TimeType::Continuous => self.time += self.time_step,
            TimeType::Discrete => self.time += 1.0,
        }
    }

    /// Recompute the time type from the contained rules; a change resets
    /// the clock.
    fn refresh_time_type(&mut self) {
        let continuous = self
            .neurons
            .values()
            .any(|n| n.time_type() == TimeType::Continuous);
        let next = if continuous {
            TimeType::Continuous
        } else {
            TimeType::Discrete
        };
        if next != self.time_type {
            self.time_type = next;
            self.time = 0.0;
        }
    }

    // ------------------------------------------------------------------
    // Scheduler
    // ------------------------------------------------------------------

    pub fn update_method(&self) -> UpdateMethod {
        self.update_method
    }

    /// Switch the update discipline. Switching to priority-based
    /// immediately (re)builds the sorted priority list.
    pub fn set_update_method(&mut self, method: UpdateMethod) {
        self.update_method = method;
        if method == UpdateMethod::PriorityBased {
            self.refresh_priority_list();
        }
        self.fire(NetworkEvent::UpdateMethodChanged);
    }

    /// Install a custom per-tick callback and switch to the custom
    /// discipline.
    pub fn set_custom_update_rule(
        &mut self,
        rule: impl FnMut(&mut RootNetwork) + Send + Sync + 'static,
    ) {
        self.custom_rule = Some(Box::new(rule));
        self.set_update_method(UpdateMethod::Custom);
    }

    /// The core tick. Advances time, runs the active discipline, notifies
    /// listeners, then clears all one-shot input values.
    pub fn update(&mut self) {
        trace!(time = self.time, method = ?self.update_method, "network update");

        self.update_time();

        match self.update_method {
            UpdateMethod::Buffered => {
                self.update_all_neurons();
                self.update_all_synapses();
            }
            UpdateMethod::PriorityBased => {
                self.update_neurons_by_priority();
                self.update_all_synapses();
            }
            UpdateMethod::Custom => {
                if let Some(mut rule) = self.custom_rule.take() {
                    rule(self);
                    if self.custom_rule.is_none() {
                        self.custom_rule = Some(rule);
                    }
                }
            }
        }

        self.fire(NetworkEvent::NetworkChanged);
        self.clear_inputs();
    }

    /// Two-pass buffered neuron update: every rule sees only pre-tick
    /// activations, whatever the iteration order.
    fn update_all_neurons(&mut self) {
        if self.clamp_neurons {
            return;
        }
        let ids = self.flat_neuron_ids();
        for &id in &ids {
            self.write_buffer(id);
        }
        let time = self.time;
        for &id in &ids {
            if let Some(neuron) = self.neurons.get_mut(&id) {
                neuron.commit_buffer(time);
            }
        }
    }

    /// Priority-ordered update with immediate commit: each neuron's new
    /// activation is visible to every later (higher priority value)
    /// neuron in the same tick.
    fn update_neurons_by_priority(&mut self) {
        if self.clamp_neurons {
            return;
        }
        let order = self.priority_sorted.clone();
        let time = self.time;
        for id in order {
            self.write_buffer(id);
            if let Some(neuron) = self.neurons.get_mut(&id) {
                neuron.commit_buffer(time);
            }
        }
    }

    /// Run one neuron's rule against the current state and store the
    /// result in its buffer. Transmitting synapses advance their delay
    /// FIFOs and responders here, exactly once per tick.
    fn write_buffer(&mut self, id: NeuronId) {
        let Some(neuron) = self.neurons.get(&id) else {
            return;
        };
        let activation = neuron.activation();
        let external = neuron.input_value();
        let lower_bound = neuron.lower_bound();
        let upper_bound = neuron.upper_bound();
        let fan_count = neuron.fan_in.len();

        let dt = self.time_step;
        let mut samples: Vec<FanInSample> = Vec::with_capacity(fan_count);
        let mut weighted = external;

        for k in 0..fan_count {
            let sid = match self.neurons.get(&id) {
                Some(n) => n.fan_in[k],
                None => return,
            };
            let Some(synapse) = self.synapses.get(&sid) else {
                continue;
            };
            let source = synapse.source;
            let (src_activation, src_spiked) = self
                .neurons
                .get(&source)
                .map(|n| (n.activation(), n.spiked()))
                .unwrap_or((0.0, false));
            let Some(synapse) = self.synapses.get_mut(&sid) else {
                continue;
            };
            samples.push(FanInSample {
                strength: synapse.strength(),
                source_activation: src_activation,
            });
            weighted += synapse.transmit(src_activation, src_spiked, dt);
        }

        let time = self.time;
        let Some(neuron) = self.neurons.get_mut(&id) else {
            return;
        };
        let input = RuleInput {
            activation,
            external,
            weighted,
            fan_in: &samples,
            lower_bound,
            upper_bound,
            time,
            time_step: dt,
        };
        let next = neuron.rule_mut().update(&input);
        neuron.set_buffer(next);
    }

    /// Synapse learning pass: rules compute raw strengths, the engine
    /// clips to bounds. No buffering: weight updates do not read other
    /// weights.
    fn update_all_synapses(&mut self) {
        if self.clamp_weights {
            return;
        }
        let ids = self.flat_synapse_ids();
        let time = self.time;
        let dt = self.time_step;
        for sid in ids {
            let Some(synapse) = self.synapses.get(&sid) else {
                continue;
            };
            let (source, target, strength) = (synapse.source, synapse.target, synapse.strength());
            let (src_act, src_spiked, src_last) = self
                .neurons
                .get(&source)
                .map(|n| (n.activation(), n.spiked(), n.last_spike()))
                .unwrap_or((0.0, false, None));
            let (tgt_act, tgt_spiked, tgt_last) = self
                .neurons
                .get(&target)
                .map(|n| (n.activation(), n.spiked(), n.last_spike()))
                .unwrap_or((0.0, false, None));
            let input = SynapseRuleInput {
                strength,
                source_activation: src_act,
                target_activation: tgt_act,
                source_spiked: src_spiked,
                target_spiked: tgt_spiked,
                source_last_spike: src_last,
                target_last_spike: tgt_last,
                time,
                time_step: dt,
            };
            let Some(synapse) = self.synapses.get_mut(&sid) else {
                continue;
            };
            let raw = synapse.rule_mut().update(&input);
            synapse.set_strength(raw);
            synapse.check_bounds();
        }
    }

    /// Clear the one-shot input values, which otherwise linger and keep
    /// feeding neurons that are no longer coupled.
    fn clear_inputs(&mut self) {
        for neuron in self.neurons.values_mut() {
            neuron.set_input_value(0.0);
        }
    }

    pub(crate) fn refresh_priority_list(&mut self) {
        if self.update_method != UpdateMethod::PriorityBased {
            return;
        }
        let mut list = self.flat_neuron_ids();
        list.sort_by_key(|id| self.neurons.get(id).map(|n| n.update_priority()).unwrap_or(0));
        self.priority_sorted = list;
    }

    /// The current priority ordering (meaningful under the priority-based
    /// discipline).
    pub fn priority_order(&self) -> &[NeuronId] {
        &self.priority_sorted
    }

    pub fn set_update_priority(&mut self, id: NeuronId, priority: i32) -> Result<()> {
        let neuron = self
            .neurons
            .get_mut(&id)
            .ok_or(NetworkError::NeuronNotFound(id))?;
        neuron.set_update_priority_value(priority);
        self.refresh_priority_list();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Clamp toggles
    // ------------------------------------------------------------------

    pub fn clamp_neurons(&self) -> bool {
        self.clamp_neurons
    }

    pub fn set_clamp_neurons(&mut self, clamp: bool) {
        self.clamp_neurons = clamp;
    }

    pub fn clamp_weights(&self) -> bool {
        self.clamp_weights
    }

    pub fn set_clamp_weights(&mut self, clamp: bool) {
        self.clamp_weights = clamp;
    }

    // ------------------------------------------------------------------
    // Neurons
    // ------------------------------------------------------------------

    /// Attach a detached neuron to the root node, assigning its id.
    pub fn add_neuron(&mut self, neuron: Neuron) -> NeuronId {
        let root = self.root;
        self.insert_neuron(root, neuron)
    }

    /// Attach a detached neuron to the given (sub)network node.
    pub fn add_neuron_to(&mut self, network: NetworkId, neuron: Neuron) -> Result<NeuronId> {
        if !self.networks.contains_key(&network) {
            return Err(NetworkError::NetworkNotFound(network));
        }
        Ok(self.insert_neuron(network, neuron))
    }

    fn insert_neuron(&mut self, network: NetworkId, mut neuron: Neuron) -> NeuronId {
        let id = NeuronId(self.neuron_ids.next());
        neuron.id = id;
        neuron.parent = network;
        neuron.fan_in.clear();
        neuron.fan_out.clear();
        if let Some(node) = self.networks.get_mut(&network) {
            node.neurons.push(id);
        }
        self.neurons.insert(id, neuron);
        self.refresh_time_type();
        self.refresh_priority_list();
        debug!(%id, %network, "neuron added");
        self.fire(NetworkEvent::NeuronAdded(id));
        id
    }

    /// Delete a neuron, severing all fan-in and fan-out synapses first.
    /// Deleting the last entity of a non-root subnetwork prunes that
    /// subnetwork from its parent, recursively.
    pub fn delete_neuron(&mut self, id: NeuronId) -> Result<()> {
        self.delete_neuron_impl(id, true)
    }

    fn delete_neuron_impl(&mut self, id: NeuronId, prune: bool) -> Result<()> {
        let Some(neuron) = self.neurons.get(&id) else {
            return Err(NetworkError::NeuronNotFound(id));
        };
        let attached: Vec<SynapseId> = neuron
            .fan_out
            .iter()
            .chain(neuron.fan_in.iter())
            .copied()
            .collect();
        for sid in attached {
            let _ = self.delete_synapse(sid);
        }

        let parent = match self.neurons.remove(&id) {
            Some(neuron) => neuron.parent,
            None => return Err(NetworkError::NeuronNotFound(id)),
        };
        if let Some(node) = self.networks.get_mut(&parent) {
            node.neurons.retain(|n| *n != id);
        }
        self.remove_neuron_from_groups(id);
        self.refresh_priority_list();
        self.refresh_time_type();
        debug!(%id, "neuron deleted");
        self.fire(NetworkEvent::NeuronRemoved(id));

        if prune {
            self.prune_if_empty(parent);
        }
        Ok(())
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&Neuron> {
        self.neurons.get(&id)
    }

    pub fn neuron_mut(&mut self, id: NeuronId) -> Option<&mut Neuron> {
        self.neurons.get_mut(&id)
    }

    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    /// Replace a neuron's update rule. Connections are preserved;
    /// rule-specific state and the neuron's bound defaults are reset, and
    /// spike responders on the fan-out are re-initialized to match the new
    /// rule's spiking capability.
    pub fn set_neuron_rule(&mut self, id: NeuronId, rule: NeuronRule) -> Result<()> {
        let neuron = self
            .neurons
            .get_mut(&id)
            .ok_or(NetworkError::NeuronNotFound(id))?;
        neuron.replace_rule(rule);
        let spiking = neuron.rule().is_spiking();
        let fan_out = neuron.fan_out.clone();
        for sid in fan_out {
            if let Some(synapse) = self.synapses.get_mut(&sid) {
                synapse.init_responder(spiking);
            }
        }
        self.refresh_time_type();
        self.fire(NetworkEvent::NeuronChanged(id));
        Ok(())
    }

    /// First neuron carrying the given label, if any.
    pub fn neuron_by_label(&self, label: &str) -> Option<NeuronId> {
        self.flat_neuron_ids().into_iter().find(|id| {
            self.neurons
                .get(id)
                .is_some_and(|n| n.label().eq_ignore_ascii_case(label))
        })
    }

    // ------------------------------------------------------------------
    // Synapses
    // ------------------------------------------------------------------

    /// Register a synapse whose endpoints must already live in this root
    /// network. A spike responder is attached iff the source rule is
    /// spiking. The synapse joins its source's parent node.
    pub fn add_synapse(&mut self, mut synapse: Synapse) -> Result<SynapseId> {
        let source = synapse.source;
        let target = synapse.target;
        let Some(source_neuron) = self.neurons.get(&source) else {
            return Err(NetworkError::NeuronNotFound(source));
        };
        if !self.neurons.contains_key(&target) {
            return Err(NetworkError::NeuronNotFound(target));
        }
        let parent = source_neuron.parent;
        let spiking = source_neuron.rule().is_spiking();

        let id = SynapseId(self.synapse_ids.next());
        synapse.id = id;
        synapse.parent = parent;
        synapse.init_responder(spiking);

        if let Some(neuron) = self.neurons.get_mut(&source) {
            neuron.fan_out.push(id);
        }
        if let Some(neuron) = self.neurons.get_mut(&target) {
            neuron.fan_in.push(id);
        }
        if let Some(node) = self.networks.get_mut(&parent) {
            node.synapses.push(id);
        }
        self.synapses.insert(id, synapse);
        debug!(%id, %source, %target, "synapse added");
        self.fire(NetworkEvent::SynapseAdded(id));
        Ok(id)
    }

    /// Convenience: connect two neurons with a default synapse.
    pub fn connect(&mut self, source: NeuronId, target: NeuronId) -> Result<SynapseId> {
        self.add_synapse(Synapse::new(source, target))
    }

    /// Delete a synapse, unregistering it from both endpoints.
    pub fn delete_synapse(&mut self, id: SynapseId) -> Result<()> {
        let synapse = self
            .synapses
            .remove(&id)
            .ok_or(NetworkError::SynapseNotFound(id))?;
        if let Some(neuron) = self.neurons.get_mut(&synapse.source) {
            neuron.fan_out.retain(|s| *s != id);
        }
        if let Some(neuron) = self.neurons.get_mut(&synapse.target) {
            neuron.fan_in.retain(|s| *s != id);
        }
        if let Some(node) = self.networks.get_mut(&synapse.parent) {
            node.synapses.retain(|s| *s != id);
        }
        self.remove_synapse_from_groups(id);
        debug!(%id, "synapse deleted");
        self.fire(NetworkEvent::SynapseRemoved(id));
        Ok(())
    }

    pub fn synapse(&self, id: SynapseId) -> Option<&Synapse> {
        self.synapses.get(&id)
    }

    pub fn synapse_mut(&mut self, id: SynapseId) -> Option<&mut Synapse> {
        self.synapses.get_mut(&id)
    }

    pub fn synapse_count(&self) -> usize {
        self.synapses.len()
    }

    /// Replace a synapse's learning rule in place.
    pub fn set_synapse_rule(&mut self, id: SynapseId, rule: SynapseRule) -> Result<()> {
        let synapse = self
            .synapses
            .get_mut(&id)
            .ok_or(NetworkError::SynapseNotFound(id))?;
        synapse.set_rule(rule);
        self.fire(NetworkEvent::SynapseChanged(id));
        Ok(())
    }

    /// The synapse from `source` to `target`, if one exists.
    pub fn synapse_between(&self, source: NeuronId, target: NeuronId) -> Option<SynapseId> {
        let neuron = self.neurons.get(&source)?;
        neuron
            .fan_out
            .iter()
            .copied()
            .find(|sid| self.synapses.get(sid).is_some_and(|s| s.target == target))
    }

    // ------------------------------------------------------------------
    // Subnetworks
    // ------------------------------------------------------------------

    pub fn root_id(&self) -> NetworkId {
        self.root
    }

    /// Add a subnetwork under the root node.
    pub fn add_network(&mut self) -> NetworkId {
        let root = self.root;
        match self.add_network_to(root) {
            Ok(id) => id,
            // The root node always exists.
            Err(_) => unreachable!("root network node missing"),
        }
    }

    /// Add a subnetwork under the given node.
    pub fn add_network_to(&mut self, parent: NetworkId) -> Result<NetworkId> {
        if !self.networks.contains_key(&parent) {
            return Err(NetworkError::NetworkNotFound(parent));
        }
        let id = NetworkId(self.network_ids.next());
        self.networks.insert(id, Network::new(id, Some(parent)));
        if let Some(node) = self.networks.get_mut(&parent) {
            node.subnetworks.push(id);
        }
        debug!(%id, %parent, "subnetwork added");
        self.fire(NetworkEvent::SubnetworkAdded(id));
        Ok(id)
    }

    /// Delete a subnetwork and everything it contains, recursively.
    pub fn delete_network(&mut self, id: NetworkId) -> Result<()> {
        if id == self.root {
            return Err(NetworkError::CannotDeleteRoot);
        }
        if !self.networks.contains_key(&id) {
            return Err(NetworkError::NetworkNotFound(id));
        }
        let parent = self.networks.get(&id).and_then(|n| n.parent);
        self.delete_network_inner(id);
        if let Some(parent) = parent {
            self.prune_if_empty(parent);
        }
        Ok(())
    }

    fn delete_network_inner(&mut self, id: NetworkId) {
        while let Some(nid) = self
            .networks
            .get(&id)
            .and_then(|n| n.neurons.first().copied())
        {
            let _ = self.delete_neuron_impl(nid, false);
        }
        while let Some(cid) = self
            .networks
            .get(&id)
            .and_then(|n| n.subnetworks.first().copied())
        {
            self.delete_network_inner(cid);
        }
        if let Some(node) = self.networks.remove(&id) {
            if let Some(pid) = node.parent {
                if let Some(parent) = self.networks.get_mut(&pid) {
                    parent.subnetworks.retain(|c| *c != id);
                }
            }
        }
        debug!(%id, "subnetwork deleted");
        self.fire(NetworkEvent::SubnetworkRemoved(id));
    }

    /// Walk upward deleting nodes emptied by an entity removal.
    fn prune_if_empty(&mut self, start: NetworkId) {
        let mut current = start;
        while current != self.root {
            let Some(node) = self.networks.get(&current) else {
                return;
            };
            if !node.is_empty() {
                return;
            }
            let parent = node.parent;
            self.delete_network_inner(current);
            match parent {
                Some(parent) => current = parent,
                None => return,
            }
        }
    }

    pub fn network(&self, id: NetworkId) -> Option<&Network> {
        self.networks.get(&id)
    }

    pub fn network_count(&self) -> usize {
        self.networks.len()
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    pub fn add_group(&mut self, label: impl Into<String>) -> GroupId {
        let id = GroupId(self.group_ids.next());
        self.groups.insert(id, Group::new(id, label));
        self.group_order.push(id);
        self.fire(NetworkEvent::GroupAdded(id));
        id
    }

    pub fn delete_group(&mut self, id: GroupId) -> Result<()> {
        if self.groups.remove(&id).is_none() {
            return Err(NetworkError::GroupNotFound(id));
        }
        self.group_order.retain(|g| *g != id);
        self.fire(NetworkEvent::GroupRemoved(id));
        Ok(())
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn group_ids(&self) -> &[GroupId] {
        &self.group_order
    }

    pub fn add_neuron_to_group(&mut self, group: GroupId, neuron: NeuronId) -> Result<()> {
        if !self.neurons.contains_key(&neuron) {
            return Err(NetworkError::NeuronNotFound(neuron));
        }
        let entry = self
            .groups
            .get_mut(&group)
            .ok_or(NetworkError::GroupNotFound(group))?;
        if !entry.neurons.contains(&neuron) {
            entry.neurons.push(neuron);
        }
        Ok(())
    }

    pub fn add_synapse_to_group(&mut self, group: GroupId, synapse: SynapseId) -> Result<()> {
        if !self.synapses.contains_key(&synapse) {
            return Err(NetworkError::SynapseNotFound(synapse));
        }
        let entry = self
            .groups
            .get_mut(&group)
            .ok_or(NetworkError::GroupNotFound(group))?;
        if !entry.synapses.contains(&synapse) {
            entry.synapses.push(synapse);
        }
        Ok(())
    }

    fn remove_neuron_from_groups(&mut self, id: NeuronId) {
        let emptied: Vec<GroupId> = self
            .group_order
            .iter()
            .copied()
            .filter(|gid| {
                let Some(group) = self.groups.get_mut(gid) else {
                    return false;
                };
                group.remove_neuron(id);
                group.is_empty()
            })
            .collect();
        for gid in emptied {
            let _ = self.delete_group(gid);
        }
    }

    fn remove_synapse_from_groups(&mut self, id: SynapseId) {
        let emptied: Vec<GroupId> = self
            .group_order
            .iter()
            .copied()
            .filter(|gid| {
                let Some(group) = self.groups.get_mut(gid) else {
                    return false;
                };
                group.remove_synapse(id);
                group.is_empty()
            })
            .collect();
        for gid in emptied {
            let _ = self.delete_group(gid);
        }
    }

    // ------------------------------------------------------------------
    // Flat views
    // ------------------------------------------------------------------

    /// All neurons reachable from the root, depth-first, in insertion
    /// order within each node.
    pub fn flat_neuron_ids(&self) -> Vec<NeuronId> {
        let mut out = Vec::with_capacity(self.neurons.len());
        self.collect_neurons(self.root, &mut out);
        out
    }

    fn collect_neurons(&self, node: NetworkId, out: &mut Vec<NeuronId>) {
        if let Some(network) = self.networks.get(&node) {
            out.extend_from_slice(&network.neurons);
            for &child in &network.subnetworks {
                self.collect_neurons(child, out);
            }
        }
    }

    /// All synapses reachable from the root, depth-first.
    pub fn flat_synapse_ids(&self) -> Vec<SynapseId> {
        let mut out = Vec::with_capacity(self.synapses.len());
        self.collect_synapses(self.root, &mut out);
        out
    }

    fn collect_synapses(&self, node: NetworkId, out: &mut Vec<SynapseId>) {
        if let Some(network) = self.networks.get(&node) {
            out.extend_from_slice(&network.synapses);
            for &child in &network.subnetworks {
                self.collect_synapses(child, out);
            }
        }
    }

    /// All subnetwork ids (the root excluded), depth-first.
    pub fn flat_network_ids(&self) -> Vec<NetworkId> {
        let mut out = Vec::new();
        self.collect_networks(self.root, &mut out);
        out
    }

    fn collect_networks(&self, node: NetworkId, out: &mut Vec<NetworkId>) {
        if let Some(network) = self.networks.get(&node) {
            for &child in &network.subnetworks {
                out.push(child);
                self.collect_networks(child, out);
            }
        }
    }

    // ------------------------------------------------------------------
    // Bulk edits
    // ------------------------------------------------------------------

    /// Set every neuron's activation to zero (clamped neurons keep their
    /// value).
    pub fn clear_activations(&mut self) {
        self.set_activations_uniform(0.0);
    }

    pub fn set_activations_uniform(&mut self, value: f64) {
        for id in self.flat_neuron_ids() {
            if let Some(neuron) = self.neurons.get_mut(&id) {
                neuron.set_activation(value);
            }
        }
    }

    /// Apply activations positionally in flat order, stopping at the
    /// shorter of the two lists.
    pub fn set_activations(&mut self, values: &[f64]) {
        for (id, value) in self.flat_neuron_ids().into_iter().zip(values) {
            if let Some(neuron) = self.neurons.get_mut(&id) {
                neuron.set_activation(*value);
            }
        }
    }

    /// Current activations in flat order.
    pub fn activations(&self) -> Vec<f64> {
        self.flat_neuron_ids()
            .into_iter()
            .filter_map(|id| self.neurons.get(&id).map(|n| n.activation()))
            .collect()
    }

    pub fn set_weights_uniform(&mut self, value: f64) {
        for synapse in self.synapses.values_mut() {
            synapse.set_strength(value);
        }
    }

    /// Randomize every neuron's activation from the given source, clipped
    /// to each neuron's bounds.
    pub fn randomize_neurons(&mut self, randomizer: &mut Randomizer) {
        for neuron in self.neurons.values_mut() {
            let value = randomizer.sample();
            neuron.set_activation(neuron.clip(value));
        }
    }

    /// Randomize every synapse's strength from the given source, clipped
    /// to each synapse's bounds.
    pub fn randomize_weights(&mut self, randomizer: &mut Randomizer) {
        for synapse in self.synapses.values_mut() {
            let value = randomizer.sample();
            synapse.set_strength(synapse.clip(value));
        }
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    pub fn add_listener(&mut self, listener: Box<dyn NetworkListener>) {
        self.listeners.push(listener);
    }

    fn fire(&mut self, event: NetworkEvent) {
        if self.listeners.is_empty() {
            return;
        }
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            events::dispatch(listener.as_mut(), event);
        }
        self.listeners = listeners;
    }
}

impl Default for RootNetwork {
    fn default() -> Self {
        Self::new()
    }
}
