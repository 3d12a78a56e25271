// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Neurolab Engine
//!
//! Network entities and the tick scheduler:
//! - **Entities**: Neuron and Synapse arenas keyed by opaque ids; synapses
//!   reference their endpoints by id, neurons carry ordered fan-in/fan-out
//!   id lists.
//! - **Tree**: a RootNetwork is the unique root of a network/subnetwork
//!   tree; flat (recursive) and direct (immediate-children) views exist for
//!   every node.
//! - **Scheduler**: one discrete tick per `update()` call under one of
//!   three disciplines (buffered, priority-based, custom), with time-type
//!   tracking and per-tick input clearing.
//!
//! The numeric state machines live in `neurolab-neural`; this crate owns
//! topology, buffering and ordering guarantees.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod events;
pub mod group;
pub mod ids;
pub mod network;
pub mod neuron;
pub mod root;
pub mod snapshot;
pub mod synapse;

pub use error::{NetworkError, Result};
pub use events::{NetworkEvent, NetworkListener};
pub use group::Group;
pub use ids::{GroupId, NetworkId, NeuronId, SynapseId};
pub use network::Network;
pub use neuron::Neuron;
pub use root::{RootNetwork, UpdateMethod};
pub use snapshot::NetworkSnapshot;
pub use synapse::{Synapse, SynapseTemplate};
