// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for network edit operations.
//!
//! Structural invariant violations are programmer errors and fail fast at
//! the operation that caused them; the per-tick update path itself never
//! returns errors.

use thiserror::Error;

use crate::ids::{GroupId, NetworkId, NeuronId, SynapseId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("neuron not found: {0}")]
    NeuronNotFound(NeuronId),

    #[error("synapse not found: {0}")]
    SynapseNotFound(SynapseId),

    #[error("network not found: {0}")]
    NetworkNotFound(NetworkId),

    #[error("group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("the root network cannot be deleted")]
    CannotDeleteRoot,

    #[error("snapshot references unknown {kind} id {id}")]
    UnresolvedReference { kind: &'static str, id: u64 },
}

pub type Result<T> = core::result::Result<T, NetworkError>;
