// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Opaque entity identifiers.
//!
//! Ids are assigned by the owning [`crate::RootNetwork`] when an entity is
//! attached and are never reused within one network's lifetime.

use core::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a neuron in its root network's arena.
    NeuronId,
    "Neuron"
);
define_id!(
    /// Identifier of a synapse in its root network's arena.
    SynapseId,
    "Synapse"
);
define_id!(
    /// Identifier of a network node (the root network itself included).
    NetworkId,
    "Network"
);
define_id!(
    /// Identifier of a group.
    GroupId,
    "Group"
);

/// Monotonic id source, one per entity kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct IdSource {
    next: u64,
}

impl IdSource {
    pub(crate) fn next(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    /// Make sure future ids do not collide with an id restored from a
    /// snapshot.
    pub(crate) fn reserve(&mut self, used: u64) {
        self.next = self.next.max(used);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_prefix() {
        assert_eq!(NeuronId(4).to_string(), "Neuron_4");
        assert_eq!(SynapseId(1).to_string(), "Synapse_1");
    }

    #[test]
    fn test_id_source_monotonic() {
        let mut ids = IdSource::default();
        assert_eq!(ids.next(), 1);
        assert_eq!(ids.next(), 2);
        ids.reserve(10);
        assert_eq!(ids.next(), 11);
    }
}
