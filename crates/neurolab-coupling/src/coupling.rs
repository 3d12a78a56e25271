// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Producers, consumers and couplings.
//!
//! A coupling owns a one-slot buffer between its endpoints. `set_buffer`
//! reads the producer; a later, separate `update` pushes the slot into
//! the consumer. The manager drives these as two strict phases per tick,
//! which makes couplings insensitive to iteration order and to
//! interleaving with component updates.

use tracing::warn;

use crate::attribute::{AttributeKind, AttributeValue, ContainerRef};
use crate::error::{CouplingError, Result};

/// Typed read endpoint bound to a container attribute.
#[derive(Clone)]
pub struct Producer {
    container: ContainerRef,
    key: String,
    kind: AttributeKind,
    description: String,
}

impl Producer {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Identity of the backing container, for removal by container.
    pub(crate) fn container_identity(&self) -> usize {
        std::sync::Arc::as_ptr(&self.container) as *const () as usize
    }

    /// Read the producer's current value. A vanished attribute yields the
    /// kind's neutral value rather than failing the tick.
    pub fn value(&self) -> AttributeValue {
        match self.container.read().read(&self.key) {
            Some(value) => value,
            None => {
                warn!(key = %self.key, "producer attribute vanished; substituting default");
                AttributeValue::default_of(self.kind)
            }
        }
    }
}

impl std::fmt::Debug for Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Producer")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Typed write endpoint bound to a container attribute.
#[derive(Clone)]
pub struct Consumer {
    container: ContainerRef,
    key: String,
    kind: AttributeKind,
    description: String,
}

impl Consumer {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Push a value into the consumer. Callers guarantee the kind matches
    /// (enforced at coupling construction).
    pub fn set_value(&self, value: AttributeValue) {
        debug_assert_eq!(value.kind(), self.kind);
        self.container.write().write(&self.key, value);
    }

    /// Identity of the consumed attribute: container identity plus key.
    /// Used for the at-most-one-coupling-per-consumer rule.
    pub(crate) fn identity(&self) -> (usize, &str) {
        (
            std::sync::Arc::as_ptr(&self.container) as *const () as usize,
            &self.key,
        )
    }
}

impl std::fmt::Debug for Consumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consumer")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A typed, buffered link from one producer to one consumer, flushed once
/// per tick.
pub struct Coupling {
    producer: Producer,
    consumer: Consumer,
    buffer: Option<AttributeValue>,
}

impl Coupling {
    /// Pair a producer with a consumer. Fails with
    /// [`CouplingError::TypeMismatch`] when the kinds differ; nothing is
    /// registered on failure.
    pub fn new(producer: Producer, consumer: Consumer) -> Result<Self> {
        if producer.kind() != consumer.kind() {
            return Err(CouplingError::TypeMismatch {
                producer: producer.kind(),
                consumer: consumer.kind(),
            });
        }
        Ok(Self {
            producer,
            consumer,
            buffer: None,
        })
    }

    pub fn producer(&self) -> &Producer {
        &self.producer
    }

    pub fn consumer(&self) -> &Consumer {
        &self.consumer
    }

    /// Phase one: capture the producer's current value.
    pub fn set_buffer(&mut self) {
        self.buffer = Some(self.producer.value());
    }

    /// Phase two: flush the captured value into the consumer. A no-op if
    /// no buffer was captured since the last flush.
    pub fn update(&mut self) {
        if let Some(value) = self.buffer.take() {
            self.consumer.set_value(value);
        }
    }

    pub fn description(&self) -> String {
        format!(
            "{} > {}",
            self.producer.description(),
            self.consumer.description()
        )
    }
}

impl std::fmt::Debug for Coupling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coupling")
            .field("producer", &self.producer)
            .field("consumer", &self.consumer)
            .field("buffer", &self.buffer)
            .finish()
    }
}

fn descriptor_lookup(
    container: &ContainerRef,
    key: &str,
) -> Result<(String, AttributeKind, crate::attribute::AttributeAccess)> {
    let guard = container.read();
    let name = guard.container_name();
    let descriptors = guard.descriptors();
    debug_assert!(
        descriptors
            .iter()
            .map(|d| d.key)
            .collect::<std::collections::HashSet<_>>()
            .len()
            == descriptors.len(),
        "duplicate attribute keys on container '{name}'",
    );
    let descriptor = descriptors
        .iter()
        .find(|d| d.key == key)
        .ok_or_else(|| CouplingError::UnknownAttribute {
            container: name.clone(),
            key: key.to_owned(),
        })?;
    Ok((name, descriptor.kind, descriptor.access))
}

/// Resolve a single producer by attribute key.
pub fn producer(container: &ContainerRef, key: &str) -> Result<Producer> {
    let (name, kind, access) = descriptor_lookup(container, key)?;
    if !access.readable() {
        return Err(CouplingError::WrongDirection {
            container: name,
            key: key.to_owned(),
            direction: "producible",
        });
    }
    Ok(Producer {
        container: container.clone(),
        key: key.to_owned(),
        kind,
        description: format!("{name}:{key}"),
    })
}

/// Resolve a single consumer by attribute key.
pub fn consumer(container: &ContainerRef, key: &str) -> Result<Consumer> {
    let (name, kind, access) = descriptor_lookup(container, key)?;
    if !access.writable() {
        return Err(CouplingError::WrongDirection {
            container: name,
            key: key.to_owned(),
            direction: "consumable",
        });
    }
    Ok(Consumer {
        container: container.clone(),
        key: key.to_owned(),
        kind,
        description: format!("{name}:{key}"),
    })
}

/// All producers a container declares.
pub fn producers_from(container: &ContainerRef) -> Vec<Producer> {
    let descriptors = container.read().descriptors();
    descriptors
        .iter()
        .filter(|d| d.access.readable())
        .filter_map(|d| producer(container, d.key).ok())
        .collect()
}

/// All consumers a container declares.
pub fn consumers_from(container: &ContainerRef) -> Vec<Consumer> {
    let descriptors = container.read().descriptors();
    descriptors
        .iter()
        .filter(|d| d.access.writable())
        .filter_map(|d| consumer(container, d.key).ok())
        .collect()
}
