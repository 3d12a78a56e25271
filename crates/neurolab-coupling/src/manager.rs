// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! The coupling manager: registry, bulk wiring helpers and the two-phase
//! per-tick update.

use tracing::{debug, info, warn};

use crate::attribute::ContainerRef;
use crate::coupling::{Consumer, Coupling, Producer};
use crate::error::Result;

/// Owns every coupling of a workspace and drives their per-tick update.
#[derive(Default)]
pub struct CouplingManager {
    couplings: Vec<Coupling>,
}

impl CouplingManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn couplings(&self) -> &[Coupling] {
        &self.couplings
    }

    pub fn len(&self) -> usize {
        self.couplings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.couplings.is_empty()
    }

    /// Register a coupling. An existing coupling on the same consumer is
    /// replaced: one attribute having several sources makes no sense.
    pub fn add_coupling(&mut self, coupling: Coupling) {
        let identity = {
            let (ptr, key) = coupling.consumer().identity();
            (ptr, key.to_owned())
        };
        let had = self.couplings.len();
        self.couplings.retain(|existing| {
            let (ptr, key) = existing.consumer().identity();
            (ptr, key) != (identity.0, identity.1.as_str())
        });
        if self.couplings.len() != had {
            warn!(consumer = %coupling.consumer().description(), "replacing existing coupling on consumer");
        }
        info!(coupling = %coupling.description(), "coupling added");
        self.couplings.push(coupling);
    }

    /// Create and register a coupling; fails on mismatched kinds without
    /// registering anything.
    pub fn couple(&mut self, producer: Producer, consumer: Consumer) -> Result<()> {
        let coupling = Coupling::new(producer, consumer)?;
        self.add_coupling(coupling);
        Ok(())
    }

    /// Best-effort variant of [`couple`](Self::couple): a type mismatch is
    /// skipped silently and reported as `false`.
    pub fn try_couple(&mut self, producer: Producer, consumer: Consumer) -> bool {
        match Coupling::new(producer, consumer) {
            Ok(coupling) => {
                self.add_coupling(coupling);
                true
            }
            // Construction can only fail on a kind mismatch.
            Err(_) => false,
        }
    }

    /// Couple each producer to every consumer of the same kind; the first
    /// mismatched pair aborts with an error.
    pub fn couple_one_to_many(
        &mut self,
        producers: &[Producer],
        consumers: &[Consumer],
    ) -> Result<()> {
        for producer in producers {
            for consumer in consumers {
                self.couple(producer.clone(), consumer.clone())?;
            }
        }
        Ok(())
    }

    /// Best-effort one-to-many wiring; mismatches are skipped. Returns the
    /// number of couplings made.
    pub fn try_one_to_many(&mut self, producers: &[Producer], consumers: &[Consumer]) -> usize {
        let mut made = 0;
        for producer in producers {
            for consumer in consumers {
                if self.try_couple(producer.clone(), consumer.clone()) {
                    made += 1;
                }
            }
        }
        made
    }

    /// Zip producers with consumers by position, stopping at the shorter
    /// list; the first mismatched pair aborts with an error.
    pub fn couple_one_to_one(
        &mut self,
        producers: &[Producer],
        consumers: &[Consumer],
    ) -> Result<()> {
        for (producer, consumer) in producers.iter().zip(consumers) {
            self.couple(producer.clone(), consumer.clone())?;
        }
        Ok(())
    }

    /// Best-effort positional wiring; mismatches are skipped. Returns the
    /// number of couplings made.
    pub fn try_one_to_one(&mut self, producers: &[Producer], consumers: &[Consumer]) -> usize {
        let mut made = 0;
        for (producer, consumer) in producers.iter().zip(consumers) {
            if self.try_couple(producer.clone(), consumer.clone()) {
                made += 1;
            }
        }
        made
    }

    /// Remove the coupling feeding the given consumer, if any.
    pub fn remove_coupling(&mut self, consumer: &Consumer) {
        let (ptr, key) = consumer.identity();
        let key = key.to_owned();
        self.couplings.retain(|existing| {
            let (eptr, ekey) = existing.consumer().identity();
            (eptr, ekey) != (ptr, key.as_str())
        });
    }

    /// Remove every coupling with an endpoint on the given container.
    pub fn remove_attached(&mut self, container: &ContainerRef) {
        let target = std::sync::Arc::as_ptr(container) as *const () as usize;
        self.couplings.retain(|existing| {
            let (consumer_ptr, _) = existing.consumer().identity();
            let producer_ptr = existing.producer().container_identity();
            consumer_ptr != target && producer_ptr != target
        });
    }

    pub fn clear(&mut self) {
        self.couplings.clear();
    }

    /// The per-tick coupling update: buffer **all** couplings, then flush
    /// **all** of them. A producer changing value mid-phase can never
    /// split the consumers of one tick.
    pub fn update_all(&mut self) {
        debug!(count = self.couplings.len(), "updating couplings");
        for coupling in &mut self.couplings {
            coupling.set_buffer();
        }
        for coupling in &mut self.couplings {
            coupling.update();
        }
    }
}
