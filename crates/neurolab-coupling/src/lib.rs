// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Neurolab Coupling
//!
//! The attribute / producer / consumer subsystem: lets heterogeneous
//! simulation components exchange typed scalar values once per global
//! tick.
//!
//! - **Attributes**: a container type declares a static descriptor list
//!   (key, kind, access) instead of being reflection-scanned; the coupling
//!   layer resolves descriptors by key.
//! - **Producers / Consumers**: typed read/write endpoints bound to a
//!   shared container.
//! - **Couplings**: one producer paired with one consumer of identical
//!   kind, with a one-slot buffer. The manager fills every buffer before
//!   flushing any of them, so consumers of one producer always agree
//!   within a tick.
//! - **Workspace / updater**: components update (serially or on a thread
//!   pool behind a barrier), then couplings flush, then listeners fire.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod attribute;
pub mod config;
pub mod coupling;
pub mod error;
pub mod manager;
pub mod updater;
pub mod workspace;

pub use attribute::{
    container_ref, AttributeAccess, AttributeContainer, AttributeDescriptor, AttributeKind,
    AttributeValue, ContainerRef,
};
pub use config::WorkspaceConfig;
pub use coupling::{
    consumer, consumers_from, producer, producers_from, Consumer, Coupling, Producer,
};
pub use error::{CouplingError, Result};
pub use manager::CouplingManager;
pub use updater::{UpdateMode, UpdaterListener, WorkspaceUpdater};
pub use workspace::{ComponentRef, Workspace, WorkspaceComponent};
