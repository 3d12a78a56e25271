// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Attribute containers and their descriptor registry.
//!
//! Any object can expose named, typed, gettable/settable attributes by
//! implementing [`AttributeContainer`]: it declares a descriptor list at
//! compile time and serves reads/writes by key. No runtime scanning is
//! involved; discovery is a walk over the declared descriptors.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// The typed value universe couplings can carry. There is no implicit
/// conversion between kinds anywhere in the subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Double(f64),
    DoubleArray(Vec<f64>),
    Text(String),
    Logical(bool),
}

impl AttributeValue {
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeValue::Double(_) => AttributeKind::Double,
            AttributeValue::DoubleArray(_) => AttributeKind::DoubleArray,
            AttributeValue::Text(_) => AttributeKind::Text,
            AttributeValue::Logical(_) => AttributeKind::Logical,
        }
    }

    /// The neutral value of a kind, used when a producer's attribute has
    /// disappeared from under a live coupling.
    pub fn default_of(kind: AttributeKind) -> AttributeValue {
        match kind {
            AttributeKind::Double => AttributeValue::Double(0.0),
            AttributeKind::DoubleArray => AttributeValue::DoubleArray(Vec::new()),
            AttributeKind::Text => AttributeValue::Text(String::new()),
            AttributeKind::Logical => AttributeValue::Logical(false),
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            AttributeValue::Double(v) => Some(*v),
            _ => None,
        }
    }
}

/// Runtime type tag of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    Double,
    DoubleArray,
    Text,
    Logical,
}

/// Which coupling endpoints an attribute supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeAccess {
    Read,
    Write,
    ReadWrite,
}

impl AttributeAccess {
    pub fn readable(self) -> bool {
        matches!(self, AttributeAccess::Read | AttributeAccess::ReadWrite)
    }

    pub fn writable(self) -> bool {
        matches!(self, AttributeAccess::Write | AttributeAccess::ReadWrite)
    }
}

/// One declared attribute of a container type. Keys must be unique within
/// a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub key: &'static str,
    pub kind: AttributeKind,
    pub access: AttributeAccess,
}

impl AttributeDescriptor {
    pub const fn new(key: &'static str, kind: AttributeKind, access: AttributeAccess) -> Self {
        Self { key, kind, access }
    }
}

/// An object exposing named typed attributes to the coupling layer.
pub trait AttributeContainer: Send + Sync {
    /// Descriptive name surfaced in diagnostics and endpoint descriptions.
    fn container_name(&self) -> String;

    /// The declared attribute list. Duplicate keys are a contract
    /// violation (checked during discovery).
    fn descriptors(&self) -> Vec<AttributeDescriptor>;

    /// Read the current value of a declared readable attribute.
    fn read(&self, key: &str) -> Option<AttributeValue>;

    /// Write a value into a declared writable attribute. The coupling
    /// layer only calls this with the declared kind.
    fn write(&mut self, key: &str, value: AttributeValue);
}

/// Shared handle to an attribute container. Producers, consumers and the
/// owning component all hold clones of the same handle.
pub type ContainerRef = Arc<RwLock<dyn AttributeContainer>>;

/// Erase a concrete container into a shareable handle.
pub fn container_ref<C: AttributeContainer + 'static>(container: C) -> ContainerRef {
    Arc::new(RwLock::new(container))
}
