// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for coupling creation and attribute resolution.
//!
//! Both errors are raised at wiring time; the per-tick buffer/flush path
//! never fails.

use thiserror::Error;

use crate::attribute::AttributeKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouplingError {
    /// Producer and consumer kinds differ; nothing was registered. The
    /// `try_*` wiring variants swallow exactly this error.
    #[error("producer type {producer:?} does not match consumer type {consumer:?}")]
    TypeMismatch {
        producer: AttributeKind,
        consumer: AttributeKind,
    },

    /// The requested attribute key is not declared by the container.
    #[error("container '{container}' declares no attribute '{key}'")]
    UnknownAttribute { container: String, key: String },

    /// The attribute exists but does not support the requested direction.
    #[error("attribute '{key}' on '{container}' is not {direction}")]
    WrongDirection {
        container: String,
        key: String,
        direction: &'static str,
    },
}

pub type Result<T> = core::result::Result<T, CouplingError>;
