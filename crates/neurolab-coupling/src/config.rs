// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Workspace configuration.
//!
//! The updater's threading model is a deliberate, externally visible
//! switch: simulations that need reproducible single-threaded behavior
//! keep the default, batch runs opt into the parallel pool.

use serde::{Deserialize, Serialize};

use crate::updater::UpdateMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Component scheduling within a tick.
    pub update_mode: UpdateMode,
    /// Default integration step handed to newly created networks.
    pub default_time_step: f64,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            update_mode: UpdateMode::SingleThreaded,
            default_time_step: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_threaded() {
        let config = WorkspaceConfig::default();
        assert_eq!(config.update_mode, UpdateMode::SingleThreaded);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: WorkspaceConfig =
            serde_json::from_str(r#"{"update_mode":{"Parallel":{"threads":4}}}"#).unwrap();
        assert_eq!(config.update_mode, UpdateMode::Parallel { threads: 4 });
        assert_eq!(config.default_time_step, 0.1);
    }
}
