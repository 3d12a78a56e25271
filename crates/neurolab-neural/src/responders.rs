// Copyright 2026 Neurolab Contributors
// SPDX-License-Identifier: Apache-2.0

//! Spike responders: convert a spiking source's discrete spike events into
//! a continuous postsynaptic value.
//!
//! A responder is attached to a synapse whose source rule is spiking; the
//! synapse's transmitted value becomes `responder value * strength`
//! instead of `source activation * strength`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SpikeResponder {
    /// Jump to `jump_height` on a spike, then decay toward `base_line`.
    JumpAndDecay {
        jump_height: f64,
        base_line: f64,
        decay_rate: f64,
        #[serde(default)]
        value: f64,
    },
    /// Hold `response_height` for `response_duration` after each spike.
    Step {
        response_height: f64,
        response_duration: f64,
        #[serde(default)]
        remaining: f64,
    },
}

impl SpikeResponder {
    pub fn jump_and_decay() -> Self {
        SpikeResponder::JumpAndDecay {
            jump_height: 1.0,
            base_line: 0.0,
            decay_rate: 0.1,
            value: 0.0,
        }
    }

    pub fn step() -> Self {
        SpikeResponder::Step {
            response_height: 1.0,
            response_duration: 1.0,
            remaining: 0.0,
        }
    }

    /// Advance the responder one tick and return the postsynaptic value.
    pub fn update(&mut self, spiked: bool, time_step: f64) -> f64 {
        match self {
            SpikeResponder::JumpAndDecay {
                jump_height,
                base_line,
                decay_rate,
                value,
            } => {
                if spiked {
                    *value = *jump_height;
                } else {
                    *value -= *decay_rate * (*value - *base_line) * time_step;
                }
                *value
            }
            SpikeResponder::Step {
                response_height,
                response_duration,
                remaining,
            } => {
                if spiked {
                    *remaining = *response_duration;
                }
                if *remaining > 0.0 {
                    *remaining -= time_step;
                    *response_height
                } else {
                    0.0
                }
            }
        }
    }

    /// Current value without advancing.
    pub fn value(&self) -> f64 {
        match self {
            SpikeResponder::JumpAndDecay { value, .. } => *value,
            SpikeResponder::Step {
                response_height,
                remaining,
                ..
            } => {
                if *remaining > 0.0 {
                    *response_height
                } else {
                    0.0
                }
            }
        }
    }

    /// Reset transient state, keeping parameters.
    pub fn clear(&mut self) {
        match self {
            SpikeResponder::JumpAndDecay { value, .. } => *value = 0.0,
            SpikeResponder::Step { remaining, .. } => *remaining = 0.0,
        }
    }
}

impl Default for SpikeResponder {
    fn default() -> Self {
        Self::jump_and_decay()
    }
}
