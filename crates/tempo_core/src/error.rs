//! Error types shared by the tempo crates

use thiserror::Error;

/// Errors raised while building or inspecting an animation
///
/// All of these are programmer errors detected at construction time.
/// Driving a sequencer with `update` never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// A delay, duration or tick length was negative, NaN or infinite
    #[error("Invalid {what}: {value} (must be a finite, non-negative number of seconds)")]
    InvalidTime { what: &'static str, value: f32 },

    /// A tween was modified after the sequencer activated it
    #[error("Tween step {0} is already active and can no longer be changed")]
    AlreadyActive(usize),

    /// No tween exists at the given index
    #[error("No tween step at index {0}")]
    UnknownStep(usize),

    /// An easing name did not match any entry of the easing table
    #[error("Unknown easing: {0}")]
    UnknownEasing(String),

    /// A slot name was not declared in the slot store
    #[error("Unknown slot: {0}")]
    UnknownSlot(String),

    /// A callback name was not registered in the callback registry
    #[error("Unknown callback: {0}")]
    UnknownCallback(String),

    /// A slot exists but holds a different value type
    #[error("Slot '{name}' holds a {found} value, expected {expected}")]
    SlotTypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A slot name was declared twice
    #[error("Slot already declared: {0}")]
    DuplicateSlot(String),
}

/// Result type for tempo operations
pub type Result<T> = std::result::Result<T, TweenError>;
