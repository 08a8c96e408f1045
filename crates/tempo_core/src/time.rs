//! Conversions from textual/float seconds into `Duration`
//!
//! The sequencer API takes `std::time::Duration`, so negative time cannot be
//! expressed there. Floats coming from scripts or command lines pass through
//! here and are rejected instead of clamped.

use std::time::Duration;

use crate::error::{Result, TweenError};

/// Convert `value` seconds into a `Duration`
///
/// `what` names the quantity for the error message ("delay", "duration", ...).
/// Values too large for a `Duration` are rejected like negative ones.
pub fn seconds(what: &'static str, value: f32) -> Result<Duration> {
    if !value.is_finite() || value < 0.0 {
        return Err(TweenError::InvalidTime { what, value });
    }
    Duration::try_from_secs_f32(value).map_err(|_| TweenError::InvalidTime { what, value })
}
