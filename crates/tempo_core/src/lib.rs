//! Tempo Core
//!
//! The value layer underneath the tween sequencer:
//!
//! - **Interpolation**: how a value of a given type blends between a start
//!   and an end (linear for numbers and colors, a single switch for booleans)
//! - **Bindings**: accessor/mutator pairs onto values owned by someone else
//! - **Slots**: shared value cells, and a named store of them that is passed
//!   around as an explicit context instead of living in a global registry
//!
//! # Example
//!
//! ```rust
//! use tempo_core::{Interpolate, Slot};
//!
//! let alpha = Slot::new(0.0f32);
//! let mut binding = alpha.binding();
//!
//! binding.set(0.0f32.lerp(&1.0, 0.25));
//! assert_eq!(alpha.get(), 0.25);
//! ```

pub mod binding;
pub mod error;
pub mod slots;
pub mod time;
pub mod values;

pub use binding::{Binding, Slot};
pub use error::{Result, TweenError};
pub use slots::{SlotId, SlotStore, SlotValue};
pub use time::seconds;
pub use values::{interpolate, Color, Interpolate, Interpolator};
