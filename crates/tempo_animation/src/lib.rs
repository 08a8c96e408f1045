//! Tempo Animation
//!
//! Sequential tween animations driven by a caller-supplied clock.
//!
//! # Features
//!
//! - **Sequencer**: [`TweenAnimation`] plays tweens strictly one after another
//! - **Tweens**: each [`Tween`] animates any number of properties concurrently,
//!   with per-property delay, duration and easing overrides
//! - **Easing**: a named easing table, including back, elastic and bounce
//!   families and CSS-style cubic beziers
//! - **Scripts**: [`AnimationScript`] describes a sequence as TOML, resolved
//!   against an [`AnimationContext`] of named slots and callbacks

pub mod context;
pub mod easing;
pub mod property;
pub mod script;
pub mod sequencer;
pub mod tween;

pub use context::{AnimationContext, CallbackRegistry, SharedCallback};
pub use easing::Easing;
pub use property::{AnimatedProperty, Callback, Property, PropertyTiming, Tweenable};
pub use script::{AnimationScript, PlayerConfig, PropertyDef, ScriptValue, SlotDef, StepDef};
pub use sequencer::{sequential_animation, AdvanceMode, BoxedProperty, TweenAnimation, TweenId};
pub use tween::Tween;
